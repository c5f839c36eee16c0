// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! The binding registry.
//!
//! [`BindingRegistry::bind`] walks a schema tree and a native type side by
//! side, checks that their shapes agree and caches a [`ClassBinding`] for every
//! record it meets. After warmup the codec only calls
//! [`BindingRegistry::lookup`] and the descriptor's field accessors.
//!
//! # Failed binds
//!
//! A failing walk aborts on the first error. Descriptors created before the
//! failure stay in the cache marked failed: [`lookup`] and [`is_bound`] ignore
//! them, and the next bind of that name replaces them with a fresh descriptor,
//! so the original error is reported again instead of being hidden by
//! idempotence. A descriptor still being walked by another thread is shared,
//! never replaced.
//!
//! [`lookup`]: BindingRegistry::lookup
//! [`is_bound`]: BindingRegistry::is_bound

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::config::Config;
use crate::error::Error;
use crate::native::{NativeKind, NativeType, NativeTyped};
use crate::resolver::class_binding::{find_property, ClassBinding};
use crate::resolver::converter::ConverterResolver;
use crate::resolver::enum_registry::{EnumCache, EnumRegistry};
use crate::schema::{RecordSchema, Schema, UnionSchema};

/// State of a single `bind` call.
struct BindWalk {
    /// Descriptors walked by this call by full name, validated on success.
    touched: HashMap<String, Arc<ClassBinding>>,
    depth: u32,
}

impl BindWalk {
    fn new() -> BindWalk {
        BindWalk {
            touched: HashMap::new(),
            depth: 0,
        }
    }
}

/// Cache of record bindings keyed by schema full name.
pub struct BindingRegistry {
    cache: DashMap<String, Arc<ClassBinding>>,
    converters: Arc<ConverterResolver>,
    enums: Arc<dyn EnumRegistry>,
    config: Config,
}

impl Default for BindingRegistry {
    fn default() -> Self {
        BindingRegistry {
            cache: DashMap::new(),
            converters: ConverterResolver::global(),
            enums: Arc::new(EnumCache::new()),
            config: Config::default(),
        }
    }
}

impl BindingRegistry {
    /// Uses `converters` instead of the process-wide [`ConverterResolver::global`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use fory_schema_core::resolver::binding::BindingRegistry;
    /// use fory_schema_core::resolver::converter::ConverterResolver;
    ///
    /// let registry = BindingRegistry::default()
    ///     .with_converters(Arc::new(ConverterResolver::with_builtin()));
    /// ```
    pub fn with_converters(mut self, converters: Arc<ConverterResolver>) -> Self {
        self.converters = converters;
        self
    }

    /// Sends enumeration bindings to `enums` instead of a private [`EnumCache`].
    pub fn with_enum_registry(mut self, enums: Arc<dyn EnumRegistry>) -> Self {
        self.enums = enums;
        self
    }

    /// Sets the maximum nesting depth of a single binding walk.
    ///
    /// Deeper schemas fail with [`Error::DepthExceed`]. Defaults to 64.
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Enables or disables matching `firstName` fields to `first_name` properties.
    pub fn snake_case_fallback(mut self, enabled: bool) -> Self {
        self.config.snake_case_fallback = enabled;
        self
    }

    /// Enables or disables the warning logged when a bound schema name is
    /// rebound to a different native type.
    pub fn warn_on_conflict(mut self, enabled: bool) -> Self {
        self.config.warn_on_conflict = enabled;
        self
    }

    #[inline(always)]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline(always)]
    pub fn converters(&self) -> &Arc<ConverterResolver> {
        &self.converters
    }

    #[inline(always)]
    pub fn enum_registry(&self) -> &Arc<dyn EnumRegistry> {
        &self.enums
    }

    /// Binds `T` against `schema`, see [`bind_native`](Self::bind_native).
    pub fn bind<T: NativeTyped>(&self, schema: &Schema) -> Result<Option<Arc<ClassBinding>>, Error> {
        self.bind_native(&T::native_type(), schema)
    }

    /// Checks that `native` fits `schema` and caches a descriptor for every
    /// record reachable from `schema`.
    ///
    /// Returns the root descriptor when `schema` is a record (or an optional
    /// record). Binding a schema whose descriptor is already cached returns it
    /// without walking again.
    pub fn bind_native(
        &self,
        native: &NativeType,
        schema: &Schema,
    ) -> Result<Option<Arc<ClassBinding>>, Error> {
        let mut walk = BindWalk::new();
        match self.walk(&mut walk, native, schema, &schema.display_name()) {
            Ok(root) => {
                for binding in walk.touched.values() {
                    binding.mark_validated();
                }
                Ok(root)
            }
            Err(err) => {
                for binding in walk.touched.values() {
                    binding.mark_failed();
                }
                Err(err)
            }
        }
    }

    /// Descriptor of the record named `full_name`, if it was bound successfully.
    #[inline(always)]
    pub fn lookup(&self, full_name: &str) -> Option<Arc<ClassBinding>> {
        self.cache
            .get(full_name)
            .filter(|binding| binding.is_validated())
            .map(|binding| binding.value().clone())
    }

    pub fn is_bound(&self, full_name: &str) -> bool {
        self.cache
            .get(full_name)
            .is_some_and(|binding| binding.is_validated())
    }

    /// Number of successfully bound records.
    pub fn len(&self) -> usize {
        self.cache
            .iter()
            .filter(|binding| binding.is_validated())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn walk(
        &self,
        w: &mut BindWalk,
        native: &NativeType,
        schema: &Schema,
        path: &str,
    ) -> Result<Option<Arc<ClassBinding>>, Error> {
        if w.depth >= self.config.max_depth {
            return Err(Error::depth_exceed(format!(
                "schema nesting exceeds max depth {}",
                self.config.max_depth
            ))
            .with_path(path));
        }
        w.depth += 1;
        let result = self.walk_node(w, native, schema, path);
        w.depth -= 1;
        result
    }

    fn walk_node(
        &self,
        w: &mut BindWalk,
        native: &NativeType,
        schema: &Schema,
        path: &str,
    ) -> Result<Option<Arc<ClassBinding>>, Error> {
        match schema {
            Schema::Record(record) | Schema::Error(record) => {
                self.bind_record(w, native, record, path).map(Some)
            }
            Schema::Array(array) => {
                let element = match native.kind() {
                    NativeKind::Collection {
                        element: Some(element),
                    } => element(),
                    NativeKind::Collection { element: None } => {
                        return Err(Error::missing_element_type(format!(
                            "collection {} does not declare an element type",
                            native.type_name()
                        ))
                        .with_path(path));
                    }
                    _ => return Err(mismatch(native, schema, path)),
                };
                self.walk(w, &element, array.items(), &format!("{path}[]"))?;
                Ok(None)
            }
            Schema::Map(map) => {
                let NativeKind::Dictionary { key, value } = native.kind() else {
                    return Err(mismatch(native, schema, path));
                };
                let key = key();
                if !key.is_text() {
                    return Err(Error::invalid_dictionary_key_type(format!(
                        "dictionary {} is keyed by {}, map keys are strings",
                        native.type_name(),
                        key.type_name()
                    ))
                    .with_path(path));
                }
                self.walk(w, &value(), map.values(), &format!("{path}{{}}"))?;
                Ok(None)
            }
            Schema::Enumeration(enumeration) => {
                self.enums
                    .register(enumeration, &native.unwrap_nullable())
                    .map_err(|e| e.with_path(path))?;
                Ok(None)
            }
            Schema::Union(union) => self.bind_union(w, native, union, path),
            Schema::Null
            | Schema::Boolean
            | Schema::Int
            | Schema::Long
            | Schema::Float
            | Schema::Double
            | Schema::Bytes
            | Schema::String
            | Schema::Fixed(_) => Ok(None),
        }
    }

    fn bind_record(
        &self,
        w: &mut BindWalk,
        native: &NativeType,
        record: &Arc<RecordSchema>,
        path: &str,
    ) -> Result<Arc<ClassBinding>, Error> {
        let class = match native.kind() {
            NativeKind::Class(class) => class.clone(),
            NativeKind::Scalar(_) | NativeKind::Collection { .. } | NativeKind::Dictionary { .. } => {
                return Err(mismatch(native, &Schema::Record(record.clone()), path));
            }
            NativeKind::NullableWrapper(_) => {
                return Err(Error::type_not_class(format!(
                    "record {} needs a class, found {}",
                    record.full_name(),
                    native
                ))
                .with_path(path));
            }
        };
        let full_name = record.full_name();
        if let Some(binding) = w.touched.get(full_name) {
            return Ok(binding.clone());
        }
        let fresh = || {
            Arc::new(ClassBinding::new(
                record.clone(),
                class.clone(),
                self.converters.clone(),
                self.config.snake_case_fallback,
            ))
        };
        let binding = match self.cache.entry(full_name.to_string()) {
            Entry::Occupied(mut entry) => {
                // leftovers of a failed walk are replaced, in-flight walks are shared
                if entry.get().is_failed() {
                    entry.insert(fresh());
                }
                entry.get().clone()
            }
            Entry::Vacant(entry) => entry.insert(fresh()).value().clone(),
        };

        if binding.native_key() != class.key() {
            if self.config.warn_on_conflict {
                log::warn!(
                    "{} is already bound to {}, ignoring rebind to {}",
                    full_name,
                    binding.native_key(),
                    class.key()
                );
            }
            return Ok(binding);
        }
        if binding.is_validated() {
            return Ok(binding);
        }

        log::debug!("binding record {} to {}", full_name, class.key());
        w.touched.insert(full_name.to_string(), binding.clone());
        for field in record.fields() {
            let field_path = format!("{path}.{}", field.name());
            let property = find_property(&class, field, self.config.snake_case_fallback)
                .ok_or_else(|| {
                    Error::missing_property(format!(
                        "{} has no property for field {} of {}",
                        class.key(),
                        field.name(),
                        full_name
                    ))
                    .with_path(&field_path)
                })?;
            self.walk(w, &property.native_type(), field.schema(), &field_path)?;
        }
        Ok(binding)
    }

    fn bind_union(
        &self,
        w: &mut BindWalk,
        native: &NativeType,
        union: &UnionSchema,
        path: &str,
    ) -> Result<Option<Arc<ClassBinding>>, Error> {
        if let Some(branch) = union.nullable_branch() {
            if native.is_reference_shape() || matches!(native.kind(), NativeKind::NullableWrapper(_))
            {
                return self.walk(w, &native.unwrap_nullable(), branch, path);
            }
        }
        for branch in union.branches() {
            if let Schema::Record(record) | Schema::Error(record) = branch {
                let full_name = record.full_name();
                if !self.is_bound(full_name) && !w.touched.contains_key(full_name) {
                    return Err(Error::unregistered_union_member(format!(
                        "union branch {full_name} must be bound before the union"
                    ))
                    .with_path(path));
                }
            }
        }
        Ok(None)
    }
}

#[cold]
fn mismatch(native: &NativeType, schema: &Schema, path: &str) -> Error {
    Error::type_kind_mismatch(format!(
        "{} cannot be bound to {} schema {}",
        native,
        schema.kind(),
        schema.display_name()
    ))
    .with_path(path)
}
