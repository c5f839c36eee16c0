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

//! Bound class descriptors.
//!
//! A [`ClassBinding`] is created once per record schema full name and never
//! changes afterwards. The per-field mapping (which property, which converter)
//! is computed the first time a field is requested, because converters for a
//! field's type may only be registered after the record itself was bound.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

use crate::native::{ClassInfo, NativeType, PropertyInfo, TypeKey};
use crate::resolver::converter::{Converter, ConverterResolver};
use crate::schema::{Field, RecordSchema, Schema};
use crate::util::to_snake_case;

/// Finds the property a record field maps to.
///
/// Tried in order: the property's schema name, the snake_case form of the
/// field name (if enabled), the field's aliases and the property's aliases.
pub(crate) fn find_property<'c>(
    class: &'c ClassInfo,
    field: &Field,
    snake_case_fallback: bool,
) -> Option<&'c PropertyInfo> {
    if let Some(property) = class.property(field.name()) {
        return Some(property);
    }
    if snake_case_fallback {
        let snake = to_snake_case(field.name());
        if snake != field.name() {
            if let Some(property) = class.property(&snake) {
                return Some(property);
            }
        }
    }
    field
        .aliases()
        .iter()
        .find_map(|alias| class.property(alias))
        .or_else(|| class.property_by_alias(field.name()))
}

/// Mapping of one record field to a native property.
pub struct FieldBinding {
    position: usize,
    field: Field,
    property: PropertyInfo,
    converter: Option<Arc<dyn Converter>>,
}

impl FieldBinding {
    #[inline(always)]
    pub fn field_name(&self) -> &str {
        self.field.name()
    }

    /// Index of the field in the record's declaration order.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline(always)]
    pub fn schema(&self) -> &Schema {
        self.field.schema()
    }

    #[inline(always)]
    pub fn property(&self) -> &PropertyInfo {
        &self.property
    }

    pub fn property_type(&self) -> NativeType {
        self.property.native_type()
    }

    /// Converter adapting the schema value to the property, if one is needed.
    #[inline(always)]
    pub fn converter(&self) -> Option<&Arc<dyn Converter>> {
        self.converter.as_ref()
    }

    #[inline(always)]
    pub fn get<'a>(&self, obj: &'a dyn Any) -> Option<&'a dyn Any> {
        self.property.get(obj)
    }

    #[inline(always)]
    pub fn get_mut<'a>(&self, obj: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        self.property.get_mut(obj)
    }
}

impl fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("field", &self.field.name())
            .field("property", &self.property.name())
            .field("converter", &self.converter.as_ref().map(|c| c.name()))
            .finish()
    }
}

const WALKING: u8 = 0;
const VALIDATED: u8 = 1;
const FAILED: u8 = 2;

/// Cached match of a record schema against a native class.
pub struct ClassBinding {
    schema: Arc<RecordSchema>,
    class: Arc<ClassInfo>,
    converters: Arc<ConverterResolver>,
    snake_case_fallback: bool,
    fields: Box<[OnceLock<Option<FieldBinding>>]>,
    state: AtomicU8,
}

impl ClassBinding {
    pub(crate) fn new(
        schema: Arc<RecordSchema>,
        class: Arc<ClassInfo>,
        converters: Arc<ConverterResolver>,
        snake_case_fallback: bool,
    ) -> ClassBinding {
        let fields = (0..schema.fields().len())
            .map(|_| OnceLock::new())
            .collect();
        ClassBinding {
            schema,
            class,
            converters,
            snake_case_fallback,
            fields,
            state: AtomicU8::new(WALKING),
        }
    }

    #[inline(always)]
    pub fn full_name(&self) -> &str {
        self.schema.full_name()
    }

    #[inline(always)]
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    #[inline(always)]
    pub fn class(&self) -> &Arc<ClassInfo> {
        &self.class
    }

    #[inline(always)]
    pub fn native_key(&self) -> TypeKey {
        self.class.key()
    }

    /// Whether a binding walk over this descriptor completed.
    #[inline(always)]
    pub fn is_validated(&self) -> bool {
        self.state.load(Ordering::Acquire) == VALIDATED
    }

    /// Whether every walk over this descriptor so far has failed.
    #[inline(always)]
    pub fn is_failed(&self) -> bool {
        self.state.load(Ordering::Acquire) == FAILED
    }

    /// Validation is final: a concurrent walk failing later does not undo it.
    pub(crate) fn mark_validated(&self) {
        self.state.store(VALIDATED, Ordering::Release);
    }

    pub(crate) fn mark_failed(&self) {
        let _ = self
            .state
            .compare_exchange(WALKING, FAILED, Ordering::AcqRel, Ordering::Acquire);
    }

    /// Mapping of the field named `name`, computed on first request.
    pub fn field(&self, name: &str) -> Option<&FieldBinding> {
        self.field_at(self.schema.position(name)?)
    }

    /// Mapping of the field at `position` in declaration order.
    pub fn field_at(&self, position: usize) -> Option<&FieldBinding> {
        self.fields
            .get(position)?
            .get_or_init(|| self.compute(position))
            .as_ref()
    }

    /// All field mappings in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldBinding> + '_ {
        (0..self.fields.len()).filter_map(move |idx| self.field_at(idx))
    }

    /// Whether the mapping of the field at `position` has been computed yet.
    pub fn is_field_resolved(&self, position: usize) -> bool {
        self.fields
            .get(position)
            .is_some_and(|cell| cell.get().is_some())
    }

    fn compute(&self, position: usize) -> Option<FieldBinding> {
        let field = &self.schema.fields()[position];
        let property = *find_property(&self.class, field, self.snake_case_fallback)?;
        let converter = property.converter().or_else(|| {
            self.converters
                .resolve_default(field.schema(), property.native_type().key())
        });
        log::trace!(
            "{}.{} -> {}::{} (converter: {})",
            self.full_name(),
            field.name(),
            self.class.key(),
            property.name(),
            converter.as_ref().map_or("none", |c| c.name())
        );
        Some(FieldBinding {
            position,
            field: field.clone(),
            property,
            converter,
        })
    }
}

impl fmt::Debug for ClassBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassBinding")
            .field("schema", &self.full_name())
            .field("class", &self.class.key())
            .field("validated", &self.is_validated())
            .field("failed", &self.is_failed())
            .finish()
    }
}
