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

//! In-memory schema tree.
//!
//! Schemas arrive here already parsed and validated; this module only models
//! them. Named nodes (record, error, enum, fixed) are reference counted so the
//! same definition can appear at several places of a tree and be shared with
//! the binding cache without copying.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::types::SchemaKind;

/// Name of a named schema, split into namespace and simple name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Name {
    name: String,
    namespace: Option<String>,
    full_name: String,
}

impl Name {
    /// Creates a name. A dotted name is taken as a full name and split at the
    /// last dot.
    pub fn new(name: impl Into<String>) -> Name {
        let name = name.into();
        match name.rfind('.') {
            Some(idx) => {
                let namespace = name[..idx].to_string();
                let simple = name[idx + 1..].to_string();
                Name::with_namespace(simple, namespace)
            }
            None => Name {
                full_name: name.clone(),
                name,
                namespace: None,
            },
        }
    }

    pub fn with_namespace(name: impl Into<String>, namespace: impl Into<String>) -> Name {
        let name = name.into();
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Name {
                full_name: name.clone(),
                name,
                namespace: None,
            };
        }
        Name {
            full_name: format!("{namespace}.{name}"),
            name,
            namespace: Some(namespace),
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The globally unique key of the schema.
    #[inline(always)]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

/// A field declared by a record schema.
#[derive(Clone, Debug)]
pub struct Field {
    name: String,
    schema: Schema,
    aliases: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, schema: Schema) -> Field {
        Field {
            name: name.into(),
            schema,
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Field
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    #[inline(always)]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

/// Payload of record and error schemas.
#[derive(Debug)]
pub struct RecordSchema {
    name: Name,
    fields: Vec<Field>,
    positions: HashMap<String, usize>,
}

impl RecordSchema {
    pub fn new(name: Name, fields: Vec<Field>) -> RecordSchema {
        let positions = fields
            .iter()
            .enumerate()
            .map(|(idx, field)| (field.name.clone(), idx))
            .collect();
        RecordSchema {
            name,
            fields,
            positions,
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline(always)]
    pub fn full_name(&self) -> &str {
        self.name.full_name()
    }

    #[inline(always)]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Index of the field in declaration order.
    #[inline(always)]
    pub fn position(&self, field_name: &str) -> Option<usize> {
        self.positions.get(field_name).copied()
    }

    pub fn field(&self, field_name: &str) -> Option<&Field> {
        self.position(field_name).map(|idx| &self.fields[idx])
    }
}

#[derive(Debug)]
pub struct EnumSchema {
    name: Name,
    symbols: Vec<String>,
}

impl EnumSchema {
    pub fn new(name: Name, symbols: Vec<String>) -> EnumSchema {
        EnumSchema { name, symbols }
    }

    #[inline(always)]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline(always)]
    pub fn full_name(&self) -> &str {
        self.name.full_name()
    }

    #[inline(always)]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}

#[derive(Debug)]
pub struct FixedSchema {
    name: Name,
    size: usize,
}

impl FixedSchema {
    pub fn new(name: Name, size: usize) -> FixedSchema {
        FixedSchema { name, size }
    }

    #[inline(always)]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Array node. The optional adapter hint names a non-standard collection
/// strategy, see [`ArrayAdapterResolver`](crate::resolver::array_adapter::ArrayAdapterResolver).
#[derive(Clone, Debug)]
pub struct ArraySchema {
    items: Box<Schema>,
    adapter_hint: Option<String>,
}

impl ArraySchema {
    pub fn new(items: Schema) -> ArraySchema {
        ArraySchema {
            items: Box::new(items),
            adapter_hint: None,
        }
    }

    pub fn with_adapter_hint(mut self, hint: impl Into<String>) -> ArraySchema {
        self.adapter_hint = Some(hint.into());
        self
    }

    #[inline(always)]
    pub fn items(&self) -> &Schema {
        &self.items
    }

    #[inline(always)]
    pub fn adapter_hint(&self) -> Option<&str> {
        self.adapter_hint.as_deref()
    }
}

/// Map node; keys are always strings.
#[derive(Clone, Debug)]
pub struct MapSchema {
    values: Box<Schema>,
}

impl MapSchema {
    pub fn new(values: Schema) -> MapSchema {
        MapSchema {
            values: Box::new(values),
        }
    }

    #[inline(always)]
    pub fn values(&self) -> &Schema {
        &self.values
    }
}

#[derive(Clone, Debug)]
pub struct UnionSchema {
    branches: Vec<Schema>,
}

impl UnionSchema {
    pub fn new(branches: Vec<Schema>) -> UnionSchema {
        UnionSchema { branches }
    }

    #[inline(always)]
    pub fn branches(&self) -> &[Schema] {
        &self.branches
    }

    /// Returns the non-null branch of an optional-field union, i.e. a union
    /// with exactly two branches one of which is `null`.
    pub fn nullable_branch(&self) -> Option<&Schema> {
        match self.branches.as_slice() {
            [Schema::Null, other] | [other, Schema::Null] if !matches!(other, Schema::Null) => {
                Some(other)
            }
            _ => None,
        }
    }
}

/// A schema node.
#[derive(Clone, Debug)]
pub enum Schema {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
    Fixed(Arc<FixedSchema>),
    Record(Arc<RecordSchema>),
    Enumeration(Arc<EnumSchema>),
    Array(ArraySchema),
    Map(MapSchema),
    Union(UnionSchema),
    Error(Arc<RecordSchema>),
}

impl Schema {
    pub fn record(name: impl Into<String>, fields: Vec<Field>) -> Schema {
        Schema::Record(Arc::new(RecordSchema::new(Name::new(name), fields)))
    }

    pub fn error(name: impl Into<String>, fields: Vec<Field>) -> Schema {
        Schema::Error(Arc::new(RecordSchema::new(Name::new(name), fields)))
    }

    pub fn enumeration<I, S>(name: impl Into<String>, symbols: I) -> Schema
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols = symbols.into_iter().map(Into::into).collect();
        Schema::Enumeration(Arc::new(EnumSchema::new(Name::new(name), symbols)))
    }

    pub fn fixed(name: impl Into<String>, size: usize) -> Schema {
        Schema::Fixed(Arc::new(FixedSchema::new(Name::new(name), size)))
    }

    pub fn array(items: Schema) -> Schema {
        Schema::Array(ArraySchema::new(items))
    }

    pub fn array_with_hint(items: Schema, hint: impl Into<String>) -> Schema {
        Schema::Array(ArraySchema::new(items).with_adapter_hint(hint))
    }

    pub fn map(values: Schema) -> Schema {
        Schema::Map(MapSchema::new(values))
    }

    pub fn union(branches: Vec<Schema>) -> Schema {
        Schema::Union(UnionSchema::new(branches))
    }

    /// `[null, schema]`, the optional-field encoding.
    pub fn optional(schema: Schema) -> Schema {
        Schema::union(vec![Schema::Null, schema])
    }

    pub fn kind(&self) -> SchemaKind {
        match self {
            Schema::Null => SchemaKind::Null,
            Schema::Boolean => SchemaKind::Boolean,
            Schema::Int => SchemaKind::Int,
            Schema::Long => SchemaKind::Long,
            Schema::Float => SchemaKind::Float,
            Schema::Double => SchemaKind::Double,
            Schema::Bytes => SchemaKind::Bytes,
            Schema::String => SchemaKind::String,
            Schema::Fixed(_) => SchemaKind::Fixed,
            Schema::Record(_) => SchemaKind::Record,
            Schema::Enumeration(_) => SchemaKind::Enumeration,
            Schema::Array(_) => SchemaKind::Array,
            Schema::Map(_) => SchemaKind::Map,
            Schema::Union(_) => SchemaKind::Union,
            Schema::Error(_) => SchemaKind::Error,
        }
    }

    pub fn name(&self) -> Option<&Name> {
        match self {
            Schema::Fixed(s) => Some(s.name()),
            Schema::Record(s) | Schema::Error(s) => Some(s.name()),
            Schema::Enumeration(s) => Some(s.name()),
            _ => None,
        }
    }

    /// Full name of a named schema, `None` for anonymous kinds.
    pub fn full_name(&self) -> Option<&str> {
        self.name().map(Name::full_name)
    }

    /// Human readable name used in diagnostics.
    pub fn display_name(&self) -> String {
        match self.full_name() {
            Some(name) => name.to_string(),
            None => self.kind().to_string(),
        }
    }
}
