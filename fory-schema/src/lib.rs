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

//! # Fory Schema
//!
//! Binds declarative schemas (records, arrays, maps, unions, enumerations and
//! scalars) to native Rust types so that an encoder/decoder can read and write
//! native values according to a schema without rediscovering the structure on
//! every call.
//!
//! ## Key Features
//!
//! - **One walk per schema**: [`BindingRegistry::bind`] checks the schema and
//!   the native type once and caches a [`ClassBinding`] per record full name
//! - **Early diagnostics**: shape mismatches fail the bind with the schema path
//!   of the offending node
//! - **Optional fields**: `[null, X]` unions bind like `X` against `Option<T>`
//!   and class types
//! - **Extensible conversions**: scalar converters and array adapters are
//!   registered once and resolved on the hot path
//!
//! ## Binding a record
//!
//! ```rust
//! use fory_schema::{BindingRegistry, Field, Schema, SchemaEnum, SchemaObject};
//!
//! #[derive(SchemaObject)]
//! struct Person {
//!     name: String,
//!     age: i32,
//!     address: Option<Address>,
//!     mood: Mood,
//! }
//!
//! #[derive(SchemaObject)]
//! struct Address {
//!     street: String,
//! }
//!
//! #[derive(SchemaEnum)]
//! enum Mood {
//!     Happy,
//!     Grumpy,
//! }
//!
//! let address = Schema::record("example.Address", vec![Field::new("street", Schema::String)]);
//! let person = Schema::record(
//!     "example.Person",
//!     vec![
//!         Field::new("name", Schema::String),
//!         Field::new("age", Schema::Int),
//!         Field::new("address", Schema::optional(address)),
//!         Field::new("mood", Schema::enumeration("example.Mood", ["Happy", "Grumpy"])),
//!     ],
//! );
//!
//! let registry = BindingRegistry::default();
//! registry.bind::<Person>(&person).unwrap();
//!
//! let binding = registry.lookup("example.Person").unwrap();
//! assert_eq!(binding.field("age").unwrap().property().name(), "age");
//! assert!(registry.is_bound("example.Address"));
//! ```
//!
//! ## Converters
//!
//! Converters adapt a schema scalar to a property type that is not the
//! scalar's natural Rust type. They are registered on the process-wide
//! [`ConverterResolver`] (or a private one passed with
//! [`BindingRegistry::with_converters`]) and looked up the first time a field
//! binding is requested.
//!
//! ```rust
//! use std::sync::Arc;
//! use fory_schema::{ConverterResolver, Schema, TypeKey, TypedConverter};
//!
//! struct Celsius(i32);
//!
//! let converters = ConverterResolver::new();
//! converters.register_default(Arc::new(TypedConverter::<i32, Celsius>::new(
//!     |c| Ok(c.0),
//!     |v| Ok(Celsius(*v)),
//! )));
//! assert!(converters
//!     .resolve_default(&Schema::Int, TypeKey::of::<Celsius>())
//!     .is_some());
//! ```
//!
//! Generated code refers to `fory_schema_core`, so crates using the derive
//! macros depend on `fory-schema-core` alongside this crate.

pub use fory_schema_core::{
    bail, ensure, AdapterFactory, ArrayAdapter, ArrayAdapterResolver, ArraySchema,
    BindingRegistry, ClassBinding, ClassInfo, Config, Converter, ConverterResolver, EnumCache,
    EnumRegistry, EnumSchema, Error, Field, FieldBinding, FixedSchema, ListAdapter, ListLike,
    MapSchema, Name, NativeKind, NativeType, NativeTyped, PropertyInfo, RecordSchema,
    ScalarKind, ScalarShape, Schema, SchemaKind, SchemaScalar, SchemaShape, TypeKey,
    TypedConverter, UnionSchema,
};
pub use fory_schema_derive::{SchemaEnum, SchemaObject};
