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

//! # Fory Schema Core
//!
//! The binding layer between schema trees and native Rust types. Given an
//! already-validated schema (records, arrays, maps, unions, enumerations and
//! scalars) and a native type, it checks that both shapes agree and caches
//! everything an encoder/decoder needs so that no schema walking happens on the
//! hot path.
//!
//! ## Architecture
//!
//! - **`schema`**: the schema tree handed over by the schema parser
//! - **`native`**: one-time classification of Rust types into class, collection,
//!   dictionary, scalar and nullable wrapper descriptors
//! - **`resolver::binding`**: the [`BindingRegistry`], which walks both trees and
//!   caches one [`ClassBinding`] per record full name
//! - **`resolver::class_binding`**: lazily computed per-field property and
//!   converter mappings
//! - **`resolver::converter`**: the append-only, process-wide converter list
//! - **`resolver::array_adapter`**: adapters for non-standard collections,
//!   selected by the hint carried by array schemas
//! - **`resolver::enum_registry`**: sink for enumeration bindings
//! - **`error`**: error handling
//!
//! User structs and enums are classified by `#[derive(SchemaObject)]` and
//! `#[derive(SchemaEnum)]` from the `fory-schema` crate.
//!
//! ## Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use fory_schema_core::{BindingRegistry, Error, Schema};
//!
//! let registry = BindingRegistry::default();
//! registry.bind::<Vec<i64>>(&Schema::array(Schema::Long)).unwrap();
//!
//! let scores = Schema::map(Schema::Double);
//! assert!(registry.bind::<HashMap<String, f64>>(&scores).is_ok());
//! assert!(matches!(
//!     registry.bind::<HashMap<u32, f64>>(&scores),
//!     Err(Error::InvalidDictionaryKeyType(_))
//! ));
//! ```

pub mod config;
pub mod error;
pub mod native;
pub mod resolver;
pub mod schema;
pub mod types;
pub mod util;

pub use config::Config;
pub use error::Error;
pub use native::{
    ClassInfo, NativeKind, NativeType, NativeTyped, PropertyInfo, ScalarKind, TypeKey,
};
pub use resolver::array_adapter::{
    AdapterFactory, ArrayAdapter, ArrayAdapterResolver, ListAdapter, ListLike,
};
pub use resolver::binding::BindingRegistry;
pub use resolver::class_binding::{ClassBinding, FieldBinding};
pub use resolver::converter::{
    Converter, ConverterResolver, ScalarShape, SchemaScalar, SchemaShape, TypedConverter,
};
pub use resolver::enum_registry::{EnumCache, EnumRegistry};
pub use schema::{
    ArraySchema, EnumSchema, Field, FixedSchema, MapSchema, Name, RecordSchema, Schema,
    UnionSchema,
};
pub use types::SchemaKind;
