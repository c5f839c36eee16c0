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

//! Derive macros that classify user types for schema binding.
//!
//! - [`SchemaObject`](macro@SchemaObject) describes a struct as a class whose
//!   fields are properties.
//! - [`SchemaEnum`](macro@SchemaEnum) describes a fieldless enum as an
//!   enumeration scalar.
//!
//! Both implement `fory_schema_core::native::NativeTyped`, so the deriving
//! crate must depend on `fory-schema-core` (directly or through `fory-schema`).

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod object;
mod util;

/// Derive macro classifying a struct as a bindable class.
///
/// Every field becomes a property matched against record schema fields by
/// name. Field types must implement `NativeTyped` themselves.
///
/// Field attributes:
/// - `#[schema(rename = "givenName")]` matches the schema field `givenName`
/// - `#[schema(alias = "first")]` additional name, may be repeated
/// - `#[schema(converter = path::to::fn)]` explicit converter factory
/// - `#[schema(skip)]` hides the field
///
/// # Example
///
/// ```rust
/// use fory_schema_derive::SchemaObject;
///
/// #[derive(SchemaObject)]
/// struct Person {
///     #[schema(rename = "Name")]
///     name: String,
///     age: i32,
///     address: Option<Address>,
/// }
///
/// #[derive(SchemaObject)]
/// struct Address {
///     street: String,
///     city: String,
/// }
/// ```
#[proc_macro_derive(SchemaObject, attributes(schema))]
pub fn proc_macro_derive_schema_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    object::derive_schema_object(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive macro classifying a fieldless enum as an enumeration.
///
/// Variant names are the schema symbols unless renamed with
/// `#[schema(rename = "...")]`.
///
/// # Example
///
/// ```rust
/// use fory_schema_derive::SchemaEnum;
///
/// #[derive(SchemaEnum)]
/// enum Suit {
///     #[schema(rename = "SPADES")]
///     Spades,
///     Hearts,
/// }
///
/// assert_eq!(Suit::Spades.schema_symbol(), "SPADES");
/// ```
#[proc_macro_derive(SchemaEnum, attributes(schema))]
pub fn proc_macro_derive_schema_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    object::derive_schema_enum(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
