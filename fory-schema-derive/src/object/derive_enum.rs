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

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use crate::object::field_meta::parse_schema_meta;
use crate::util::reject_generics;

pub fn derive_schema_enum(ast: &DeriveInput) -> syn::Result<TokenStream> {
    reject_generics(ast, "SchemaEnum")?;
    let name = &ast.ident;
    let Data::Enum(data) = &ast.data else {
        return Err(syn::Error::new_spanned(
            name,
            "SchemaEnum can only be derived for enums",
        ));
    };

    let mut idents = Vec::with_capacity(data.variants.len());
    let mut symbols = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "SchemaEnum variants must not carry data",
            ));
        }
        let meta = parse_schema_meta(&variant.attrs)?;
        idents.push(&variant.ident);
        symbols.push(meta.rename.unwrap_or_else(|| variant.ident.to_string()));
    }

    Ok(quote! {
        impl #name {
            /// Schema symbol of this variant.
            pub fn schema_symbol(&self) -> &'static str {
                match self {
                    #(Self::#idents => #symbols,)*
                }
            }

            /// Variant named by the schema symbol `symbol`.
            pub fn from_schema_symbol(symbol: &str) -> ::std::option::Option<Self> {
                match symbol {
                    #(#symbols => ::std::option::Option::Some(Self::#idents),)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl ::fory_schema_core::native::NativeTyped for #name {
            fn native_type() -> ::fory_schema_core::native::NativeType {
                ::fory_schema_core::native::NativeType::scalar::<#name>(
                    ::fory_schema_core::native::ScalarKind::Enum {
                        symbols: &[#(#symbols),*],
                    },
                )
            }
        }
    })
}
