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
use syn::{Field, Fields, Index};

/// Source field with its declaration index and name.
///
/// For tuple structs `field_name` is the index as a string.
#[derive(Clone)]
pub struct SourceField<'a> {
    pub original_index: usize,
    pub field: &'a Field,
    pub field_name: String,
}

impl SourceField<'_> {
    /// Member access token, `name` or `0`.
    pub fn member(&self) -> TokenStream {
        match &self.field.ident {
            Some(ident) => quote! { #ident },
            None => {
                let index = Index::from(self.original_index);
                quote! { #index }
            }
        }
    }
}

/// Fields in declaration order.
pub fn source_fields(fields: &Fields) -> Vec<SourceField<'_>> {
    fields
        .iter()
        .enumerate()
        .map(|(idx, field)| SourceField {
            original_index: idx,
            field,
            field_name: match &field.ident {
                Some(ident) => ident.to_string().trim_start_matches("r#").to_string(),
                None => idx.to_string(),
            },
        })
        .collect()
}

/// Descriptors are cached per type in a static, which generic types cannot have.
pub fn reject_generics(ast: &syn::DeriveInput, derive: &str) -> syn::Result<()> {
    if ast.generics.params.is_empty() {
        return Ok(());
    }
    Err(syn::Error::new_spanned(
        &ast.generics,
        format!("{derive} does not support generic types"),
    ))
}
