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

//! Attribute parsing for `#[schema(...)]`.
//!
//! Supported keys:
//! - `rename = "name"`: name used to match schema fields or enum symbols
//! - `alias = "name"`: additional schema name, may be repeated
//! - `converter = path`: `fn() -> Arc<dyn Converter>` used instead of the
//!   default converter lookup
//! - `skip`: field is not visible to schemas

use syn::{Attribute, LitStr};

/// Parsed `#[schema(...)]` attributes of a field or variant.
#[derive(Default)]
pub struct SchemaMeta {
    pub rename: Option<String>,
    pub aliases: Vec<String>,
    pub converter: Option<syn::Path>,
    pub skip: bool,
}

pub fn parse_schema_meta(attrs: &[Attribute]) -> syn::Result<SchemaMeta> {
    let mut meta = SchemaMeta::default();

    for attr in attrs {
        if !attr.path().is_ident("schema") {
            continue;
        }

        attr.parse_nested_meta(|nested| {
            if nested.path.is_ident("rename") {
                let lit: LitStr = nested.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(syn::Error::new(lit.span(), "rename must not be empty"));
                }
                meta.rename = Some(lit.value());
            } else if nested.path.is_ident("alias") {
                let lit: LitStr = nested.value()?.parse()?;
                meta.aliases.push(lit.value());
            } else if nested.path.is_ident("converter") {
                meta.converter = Some(nested.value()?.parse()?);
            } else if nested.path.is_ident("skip") {
                meta.skip = true;
            } else {
                return Err(nested.error("unsupported schema attribute"));
            }
            Ok(())
        })?;
    }

    Ok(meta)
}
