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
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Ident};

use crate::object::field_meta::parse_schema_meta;
use crate::util::{reject_generics, source_fields, SourceField};

pub fn derive_schema_object(ast: &DeriveInput) -> syn::Result<TokenStream> {
    reject_generics(ast, "SchemaObject")?;
    let name = &ast.ident;
    let Data::Struct(data) = &ast.data else {
        return Err(syn::Error::new_spanned(
            name,
            "SchemaObject can only be derived for structs, use SchemaEnum for enums",
        ));
    };

    let mut accessors = Vec::new();
    let mut properties = Vec::new();
    for field in source_fields(&data.fields) {
        let meta = parse_schema_meta(&field.field.attrs)?;
        if meta.skip {
            continue;
        }
        let (get_fn, get_mut_fn) = accessor_idents(&field);
        accessors.push(gen_accessors(name, &field, &get_fn, &get_mut_fn));

        let property_name = &field.field_name;
        let ty = &field.field.ty;
        let mut property = quote! {
            ::fory_schema_core::native::PropertyInfo::new(
                #property_name,
                <#ty as ::fory_schema_core::native::NativeTyped>::native_type,
                #get_fn,
                #get_mut_fn,
            )
        };
        if let Some(rename) = &meta.rename {
            property = quote! { #property.with_schema_name(#rename) };
        }
        if !meta.aliases.is_empty() {
            let aliases = &meta.aliases;
            property = quote! { #property.with_aliases(&[#(#aliases),*]) };
        }
        if let Some(converter) = &meta.converter {
            property = quote! { #property.with_converter(#converter) };
        }
        properties.push(property);
    }

    Ok(quote! {
        impl ::fory_schema_core::native::NativeTyped for #name {
            fn native_type() -> ::fory_schema_core::native::NativeType {
                static CLASS: ::std::sync::OnceLock<
                    ::std::sync::Arc<::fory_schema_core::native::ClassInfo>,
                > = ::std::sync::OnceLock::new();
                #(#accessors)*
                let info = CLASS.get_or_init(|| {
                    ::std::sync::Arc::new(::fory_schema_core::native::ClassInfo::new(
                        ::fory_schema_core::native::TypeKey::of::<#name>(),
                        ::std::vec![#(#properties),*],
                    ))
                });
                ::fory_schema_core::native::NativeType::class(info.clone())
            }
        }
    })
}

fn accessor_idents(field: &SourceField) -> (Ident, Ident) {
    (
        format_ident!("__get_{}", field.field_name),
        format_ident!("__get_mut_{}", field.field_name),
    )
}

fn gen_accessors(name: &Ident, field: &SourceField, get_fn: &Ident, get_mut_fn: &Ident) -> TokenStream {
    let member = field.member();
    quote! {
        #[allow(non_snake_case)]
        fn #get_fn(
            obj: &dyn ::std::any::Any,
        ) -> ::std::option::Option<&dyn ::std::any::Any> {
            obj.downcast_ref::<#name>()
                .map(|obj| &obj.#member as &dyn ::std::any::Any)
        }
        #[allow(non_snake_case)]
        fn #get_mut_fn(
            obj: &mut dyn ::std::any::Any,
        ) -> ::std::option::Option<&mut dyn ::std::any::Any> {
            obj.downcast_mut::<#name>()
                .map(|obj| &mut obj.#member as &mut dyn ::std::any::Any)
        }
    }
}
