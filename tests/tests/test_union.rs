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

use std::collections::HashMap;

use fory_schema_core::{BindingRegistry, Error, Field, Schema};
use fory_schema_derive::SchemaObject;

#[derive(SchemaObject)]
struct Address {
    street: String,
    zip: Option<i32>,
}

#[derive(SchemaObject)]
struct Phone {
    number: String,
}

#[derive(SchemaObject)]
struct Contact {
    name: String,
    address: Option<Address>,
    backup: Address,
}

fn address_schema() -> Schema {
    Schema::record(
        "Address",
        vec![
            Field::new("street", Schema::String),
            Field::new("zip", Schema::optional(Schema::Int)),
        ],
    )
}

fn phone_schema() -> Schema {
    Schema::record("Phone", vec![Field::new("number", Schema::String)])
}

#[test]
fn test_optional_record_against_class() {
    let registry = BindingRegistry::default();
    let root = registry
        .bind::<Address>(&Schema::optional(address_schema()))
        .unwrap()
        .unwrap();
    assert_eq!(root.full_name(), "Address");
    assert_eq!(registry.len(), 1);
    assert!(registry.is_bound("Address"));
}

#[test]
fn test_optional_record_against_option() {
    let registry = BindingRegistry::default();
    registry
        .bind::<Option<Address>>(&Schema::union(vec![address_schema(), Schema::Null]))
        .unwrap();
    assert!(registry.is_bound("Address"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_optional_fields() {
    let contact = Schema::record(
        "Contact",
        vec![
            Field::new("name", Schema::String),
            Field::new("address", Schema::optional(address_schema())),
            Field::new("backup", Schema::optional(address_schema())),
        ],
    );
    let registry = BindingRegistry::default();
    registry.bind::<Contact>(&contact).unwrap();
    assert!(registry.is_bound("Contact"));
    assert!(registry.is_bound("Address"));
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_optional_collections() {
    let registry = BindingRegistry::default();
    let schema = Schema::optional(Schema::map(Schema::array(Schema::Long)));
    assert!(registry.bind::<HashMap<String, Vec<i64>>>(&schema).is_ok());
    assert!(registry.bind::<Option<HashMap<String, Vec<i64>>>>(&schema).is_ok());
}

#[test]
fn test_multi_branch_union_needs_bound_records() {
    let union = Schema::union(vec![Schema::Null, address_schema(), phone_schema()]);
    let registry = BindingRegistry::default();
    let err = registry.bind::<Address>(&union).unwrap_err();
    assert!(matches!(err, Error::UnregisteredUnionMember(_)));

    registry.bind::<Address>(&address_schema()).unwrap();
    let err = registry.bind::<Address>(&union).unwrap_err();
    assert!(matches!(err, Error::UnregisteredUnionMember(_)));
    assert!(err.to_string().contains("Phone"));

    registry.bind::<Phone>(&phone_schema()).unwrap();
    assert!(registry.bind::<Address>(&union).unwrap().is_none());
}

#[test]
fn test_scalar_union() {
    let registry = BindingRegistry::default();
    let union = Schema::union(vec![Schema::Int, Schema::String, Schema::Null]);
    assert!(registry.bind::<String>(&union).is_ok());
    // [null, int] against a plain scalar is an ordinary union
    assert!(registry.bind::<i32>(&Schema::optional(Schema::Int)).is_ok());
}

#[test]
fn test_union_branch_bound_earlier_in_walk() {
    #[derive(SchemaObject)]
    struct Card {
        primary: Phone,
        choice: String,
    }

    let card = Schema::record(
        "Card",
        vec![
            Field::new("primary", phone_schema()),
            Field::new(
                "choice",
                Schema::union(vec![Schema::String, phone_schema(), Schema::Null]),
            ),
        ],
    );
    let registry = BindingRegistry::default();
    registry.bind::<Card>(&card).unwrap();
    assert!(registry.is_bound("Phone"));
    assert!(registry.is_bound("Card"));
}
