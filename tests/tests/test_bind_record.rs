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

use fory_schema_core::{BindingRegistry, Error, Field, NativeTyped, Schema};
use fory_schema_derive::SchemaObject;

#[derive(SchemaObject, Debug, PartialEq)]
struct Person {
    name: String,
    age: i32,
}

fn person_schema() -> Schema {
    Schema::record(
        "example.Person",
        vec![
            Field::new("name", Schema::String),
            Field::new("age", Schema::Int),
        ],
    )
}

#[test]
fn test_bind_person() {
    let registry = BindingRegistry::default();
    let root = registry.bind::<Person>(&person_schema()).unwrap().unwrap();
    assert_eq!(root.full_name(), "example.Person");

    let binding = registry.lookup("example.Person").unwrap();
    assert_eq!(binding.fields().count(), 2);
    assert_eq!(binding.field("name").unwrap().property().name(), "name");
    assert!(binding.field("name").unwrap().property_type().is_text());
    assert_eq!(binding.field("age").unwrap().position(), 1);
}

#[test]
fn test_bind_twice() {
    let registry = BindingRegistry::default();
    let first = registry.bind::<Person>(&person_schema()).unwrap().unwrap();
    let second = registry.bind::<Person>(&person_schema()).unwrap().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_lookup_unknown() {
    let registry = BindingRegistry::default();
    assert!(registry.lookup("example.Person").is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_field_access() {
    let registry = BindingRegistry::default();
    let binding = registry.bind::<Person>(&person_schema()).unwrap().unwrap();
    let mut person = Person {
        name: "Ada".to_string(),
        age: 36,
    };

    let name = binding.field("name").unwrap();
    let value = name.get(&person).and_then(|v| v.downcast_ref::<String>());
    assert_eq!(value.map(String::as_str), Some("Ada"));

    let age = binding.field("age").unwrap();
    if let Some(age) = age.get_mut(&mut person).and_then(|v| v.downcast_mut::<i32>()) {
        *age += 1;
    }
    assert_eq!(person.age, 37);

    // accessors of one class reject other values
    assert!(name.get(&42i32).is_none());
}

#[test]
fn test_nested_records() {
    #[derive(SchemaObject)]
    struct Address {
        street: String,
        city: String,
    }

    #[derive(SchemaObject)]
    struct Customer {
        id: i64,
        home: Address,
        work: Address,
    }

    let address = Schema::record(
        "shop.Address",
        vec![
            Field::new("street", Schema::String),
            Field::new("city", Schema::String),
        ],
    );
    let customer = Schema::record(
        "shop.Customer",
        vec![
            Field::new("id", Schema::Long),
            Field::new("home", address.clone()),
            Field::new("work", address),
        ],
    );

    let registry = BindingRegistry::default();
    registry.bind::<Customer>(&customer).unwrap();
    assert!(registry.is_bound("shop.Customer"));
    assert!(registry.is_bound("shop.Address"));
    assert_eq!(registry.len(), 2);
    assert_eq!(
        registry.lookup("shop.Address").unwrap().native_key(),
        Address::native_type().key()
    );
}

#[test]
fn test_missing_property() {
    let schema = Schema::record(
        "example.Person",
        vec![
            Field::new("name", Schema::String),
            Field::new("email", Schema::String),
        ],
    );
    let registry = BindingRegistry::default();
    let err = registry.bind::<Person>(&schema).unwrap_err();
    assert!(matches!(err, Error::MissingProperty(_)));
    assert!(err.to_string().contains("example.Person.email"));
    assert!(registry.lookup("example.Person").is_none());
}

#[test]
fn test_record_against_scalar() {
    let registry = BindingRegistry::default();
    let err = registry.bind::<String>(&person_schema()).unwrap_err();
    assert!(matches!(err, Error::TypeKindMismatch(_)));
    let err = registry.bind::<Vec<Person>>(&person_schema()).unwrap_err();
    assert!(matches!(err, Error::TypeKindMismatch(_)));
    let err = registry.bind::<Option<Person>>(&person_schema()).unwrap_err();
    assert!(matches!(err, Error::TypeNotClass(_)));
}

#[test]
fn test_error_schema_binds_like_record() {
    #[derive(SchemaObject)]
    struct Failure {
        message: String,
        code: i32,
    }

    let schema = Schema::error(
        "rpc.Failure",
        vec![
            Field::new("message", Schema::String),
            Field::new("code", Schema::Int),
        ],
    );
    let registry = BindingRegistry::default();
    registry.bind::<Failure>(&schema).unwrap();
    assert!(registry.is_bound("rpc.Failure"));
}
