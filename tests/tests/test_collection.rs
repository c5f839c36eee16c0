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

use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::sync::Arc;

use fory_schema_core::{BindingRegistry, Error, Field, NativeType, Schema};
use fory_schema_derive::SchemaObject;

#[test]
fn test_std_collections() {
    let registry = BindingRegistry::default();
    let schema = Schema::array(Schema::Int);
    assert!(registry.bind::<Vec<i32>>(&schema).is_ok());
    assert!(registry.bind::<VecDeque<i32>>(&schema).is_ok());
    assert!(registry.bind::<LinkedList<i32>>(&schema).is_ok());
    assert!(registry.bind::<HashSet<i32>>(&schema).is_ok());
    assert!(registry.bind::<BTreeSet<i32>>(&schema).is_ok());
    assert!(registry.bind::<[i32; 4]>(&schema).is_ok());
}

#[test]
fn test_untyped_collection() {
    struct Bag;
    let registry = BindingRegistry::default();
    let bag = NativeType::collection::<Bag>(None);
    let err = registry
        .bind_native(&bag, &Schema::array(Schema::String))
        .unwrap_err();
    assert!(matches!(err, Error::MissingElementType(_)));
}

#[test]
fn test_array_against_scalar() {
    let registry = BindingRegistry::default();
    let err = registry.bind::<String>(&Schema::array(Schema::String)).unwrap_err();
    assert!(matches!(err, Error::TypeKindMismatch(_)));
}

#[derive(SchemaObject)]
struct Line {
    sku: String,
    quantity: i32,
}

#[derive(SchemaObject)]
struct Order {
    lines: Vec<Line>,
    notes: Option<Vec<String>>,
    shared: Arc<Line>,
}

#[test]
fn test_nested_items() {
    let line = Schema::record(
        "shop.Line",
        vec![
            Field::new("sku", Schema::String),
            Field::new("quantity", Schema::Int),
        ],
    );
    let order = Schema::record(
        "shop.Order",
        vec![
            Field::new("lines", Schema::array(line.clone())),
            Field::new("notes", Schema::optional(Schema::array(Schema::String))),
            Field::new("shared", line),
        ],
    );
    let registry = BindingRegistry::default();
    registry.bind::<Order>(&order).unwrap();
    assert!(registry.is_bound("shop.Line"));
    assert!(registry.is_bound("shop.Order"));
}

#[test]
fn test_depth_limit() {
    let mut schema = Schema::Int;
    for _ in 0..4 {
        schema = Schema::array(schema);
    }
    let registry = BindingRegistry::default();
    assert!(registry.bind::<Vec<Vec<Vec<Vec<i32>>>>>(&schema).is_ok());

    let shallow = BindingRegistry::default().max_depth(3);
    let err = shallow.bind::<Vec<Vec<Vec<Vec<i32>>>>>(&schema).unwrap_err();
    assert!(matches!(err, Error::DepthExceed(_)));
    assert!(err.to_string().ends_with("(at array[][][])"), "{err}");
}
