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

use std::collections::{BTreeMap, HashMap};

use fory_schema_core::{BindingRegistry, Error, Field, Schema};
use fory_schema_derive::SchemaObject;

#[test]
fn test_map_string_keys() {
    let registry = BindingRegistry::default();
    let schema = Schema::map(Schema::String);
    assert!(registry.bind::<HashMap<String, String>>(&schema).unwrap().is_none());
    assert!(registry.bind::<BTreeMap<String, String>>(&schema).is_ok());
    assert!(registry.bind::<HashMap<&'static str, String>>(&schema).is_ok());
}

#[test]
fn test_map_integer_keys() {
    let registry = BindingRegistry::default();
    let schema = Schema::map(Schema::String);
    let err = registry.bind::<HashMap<i32, String>>(&schema).unwrap_err();
    assert!(matches!(err, Error::InvalidDictionaryKeyType(_)));
    let err = registry.bind::<BTreeMap<u64, String>>(&schema).unwrap_err();
    assert!(matches!(err, Error::InvalidDictionaryKeyType(_)));
}

#[test]
fn test_map_against_non_dictionary() {
    let registry = BindingRegistry::default();
    let schema = Schema::map(Schema::Long);
    let err = registry.bind::<Vec<i64>>(&schema).unwrap_err();
    assert!(matches!(err, Error::TypeKindMismatch(_)));
}

#[derive(SchemaObject)]
struct Score {
    points: i64,
}

#[derive(SchemaObject)]
struct Leaderboard {
    scores: HashMap<String, Score>,
    history: BTreeMap<String, Vec<Score>>,
}

#[test]
fn test_map_values_are_walked() {
    let score = Schema::record("game.Score", vec![Field::new("points", Schema::Long)]);
    let leaderboard = Schema::record(
        "game.Leaderboard",
        vec![
            Field::new("scores", Schema::map(score.clone())),
            Field::new("history", Schema::map(Schema::array(score))),
        ],
    );
    let registry = BindingRegistry::default();
    registry.bind::<Leaderboard>(&leaderboard).unwrap();
    assert!(registry.is_bound("game.Score"));
    assert!(registry.is_bound("game.Leaderboard"));
}

#[test]
fn test_map_value_mismatch_reports_path() {
    let leaderboard = Schema::record(
        "game.Leaderboard",
        vec![Field::new("scores", Schema::map(Schema::array(Schema::Long)))],
    );
    let registry = BindingRegistry::default();
    let err = registry.bind::<Leaderboard>(&leaderboard).unwrap_err();
    assert!(matches!(err, Error::TypeKindMismatch(_)));
    assert!(err.to_string().contains("game.Leaderboard.scores{}"));
}
