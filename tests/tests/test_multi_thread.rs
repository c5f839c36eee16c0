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
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use fory_schema_core::error::Error;
use fory_schema_core::schema::EnumSchema;
use fory_schema_core::{BindingRegistry, EnumCache, EnumRegistry, Field, NativeType, Schema};
use fory_schema_derive::{SchemaEnum, SchemaObject};

#[derive(SchemaObject)]
struct Sample {
    sensor: String,
    value: f64,
    tags: HashMap<String, String>,
}

#[derive(SchemaObject)]
struct Batch {
    samples: Vec<Sample>,
}

fn batch_schema() -> Schema {
    let sample = Schema::record(
        "telemetry.Sample",
        vec![
            Field::new("sensor", Schema::String),
            Field::new("value", Schema::Double),
            Field::new("tags", Schema::map(Schema::String)),
        ],
    );
    Schema::record(
        "telemetry.Batch",
        vec![Field::new("samples", Schema::array(sample))],
    )
}

#[test]
fn test_concurrent_bind_same_schema() {
    let registry = Arc::new(BindingRegistry::default());
    let schema = batch_schema();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let schema = schema.clone();
            thread::spawn(move || registry.bind::<Batch>(&schema).unwrap().unwrap())
        })
        .collect();
    let bindings: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for binding in &bindings {
        assert!(Arc::ptr_eq(binding, &bindings[0]));
    }
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_concurrent_field_access() {
    let registry = BindingRegistry::default();
    let binding = registry.bind::<Batch>(&batch_schema()).unwrap().unwrap();
    let sample = registry.lookup("telemetry.Sample").unwrap();
    drop(binding);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let sample = Arc::clone(&sample);
            thread::spawn(move || {
                let name = ["sensor", "value", "tags"][i % 3];
                let field = sample.field(name).unwrap();
                (field.field_name().to_string(), field.position())
            })
        })
        .collect();
    for handle in handles {
        let (name, position) = handle.join().unwrap();
        assert_eq!(sample.field(&name).unwrap().position(), position);
    }
    assert_eq!(sample.fields().count(), 3);
}

#[test]
fn test_lookup_while_binding() {
    let registry = Arc::new(BindingRegistry::default());
    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for i in 0..32 {
                let schema = Schema::record(
                    format!("telemetry.Sample{i}"),
                    vec![Field::new("sensor", Schema::String)],
                );
                registry.bind::<Sample>(&schema).unwrap();
            }
        })
    };
    let reader = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            let mut seen = 0;
            while seen < 32 {
                seen = (0..32)
                    .filter(|i| registry.lookup(&format!("telemetry.Sample{i}")).is_some())
                    .count();
            }
        })
    };
    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(registry.len(), 32);
}

#[derive(SchemaEnum, Clone, Copy)]
enum Finish {
    Matte,
    Gloss,
}

#[derive(SchemaObject)]
struct Paint {
    name: String,
    finish: Finish,
}

fn paint_schema() -> Schema {
    Schema::record(
        "shop.Paint",
        vec![
            Field::new("name", Schema::String),
            Field::new("finish", Schema::enumeration("shop.Finish", ["Matte", "Gloss"])),
        ],
    )
}

/// Enum registry that stalls, keeping record walks in flight.
#[derive(Default)]
struct SlowEnums {
    inner: EnumCache,
}

impl EnumRegistry for SlowEnums {
    fn register(&self, schema: &Arc<EnumSchema>, native: &NativeType) -> Result<(), Error> {
        thread::sleep(Duration::from_millis(50));
        self.inner.register(schema, native)
    }
}

#[test]
fn test_concurrent_bind_separate_schema_instances() {
    let registry =
        Arc::new(BindingRegistry::default().with_enum_registry(Arc::new(SlowEnums::default())));
    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                // every thread builds its own schema tree
                let schema = paint_schema();
                barrier.wait();
                let binding = registry.bind::<Paint>(&schema).unwrap().unwrap();
                let cached = registry.lookup("shop.Paint").unwrap();
                assert!(Arc::ptr_eq(&binding, &cached));
                binding
            })
        })
        .collect();
    let bindings: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for binding in &bindings {
        assert!(Arc::ptr_eq(binding, &bindings[0]));
    }
    assert_eq!(registry.len(), 1);
}
