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

use std::any::Any;
use std::collections::{BTreeSet, VecDeque};

use fory_schema_core::error::Error;
use fory_schema_core::resolver::array_adapter::downcast_collection;
use fory_schema_core::{
    AdapterFactory, ArrayAdapter, ArrayAdapterResolver, ArraySchema, ListLike, Schema,
};

/// Keeps at most `capacity` elements, dropping the oldest.
struct RingAdapter<'a> {
    ring: &'a mut VecDeque<String>,
    capacity: usize,
}

impl ArrayAdapter for RingAdapter<'_> {
    fn add(&mut self, element: Box<dyn Any>) -> Result<(), Error> {
        let element = element
            .downcast::<String>()
            .map_err(|_| Error::type_error("ring holds strings"))?;
        if self.ring.len() == self.capacity {
            self.ring.pop_front();
        }
        self.ring.push_back(*element);
        Ok(())
    }

    fn count(&self) -> usize {
        self.ring.len()
    }

    fn clear(&mut self) {
        self.ring.clear()
    }
}

struct RingFactory {
    capacity: usize,
}

impl AdapterFactory for RingFactory {
    fn accepts(&self, collection: &dyn ListLike) -> bool {
        collection.as_any().is::<VecDeque<String>>()
    }

    fn bind<'a>(&self, collection: &'a mut dyn ListLike) -> Box<dyn ArrayAdapter + 'a> {
        match downcast_collection::<VecDeque<String>>(collection) {
            Ok(ring) => Box::new(RingAdapter {
                ring,
                capacity: self.capacity,
            }),
            Err(_) => unreachable!("accepts checked the collection type"),
        }
    }
}

fn hinted(hint: &str) -> ArraySchema {
    ArraySchema::new(Schema::String).with_adapter_hint(hint)
}

#[test]
fn test_unregistered_hint_falls_back() {
    let resolver = ArrayAdapterResolver::new();
    let mut set: BTreeSet<i32> = BTreeSet::new();
    {
        let mut adapter = resolver.resolve(&hinted("CustomSet"), &mut set);
        adapter.add(Box::new(3)).unwrap();
        adapter.add(Box::new(1)).unwrap();
        adapter.add(Box::new(3)).unwrap();
        assert_eq!(adapter.count(), 2);
    }
    assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn test_absent_hint_falls_back() {
    let resolver = ArrayAdapterResolver::new();
    let mut list: Vec<String> = vec!["stale".to_string()];
    let mut adapter = resolver.resolve(&ArraySchema::new(Schema::String), &mut list);
    adapter.clear();
    adapter.add(Box::new("fresh".to_string())).unwrap();
    assert_eq!(adapter.count(), 1);
    assert!(adapter.add(Box::new(7u8)).is_err());
}

#[test]
fn test_registered_hint() {
    let resolver = ArrayAdapterResolver::new();
    resolver.register_adapter("Ring", RingFactory { capacity: 2 });
    assert!(resolver.is_registered("Ring"));

    let mut ring: VecDeque<String> = VecDeque::new();
    {
        let mut adapter = resolver.try_resolve(&hinted("Ring"), &mut ring).unwrap();
        for word in ["a", "b", "c"] {
            adapter.add(Box::new(word.to_string())).unwrap();
        }
        assert_eq!(adapter.count(), 2);
    }
    assert_eq!(ring, VecDeque::from(vec!["b".to_string(), "c".to_string()]));
}

#[test]
fn test_factory_rejects_collection() {
    let resolver = ArrayAdapterResolver::new();
    resolver.register_adapter("Ring", RingFactory { capacity: 2 });

    let mut list: Vec<String> = Vec::new();
    let err = resolver.try_resolve(&hinted("Ring"), &mut list).err().unwrap();
    assert!(matches!(err, Error::InvalidAdapterType(_)));

    // resolve still hands out a working default adapter
    let mut adapter = resolver.resolve(&hinted("Ring"), &mut list);
    for word in ["a", "b", "c"] {
        adapter.add(Box::new(word.to_string())).unwrap();
    }
    assert_eq!(adapter.count(), 3);
}

#[test]
fn test_schema_helpers_carry_hint() {
    let Schema::Array(array) = Schema::array_with_hint(Schema::Int, "Ring") else {
        panic!("expected array schema");
    };
    assert_eq!(array.adapter_hint(), Some("Ring"));
    assert_eq!(ArraySchema::new(Schema::Int).adapter_hint(), None);
}
