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

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::Error;
use crate::native::{NativeType, TypeKey};
use crate::schema::EnumSchema;

/// Receives the enum bindings discovered while binding records.
pub trait EnumRegistry: Send + Sync {
    fn register(&self, schema: &Arc<EnumSchema>, native: &NativeType) -> Result<(), Error>;
}

/// Default in-memory enum registry keyed by schema full name.
#[derive(Default)]
pub struct EnumCache {
    entries: DashMap<String, (Arc<EnumSchema>, TypeKey)>,
}

impl EnumCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, full_name: &str) -> Option<TypeKey> {
        self.entries.get(full_name).map(|entry| entry.value().1)
    }

    pub fn schema(&self, full_name: &str) -> Option<Arc<EnumSchema>> {
        self.entries
            .get(full_name)
            .map(|entry| entry.value().0.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EnumRegistry for EnumCache {
    fn register(&self, schema: &Arc<EnumSchema>, native: &NativeType) -> Result<(), Error> {
        self.entries
            .entry(schema.full_name().to_string())
            .or_insert_with(|| {
                log::debug!("bound enum {} to {}", schema.full_name(), native.key());
                (schema.clone(), native.key())
            });
        Ok(())
    }
}
