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

/// Configuration for schema binding.
///
/// Held by a [`BindingRegistry`](crate::BindingRegistry) and set through its
/// builder methods.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum nesting depth of a single binding walk.
    pub max_depth: u32,
    /// Whether a record field also matches the property named after its
    /// snake_case form, e.g. `firstName` matching `first_name`.
    pub snake_case_fallback: bool,
    /// Whether rebinding a schema name to a different native type logs a warning.
    pub warn_on_conflict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: 64,
            snake_case_fallback: true,
            warn_on_conflict: true,
        }
    }
}

impl Config {
    /// Creates a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get maximum binding depth.
    #[inline(always)]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Check if snake_case field matching is enabled.
    #[inline(always)]
    pub fn is_snake_case_fallback(&self) -> bool {
        self.snake_case_fallback
    }

    /// Check if conflicting rebinds are reported.
    #[inline(always)]
    pub fn is_warn_on_conflict(&self) -> bool {
        self.warn_on_conflict
    }
}
