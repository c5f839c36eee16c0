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

//! Array adapter resolution.
//!
//! The codec fills array values through an [`ArrayAdapter`]. By default that is
//! a [`ListAdapter`] over the collection's [`ListLike`] capability; an array
//! schema may carry an adapter hint naming a registered [`AdapterFactory`] for
//! collections that need different handling.

use std::any::Any;
use std::collections::{BTreeSet, HashSet, LinkedList, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::error::Error;
use crate::schema::ArraySchema;

/// Element sink the codec drives while decoding an array.
pub trait ArrayAdapter {
    fn add(&mut self, item: Box<dyn Any>) -> Result<(), Error>;

    fn count(&self) -> usize;

    fn clear(&mut self);
}

/// Type-erased list operations of a collection instance.
pub trait ListLike: Any {
    fn push_boxed(&mut self, item: Box<dyn Any>) -> Result<(), Error>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[cold]
fn element_mismatch<C: ?Sized>() -> Error {
    Error::type_error(format!(
        "element type does not match collection {}",
        std::any::type_name::<C>()
    ))
}

macro_rules! impl_list_like {
    ($ty:ty, $push:ident, [$($bound:tt)*] $(, $param:ident)*) => {
        impl<T: Any $($bound)* $(, $param: BuildHasher + 'static)*> ListLike for $ty {
            fn push_boxed(&mut self, item: Box<dyn Any>) -> Result<(), Error> {
                let item = item.downcast::<T>().map_err(|_| element_mismatch::<Self>())?;
                self.$push(*item);
                Ok(())
            }

            fn len(&self) -> usize {
                <$ty>::len(self)
            }

            fn clear(&mut self) {
                <$ty>::clear(self)
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }
    };
}

impl_list_like!(Vec<T>, push, []);
impl_list_like!(VecDeque<T>, push_back, []);
impl_list_like!(LinkedList<T>, push_back, []);
impl_list_like!(BTreeSet<T>, insert_discard, [+ Ord]);
impl_list_like!(HashSet<T, S>, insert_discard, [+ Eq + Hash], S);

// Sets report duplicates through their return value, which list semantics ignore.
trait InsertDiscard<T> {
    fn insert_discard(&mut self, item: T);
}

impl<T: Ord> InsertDiscard<T> for BTreeSet<T> {
    fn insert_discard(&mut self, item: T) {
        self.insert(item);
    }
}

impl<T: Eq + Hash, S: BuildHasher> InsertDiscard<T> for HashSet<T, S> {
    fn insert_discard(&mut self, item: T) {
        self.insert(item);
    }
}

/// Returns the concrete collection behind `collection`.
pub fn downcast_collection<C: ListLike>(collection: &mut dyn ListLike) -> Result<&mut C, Error> {
    collection
        .as_any_mut()
        .downcast_mut::<C>()
        .ok_or_else(|| {
            Error::invalid_adapter_type(format!(
                "adapter expects collection {}",
                std::any::type_name::<C>()
            ))
        })
}

/// Shared-reference variant of [`downcast_collection`].
pub fn downcast_collection_ref<C: ListLike>(collection: &dyn ListLike) -> Result<&C, Error> {
    collection.as_any().downcast_ref::<C>().ok_or_else(|| {
        Error::invalid_adapter_type(format!(
            "adapter expects collection {}",
            std::any::type_name::<C>()
        ))
    })
}

/// The default adapter: plain list semantics over [`ListLike`].
pub struct ListAdapter<'a> {
    list: &'a mut dyn ListLike,
}

impl<'a> ListAdapter<'a> {
    pub fn new(list: &'a mut dyn ListLike) -> ListAdapter<'a> {
        ListAdapter { list }
    }
}

impl ArrayAdapter for ListAdapter<'_> {
    fn add(&mut self, item: Box<dyn Any>) -> Result<(), Error> {
        self.list.push_boxed(item)
    }

    fn count(&self) -> usize {
        self.list.len()
    }

    fn clear(&mut self) {
        self.list.clear()
    }
}

/// Creates adapters bound to collection instances.
pub trait AdapterFactory: Send + Sync + 'static {
    /// Whether adapters from this factory can drive `collection`.
    fn accepts(&self, collection: &dyn ListLike) -> bool;

    /// Binds an adapter to `collection`. Only called after [`accepts`](Self::accepts)
    /// returned `true` for the same instance.
    fn bind<'a>(&self, collection: &'a mut dyn ListLike) -> Box<dyn ArrayAdapter + 'a>;
}

/// Maps adapter hints carried by array schemas to adapter factories.
#[derive(Default)]
pub struct ArrayAdapterResolver {
    factories: DashMap<String, Arc<dyn AdapterFactory>>,
}

impl ArrayAdapterResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide resolver.
    pub fn global() -> Arc<ArrayAdapterResolver> {
        static GLOBAL: OnceLock<Arc<ArrayAdapterResolver>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(ArrayAdapterResolver::new())).clone()
    }

    /// Associates `hint` with `factory`. A later registration of the same hint
    /// replaces the earlier one.
    pub fn register_adapter<F: AdapterFactory>(&self, hint: impl Into<String>, factory: F) {
        let hint = hint.into();
        log::debug!(
            "registering array adapter {} for hint {hint}",
            std::any::type_name::<F>()
        );
        self.factories.insert(hint, Arc::new(factory));
    }

    pub fn is_registered(&self, hint: &str) -> bool {
        self.factories.contains_key(hint)
    }

    fn factory_for(&self, schema: &ArraySchema) -> Option<Arc<dyn AdapterFactory>> {
        let hint = schema.adapter_hint()?;
        self.factories.get(hint).map(|f| f.value().clone())
    }

    /// Adapter for `collection` as named by the schema's hint, falling back to
    /// [`ListAdapter`] when the schema has no hint or the hint is unknown.
    ///
    /// Fails with [`Error::InvalidAdapterType`] when the hinted factory cannot
    /// drive `collection`.
    pub fn try_resolve<'a>(
        &self,
        schema: &ArraySchema,
        collection: &'a mut dyn ListLike,
    ) -> Result<Box<dyn ArrayAdapter + 'a>, Error> {
        match self.factory_for(schema) {
            Some(factory) => {
                crate::ensure!(
                    factory.accepts(&*collection),
                    Error::invalid_adapter_type(format!(
                        "adapter for hint {} cannot drive the given collection",
                        schema.adapter_hint().unwrap_or_default()
                    ))
                );
                Ok(factory.bind(collection))
            }
            None => Ok(Box::new(ListAdapter::new(collection))),
        }
    }

    /// Like [`try_resolve`](Self::try_resolve) but never fails: a factory that
    /// rejects the collection is skipped in favour of [`ListAdapter`].
    pub fn resolve<'a>(
        &self,
        schema: &ArraySchema,
        collection: &'a mut dyn ListLike,
    ) -> Box<dyn ArrayAdapter + 'a> {
        if let Some(factory) = self.factory_for(schema) {
            if factory.accepts(&*collection) {
                return factory.bind(collection);
            }
            log::warn!(
                "adapter for hint {} rejected collection, using list adapter",
                schema.adapter_hint().unwrap_or_default()
            );
        }
        Box::new(ListAdapter::new(collection))
    }
}
