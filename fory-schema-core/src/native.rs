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

//! Native type descriptors.
//!
//! Every Rust type that takes part in binding is classified exactly once into a
//! [`NativeType`]: a class with properties, a collection, a dictionary, a
//! scalar or a nullable wrapper. The binding walk only ever dispatches on this
//! tag. Nested types are referenced through [`TypeFn`] pointers so that
//! self-referential types can be described without recursing forever.
//!
//! Structs and enums get their descriptor from `#[derive(SchemaObject)]` and
//! `#[derive(SchemaEnum)]`; the impls in this module cover std and chrono types.

use std::any::Any;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::resolver::converter::Converter;

/// Identity of a native type.
///
/// Equality and hashing only look at the [`std::any::TypeId`]; the name is kept
/// for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: std::any::TypeId,
    name: &'static str,
}

impl TypeKey {
    #[inline(always)]
    pub fn of<T: ?Sized + 'static>() -> TypeKey {
        TypeKey {
            id: std::any::TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    #[inline(always)]
    pub fn id(&self) -> std::any::TypeId {
        self.id
    }

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Lazily produces the descriptor of a nested type.
pub type TypeFn = fn() -> NativeType;

pub type GetFn = fn(&dyn Any) -> Option<&dyn Any>;
pub type GetMutFn = fn(&mut dyn Any) -> Option<&mut dyn Any>;
pub type ConverterFn = fn() -> Arc<dyn Converter>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Char,
    Text,
    Enum { symbols: &'static [&'static str] },
    /// Any other leaf type, e.g. newtype wrappers and temporal types.
    Opaque,
}

/// Shape of a native type.
#[derive(Clone, Debug)]
pub enum NativeKind {
    Class(Arc<ClassInfo>),
    /// `element` is `None` for untyped collections, which cannot be bound.
    Collection {
        element: Option<TypeFn>,
    },
    Dictionary {
        key: TypeFn,
        value: TypeFn,
    },
    Scalar(ScalarKind),
    NullableWrapper(TypeFn),
}

/// Classification of a native type.
#[derive(Clone, Debug)]
pub struct NativeType {
    key: TypeKey,
    kind: NativeKind,
}

impl NativeType {
    pub fn new(key: TypeKey, kind: NativeKind) -> NativeType {
        NativeType { key, kind }
    }

    pub fn class(info: Arc<ClassInfo>) -> NativeType {
        NativeType {
            key: info.key,
            kind: NativeKind::Class(info),
        }
    }

    pub fn scalar<T: ?Sized + 'static>(kind: ScalarKind) -> NativeType {
        NativeType::new(TypeKey::of::<T>(), NativeKind::Scalar(kind))
    }

    pub fn opaque<T: ?Sized + 'static>() -> NativeType {
        NativeType::scalar::<T>(ScalarKind::Opaque)
    }

    pub fn collection<C: ?Sized + 'static>(element: Option<TypeFn>) -> NativeType {
        NativeType::new(TypeKey::of::<C>(), NativeKind::Collection { element })
    }

    pub fn dictionary<D: ?Sized + 'static>(key: TypeFn, value: TypeFn) -> NativeType {
        NativeType::new(TypeKey::of::<D>(), NativeKind::Dictionary { key, value })
    }

    pub fn nullable<W: ?Sized + 'static>(inner: TypeFn) -> NativeType {
        NativeType::new(TypeKey::of::<W>(), NativeKind::NullableWrapper(inner))
    }

    #[inline(always)]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    #[inline(always)]
    pub fn kind(&self) -> &NativeKind {
        &self.kind
    }

    #[inline(always)]
    pub fn type_name(&self) -> &'static str {
        self.key.name
    }

    #[inline(always)]
    pub fn as_class(&self) -> Option<&Arc<ClassInfo>> {
        match &self.kind {
            NativeKind::Class(info) => Some(info),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, NativeKind::Scalar(ScalarKind::Text))
    }

    /// Class, collection and dictionary types are reference shapes: they
    /// can stand for the non-null branch of an optional union directly.
    #[inline(always)]
    pub fn is_reference_shape(&self) -> bool {
        matches!(
            self.kind,
            NativeKind::Class(_) | NativeKind::Collection { .. } | NativeKind::Dictionary { .. }
        )
    }

    /// The wrapped type of a nullable wrapper, or a copy of `self`.
    pub fn unwrap_nullable(&self) -> NativeType {
        match self.kind {
            NativeKind::NullableWrapper(inner) => inner(),
            _ => self.clone(),
        }
    }

    /// Short classification name used in diagnostics.
    pub fn shape_name(&self) -> &'static str {
        match self.kind {
            NativeKind::Class(_) => "class",
            NativeKind::Collection { .. } => "collection",
            NativeKind::Dictionary { .. } => "dictionary",
            NativeKind::Scalar(_) => "scalar",
            NativeKind::NullableWrapper(_) => "nullable wrapper",
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key.name, self.shape_name())
    }
}

/// A property of a native class.
#[derive(Clone, Copy)]
pub struct PropertyInfo {
    name: &'static str,
    schema_name: &'static str,
    aliases: &'static [&'static str],
    type_fn: TypeFn,
    get: GetFn,
    get_mut: GetMutFn,
    converter: Option<ConverterFn>,
}

impl PropertyInfo {
    pub fn new(name: &'static str, type_fn: TypeFn, get: GetFn, get_mut: GetMutFn) -> PropertyInfo {
        PropertyInfo {
            name,
            schema_name: name,
            aliases: &[],
            type_fn,
            get,
            get_mut,
            converter: None,
        }
    }

    /// Name under which the property appears in schemas.
    pub fn with_schema_name(mut self, schema_name: &'static str) -> PropertyInfo {
        self.schema_name = schema_name;
        self
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> PropertyInfo {
        self.aliases = aliases;
        self
    }

    /// Explicit converter that takes precedence over the default resolution.
    pub fn with_converter(mut self, converter: ConverterFn) -> PropertyInfo {
        self.converter = Some(converter);
        self
    }

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline(always)]
    pub fn schema_name(&self) -> &'static str {
        self.schema_name
    }

    #[inline(always)]
    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    #[inline(always)]
    pub fn native_type(&self) -> NativeType {
        (self.type_fn)()
    }

    #[inline(always)]
    pub fn converter(&self) -> Option<Arc<dyn Converter>> {
        self.converter.map(|f| f())
    }

    #[inline(always)]
    pub fn get<'a>(&self, obj: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.get)(obj)
    }

    #[inline(always)]
    pub fn get_mut<'a>(&self, obj: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        (self.get_mut)(obj)
    }
}

impl fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("name", &self.name)
            .field("schema_name", &self.schema_name)
            .field("aliases", &self.aliases)
            .field("has_converter", &self.converter.is_some())
            .finish()
    }
}

/// Properties of a native class.
#[derive(Debug)]
pub struct ClassInfo {
    key: TypeKey,
    properties: Vec<PropertyInfo>,
}

impl ClassInfo {
    pub fn new(key: TypeKey, properties: Vec<PropertyInfo>) -> ClassInfo {
        ClassInfo { key, properties }
    }

    #[inline(always)]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    #[inline(always)]
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    /// Property whose schema name is exactly `name`.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.schema_name == name)
    }

    /// Property declaring `alias` as one of its aliases.
    pub fn property_by_alias(&self, alias: &str) -> Option<&PropertyInfo> {
        self.properties
            .iter()
            .find(|p| p.aliases.iter().any(|a| *a == alias))
    }
}

/// Types that can describe themselves to the binding registry.
pub trait NativeTyped: 'static {
    fn native_type() -> NativeType;
}

macro_rules! impl_scalar {
    ($($ty:ty => $kind:expr),+ $(,)?) => {
        $(
            impl NativeTyped for $ty {
                #[inline(always)]
                fn native_type() -> NativeType {
                    NativeType::scalar::<$ty>($kind)
                }
            }
        )+
    };
}

impl_scalar!(
    bool => ScalarKind::Bool,
    i8 => ScalarKind::Int8,
    i16 => ScalarKind::Int16,
    i32 => ScalarKind::Int32,
    i64 => ScalarKind::Int64,
    u8 => ScalarKind::UInt8,
    u16 => ScalarKind::UInt16,
    u32 => ScalarKind::UInt32,
    u64 => ScalarKind::UInt64,
    f32 => ScalarKind::Float32,
    f64 => ScalarKind::Float64,
    char => ScalarKind::Char,
    String => ScalarKind::Text,
    &'static str => ScalarKind::Text,
    Cow<'static, str> => ScalarKind::Text,
    NaiveDate => ScalarKind::Opaque,
    NaiveDateTime => ScalarKind::Opaque,
);

macro_rules! impl_collection {
    ($($ty:ident),+) => {
        $(
            impl<T: NativeTyped> NativeTyped for $ty<T> {
                fn native_type() -> NativeType {
                    NativeType::collection::<$ty<T>>(Some(T::native_type))
                }
            }
        )+
    };
}

impl_collection!(Vec, VecDeque, LinkedList, BTreeSet);

impl<T: NativeTyped, S: 'static> NativeTyped for HashSet<T, S> {
    fn native_type() -> NativeType {
        NativeType::collection::<HashSet<T, S>>(Some(T::native_type))
    }
}

impl<T: NativeTyped, const N: usize> NativeTyped for [T; N] {
    fn native_type() -> NativeType {
        NativeType::collection::<[T; N]>(Some(T::native_type))
    }
}

impl<K: NativeTyped, V: NativeTyped, S: 'static> NativeTyped for HashMap<K, V, S> {
    fn native_type() -> NativeType {
        NativeType::dictionary::<HashMap<K, V, S>>(K::native_type, V::native_type)
    }
}

impl<K: NativeTyped, V: NativeTyped> NativeTyped for BTreeMap<K, V> {
    fn native_type() -> NativeType {
        NativeType::dictionary::<BTreeMap<K, V>>(K::native_type, V::native_type)
    }
}

impl<T: NativeTyped> NativeTyped for Option<T> {
    fn native_type() -> NativeType {
        NativeType::nullable::<Option<T>>(T::native_type)
    }
}

// Smart pointers are transparent: they bind exactly like their pointee.
macro_rules! impl_transparent {
    ($($ty:ident),+) => {
        $(
            impl<T: NativeTyped> NativeTyped for $ty<T> {
                #[inline(always)]
                fn native_type() -> NativeType {
                    T::native_type()
                }
            }
        )+
    };
}

impl_transparent!(Box, Rc, Arc);
