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

//! Scalar converter resolution.
//!
//! A converter adapts between the value a schema scalar decodes to and the
//! native property it is stored in, e.g. a `long` schema field stored in a
//! `NaiveDateTime` property. Converters are collected in an append-only list
//! and matched on the exact `(schema shape, property type)` pair they declare;
//! the first registered match wins.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::Error;
use crate::native::TypeKey;
use crate::schema::Schema;
use crate::types::SchemaKind;
use crate::util::EPOCH;

/// Native shape a schema scalar decodes to before any conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarShape {
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    Bytes,
    Text,
}

impl ScalarShape {
    /// Record, enum, array, map, union, error and null have no scalar shape.
    pub fn from_kind(kind: SchemaKind) -> Option<ScalarShape> {
        match kind {
            SchemaKind::Boolean => Some(ScalarShape::Bool),
            SchemaKind::Int => Some(ScalarShape::Int32),
            SchemaKind::Long => Some(ScalarShape::Int64),
            SchemaKind::Float => Some(ScalarShape::Float32),
            SchemaKind::Double => Some(ScalarShape::Float64),
            SchemaKind::Bytes | SchemaKind::Fixed => Some(ScalarShape::Bytes),
            SchemaKind::String => Some(ScalarShape::Text),
            SchemaKind::Null
            | SchemaKind::Record
            | SchemaKind::Enumeration
            | SchemaKind::Array
            | SchemaKind::Map
            | SchemaKind::Union
            | SchemaKind::Error => None,
        }
    }
}

/// Schema side of a converter: a scalar shape, possibly nullable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SchemaShape {
    scalar: ScalarShape,
    nullable: bool,
}

impl SchemaShape {
    pub const fn new(scalar: ScalarShape, nullable: bool) -> SchemaShape {
        SchemaShape { scalar, nullable }
    }

    #[inline(always)]
    pub fn scalar(&self) -> ScalarShape {
        self.scalar
    }

    #[inline(always)]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Canonical shape of a schema node. An optional-field union `[null, X]`
    /// yields the nullable shape of `X`.
    pub fn canonical(schema: &Schema) -> Option<SchemaShape> {
        let (kind, nullable) = match schema {
            Schema::Union(union) => match union.nullable_branch() {
                Some(inner) => (inner.kind(), true),
                None => (SchemaKind::Union, false),
            },
            other => (other.kind(), false),
        };
        ScalarShape::from_kind(kind).map(|scalar| SchemaShape::new(scalar, nullable))
    }
}

/// Paired encode/decode functions between a schema scalar value and a native
/// property value.
pub trait Converter: Send + Sync + 'static {
    /// Shape of the schema value this converter produces and consumes.
    fn schema_shape(&self) -> SchemaShape;

    /// Exact property type this converter handles.
    fn property_type(&self) -> TypeKey;

    /// Converts a property value into the value written for the schema.
    fn to_schema(&self, property: &dyn Any) -> Result<Box<dyn Any>, Error>;

    /// Converts a decoded schema value into a property value.
    fn from_schema(&self, value: &dyn Any) -> Result<Box<dyn Any>, Error>;

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Rust types a schema scalar decodes to.
pub trait SchemaScalar: 'static {
    const SHAPE: SchemaShape;
}

macro_rules! impl_schema_scalar {
    ($($ty:ty => $shape:ident),+ $(,)?) => {
        $(
            impl SchemaScalar for $ty {
                const SHAPE: SchemaShape = SchemaShape::new(ScalarShape::$shape, false);
            }
        )+
    };
}

impl_schema_scalar!(
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    Vec<u8> => Bytes,
    String => Text,
);

impl<T: SchemaScalar> SchemaScalar for Option<T> {
    const SHAPE: SchemaShape = SchemaShape::new(T::SHAPE.scalar, true);
}

/// Converter built from two plain functions, typed on both sides.
pub struct TypedConverter<S, P> {
    to_schema: fn(&P) -> Result<S, Error>,
    from_schema: fn(&S) -> Result<P, Error>,
    _marker: PhantomData<fn() -> (S, P)>,
}

impl<S: SchemaScalar, P: 'static> TypedConverter<S, P> {
    pub fn new(
        to_schema: fn(&P) -> Result<S, Error>,
        from_schema: fn(&S) -> Result<P, Error>,
    ) -> TypedConverter<S, P> {
        TypedConverter {
            to_schema,
            from_schema,
            _marker: PhantomData,
        }
    }
}

impl<S: SchemaScalar, P: 'static> Converter for TypedConverter<S, P> {
    fn schema_shape(&self) -> SchemaShape {
        S::SHAPE
    }

    fn property_type(&self) -> TypeKey {
        TypeKey::of::<P>()
    }

    fn to_schema(&self, property: &dyn Any) -> Result<Box<dyn Any>, Error> {
        let property = property.downcast_ref::<P>().ok_or_else(|| {
            Error::type_error(format!(
                "converter expects property of type {}",
                std::any::type_name::<P>()
            ))
        })?;
        Ok(Box::new((self.to_schema)(property)?))
    }

    fn from_schema(&self, value: &dyn Any) -> Result<Box<dyn Any>, Error> {
        let value = value.downcast_ref::<S>().ok_or_else(|| {
            Error::type_error(format!(
                "converter expects schema value of type {}",
                std::any::type_name::<S>()
            ))
        })?;
        Ok(Box::new((self.from_schema)(value)?))
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Append-only collection of default converters.
///
/// Reads take a lock-free snapshot, so resolution on the hot path never waits
/// for a concurrent registration and never observes a partial entry.
pub struct ConverterResolver {
    converters: ArcSwap<Vec<Arc<dyn Converter>>>,
}

impl Default for ConverterResolver {
    fn default() -> Self {
        ConverterResolver {
            converters: ArcSwap::from_pointee(Vec::new()),
        }
    }
}

impl ConverterResolver {
    /// An empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver seeded with the built-in temporal converters.
    pub fn with_builtin() -> Self {
        let resolver = Self::default();
        resolver.register_default(Arc::new(timestamp_millis_converter()));
        resolver.register_default(Arc::new(date_converter()));
        resolver
    }

    /// Process-wide resolver shared by every registry that was not given its own.
    pub fn global() -> Arc<ConverterResolver> {
        static GLOBAL: OnceLock<Arc<ConverterResolver>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| Arc::new(ConverterResolver::with_builtin()))
            .clone()
    }

    /// Appends a converter. Duplicates are kept; earlier registrations win.
    pub fn register_default(&self, converter: Arc<dyn Converter>) {
        log::debug!(
            "registering converter {} for ({:?}, {})",
            converter.name(),
            converter.schema_shape(),
            converter.property_type()
        );
        self.converters.rcu(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.push(converter.clone());
            next
        });
    }

    /// First registered converter matching the canonical shape of `schema`
    /// and the exact property type, if any.
    pub fn resolve_default(
        &self,
        schema: &Schema,
        property: TypeKey,
    ) -> Option<Arc<dyn Converter>> {
        let shape = SchemaShape::canonical(schema)?;
        self.converters
            .load()
            .iter()
            .find(|c| c.schema_shape() == shape && c.property_type() == property)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.converters.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `long` epoch milliseconds stored in a `NaiveDateTime`.
pub fn timestamp_millis_converter() -> TypedConverter<i64, NaiveDateTime> {
    TypedConverter::new(
        |dt: &NaiveDateTime| Ok(dt.and_utc().timestamp_millis()),
        |millis: &i64| {
            EPOCH
                .and_hms_opt(0, 0, 0)
                .zip(TimeDelta::try_milliseconds(*millis))
                .and_then(|(epoch, delta)| epoch.checked_add_signed(delta))
                .ok_or_else(|| Error::type_error(format!("timestamp {millis}ms out of range")))
        },
    )
}

/// `int` days since epoch stored in a `NaiveDate`.
pub fn date_converter() -> TypedConverter<i32, NaiveDate> {
    TypedConverter::new(
        |date: &NaiveDate| {
            i32::try_from(date.signed_duration_since(EPOCH).num_days())
                .map_err(|_| Error::type_error(format!("date {date} out of range")))
        },
        |days: &i32| {
            TimeDelta::try_days(*days as i64)
                .and_then(|delta| EPOCH.checked_add_signed(delta))
                .ok_or_else(|| Error::type_error(format!("date {days} days out of range")))
        },
    )
}
