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

//! Binding errors.
//!
//! Every error in this module signals a misconfiguration between a schema and
//! the native types it is bound to. None of them is transient, so nothing in
//! this crate retries: a failed [`bind`](crate::BindingRegistry::bind) aborts on
//! the first error and the caller is expected to fix the schema or the type.

use std::borrow::Cow;

use thiserror::Error;

/// Global flag to check if FORY_PANIC_ON_ERROR environment variable is set at compile time.
/// Set FORY_PANIC_ON_ERROR=1 at compile time to enable panic on error.
pub const PANIC_ON_ERROR: bool = option_env!("FORY_PANIC_ON_ERROR").is_some();

/// Check if FORY_PANIC_ON_ERROR environment variable is set.
#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for schema binding and adapter resolution.
///
/// # Always Use Static Constructor Functions
///
/// Do not construct variants directly, use the constructor functions instead:
///
/// ```rust
/// use fory_schema_core::error::Error;
///
/// let err = Error::type_not_class("example.Person is bound to i32");
/// let err = Error::missing_element_type(format!("{} has no element type", "Bag"));
/// ```
///
/// ## Debug Mode: FORY_PANIC_ON_ERROR
///
/// Setting `FORY_PANIC_ON_ERROR` at compile time makes every constructor panic
/// at the place the error is created, which gives a full stack trace together
/// with `RUST_BACKTRACE=1`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A record schema was matched against a native type that is not a class.
    ///
    /// Do not construct this variant directly; use [`Error::type_not_class`] instead.
    #[error("{0}")]
    TypeNotClass(Cow<'static, str>),

    /// The native type classification does not fit the schema node's shape.
    ///
    /// Do not construct this variant directly; use [`Error::type_kind_mismatch`] instead.
    #[error("{0}")]
    TypeKindMismatch(Cow<'static, str>),

    /// A collection type has no concrete element type.
    ///
    /// Do not construct this variant directly; use [`Error::missing_element_type`] instead.
    #[error("{0}")]
    MissingElementType(Cow<'static, str>),

    /// A dictionary type is keyed by something other than text.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_dictionary_key_type`] instead.
    #[error("{0}")]
    InvalidDictionaryKeyType(Cow<'static, str>),

    /// A multi-branch union references a record that has not been bound.
    ///
    /// Do not construct this variant directly; use [`Error::unregistered_union_member`] instead.
    #[error("{0}")]
    UnregisteredUnionMember(Cow<'static, str>),

    /// A registered array adapter cannot drive the collection it was given.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_adapter_type`] instead.
    #[error("{0}")]
    InvalidAdapterType(Cow<'static, str>),

    /// A record field has no matching property on the native class.
    ///
    /// Do not construct this variant directly; use [`Error::missing_property`] instead.
    #[error("{0}")]
    MissingProperty(Cow<'static, str>),

    /// Maximum schema nesting depth exceeded.
    ///
    /// Do not construct this variant directly; use [`Error::depth_exceed`] instead.
    #[error("{0}")]
    DepthExceed(Cow<'static, str>),

    /// A value handed to a converter or adapter has the wrong type.
    ///
    /// Do not construct this variant directly; use [`Error::type_error`] instead.
    #[error("{0}")]
    TypeError(Cow<'static, str>),

    /// Unsupported operation.
    ///
    /// Do not construct this variant directly; use [`Error::unsupported`] instead.
    #[error("{0}")]
    Unsupported(Cow<'static, str>),
}

macro_rules! error_constructor {
    ($(#[$doc:meta])* $fn_name:ident => $variant:ident) => {
        $(#[$doc])*
        ///
        /// If `FORY_PANIC_ON_ERROR` environment variable is set, this will panic with the error message.
        #[inline(always)]
        #[cold]
        #[track_caller]
        pub fn $fn_name<S: Into<Cow<'static, str>>>(s: S) -> Self {
            let err = Error::$variant(s.into());
            if PANIC_ON_ERROR {
                panic!("FORY_PANIC_ON_ERROR: {}", err);
            }
            err
        }
    };
}

impl Error {
    error_constructor!(
        /// Creates a new [`Error::TypeNotClass`].
        type_not_class => TypeNotClass
    );
    error_constructor!(
        /// Creates a new [`Error::TypeKindMismatch`].
        type_kind_mismatch => TypeKindMismatch
    );
    error_constructor!(
        /// Creates a new [`Error::MissingElementType`].
        missing_element_type => MissingElementType
    );
    error_constructor!(
        /// Creates a new [`Error::InvalidDictionaryKeyType`].
        invalid_dictionary_key_type => InvalidDictionaryKeyType
    );
    error_constructor!(
        /// Creates a new [`Error::UnregisteredUnionMember`].
        unregistered_union_member => UnregisteredUnionMember
    );
    error_constructor!(
        /// Creates a new [`Error::InvalidAdapterType`].
        invalid_adapter_type => InvalidAdapterType
    );
    error_constructor!(
        /// Creates a new [`Error::MissingProperty`].
        missing_property => MissingProperty
    );
    error_constructor!(
        /// Creates a new [`Error::DepthExceed`].
        depth_exceed => DepthExceed
    );
    error_constructor!(
        /// Creates a new [`Error::TypeError`].
        type_error => TypeError
    );
    error_constructor!(
        /// Creates a new [`Error::Unsupported`].
        unsupported => Unsupported
    );

    /// Appends the schema path being bound when the error was raised.
    ///
    /// Only the message-carrying variants are rewritten; the variant itself is
    /// kept so callers can still match on the error kind.
    #[inline(never)]
    pub fn with_path(self, path: &str) -> Error {
        fn append(s: Cow<'static, str>, path: &str) -> Cow<'static, str> {
            let mut msg = s.into_owned();
            msg.push_str(" (at ");
            msg.push_str(path);
            msg.push(')');
            Cow::Owned(msg)
        }
        match self {
            Error::TypeNotClass(s) => Error::TypeNotClass(append(s, path)),
            Error::TypeKindMismatch(s) => Error::TypeKindMismatch(append(s, path)),
            Error::MissingElementType(s) => Error::MissingElementType(append(s, path)),
            Error::InvalidDictionaryKeyType(s) => {
                Error::InvalidDictionaryKeyType(append(s, path))
            }
            Error::UnregisteredUnionMember(s) => Error::UnregisteredUnionMember(append(s, path)),
            Error::MissingProperty(s) => Error::MissingProperty(append(s, path)),
            Error::DepthExceed(s) => Error::DepthExceed(append(s, path)),
            other => other,
        }
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// # Examples
/// ```
/// use fory_schema_core::ensure;
/// use fory_schema_core::error::Error;
///
/// fn check_size(n: usize) -> Result<(), Error> {
///     ensure!(n > 0, Error::unsupported("empty fixed"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

/// Returns early with an [`Error::Unsupported`].
///
/// # Examples
/// ```
/// use fory_schema_core::bail;
/// use fory_schema_core::error::Error;
///
/// fn fail_fast(kind: &str) -> Result<(), Error> {
///     bail!("{} cannot be bound", kind);
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::unsupported($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::unsupported(format!($fmt, $($arg)*)))
    };
}
