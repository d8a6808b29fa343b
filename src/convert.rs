//! Conversions between [`Value`] and Rust types.
//!
//! [`ToValue`] and [`FromValue`] are the two hooks a domain type implements to
//! take part in parsing and serialization without the value model knowing
//! anything about it. Built-in scalars unwrap exactly one variant; there is no
//! coercion between `Int` and `Float`. Sequences and maps convert element by
//! element.
//!
//! ```
//! use jsonplus::{FromValue, Result, ToValue, Value};
//!
//! struct Rect {
//!     w: i64,
//!     h: i64,
//! }
//!
//! impl ToValue for Rect {
//!     fn to_value(&self) -> Value {
//!         Value::object([("w", self.w), ("h", self.h)])
//!     }
//! }
//!
//! impl FromValue for Rect {
//!     fn from_value(value: &Value) -> Result<Self> {
//!         Ok(Rect {
//!             w: value.field("w")?.extract_or_fail()?,
//!             h: value.field("h")?.extract_or_fail()?,
//!         })
//!     }
//! }
//!
//! let value = Value::from_domain(&Rect { w: 3, h: 4 });
//! assert_eq!(value.dump(), r#"{"h":4,"w":3}"#);
//! let back: Rect = value.extract_or_fail().unwrap();
//! assert_eq!((back.w, back.h), (3, 4));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::error::{Error, Result};
use crate::json::{Value, ValueType};

/// Build a [`Value`] from `self`.
pub trait ToValue {
    /// Convert to a value tree.
    fn to_value(&self) -> Value;
}

/// Read `Self` out of a [`Value`].
pub trait FromValue: Sized {
    /// Convert from a value tree.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when the value has the wrong shape and
    /// [`Error::OutOfRange`] when a number does not fit. Domain types may also
    /// propagate [`Error::InvalidAccess`] from field lookups.
    fn from_value(value: &Value) -> Result<Self>;
}

fn mismatch(expected: ValueType, value: &Value) -> Error {
    Error::TypeMismatch {
        expected,
        found: value.type_of(),
    }
}

// -------------------------------- Value --------------------------------- //

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

// ------------------------------- Scalars -------------------------------- //

impl ToValue for () {
    fn to_value(&self) -> Value {
        Value::Null
    }
}

impl FromValue for () {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(()),
            other => Err(mismatch(ValueType::Null, other)),
        }
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_bool().ok_or_else(|| mismatch(ValueType::Bool, value))
    }
}

impl ToValue for i64 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_i64().ok_or_else(|| mismatch(ValueType::Int, value))
    }
}

/// Integers other than `i64` go through `Int` with a range check.
macro_rules! impl_for_integer {
    ($($type:ty),*) => {
        $(
            impl FromValue for $type {
                fn from_value(value: &Value) -> Result<Self> {
                    let n = i64::from_value(value)?;
                    <$type>::try_from(n).map_err(|_| Error::OutOfRange {
                        target: stringify!($type),
                        value: n.to_string(),
                    })
                }
            }
        )*
    };
}

impl_for_integer!(i8, i16, i32, isize, u8, u16, u32, u64, usize);

/// Integers that always fit in an `i64`.
macro_rules! impl_to_value_lossless {
    ($($type:ty),*) => {
        $(
            impl ToValue for $type {
                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )*
    };
}

impl_to_value_lossless!(i8, i16, i32, u8, u16, u32);

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        value.as_f64().ok_or_else(|| mismatch(ValueType::Float, value))
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self> {
        let x = f64::from_value(value)?;
        let narrowed = x as f32;
        if x.is_finite() && narrowed.is_infinite() {
            return Err(Error::OutOfRange {
                target: "f32",
                value: x.to_string(),
            });
        }
        Ok(narrowed)
    }
}

// ------------------------------- Strings -------------------------------- //

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch(ValueType::String, value))
    }
}

// ------------------------------ Wrappers -------------------------------- //

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: FromValue> FromValue for Box<T> {
    fn from_value(value: &Value) -> Result<Self> {
        T::from_value(value).map(Box::new)
    }
}

/// `None` is `Null`; anything else converts as `T`.
impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

// ------------------------------ Sequences ------------------------------- //

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_array()
            .ok_or_else(|| mismatch(ValueType::Array, value))?
            .iter()
            .map(T::from_value)
            .collect()
    }
}

// -------------------------------- Maps ---------------------------------- //

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_object()
            .ok_or_else(|| mismatch(ValueType::Object, value))?
            .iter()
            .map(|(k, v)| Ok((k.clone(), T::from_value(v)?)))
            .collect()
    }
}

impl<T: ToValue, H: BuildHasher> ToValue for HashMap<String, T, H> {
    fn to_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl<T: FromValue, H: BuildHasher + Default> FromValue for HashMap<String, T, H> {
    fn from_value(value: &Value) -> Result<Self> {
        value
            .as_object()
            .ok_or_else(|| mismatch(ValueType::Object, value))?
            .iter()
            .map(|(k, v)| Ok((k.clone(), T::from_value(v)?)))
            .collect()
    }
}
