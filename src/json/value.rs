//! The value tree.
//!
//! [`Value`] is a closed tagged union over the seven kinds of data the grammar
//! can express. Children are owned by value, so a tree is always acyclic and
//! `clone()` is a deep copy.
//!
//! Objects are backed by a `BTreeMap`, which makes iteration (and therefore
//! serialization) key-sorted rather than insertion-ordered.

use std::collections::BTreeMap;
use std::fmt;

use crate::convert::{FromValue, ToValue};
use crate::error::{Accessor, Error, Result};

/// Array payload.
pub type Array = Vec<Value>;

/// Object payload, ordered by key.
pub type Object = BTreeMap<String, Value>;

/// The type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// UTF-8 string
    String,
    /// Ordered sequence
    Array,
    /// Key-sorted mapping
    Object,
}

impl ValueType {
    /// Lower-case name of the tag.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed or constructed value.
///
/// Equality is structural: two values are equal when they carry the same tag
/// and recursively equal payloads. Floats compare with IEEE semantics, so
/// `Int(1)` never equals `Float(1.0)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absence of data. The default.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String.
    String(String),
    /// Array of values.
    Array(Array),
    /// Object with ordered keys.
    Object(Object),
}

impl Value {
    /// Build an object from `(key, value)` pairs. Later duplicates win.
    ///
    /// ```
    /// use jsonplus::Value;
    ///
    /// let rect = Value::object([("w", 10), ("h", 20)]);
    /// assert_eq!(rect.dump(), r#"{"h":20,"w":10}"#);
    /// ```
    pub fn object<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs.into_iter().collect()
    }

    /// Build a value from any type implementing [`ToValue`].
    pub fn from_domain<T: ToValue + ?Sized>(value: &T) -> Self {
        value.to_value()
    }

    /// Returns the type tag.
    pub fn type_of(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        self.type_of().name()
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns true if this is an integer value.
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Returns true if this is a float value.
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns the boolean value if this is a Bool, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an Int, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float if this is a Float, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the array if this is an Array, None otherwise.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a reference to the object if this is an Object, None otherwise.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a value from an object by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Get a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    /// Number of elements (arrays) or entries (objects); zero for scalars.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(arr) => arr.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    /// True for empty arrays/objects and all scalars.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index` of an array.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAccess`] when `self` is not an array or `index` is out
    /// of bounds.
    pub fn index(&self, index: usize) -> Result<&Value> {
        self.get_index(index).ok_or_else(|| Error::InvalidAccess {
            accessor: Accessor::Index(index),
            found: self.type_of(),
        })
    }

    /// Value mapped to `key` in an object.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAccess`] when `self` is not an object or has no such key.
    pub fn field(&self, key: &str) -> Result<&Value> {
        self.get(key).ok_or_else(|| Error::InvalidAccess {
            accessor: Accessor::Key(key.to_string()),
            found: self.type_of(),
        })
    }

    /// True if `self` is an object containing `key`.
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Convert to `T`, or `None` on any mismatch.
    pub fn extract<T: FromValue>(&self) -> Option<T> {
        T::from_value(self).ok()
    }

    /// Convert to `T`.
    ///
    /// # Errors
    ///
    /// [`Error::UnavailableType`] when the conversion fails for any reason.
    pub fn extract_or_fail<T: FromValue>(&self) -> Result<T> {
        self.extract().ok_or_else(|| Error::UnavailableType {
            target: std::any::type_name::<T>(),
            found: self.type_of(),
        })
    }

    /// Canonical, whitespace-free serialization.
    pub fn dump(&self) -> String {
        super::dump::dump(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($type:ty),*) => {
        $(
            impl From<$type> for Value {
                fn from(value: $type) -> Self {
                    Value::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(values: [T; N]) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================================================
// Comparisons against tags and scalars
// ============================================================================

/// A value equals a type tag when it carries that tag.
impl PartialEq<ValueType> for Value {
    fn eq(&self, other: &ValueType) -> bool {
        self.type_of() == *other
    }
}

impl PartialEq<Value> for ValueType {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

/// `()` stands for `null`.
impl PartialEq<()> for Value {
    fn eq(&self, _other: &()) -> bool {
        self.is_null()
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == Some(other.as_str())
    }
}

impl PartialEq<Value> for str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for String {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

/// Scalar comparisons match tag and payload; `Int(1)` never equals `1.0`.
macro_rules! impl_partial_eq_scalar {
    ($($ty:ty => $as:ident),* $(,)?) => {
        $(
            impl PartialEq<$ty> for Value {
                fn eq(&self, other: &$ty) -> bool {
                    self.$as() == Some(*other)
                }
            }

            impl PartialEq<Value> for $ty {
                fn eq(&self, other: &Value) -> bool {
                    other == self
                }
            }
        )*
    };
}

impl_partial_eq_scalar!(bool => as_bool, i64 => as_i64, f64 => as_f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_types() {
        assert_eq!(Value::default().type_of(), ValueType::Null);
        assert_eq!(Value::from(()).type_of(), ValueType::Null);
        assert_eq!(Value::from(true).type_of(), ValueType::Bool);
        assert_eq!(Value::from(42).type_of(), ValueType::Int);
        assert_eq!(Value::from(2.75).type_of(), ValueType::Float);
        assert_eq!(Value::from("Hello, world !").type_of(), ValueType::String);
        assert_eq!(
            Value::from(vec![Value::Null, Value::from(true), Value::from(42)]).type_of(),
            ValueType::Array
        );
        assert_eq!(
            Value::object([("key1", "value1"), ("key2", "value2")]).type_of(),
            ValueType::Object
        );
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(42).as_i64(), Some(42));
        assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::from("test").as_str(), Some("test"));
        assert_eq!(Value::Int(42).as_f64(), None);
        assert_eq!(Value::Float(1.0).as_i64(), None);
    }

    #[test]
    fn test_value_equality() {
        let a = Value::object([("a", Value::Int(1))]);
        let b = Value::object([("a", Value::Int(1))]);
        assert_eq!(a, b);
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::from([1, 2]), Value::from([2, 1]));
        assert_ne!(Value::from([1, 2]), Value::from([1, 2, 3]));
    }

    #[test]
    fn test_compare_with_type_tag() {
        assert_eq!(Value::from(42), ValueType::Int);
        assert_eq!(ValueType::String, Value::from("s"));
        assert_ne!(Value::Float(1.0), ValueType::Int);
        assert_eq!(Value::object([("k", 1)]), ValueType::Object);
    }

    #[test]
    fn test_compare_with_scalars() {
        assert_eq!(Value::Null, ());
        assert_ne!(Value::Bool(false), ());
        assert_eq!(Value::Bool(true), true);
        assert_ne!(Value::Int(1), true);
        assert_eq!(Value::Int(42), 42i64);
        assert_eq!(42i64, Value::Int(42));
        assert_ne!(Value::Float(42.0), 42i64);
        assert_eq!(Value::Float(0.5), 0.5);
        assert_ne!(Value::Int(1), 1.0);
        assert_ne!(Value::Float(f64::NAN), f64::NAN);
    }

    #[test]
    fn test_compare_with_strings() {
        let value = Value::from("Hello");
        assert_eq!(value, "Hello");
        assert_eq!(value, *"Hello");
        assert_eq!(value, "Hello".to_string());
        assert_eq!("Hello", value);
        assert_eq!("Hello".to_string(), value);
        assert_ne!(Value::from([1]), "[1]");
        assert_ne!(Value::Null, "");
    }

    #[test]
    fn test_index_and_field() {
        let arr = Value::from([10, 20, 30]);
        assert_eq!(arr.index(1), Ok(&Value::Int(20)));
        assert_eq!(
            arr.index(3),
            Err(Error::InvalidAccess {
                accessor: Accessor::Index(3),
                found: ValueType::Array,
            })
        );
        assert!(Value::Int(1).index(0).is_err());
        assert!(Value::Array(vec![]).index(0).is_err());

        let obj = Value::object([("k", "v")]);
        assert_eq!(obj.field("k"), Ok(&Value::from("v")));
        assert_eq!(obj.field("missing").map_err(|e| e.code()), Err(100));
        assert!(arr.field("k").is_err());
    }

    #[test]
    fn test_has_key() {
        let obj = Value::object([("k", 1)]);
        assert!(obj.has_key("k"));
        assert!(!obj.has_key("other"));
        assert!(!Value::from([1]).has_key("k"));
        assert!(!Value::Null.has_key("k"));
    }

    #[test]
    fn test_object_last_write_wins() {
        let obj = Value::object([("k", 1), ("k", 2)]);
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.field("k"), Ok(&Value::Int(2)));
    }

    #[test]
    fn test_extract() {
        assert_eq!(Value::Bool(true).extract::<bool>(), Some(true));
        assert_eq!(Value::Int(42).extract::<i64>(), Some(42));
        assert_eq!(Value::Int(42).extract::<String>(), None);
        assert_eq!(Value::Null.extract::<()>(), Some(()));
        assert_eq!(
            Value::from([1, 2, 3, 4, 5]).extract::<Array>().map(|a| a.len()),
            Some(5)
        );
    }

    #[test]
    fn test_extract_or_fail() {
        assert_eq!(Value::from("x").extract_or_fail::<String>(), Ok("x".to_string()));
        let err = Value::from("x").extract_or_fail::<i64>().unwrap_err();
        assert_eq!(err.name(), "UnavailableType");
        assert_eq!(
            err,
            Error::UnavailableType {
                target: "i64",
                found: ValueType::String,
            }
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Bool(false).type_name(), "bool");
        assert_eq!(Value::Int(0).type_name(), "int");
        assert_eq!(Value::Float(0.0).type_name(), "float");
        assert_eq!(Value::String(String::new()).type_name(), "string");
        assert_eq!(Value::Array(vec![]).type_name(), "array");
        assert_eq!(Value::Object(Object::new()).type_name(), "object");
    }

    #[test]
    fn test_len() {
        assert_eq!(Value::from([1, 2]).len(), 2);
        assert_eq!(Value::object([("a", 1)]).len(), 1);
        assert!(Value::Int(7).is_empty());
    }

    #[test]
    fn test_option_and_iterators() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::Int(3));
        let arr: Value = (1..=3).collect();
        assert_eq!(arr, Value::from([1, 2, 3]));
    }
}
