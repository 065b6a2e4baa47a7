use crate::{Error, Result, Value};
use std::any;

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// Entities read and write their fields through this trait, so any field type of an entity must
/// implement it.
///
/// # Examples
/// ```rust
/// use tether_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Integer(Some(42))));
/// let n: i32 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// The typed NULL of this type.
    fn as_empty_value() -> Value;
    fn as_value(self) -> Value;
    /// Convert back, accepting the canonical variant and the lossless alternatives drivers produce
    /// (for example booleans stored as integers).
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(Some(value.into()))
    }
}

fn mismatch<T>(value: &Value) -> Error {
    Error::Conversion(format!(
        "Cannot convert {:?} into {}",
        value,
        any::type_name::<T>()
    ))
}

macro_rules! impl_as_value_integer {
    ($($source:ty),+ $(,)?) => {$(
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                Value::Integer(None)
            }
            fn as_value(self) -> Value {
                Value::Integer(Some(self as i64))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    Value::Integer(Some(v)) => <$source>::try_from(v).map_err(|_| {
                        Error::Conversion(format!(
                            "Value {v}: i64 is out of range for {}",
                            any::type_name::<Self>(),
                        ))
                    }),
                    Value::Boolean(Some(v)) => Ok(v as $source),
                    Value::Text(Some(ref v)) => {
                        v.trim().parse().map_err(|_| mismatch::<Self>(&value))
                    }
                    _ => Err(mismatch::<Self>(&value)),
                }
            }
        }
    )+};
}
impl_as_value_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_as_value_float {
    ($($source:ty),+ $(,)?) => {$(
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                Value::Float(None)
            }
            fn as_value(self) -> Value {
                Value::Float(Some(self as f64))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    Value::Float(Some(v)) => Ok(v as $source),
                    Value::Integer(Some(v)) => Ok(v as $source),
                    Value::Text(Some(ref v)) => {
                        v.trim().parse().map_err(|_| mismatch::<Self>(&value))
                    }
                    _ => Err(mismatch::<Self>(&value)),
                }
            }
        }
    )+};
}
impl_as_value_float!(f32, f64);

impl AsValue for bool {
    fn as_empty_value() -> Value {
        Value::Boolean(None)
    }
    fn as_value(self) -> Value {
        Value::Boolean(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(Some(v)) => Ok(v),
            Value::Integer(Some(v @ (0 | 1))) => Ok(v == 1),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl AsValue for String {
    fn as_empty_value() -> Value {
        Value::Text(None)
    }
    fn as_value(self) -> Value {
        Value::Text(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(Some(v)) => Ok(v),
            Value::Integer(Some(v)) => Ok(v.to_string()),
            Value::Float(Some(v)) => Ok(v.to_string()),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl AsValue for Box<[u8]> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Blob(Some(v)) => Ok(v),
            Value::Text(Some(v)) => Ok(v.into_bytes().into_boxed_slice()),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl AsValue for Vec<u8> {
    fn as_empty_value() -> Value {
        Value::Blob(None)
    }
    fn as_value(self) -> Value {
        Value::Blob(Some(self.into_boxed_slice()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        <Box<[u8]>>::try_from_value(value).map(Into::into)
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
    }
}
