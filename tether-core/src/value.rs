use std::fmt::{self, Display, Write};

/// Dynamically typed value moved between entities, entries and drivers.
///
/// Every variant carries an `Option` so that a typed NULL (the empty value of a field) can be told
/// apart from the untyped `Value::Null` produced by drivers.
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Integer(Option<i64>),
    Float(Option<f64>),
    Text(Option<String>),
    Blob(Option<Box<[u8]>>),
}

/// How a value must be bound to a placeholder by drivers requiring typed binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindKind {
    Numeric,
    Binary,
    Text,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            Value::Null
                | Value::Boolean(None)
                | Value::Integer(None)
                | Value::Float(None)
                | Value::Text(None)
                | Value::Blob(None)
        )
    }

    /// Placeholder type of the value: integers, booleans and floats are numeric, blobs are binary,
    /// everything else is text. Write and read paths must both go through this mapping.
    pub fn bind_kind(&self) -> BindKind {
        match self {
            Value::Boolean(..) | Value::Integer(..) | Value::Float(..) => BindKind::Numeric,
            Value::Blob(..) => BindKind::Binary,
            Value::Null | Value::Text(..) => BindKind::Text,
        }
    }

    pub fn same_type(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (l, r) if l.is_null() || r.is_null() => l.is_null() && r.is_null(),
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Integer(l), Self::Integer(r)) => l == r,
            (Self::Float(l), Self::Float(r)) => l == r,
            (Self::Text(l), Self::Text(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(Some(v)) => write!(f, "{}", v),
            Value::Integer(Some(v)) => write!(f, "{}", v),
            Value::Float(Some(v)) => write!(f, "{}", v),
            Value::Text(Some(v)) => {
                f.write_char('\'')?;
                let mut out = String::with_capacity(v.len());
                crate::write_escaped(&mut out, v, '\'', "''");
                f.write_str(&out)?;
                f.write_char('\'')
            }
            Value::Blob(Some(v)) => {
                f.write_str("X'")?;
                for b in v.iter() {
                    write!(f, "{:02X}", b)?;
                }
                f.write_char('\'')
            }
            _ => f.write_str("NULL"),
        }
    }
}
