use crate::{ColumnNames, Error, Result, Value, separated_by, write_identifier_quoted};
use std::fmt::{self, Display, Formatter};

/// Fluent builder of a parameterized `WHERE` fragment.
///
/// Values never end up in the fragment: every comparison writes `?` placeholders and pushes the
/// values on the parameter list in the same order, so the fragment and [`parameters`](Self::parameters)
/// must always travel together.
///
/// ```rust,ignore
/// let mut builder = database.create_condition_builder(column_names);
/// builder.property("name")?.like("J%").and().property("id")?.between(1, 10);
/// assert_eq!(builder.to_string(), "`name` LIKE ? AND `id` BETWEEN ? AND ?");
/// ```
#[derive(Debug, Default, Clone)]
pub struct ConditionBuilder {
    condition: String,
    parameters: Vec<Value>,
    column_names: ColumnNames,
}

impl ConditionBuilder {
    /// Builder resolving properties through `column_names` (property name to column name).
    pub fn new(column_names: ColumnNames) -> Self {
        Self {
            condition: String::with_capacity(64),
            parameters: Vec::new(),
            column_names,
        }
    }

    /// Append the column mapped to property `name`.
    pub fn property(&mut self, name: &str) -> Result<&mut Self> {
        let Some(column) = self.column_names.get(name) else {
            let error = Error::PropertyNotFound(name.into());
            log::error!("{}", error);
            return Err(error);
        };
        write_identifier_quoted(&mut self.condition, column);
        Ok(self)
    }

    pub fn and(&mut self) -> &mut Self {
        self.condition.push_str(" AND ");
        self
    }

    pub fn or(&mut self) -> &mut Self {
        self.condition.push_str(" OR ");
        self
    }

    pub fn not(&mut self) -> &mut Self {
        self.condition.push_str(" NOT ");
        self
    }

    fn compare(&mut self, operator: &str, value: Value) -> &mut Self {
        self.condition.push(' ');
        self.condition.push_str(operator);
        self.condition.push_str(" ?");
        self.parameters.push(value);
        self
    }

    pub fn like(&mut self, pattern: impl Into<Value>) -> &mut Self {
        self.compare("LIKE", pattern.into())
    }

    /// `IN (?, ?, ...)`, one placeholder per value.
    pub fn r#in<V: Into<Value>>(&mut self, values: impl IntoIterator<Item = V>) -> &mut Self {
        self.condition.push_str(" IN (");
        let parameters = &mut self.parameters;
        separated_by(
            &mut self.condition,
            values,
            |out, v| {
                out.push('?');
                parameters.push(v.into());
            },
            ", ",
        );
        self.condition.push(')');
        self
    }

    pub fn between(&mut self, low: impl Into<Value>, high: impl Into<Value>) -> &mut Self {
        self.condition.push_str(" BETWEEN ? AND ?");
        self.parameters.push(low.into());
        self.parameters.push(high.into());
        self
    }

    pub fn lt(&mut self, value: impl Into<Value>) -> &mut Self {
        self.compare("<", value.into())
    }

    pub fn le(&mut self, value: impl Into<Value>) -> &mut Self {
        self.compare("<=", value.into())
    }

    pub fn gt(&mut self, value: impl Into<Value>) -> &mut Self {
        self.compare(">", value.into())
    }

    pub fn ge(&mut self, value: impl Into<Value>) -> &mut Self {
        self.compare(">=", value.into())
    }

    pub fn eq(&mut self, value: impl Into<Value>) -> &mut Self {
        self.compare("=", value.into())
    }

    pub fn ne(&mut self, value: impl Into<Value>) -> &mut Self {
        self.compare("<>", value.into())
    }

    /// Values bound to the placeholders, left to right.
    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn column_names(&self) -> &ColumnNames {
        &self.column_names
    }

    pub fn is_empty(&self) -> bool {
        self.condition.trim().is_empty()
    }
}

impl Display for ConditionBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.condition)
    }
}
