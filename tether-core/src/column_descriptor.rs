use crate::{ColumnDefinition, separated_by, write_escaped, write_identifier_quoted};
use std::borrow::Cow;

/// Renders column definitions into the column list of a `CREATE TABLE` statement.
pub trait ColumnDescriptor {
    /// Append the description of one column to `out`.
    fn write_column(&self, out: &mut String, column: &ColumnDefinition);

    fn describe(&self, column: &ColumnDefinition) -> String {
        let mut out = String::with_capacity(64);
        self.write_column(&mut out, column);
        out
    }

    /// Every column, separated by `", "`.
    fn describe_all(&self, columns: &[ColumnDefinition]) -> String {
        let mut out = String::with_capacity(64 * columns.len());
        separated_by(
            &mut out,
            columns,
            |out, column| self.write_column(out, column),
            ", ",
        );
        out
    }
}

/// Plain SQL rendering: `` `name` TYPE(len) UNIQUE NOT NULL DEFAULT "v" PRIMARY KEY AUTO_INCREMENT ``.
///
/// Only the auto increment keyword differs between the supported engines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlColumnDescriptor {
    autoincrement_clause: Cow<'static, str>,
}

impl SqlColumnDescriptor {
    pub fn new(autoincrement_clause: impl Into<Cow<'static, str>>) -> Self {
        Self {
            autoincrement_clause: autoincrement_clause.into(),
        }
    }

    pub const fn mysql() -> Self {
        Self {
            autoincrement_clause: Cow::Borrowed("AUTO_INCREMENT"),
        }
    }

    pub const fn sqlite() -> Self {
        Self {
            autoincrement_clause: Cow::Borrowed("AUTOINCREMENT"),
        }
    }

    pub fn autoincrement_clause(&self) -> &str {
        &self.autoincrement_clause
    }
}

impl Default for SqlColumnDescriptor {
    fn default() -> Self {
        Self::mysql()
    }
}

impl ColumnDescriptor for SqlColumnDescriptor {
    fn write_column(&self, out: &mut String, column: &ColumnDefinition) {
        write_identifier_quoted(out, &column.name);
        out.push(' ');
        out.push_str(&column.sql_type);
        if let Some(length) = column.length {
            out.push('(');
            out.push_str(&length.to_string());
            out.push(')');
        }
        if column.unique {
            out.push_str(" UNIQUE");
        }
        if column.not_null {
            out.push_str(" NOT NULL");
        }
        if let Some(default) = &column.default_value {
            out.push_str(" DEFAULT \"");
            write_escaped(out, default, '"', "\"\"");
            out.push('"');
        }
        if column.primary_key {
            out.push_str(" PRIMARY KEY");
        }
        if column.auto_increment && !self.autoincrement_clause.is_empty() {
            out.push(' ');
            out.push_str(&self.autoincrement_clause);
        }
    }
}
