use crate::{Result, Value};

/// Raw persistence metadata of one field, as declared on the entity.
///
/// Nothing here is validated or defaulted: a missing column name or type stays `None` so that the
/// resolver can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Rust field name, also the property name used by condition builders.
    pub name: &'static str,
    pub column: Option<&'static str>,
    pub sql_type: Option<&'static str>,
    pub length: Option<i64>,
    pub not_null: bool,
    pub unique: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub default: Option<&'static str>,
}

impl FieldDef {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            column: None,
            sql_type: None,
            length: None,
            not_null: false,
            unique: false,
            primary_key: false,
            auto_increment: false,
            default: None,
        }
    }
}

/// Raw persistence metadata of an entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    /// Name of the Rust type, used in messages.
    pub type_name: &'static str,
    pub table: Option<&'static str>,
    /// Fields in declaration order.
    pub fields: &'static [FieldDef],
}

/// A type whose instances map to table rows.
///
/// Usually implemented through `#[derive(Entity)]`:
/// ```rust,ignore
/// #[derive(Default, Entity)]
/// #[tether(table = "clients")]
/// struct Client {
///     #[tether(column = "id", sql_type = "INTEGER", primary_key, auto_increment)]
///     id: Option<i64>,
///     #[tether(column = "name", sql_type = "VARCHAR", length = 32, not_null)]
///     name: String,
/// }
/// ```
pub trait Entity: Sized + 'static {
    fn table_def() -> &'static TableDef;

    /// Read the field called `name`.
    fn get_property(&self, name: &str) -> Result<Value>;

    /// Write the field called `name`, converting the value to the field type.
    fn set_property(&mut self, name: &str, value: Value) -> Result<()>;

    /// A zero-argument instance later populated from a row, `None` when the type cannot build one.
    fn blank() -> Option<Self> {
        None
    }
}
