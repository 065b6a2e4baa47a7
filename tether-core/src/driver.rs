use crate::{Entry, Result, SqlColumnDescriptor, Transactional, Value};

/// Blocking connection to a concrete SQL engine.
///
/// At most one operation may be in flight per driver. Implementations log the statements they run at
/// debug level and attach the (truncated) query to the errors they return.
pub trait Driver: Transactional {
    /// Run a statement without parameters.
    fn execute(&mut self, query: &str) -> Result<()>;

    /// Run a parameterized statement, fails with [`InvalidPrimaryKey`](crate::Error::InvalidPrimaryKey)
    /// when no row was affected and with [`DatabaseAction`](crate::Error::DatabaseAction) when the
    /// engine rejects it.
    fn execute_prepared(&mut self, query: &str, parameters: &[Value]) -> Result<()>;

    /// Run an insert statement and return the id generated by the storage.
    fn insert(&mut self, query: &str, parameters: &[Value]) -> Result<Value>;

    /// The first row selected by `key`, [`InvalidPrimaryKey`](crate::Error::InvalidPrimaryKey) when
    /// there is none.
    fn select(&mut self, query: &str, key: &Value) -> Result<Entry>;

    fn select_multiple(&mut self, query: &str) -> Result<Vec<Entry>> {
        self.select_multiple_with_parameters(query, &[])
    }

    fn select_multiple_with_parameters(
        &mut self,
        query: &str,
        parameters: &[Value],
    ) -> Result<Vec<Entry>>;

    /// Rendering of column definitions understood by this engine.
    fn column_descriptor(&self) -> SqlColumnDescriptor {
        SqlColumnDescriptor::default()
    }

    fn close(self) -> Result<()>
    where
        Self: Sized;
}
