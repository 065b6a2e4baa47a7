use crate::{
    ConditionBuilder, Driver, Entry, Error, Result, Value, separated_by, write_identifier_quoted,
};

/// Statements on one table, re-derived for every call.
pub struct DatabaseTable<'d, D: Driver> {
    name: String,
    primary_key: String,
    driver: &'d mut D,
}

impl<'d, D: Driver> DatabaseTable<'d, D> {
    pub fn new(name: String, primary_key: String, driver: &'d mut D) -> Self {
        Self {
            name,
            primary_key,
            driver,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column name of the primary key.
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    fn report<T>(&self, result: Result<T>) -> Result<T> {
        result.inspect_err(|e| log::error!("Statement on table `{}` failed: {}", self.name, e))
    }

    fn write_select_from(&self, out: &mut String) {
        out.push_str("SELECT * FROM ");
        write_identifier_quoted(out, &self.name);
    }

    fn write_where_primary_key(&self, out: &mut String) {
        out.push_str(" WHERE ");
        write_identifier_quoted(out, &self.primary_key);
        out.push_str(" = ?;");
    }

    /// Insert the row and return the generated id.
    ///
    /// Null values are left out so that column defaults and auto increment apply.
    pub fn insert(&mut self, entry: &Entry) -> Result<Value> {
        let (columns, values): (Vec<_>, Vec<_>) = entry
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(c, v)| (c, v.clone()))
            .unzip();
        let mut query = String::with_capacity(64 + 16 * columns.len());
        query.push_str("INSERT INTO ");
        write_identifier_quoted(&mut query, &self.name);
        if columns.is_empty() {
            query.push_str(" DEFAULT VALUES;");
        } else {
            query.push_str(" (");
            separated_by(&mut query, &columns, |out, c| write_identifier_quoted(out, c), ", ");
            query.push_str(") VALUES (");
            separated_by(&mut query, &columns, |out, _| out.push('?'), ", ");
            query.push_str(");");
        }
        let result = self.driver.insert(&query, &values);
        self.report(result)
    }

    /// Overwrite the columns in `entry` of the row identified by `primary_key`.
    pub fn update(&mut self, primary_key: impl Into<Value>, entry: &Entry) -> Result<()> {
        if entry.is_empty() {
            let error = Error::DatabaseAction(format!(
                "nothing to update in table `{}`",
                self.name
            ));
            log::error!("{}", error);
            return Err(error);
        }
        let mut query = String::with_capacity(64 + 16 * entry.len());
        query.push_str("UPDATE ");
        write_identifier_quoted(&mut query, &self.name);
        query.push_str(" SET ");
        separated_by(
            &mut query,
            entry.names(),
            |out, c| {
                write_identifier_quoted(out, c);
                out.push_str(" = ?");
            },
            ", ",
        );
        self.write_where_primary_key(&mut query);
        let mut parameters = Vec::with_capacity(entry.len() + 1);
        parameters.extend_from_slice(entry.values());
        parameters.push(primary_key.into());
        let result = self.driver.execute_prepared(&query, &parameters);
        self.report(result)
    }

    pub fn remove(&mut self, primary_key: impl Into<Value>) -> Result<()> {
        let mut query = String::with_capacity(64);
        query.push_str("DELETE FROM ");
        write_identifier_quoted(&mut query, &self.name);
        self.write_where_primary_key(&mut query);
        let result = self.driver.execute_prepared(&query, &[primary_key.into()]);
        self.report(result)
    }

    pub fn select(&mut self, primary_key: impl Into<Value>) -> Result<Entry> {
        let mut query = String::with_capacity(64);
        self.write_select_from(&mut query);
        self.write_where_primary_key(&mut query);
        let result = self.driver.select(&query, &primary_key.into());
        self.report(result)
    }

    pub fn select_all(&mut self) -> Result<Vec<Entry>> {
        let mut query = String::with_capacity(32);
        self.write_select_from(&mut query);
        query.push(';');
        let result = self.driver.select_multiple(&query);
        self.report(result)
    }

    /// Rows matching the condition, every row when the builder is empty.
    pub fn select_where(&mut self, condition: &ConditionBuilder) -> Result<Vec<Entry>> {
        let mut query = String::with_capacity(64 + condition.condition().len());
        self.write_select_from(&mut query);
        if !condition.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(condition.condition());
        }
        query.push(';');
        let result = self
            .driver
            .select_multiple_with_parameters(&query, condition.parameters());
        self.report(result)
    }
}
