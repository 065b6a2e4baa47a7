use crate::{
    ColumnDefinition, ColumnDescriptor, ColumnNames, ConditionBuilder, DatabaseTable, Driver, Error,
    Result, Transactional, write_identifier_quoted,
};

/// Table lifecycle on top of a [`Driver`].
pub struct Database<D: Driver> {
    driver: D,
    column_descriptor: Box<dyn ColumnDescriptor>,
}

impl<D: Driver> Database<D> {
    /// Uses the column descriptor of the driver.
    pub fn new(driver: D) -> Self {
        let column_descriptor = Box::new(driver.column_descriptor());
        Self {
            driver,
            column_descriptor,
        }
    }

    pub fn with_column_descriptor(
        driver: D,
        column_descriptor: impl ColumnDescriptor + 'static,
    ) -> Self {
        Self {
            driver,
            column_descriptor: Box::new(column_descriptor),
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Probes the table with a zero rows select, any failure means it does not exist.
    ///
    /// This is not a catalog lookup: a table the connection cannot read also counts as missing.
    pub fn table_exists(&mut self, name: &str) -> bool {
        let mut query = String::with_capacity(32 + name.len());
        query.push_str("SELECT * FROM ");
        write_identifier_quoted(&mut query, name);
        query.push_str(" LIMIT 0;");
        match self.driver.select_multiple(&query) {
            Ok(..) => true,
            Err(e) => {
                log::debug!("Table `{}` is not available: {}", name, e);
                false
            }
        }
    }

    pub fn create_table(&mut self, name: &str, columns: &[ColumnDefinition]) -> Result<()> {
        if let Err(error) = Self::validate(name, columns) {
            log::error!("{}", error);
            return Err(error);
        }
        let mut query = String::with_capacity(64 + 64 * columns.len());
        query.push_str("CREATE TABLE ");
        write_identifier_quoted(&mut query, name);
        query.push_str(" (");
        query.push_str(&self.column_descriptor.describe_all(columns));
        query.push_str(");");
        self.driver.execute(&query).map_err(|e| {
            log::error!("Could not create table `{}`: {}", name, e);
            e
        })
    }

    fn validate(name: &str, columns: &[ColumnDefinition]) -> Result<()> {
        if name.is_empty() {
            return Err(Error::DatabaseAction("table name cannot be empty".into()));
        }
        if columns.is_empty() {
            return Err(Error::DatabaseAction(format!(
                "table `{}` must have at least one column",
                name
            )));
        }
        for column in columns {
            if column.name.is_empty() || column.sql_type.trim().is_empty() {
                return Err(Error::DatabaseAction(format!(
                    "column `{}` of table `{}` needs both a name and a type",
                    column.name, name
                )));
            }
            if let Some(length) = column.length
                && length <= 0
            {
                return Err(Error::DatabaseAction(format!(
                    "column `{}` of table `{}` has invalid length {}",
                    column.name, name, length
                )));
            }
        }
        Ok(())
    }

    /// Handle over an existing table, [`TableNotFound`](Error::TableNotFound) otherwise.
    pub fn choose_table(
        &mut self,
        name: &str,
        primary_key: &str,
    ) -> Result<DatabaseTable<'_, D>> {
        if !self.table_exists(name) {
            let error = Error::TableNotFound(name.into());
            log::error!("{}", error);
            return Err(error);
        }
        Ok(DatabaseTable::new(
            name.into(),
            primary_key.into(),
            &mut self.driver,
        ))
    }

    pub fn remove_table(&mut self, name: &str) -> Result<()> {
        let mut query = String::with_capacity(16 + name.len());
        query.push_str("DROP TABLE ");
        write_identifier_quoted(&mut query, name);
        query.push(';');
        self.driver.execute(&query).map_err(|e| {
            log::error!("Could not drop table `{}`: {}", name, e);
            e
        })
    }

    pub fn create_condition_builder(&self, column_names: ColumnNames) -> ConditionBuilder {
        ConditionBuilder::new(column_names)
    }

    pub fn close(self) -> Result<()> {
        self.driver.close().map_err(|e| {
            log::error!("Could not close the connection: {}", e);
            e
        })
    }
}

impl<D: Driver> Transactional for Database<D> {
    fn begin(&mut self) -> Result<()> {
        self.driver.begin()
    }

    fn commit(&mut self) -> Result<()> {
        self.driver.commit()
    }

    fn rollback(&mut self) -> Result<()> {
        self.driver.rollback()
    }
}
