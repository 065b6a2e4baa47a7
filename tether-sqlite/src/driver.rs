use crate::{CBox, SqlitePrepared, error_message_from_ptr};
use libsqlite3_sys::*;
use std::{
    ffi::{CString, c_char},
    ptr,
};
use tether_core::{
    Driver, Entry, Error, Result, SqlColumnDescriptor, Transactional, Value, truncate_long,
};

/// Blocking [`Driver`] over a sqlite connection.
pub struct SqliteDriver {
    connection: CBox<sqlite3>,
}

// The bundled sqlite is compiled in serialized mode and the handle is owned by one driver.
unsafe impl Send for SqliteDriver {}

impl SqliteDriver {
    pub const PREFIX: &'static str = "sqlite://";

    /// Open `sqlite://<path>`, `sqlite://:memory:` or `sqlite://<path>?mode=ro` style URLs.
    pub fn connect(url: &str) -> Result<Self> {
        let Some(location) = url.strip_prefix(Self::PREFIX) else {
            let error = Error::DatabaseAction(format!(
                "Expected sqlite connection url to start with `{}`, found `{}`",
                Self::PREFIX,
                url
            ));
            log::error!("{}", error);
            return Err(error);
        };
        let location = if location.contains('?') && !location.starts_with("file:") {
            format!("file:{}", location)
        } else {
            location.to_string()
        };
        let path = CString::new(location).map_err(|e| {
            Error::DatabaseAction(format!("Invalid connection url `{}`: {}", url, e))
        })?;
        let mut connection = CBox::<sqlite3>::null(|p| unsafe {
            sqlite3_close(p);
        });
        let rc = unsafe {
            sqlite3_open_v2(
                path.as_ptr(),
                &mut *connection,
                SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_URI,
                ptr::null(),
            )
        };
        if rc != SQLITE_OK {
            let message = if connection.is_null() {
                "Out of memory".to_string()
            } else {
                error_message_from_ptr(unsafe { sqlite3_errmsg(*connection) })
            };
            let error = Error::DatabaseAction(format!("Cannot open `{}`: {}", url, message));
            log::error!("{}", error);
            return Err(error);
        }
        log::debug!("Connected to `{}`", url);
        Ok(Self { connection })
    }

    /// Private in-memory database.
    pub fn memory() -> Result<Self> {
        Self::connect("sqlite://:memory:")
    }

    pub fn prepare(&mut self, query: &str) -> Result<SqlitePrepared> {
        SqlitePrepared::new(*self.connection, query)
    }

    pub fn in_transaction(&self) -> bool {
        unsafe { sqlite3_get_autocommit(*self.connection) == 0 }
    }

    fn changes(&self) -> i32 {
        unsafe { sqlite3_changes(*self.connection) }
    }

    fn run(&mut self, query: &str, parameters: &[Value]) -> Result<Vec<Entry>> {
        log::debug!("{}", truncate_long!(query));
        let mut prepared = self.prepare(query)?;
        prepared.bind_all(parameters)?;
        prepared.rows()
    }
}

impl Driver for SqliteDriver {
    fn execute(&mut self, query: &str) -> Result<()> {
        log::debug!("{}", truncate_long!(query));
        let sql = CString::new(query).map_err(|e| Error::database_action(e, query))?;
        let mut message = CBox::<c_char>::null(|p| unsafe { sqlite3_free(p as *mut _) });
        let rc = unsafe {
            sqlite3_exec(
                *self.connection,
                sql.as_ptr(),
                None,
                ptr::null_mut(),
                &mut *message,
            )
        };
        if rc != SQLITE_OK {
            return Err(Error::database_action(
                error_message_from_ptr(*message),
                query,
            ));
        }
        Ok(())
    }

    fn execute_prepared(&mut self, query: &str, parameters: &[Value]) -> Result<()> {
        self.run(query, parameters)?;
        if self.changes() == 0 {
            let key = parameters.last().cloned().unwrap_or_default();
            return Err(Error::invalid_primary_key(key, query));
        }
        Ok(())
    }

    fn insert(&mut self, query: &str, parameters: &[Value]) -> Result<Value> {
        self.run(query, parameters)?;
        if self.changes() == 0 {
            return Err(Error::database_action("No row was inserted", query));
        }
        let id = unsafe { sqlite3_last_insert_rowid(*self.connection) };
        Ok(Value::Integer(Some(id)))
    }

    fn select(&mut self, query: &str, key: &Value) -> Result<Entry> {
        self.run(query, std::slice::from_ref(key))?
            .into_iter()
            .next()
            .ok_or_else(|| Error::invalid_primary_key(key, query))
    }

    fn select_multiple_with_parameters(
        &mut self,
        query: &str,
        parameters: &[Value],
    ) -> Result<Vec<Entry>> {
        self.run(query, parameters)
    }

    fn column_descriptor(&self) -> SqlColumnDescriptor {
        SqlColumnDescriptor::sqlite()
    }

    fn close(mut self) -> Result<()> {
        let connection = self.connection.release();
        let rc = unsafe { sqlite3_close(connection) };
        if rc != SQLITE_OK {
            let message = error_message_from_ptr(unsafe { sqlite3_errmsg(connection) });
            let error = Error::DatabaseAction(format!("Cannot close the connection: {}", message));
            log::error!("{}", error);
            return Err(error);
        }
        Ok(())
    }
}

impl Transactional for SqliteDriver {
    fn begin(&mut self) -> Result<()> {
        if self.in_transaction() {
            return Err(Error::DatabaseAction(
                "A transaction is already open on this connection, transactions cannot be nested"
                    .into(),
            ));
        }
        self.execute("BEGIN;")
    }

    fn commit(&mut self) -> Result<()> {
        self.execute("COMMIT;")
    }

    fn rollback(&mut self) -> Result<()> {
        if !self.in_transaction() {
            log::warn!("Rollback requested while no transaction is open");
            return Ok(());
        }
        self.execute("ROLLBACK;")
    }
}
