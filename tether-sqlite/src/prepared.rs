use crate::{
    CBox, error_message_from_ptr,
    extract::{extract_name, extract_value},
};
use libsqlite3_sys::*;
use std::{
    ffi::{CStr, CString, c_char, c_int, c_void},
    ptr,
};
use tether_core::{BindKind, Entry, Error, Result, Value};

/// A single prepared sqlite statement.
pub struct SqlitePrepared {
    pub(crate) statement: CBox<sqlite3_stmt>,
    query: String,
}

impl SqlitePrepared {
    pub(crate) fn new(connection: *mut sqlite3, query: &str) -> Result<Self> {
        let sql = CString::new(query).map_err(|e| Error::database_action(e, query))?;
        let mut statement = CBox::<sqlite3_stmt>::null(|p| unsafe {
            sqlite3_finalize(p);
        });
        let mut tail: *const c_char = ptr::null();
        unsafe {
            let rc = sqlite3_prepare_v2(
                connection,
                sql.as_ptr(),
                -1,
                &mut *statement,
                &mut tail,
            );
            if rc != SQLITE_OK {
                return Err(Error::database_action(
                    error_message_from_ptr(sqlite3_errmsg(connection)),
                    query,
                ));
            }
            if !tail.is_null() && !CStr::from_ptr(tail).to_bytes().trim_ascii().is_empty() {
                return Err(Error::database_action(
                    "Cannot prepare more than one statement at a time",
                    query,
                ));
            }
        }
        if statement.is_null() {
            return Err(Error::database_action("The query is empty", query));
        }
        Ok(Self {
            statement,
            query: query.into(),
        })
    }

    /// Bind `value` at the 1-based `index`, typed by [`Value::bind_kind`].
    pub fn bind(&mut self, index: usize, value: &Value) -> Result<()> {
        let statement = *self.statement;
        let index = index as c_int;
        let rc = unsafe {
            match (value.bind_kind(), value) {
                (_, v) if v.is_null() => sqlite3_bind_null(statement, index),
                (BindKind::Numeric, Value::Boolean(Some(v))) => {
                    sqlite3_bind_int64(statement, index, *v as i64)
                }
                (BindKind::Numeric, Value::Integer(Some(v))) => {
                    sqlite3_bind_int64(statement, index, *v)
                }
                (BindKind::Numeric, Value::Float(Some(v))) => {
                    sqlite3_bind_double(statement, index, *v)
                }
                (BindKind::Binary, Value::Blob(Some(v))) => sqlite3_bind_blob(
                    statement,
                    index,
                    v.as_ptr() as *const c_void,
                    v.len() as c_int,
                    SQLITE_TRANSIENT(),
                ),
                (_, v) => {
                    let text = match v {
                        Value::Text(Some(v)) => v.clone(),
                        v => v.to_string(),
                    };
                    sqlite3_bind_text(
                        statement,
                        index,
                        text.as_ptr() as *const c_char,
                        text.len() as c_int,
                        SQLITE_TRANSIENT(),
                    )
                }
            }
        };
        if rc != SQLITE_OK {
            let message =
                unsafe { error_message_from_ptr(sqlite3_errmsg(sqlite3_db_handle(statement))) };
            return Err(Error::database_action(
                format!("Cannot bind parameter {}: {}", index, message),
                &self.query,
            ));
        }
        Ok(())
    }

    pub fn bind_all(&mut self, parameters: &[Value]) -> Result<()> {
        let expected = unsafe { sqlite3_bind_parameter_count(*self.statement) } as usize;
        if expected != parameters.len() {
            return Err(Error::database_action(
                format!(
                    "The statement expects {} parameters but {} were provided",
                    expected,
                    parameters.len()
                ),
                &self.query,
            ));
        }
        for (i, value) in parameters.iter().enumerate() {
            self.bind(i + 1, value)?;
        }
        Ok(())
    }

    /// Step the statement to completion collecting the rows it produces.
    pub fn rows(&mut self) -> Result<Vec<Entry>> {
        let statement = *self.statement;
        let mut rows = Vec::new();
        unsafe {
            let count = sqlite3_column_count(statement);
            let labels = (0..count)
                .map(|i| extract_name(statement, i))
                .collect::<Result<Vec<_>>>()?;
            loop {
                match sqlite3_step(statement) {
                    SQLITE_BUSY => {
                        continue;
                    }
                    SQLITE_DONE => {
                        break;
                    }
                    SQLITE_ROW => {
                        let values = (0..count)
                            .map(|i| extract_value(statement, i))
                            .collect::<Result<Vec<_>>>()?;
                        rows.push(Entry::from_parts(labels.clone(), values));
                    }
                    _ => {
                        let message =
                            error_message_from_ptr(sqlite3_errmsg(sqlite3_db_handle(statement)));
                        return Err(Error::database_action(message, &self.query));
                    }
                }
            }
        }
        Ok(rows)
    }
}
