//! Tether maps structs to table rows.
//!
//! Entities declare their table, columns and primary key through `#[derive(Entity)]`, a
//! [`PersistenceService`] then stores and loads them through a [`Driver`]:
//!
//! ```rust,ignore
//! use tether::{Database, DatabasePersistenceService, Entity, PersistenceService};
//! use tether_sqlite::SqliteDriver;
//!
//! #[derive(Debug, Default, Entity)]
//! #[tether(table = "clients")]
//! struct Client {
//!     #[tether(column = "id", sql_type = "INTEGER", primary_key, auto_increment)]
//!     id: Option<i64>,
//!     #[tether(column = "name", sql_type = "VARCHAR", length = 32, not_null, unique)]
//!     name: String,
//! }
//!
//! let mut service = DatabasePersistenceService::new(Database::new(SqliteDriver::memory()?));
//! let mut client = Client { name: "Jan".into(), ..Default::default() };
//! service.insert(&mut client)?;
//! let loaded: Client = service.select(client.id)?;
//! ```
pub use tether_core::*;
pub use tether_macros::Entity;
