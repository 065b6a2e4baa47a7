mod as_value;
mod cached_resolver;
mod column_def;
mod column_descriptor;
mod condition;
mod database;
mod driver;
mod entity;
mod entry;
mod error;
mod logging;
mod object_factory;
mod persistence;
mod property;
mod resolver;
mod table;
mod transaction;
mod util;
mod value;

pub use as_value::*;
pub use cached_resolver::*;
pub use column_def::*;
pub use column_descriptor::*;
pub use condition::*;
pub use database::*;
pub use driver::*;
pub use entity::*;
pub use entry::*;
pub use error::*;
pub use logging::*;
pub use object_factory::*;
pub use persistence::*;
pub use property::*;
pub use resolver::*;
pub use table::*;
pub use transaction::*;
pub use util::*;
pub use value::*;

pub type Result<T> = std::result::Result<T, Error>;
