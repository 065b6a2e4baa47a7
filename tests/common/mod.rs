#![allow(dead_code, unused_macros)]
use log::LevelFilter;
use std::env;
use tether::{
    AttributePersistenceResolver, Database, DatabasePersistenceService, Entity,
    SimpleObjectFactory,
};
use tether_sqlite::SqliteDriver;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}

#[derive(Debug, Default, Clone, PartialEq, Entity)]
#[tether(table = "clients")]
pub struct Client {
    #[tether(column = "id", sql_type = "INTEGER", primary_key, auto_increment)]
    pub id: Option<i64>,
    #[tether(column = "name", sql_type = "VARCHAR", length = 32, not_null)]
    pub name: String,
    #[tether(column = "surname", sql_type = "VARCHAR", length = 32, not_null)]
    pub surname: String,
    #[tether(
        column = "phone_number",
        sql_type = "VARCHAR",
        length = 16,
        default = "+48 000-000-000"
    )]
    pub phone: Option<String>,
    #[tether(column = "email", sql_type = "VARCHAR", length = 64, unique)]
    pub email: Option<String>,
}

impl Client {
    pub fn new(name: &str, surname: &str) -> Self {
        Self {
            id: None,
            name: name.into(),
            surname: surname.into(),
            phone: None,
            email: None,
        }
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.into());
        self
    }
}

pub type SqliteService =
    DatabasePersistenceService<SqliteDriver, AttributePersistenceResolver, SimpleObjectFactory>;

pub fn service() -> SqliteService {
    init_logs();
    let driver = SqliteDriver::memory().expect("Could not open the in-memory database");
    DatabasePersistenceService::new(Database::new(driver))
}
