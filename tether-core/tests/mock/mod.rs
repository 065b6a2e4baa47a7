#![allow(dead_code, unused_macros)]
use log::LevelFilter;
use std::{collections::BTreeSet, env};
use tether_core::{
    AsValue, Driver, Entity, Entry, Error, FieldDef, Result, SqlColumnDescriptor, TableDef,
    Transactional, Value,
};

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

/// Driver recording every statement, answering from scripted rows.
pub struct MockDriver {
    pub statements: Vec<(String, Vec<Value>)>,
    pub tables: BTreeSet<String>,
    pub rows: Vec<Entry>,
    pub affected: usize,
    pub next_id: i64,
    pub events: Vec<&'static str>,
    pub transaction: bool,
    pub reject: Option<&'static str>,
    pub fail_commit: bool,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self {
            statements: Vec::new(),
            tables: BTreeSet::new(),
            rows: Vec::new(),
            affected: 1,
            next_id: 1,
            events: Vec::new(),
            transaction: false,
            reject: None,
            fail_commit: false,
        }
    }
}

fn table_of(query: &str) -> String {
    let start = query.find('`').map(|v| v + 1).unwrap_or_default();
    let end = query[start..]
        .find('`')
        .map(|v| start + v)
        .unwrap_or(query.len());
    query[start..end].to_string()
}

impl MockDriver {
    pub fn with_tables<'a>(tables: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            tables: tables.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Statements except the existence probes.
    pub fn queries(&self) -> Vec<&str> {
        self.statements
            .iter()
            .map(|(q, _)| q.as_str())
            .filter(|q| !q.ends_with("LIMIT 0;"))
            .collect()
    }

    pub fn last(&self) -> (&str, &[Value]) {
        let (query, parameters) = self
            .statements
            .last()
            .expect("No statement was executed");
        (query, parameters)
    }

    fn record(&mut self, query: &str, parameters: &[Value]) -> Result<()> {
        self.statements.push((query.into(), parameters.to_vec()));
        if let Some(reject) = self.reject
            && query.contains(reject)
        {
            return Err(Error::database_action("Rejected by the mock", query));
        }
        Ok(())
    }
}

impl Driver for MockDriver {
    fn execute(&mut self, query: &str) -> Result<()> {
        self.record(query, &[])?;
        if query.starts_with("CREATE TABLE") {
            if !self.tables.insert(table_of(query)) {
                return Err(Error::database_action("Table already exists", query));
            }
        } else if query.starts_with("DROP TABLE") && !self.tables.remove(&table_of(query)) {
            return Err(Error::database_action("No such table", query));
        }
        Ok(())
    }

    fn execute_prepared(&mut self, query: &str, parameters: &[Value]) -> Result<()> {
        self.record(query, parameters)?;
        if self.affected == 0 {
            let key = parameters.last().cloned().unwrap_or_default();
            return Err(Error::invalid_primary_key(key, query));
        }
        Ok(())
    }

    fn insert(&mut self, query: &str, parameters: &[Value]) -> Result<Value> {
        self.record(query, parameters)?;
        let id = self.next_id;
        self.next_id += 1;
        Ok(Value::Integer(Some(id)))
    }

    fn select(&mut self, query: &str, key: &Value) -> Result<Entry> {
        self.record(query, std::slice::from_ref(key))?;
        self.rows
            .first()
            .cloned()
            .ok_or_else(|| Error::invalid_primary_key(key, query))
    }

    fn select_multiple_with_parameters(
        &mut self,
        query: &str,
        parameters: &[Value],
    ) -> Result<Vec<Entry>> {
        self.record(query, parameters)?;
        if query.ends_with("LIMIT 0;") {
            return if self.tables.contains(&table_of(query)) {
                Ok(Vec::new())
            } else {
                Err(Error::database_action("No such table", query))
            };
        }
        Ok(self.rows.clone())
    }

    fn column_descriptor(&self) -> SqlColumnDescriptor {
        SqlColumnDescriptor::sqlite()
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}

impl Transactional for MockDriver {
    fn begin(&mut self) -> Result<()> {
        if self.transaction {
            return Err(Error::DatabaseAction(
                "A transaction is already open".into(),
            ));
        }
        self.transaction = true;
        self.events.push("BEGIN");
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if !self.transaction {
            return Err(Error::DatabaseAction("No transaction is open".into()));
        }
        if self.fail_commit {
            return Err(Error::DatabaseAction("Commit refused by the mock".into()));
        }
        self.transaction = false;
        self.events.push("COMMIT");
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        if !self.transaction {
            return Err(Error::DatabaseAction("No transaction is open".into()));
        }
        self.transaction = false;
        self.events.push("ROLLBACK");
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Client {
    pub id: Option<i64>,
    pub name: String,
    pub phone: Option<String>,
}

static CLIENT_FIELDS: [FieldDef; 3] = [
    FieldDef {
        column: Some("id"),
        sql_type: Some("INTEGER"),
        primary_key: true,
        auto_increment: true,
        ..FieldDef::new("id")
    },
    FieldDef {
        column: Some("name"),
        sql_type: Some("VARCHAR"),
        length: Some(32),
        not_null: true,
        unique: true,
        ..FieldDef::new("name")
    },
    FieldDef {
        column: Some("phone_number"),
        sql_type: Some("VARCHAR"),
        length: Some(16),
        default: Some("+48 000-000-000"),
        ..FieldDef::new("phone")
    },
];

static CLIENT_TABLE: TableDef = TableDef {
    type_name: "Client",
    table: Some("clients"),
    fields: &CLIENT_FIELDS,
};

impl Entity for Client {
    fn table_def() -> &'static TableDef {
        &CLIENT_TABLE
    }

    fn get_property(&self, name: &str) -> Result<Value> {
        match name {
            "id" => Ok(self.id.as_value()),
            "name" => Ok(self.name.clone().as_value()),
            "phone" => Ok(self.phone.clone().as_value()),
            _ => Err(Error::PropertyNotFound(name.into())),
        }
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<()> {
        match name {
            "id" => self.id = AsValue::try_from_value(value)?,
            "name" => self.name = AsValue::try_from_value(value)?,
            "phone" => self.phone = AsValue::try_from_value(value)?,
            _ => return Err(Error::PropertyNotFound(name.into())),
        }
        Ok(())
    }

    fn blank() -> Option<Self> {
        Some(Default::default())
    }
}

pub fn client_row(id: i64, name: &str, phone: &str) -> Entry {
    [
        ("id", Value::from(id)),
        ("name", name.into()),
        ("phone_number", phone.into()),
    ]
    .into_iter()
    .collect()
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Product {
    pub code: String,
    pub price: f64,
}

static PRODUCT_FIELDS: [FieldDef; 2] = [
    FieldDef {
        column: Some("product code!"),
        sql_type: Some("VARCHAR"),
        length: Some(8),
        primary_key: true,
        ..FieldDef::new("code")
    },
    FieldDef {
        column: Some("price"),
        sql_type: Some("DOUBLE"),
        not_null: true,
        ..FieldDef::new("price")
    },
];

static PRODUCT_TABLE: TableDef = TableDef {
    type_name: "Product",
    table: Some("shop.products; --"),
    fields: &PRODUCT_FIELDS,
};

impl Entity for Product {
    fn table_def() -> &'static TableDef {
        &PRODUCT_TABLE
    }

    fn get_property(&self, name: &str) -> Result<Value> {
        match name {
            "code" => Ok(self.code.clone().as_value()),
            "price" => Ok(self.price.as_value()),
            _ => Err(Error::PropertyNotFound(name.into())),
        }
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<()> {
        match name {
            "code" => self.code = AsValue::try_from_value(value)?,
            "price" => self.price = AsValue::try_from_value(value)?,
            _ => return Err(Error::PropertyNotFound(name.into())),
        }
        Ok(())
    }
}

/// Declares an entity with a single `value` field described by the given metadata.
macro_rules! single_field_entity {
    ($name:ident, table: $table:expr, field: $field:expr $(,)?) => {
        #[derive(Debug, Default)]
        pub struct $name {
            pub value: Option<i64>,
        }

        impl tether_core::Entity for $name {
            fn table_def() -> &'static tether_core::TableDef {
                static FIELDS: [tether_core::FieldDef; 1] = [$field];
                static TABLE: tether_core::TableDef = tether_core::TableDef {
                    type_name: stringify!($name),
                    table: $table,
                    fields: &FIELDS,
                };
                &TABLE
            }

            fn get_property(&self, name: &str) -> tether_core::Result<tether_core::Value> {
                match name {
                    "value" => Ok(tether_core::AsValue::as_value(self.value)),
                    _ => Err(tether_core::Error::PropertyNotFound(name.into())),
                }
            }

            fn set_property(
                &mut self,
                name: &str,
                value: tether_core::Value,
            ) -> tether_core::Result<()> {
                match name {
                    "value" => self.value = tether_core::AsValue::try_from_value(value)?,
                    _ => return Err(tether_core::Error::PropertyNotFound(name.into())),
                }
                Ok(())
            }
        }
    };
}
