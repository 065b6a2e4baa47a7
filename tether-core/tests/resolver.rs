#[macro_use]
mod mock;

#[cfg(test)]
mod tests {
    use crate::mock::{Client, Product, init_logs};
    use tether_core::{
        AttributePersistenceResolver, ColumnDefinition, Error, FieldDef, PersistenceResolver, Value,
    };

    single_field_entity!(NoTable, table: None, field: FieldDef {
        column: Some("value"),
        sql_type: Some("INTEGER"),
        primary_key: true,
        ..FieldDef::new("value")
    });
    single_field_entity!(NoType, table: Some("no_type"), field: FieldDef {
        column: Some("value"),
        primary_key: true,
        ..FieldDef::new("value")
    });
    single_field_entity!(NoColumn, table: Some("no_column"), field: FieldDef {
        sql_type: Some("INTEGER"),
        primary_key: true,
        ..FieldDef::new("value")
    });
    single_field_entity!(NoPrimaryKey, table: Some("no_key"), field: FieldDef {
        column: Some("value"),
        sql_type: Some("INTEGER"),
        ..FieldDef::new("value")
    });

    const RESOLVER: AttributePersistenceResolver = AttributePersistenceResolver::new();

    #[test]
    fn table_name() {
        assert_eq!(
            RESOLVER.resolve_table_name(&Client::default()).unwrap(),
            "clients"
        );
        assert_eq!(
            RESOLVER.resolve_table_name(&Product::default()).unwrap(),
            "shopproducts"
        );
    }

    #[test]
    fn column_definitions() {
        let columns = RESOLVER
            .resolve_column_definitions(&Client::default())
            .unwrap();
        assert_eq!(
            columns,
            [
                ColumnDefinition::new("id", "INTEGER")
                    .primary_key()
                    .auto_increment(),
                ColumnDefinition::new("name", "VARCHAR")
                    .length(32)
                    .not_null()
                    .unique(),
                ColumnDefinition::new("phone_number", "VARCHAR")
                    .length(16)
                    .default_value("+48 000-000-000"),
            ]
        );
        assert!(columns[1].has_length());
        assert!(!columns[0].has_length());
        assert!(columns[2].has_default_value());
    }

    #[test]
    fn primary_key() {
        let mut client = Client {
            id: Some(7),
            name: "Jan".into(),
            phone: None,
        };
        {
            let primary_key = RESOLVER.resolve_primary_key(&client).unwrap();
            assert_eq!(primary_key.name(), "id");
            assert_eq!(primary_key.column_name(), "id");
            assert_eq!(primary_key.value().unwrap(), Value::from(7));
        }
        RESOLVER
            .resolve_primary_key(&mut client)
            .unwrap()
            .set_value(12)
            .unwrap();
        assert_eq!(client.id, Some(12));

        let product = Product::default();
        let primary_key = RESOLVER.resolve_primary_key(&product).unwrap();
        assert_eq!(primary_key.name(), "code");
        assert_eq!(primary_key.column_name(), "productcode");
    }

    #[test]
    fn properties_and_names() {
        let mut client = Client::default();
        let names = RESOLVER.resolve_column_names(&client).unwrap();
        assert_eq!(names.get("phone").map(String::as_str), Some("phone_number"));
        assert_eq!(names.len(), 3);

        let mut properties = RESOLVER.resolve_properties(&mut client).unwrap();
        assert_eq!(
            properties.column_names().collect::<Vec<_>>(),
            ["id", "name", "phone_number"]
        );
        properties.set_value("phone_number", "+48 123").unwrap();
        assert!(matches!(
            properties.set_value("phone", "+48 123"),
            Err(Error::PropertyNotFound(..))
        ));
        assert_eq!(
            properties.get("phone_number").unwrap().name(),
            "phone"
        );
        assert!(properties.get("phone").is_none());
        let mut name = properties.get_mut("name").unwrap();
        assert_eq!(name.column_name(), "name");
        name.set_value("Olga").unwrap();
        assert_eq!(name.value().unwrap(), Value::from("Olga"));
        assert_eq!(properties.value("name").unwrap(), Value::from("Olga"));
        assert!(matches!(
            properties.value("phone"),
            Err(Error::PropertyNotFound(..))
        ));
        assert_eq!(client.phone.as_deref(), Some("+48 123"));
        assert_eq!(client.name, "Olga");
    }

    #[test]
    fn as_entry() {
        let client = Client {
            id: None,
            name: "Anna".into(),
            phone: Some("+48 555".into()),
        };
        let entry = RESOLVER.resolve_as_entry(&client).unwrap();
        let definitions = RESOLVER.resolve_column_definitions(&client).unwrap();
        assert_eq!(
            entry.names(),
            definitions.iter().map(|v| v.name.clone()).collect::<Vec<_>>()
        );
        assert!(entry.get_column("id").unwrap().is_null());
        assert_eq!(entry.get_column("name"), Some(&Value::from("Anna")));
    }

    #[test]
    fn missing_metadata() {
        init_logs();
        silent_logs! {
            assert!(matches!(
                RESOLVER.resolve_table_name(&NoTable::default()),
                Err(Error::MetadataNotFound(..))
            ));
            assert!(matches!(
                RESOLVER.resolve_column_definitions(&NoType::default()),
                Err(Error::MetadataNotFound(..))
            ));
            assert!(matches!(
                RESOLVER.resolve_column_definitions(&NoColumn::default()),
                Err(Error::MetadataNotFound(..))
            ));
            assert!(matches!(
                RESOLVER.resolve_as_entry(&NoColumn::default()),
                Err(Error::MetadataNotFound(..))
            ));
            assert!(matches!(
                RESOLVER.resolve_primary_key(&NoPrimaryKey::default()),
                Err(Error::MetadataNotFound(..))
            ));
        }
        assert_eq!(
            RESOLVER.resolve_table_name(&NoPrimaryKey::default()).unwrap(),
            "no_key"
        );
    }
}
