use crate::{
    ColumnDefinition, Entity, Entry, Error, FieldDef, Properties, PropertyProxy, Result, TableDef,
    sanitize_identifier,
};
use std::{collections::BTreeMap, ops::Deref};

/// Property name to column name.
pub type ColumnNames = BTreeMap<String, String>;

/// Extracts table, column and primary key information from entities.
pub trait PersistenceResolver {
    /// Table name, restricted to word characters.
    fn resolve_table_name<E: Entity>(&self, entity: &E) -> Result<String>;

    /// One definition per field, in declaration order.
    fn resolve_column_definitions<E: Entity>(&self, entity: &E) -> Result<Vec<ColumnDefinition>>;

    /// The first field marked as primary key.
    fn resolve_primary_key<R>(&self, entity: R) -> Result<PropertyProxy<R>>
    where
        R: Deref,
        R::Target: Entity;

    fn resolve_properties<R>(&self, entity: R) -> Result<Properties<R>>
    where
        R: Deref,
        R::Target: Entity;

    fn resolve_column_names<E: Entity>(&self, entity: &E) -> Result<ColumnNames>;

    /// Snapshot of the current field values keyed by column name.
    fn resolve_as_entry<E: Entity>(&self, entity: &E) -> Result<Entry>;
}

/// Resolver reading the metadata declared through `#[tether(...)]` attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributePersistenceResolver;

impl AttributePersistenceResolver {
    pub const fn new() -> Self {
        Self
    }

    fn column_name_of(table: &TableDef, field: &FieldDef) -> Result<String> {
        match field.column.map(sanitize_identifier) {
            Some(column) if !column.is_empty() => Ok(column),
            _ => {
                let error = Error::MetadataNotFound(format!(
                    "field `{}::{}` does not declare a column name",
                    table.type_name, field.name
                ));
                log::error!("{}", error);
                Err(error)
            }
        }
    }

    fn columns_of<E: Entity>() -> Result<Vec<(String, &'static FieldDef)>> {
        let table = E::table_def();
        table
            .fields
            .iter()
            .map(|field| Ok((Self::column_name_of(table, field)?, field)))
            .collect()
    }
}

impl PersistenceResolver for AttributePersistenceResolver {
    fn resolve_table_name<E: Entity>(&self, _entity: &E) -> Result<String> {
        let table = E::table_def();
        match table.table.map(sanitize_identifier) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => {
                let error = Error::MetadataNotFound(format!(
                    "`{}` does not declare a table name",
                    table.type_name
                ));
                log::error!("{}", error);
                Err(error)
            }
        }
    }

    fn resolve_column_definitions<E: Entity>(&self, _entity: &E) -> Result<Vec<ColumnDefinition>> {
        let table = E::table_def();
        table
            .fields
            .iter()
            .map(|field| {
                let name = Self::column_name_of(table, field)?;
                let Some(sql_type) = field.sql_type.map(str::trim).filter(|v| !v.is_empty())
                else {
                    let error = Error::MetadataNotFound(format!(
                        "field `{}::{}` does not declare a type",
                        table.type_name, field.name
                    ));
                    log::error!("{}", error);
                    return Err(error);
                };
                Ok(ColumnDefinition {
                    name,
                    sql_type: sql_type.into(),
                    length: field.length,
                    not_null: field.not_null,
                    unique: field.unique,
                    default_value: field.default.map(Into::into),
                    primary_key: field.primary_key,
                    auto_increment: field.auto_increment,
                })
            })
            .collect()
    }

    fn resolve_primary_key<R>(&self, entity: R) -> Result<PropertyProxy<R>>
    where
        R: Deref,
        R::Target: Entity,
    {
        let table = <R::Target as Entity>::table_def();
        let Some(field) = table.fields.iter().find(|f| f.primary_key) else {
            let error = Error::MetadataNotFound(format!(
                "`{}` does not declare a primary key",
                table.type_name
            ));
            log::error!("{}", error);
            return Err(error);
        };
        let column = Self::column_name_of(table, field)?;
        Ok(PropertyProxy::new(entity, field, column))
    }

    fn resolve_properties<R>(&self, entity: R) -> Result<Properties<R>>
    where
        R: Deref,
        R::Target: Entity,
    {
        Ok(Properties::new(entity, Self::columns_of::<R::Target>()?))
    }

    fn resolve_column_names<E: Entity>(&self, _entity: &E) -> Result<ColumnNames> {
        Self::columns_of::<E>().map(|columns| {
            columns
                .into_iter()
                .map(|(column, field)| (field.name.to_string(), column))
                .collect()
        })
    }

    fn resolve_as_entry<E: Entity>(&self, entity: &E) -> Result<Entry> {
        let columns = Self::columns_of::<E>()?;
        let mut entry = Entry::with_capacity(columns.len());
        for (column, field) in columns {
            entry.insert(column, entity.get_property(field.name)?);
        }
        Ok(entry)
    }
}
