use crate::{
    ColumnDefinition, ColumnNames, Entity, Entry, PersistenceResolver, Properties, PropertyProxy,
    Result,
};
use std::{any::TypeId, cell::RefCell, collections::HashMap, ops::Deref};

/// Wraps a resolver memoizing the per-type answers: table name, column definitions and column names.
///
/// Entries are keyed by the concrete entity type. Failures are not cached.
#[derive(Debug, Default)]
pub struct CachedPersistenceResolver<R> {
    resolver: R,
    table_names: RefCell<HashMap<TypeId, String>>,
    column_definitions: RefCell<HashMap<TypeId, Vec<ColumnDefinition>>>,
    column_names: RefCell<HashMap<TypeId, ColumnNames>>,
}

impl<R: PersistenceResolver> CachedPersistenceResolver<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            table_names: Default::default(),
            column_definitions: Default::default(),
            column_names: Default::default(),
        }
    }

    pub fn inner(&self) -> &R {
        &self.resolver
    }

    fn fetch<E: Entity, T: Clone>(
        cache: &RefCell<HashMap<TypeId, T>>,
        load: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        let key = TypeId::of::<E>();
        let cached = cache.borrow().get(&key).cloned();
        if let Some(value) = cached {
            return Ok(value);
        }
        let value = load()?;
        cache.borrow_mut().insert(key, value.clone());
        Ok(value)
    }
}

impl<R: PersistenceResolver> PersistenceResolver for CachedPersistenceResolver<R> {
    fn resolve_table_name<E: Entity>(&self, entity: &E) -> Result<String> {
        Self::fetch::<E, _>(&self.table_names, || {
            self.resolver.resolve_table_name(entity)
        })
    }

    fn resolve_column_definitions<E: Entity>(&self, entity: &E) -> Result<Vec<ColumnDefinition>> {
        Self::fetch::<E, _>(&self.column_definitions, || {
            self.resolver.resolve_column_definitions(entity)
        })
    }

    fn resolve_primary_key<T>(&self, entity: T) -> Result<PropertyProxy<T>>
    where
        T: Deref,
        T::Target: Entity,
    {
        self.resolver.resolve_primary_key(entity)
    }

    fn resolve_properties<T>(&self, entity: T) -> Result<Properties<T>>
    where
        T: Deref,
        T::Target: Entity,
    {
        self.resolver.resolve_properties(entity)
    }

    fn resolve_column_names<E: Entity>(&self, entity: &E) -> Result<ColumnNames> {
        Self::fetch::<E, _>(&self.column_names, || {
            self.resolver.resolve_column_names(entity)
        })
    }

    fn resolve_as_entry<E: Entity>(&self, entity: &E) -> Result<Entry> {
        self.resolver.resolve_as_entry(entity)
    }
}
