use crate::{
    AttributePersistenceResolver, ConditionBuilder, Database, DatabaseTable, Driver, Entity, Entry,
    ObjectFactory, PersistenceResolver, Result, SimpleObjectFactory, Transactional, Value,
};

/// Object level persistence: entities in, entities out.
pub trait PersistenceService: Transactional {
    /// Store a new entity, creating its table on first use.
    ///
    /// On success the primary key field holds the key the row was stored with.
    fn insert<E: Entity>(&mut self, entity: &mut E) -> Result<()>;

    fn update<E: Entity>(&mut self, entity: &E) -> Result<()>;

    fn remove<E: Entity>(&mut self, entity: &E) -> Result<()>;

    /// The entity stored under `primary_key`.
    fn select<E: Entity, K: Into<Value>>(&mut self, primary_key: K) -> Result<E>;

    fn select_all<E: Entity>(&mut self) -> Result<Vec<E>>;

    /// Entities of the rows accepted by `predicate`, which sees the raw rows before any entity is built.
    fn select_individually<E, P>(&mut self, predicate: P) -> Result<Vec<E>>
    where
        E: Entity,
        P: FnMut(&Entry) -> bool;

    /// Entities matching the condition written by `build_condition`.
    fn select_on_condition<E, F>(&mut self, build_condition: F) -> Result<Vec<E>>
    where
        E: Entity,
        F: FnOnce(&mut ConditionBuilder) -> Result<()>;
}

/// [`PersistenceService`] storing entities in a [`Database`].
pub struct DatabasePersistenceService<
    D: Driver,
    R = AttributePersistenceResolver,
    F = SimpleObjectFactory,
> {
    database: Database<D>,
    resolver: R,
    factory: F,
}

impl<D: Driver> DatabasePersistenceService<D> {
    pub fn new(database: Database<D>) -> Self {
        Self::with_parts(database, AttributePersistenceResolver, SimpleObjectFactory)
    }
}

impl<D, R, F> DatabasePersistenceService<D, R, F>
where
    D: Driver,
    R: PersistenceResolver,
    F: ObjectFactory,
{
    pub fn with_parts(database: Database<D>, resolver: R, factory: F) -> Self {
        Self {
            database,
            resolver,
            factory,
        }
    }

    pub fn database(&self) -> &Database<D> {
        &self.database
    }

    pub fn database_mut(&mut self) -> &mut Database<D> {
        &mut self.database
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn close(self) -> Result<()> {
        self.database.close()
    }

    fn table_for<E: Entity>(&mut self, entity: &E) -> Result<DatabaseTable<'_, D>> {
        let table_name = self.resolver.resolve_table_name(entity)?;
        let primary_key = self.resolver.resolve_primary_key(entity)?;
        self.database
            .choose_table(&table_name, primary_key.column_name())
    }

    fn create_table_if_missing<E: Entity>(&mut self, table_name: &str, entity: &E) -> Result<()> {
        if !self.database.table_exists(table_name) {
            let columns = self.resolver.resolve_column_definitions(entity)?;
            self.database.create_table(table_name, &columns)?;
        }
        Ok(())
    }

    fn populate<E: Entity>(&self, entity: &mut E, entry: &Entry) -> Result<()> {
        let mut properties = self.resolver.resolve_properties(entity)?;
        self.factory.apply_properties(entry, &mut properties)
    }

    fn convert<'a, E: Entity>(
        &self,
        entries: impl IntoIterator<Item = &'a Entry>,
    ) -> Result<Vec<E>> {
        entries
            .into_iter()
            .map(|entry| {
                let mut entity = self.factory.instantiate::<E>()?;
                self.populate(&mut entity, entry)?;
                Ok(entity)
            })
            .collect()
    }
}

impl<D, R, F> PersistenceService for DatabasePersistenceService<D, R, F>
where
    D: Driver,
    R: PersistenceResolver,
    F: ObjectFactory,
{
    fn insert<E: Entity>(&mut self, entity: &mut E) -> Result<()> {
        let table_name = self.resolver.resolve_table_name(&*entity)?;
        self.create_table_if_missing(&table_name, &*entity)?;
        let entry = self.resolver.resolve_as_entry(&*entity)?;
        let mut primary_key = self.resolver.resolve_primary_key(entity)?;
        let supplied = primary_key.value()?;
        let id = self
            .database
            .choose_table(&table_name, primary_key.column_name())?
            .insert(&entry)?;
        // Keys supplied by the caller are stored as given
        if supplied.is_null() {
            primary_key.set_value(id)?;
        }
        Ok(())
    }

    fn update<E: Entity>(&mut self, entity: &E) -> Result<()> {
        let table_name = self.resolver.resolve_table_name(entity)?;
        let primary_key = self.resolver.resolve_primary_key(entity)?;
        let key = primary_key.value()?;
        let entry = self.resolver.resolve_as_entry(entity)?;
        self.database
            .choose_table(&table_name, primary_key.column_name())?
            .update(key, &entry)
    }

    fn remove<E: Entity>(&mut self, entity: &E) -> Result<()> {
        let table_name = self.resolver.resolve_table_name(entity)?;
        let primary_key = self.resolver.resolve_primary_key(entity)?;
        let key = primary_key.value()?;
        self.database
            .choose_table(&table_name, primary_key.column_name())?
            .remove(key)
    }

    fn select<E: Entity, K: Into<Value>>(&mut self, primary_key: K) -> Result<E> {
        let mut entity = self.factory.instantiate::<E>()?;
        let entry = self.table_for(&entity)?.select(primary_key)?;
        self.populate(&mut entity, &entry)?;
        Ok(entity)
    }

    fn select_all<E: Entity>(&mut self) -> Result<Vec<E>> {
        let blank = self.factory.instantiate::<E>()?;
        let entries = self.table_for(&blank)?.select_all()?;
        self.convert(&entries)
    }

    fn select_individually<E, P>(&mut self, mut predicate: P) -> Result<Vec<E>>
    where
        E: Entity,
        P: FnMut(&Entry) -> bool,
    {
        let blank = self.factory.instantiate::<E>()?;
        let entries = self.table_for(&blank)?.select_all()?;
        self.convert(entries.iter().filter(|entry| predicate(entry)))
    }

    fn select_on_condition<E, C>(&mut self, build_condition: C) -> Result<Vec<E>>
    where
        E: Entity,
        C: FnOnce(&mut ConditionBuilder) -> Result<()>,
    {
        let blank = self.factory.instantiate::<E>()?;
        let column_names = self.resolver.resolve_column_names(&blank)?;
        let mut condition = self.database.create_condition_builder(column_names);
        build_condition(&mut condition)?;
        let entries = self.table_for(&blank)?.select_where(&condition)?;
        self.convert(&entries)
    }
}

impl<D, R, F> Transactional for DatabasePersistenceService<D, R, F>
where
    D: Driver,
{
    fn begin(&mut self) -> Result<()> {
        self.database.begin()
    }

    fn commit(&mut self) -> Result<()> {
        self.database.commit()
    }

    fn rollback(&mut self) -> Result<()> {
        self.database.rollback()
    }
}
