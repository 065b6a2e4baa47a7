use crate::{ConditionBuilder, Entity, Entry, PersistenceService, Result, Transactional, Value};
use std::fmt::Display;

/// Decorator logging every operation of the wrapped service.
///
/// Starts are logged at debug, successes at info and failures at error level. Errors are returned
/// unchanged.
#[derive(Debug, Default)]
pub struct LoggingPersistenceService<S> {
    service: S,
}

impl<S: PersistenceService> LoggingPersistenceService<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn inner(&self) -> &S {
        &self.service
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.service
    }

    pub fn into_inner(self) -> S {
        self.service
    }
}

fn logged<T>(operation: &str, subject: impl Display, run: impl FnOnce() -> Result<T>) -> Result<T> {
    log::debug!("{} {}", operation, subject);
    match run() {
        Ok(value) => {
            log::info!("{} {} succeeded", operation, subject);
            Ok(value)
        }
        Err(error) => {
            log::error!("{} {} failed: {}", operation, subject, error);
            Err(error)
        }
    }
}

fn type_name<E: Entity>() -> &'static str {
    E::table_def().type_name
}

impl<S: PersistenceService> PersistenceService for LoggingPersistenceService<S> {
    fn insert<E: Entity>(&mut self, entity: &mut E) -> Result<()> {
        logged("Insert", type_name::<E>(), || self.service.insert(entity))
    }

    fn update<E: Entity>(&mut self, entity: &E) -> Result<()> {
        logged("Update", type_name::<E>(), || self.service.update(entity))
    }

    fn remove<E: Entity>(&mut self, entity: &E) -> Result<()> {
        logged("Remove", type_name::<E>(), || self.service.remove(entity))
    }

    fn select<E: Entity, K: Into<Value>>(&mut self, primary_key: K) -> Result<E> {
        let primary_key = primary_key.into();
        let subject = format!("{} with key {}", type_name::<E>(), primary_key);
        logged("Select", subject, || self.service.select(primary_key))
    }

    fn select_all<E: Entity>(&mut self) -> Result<Vec<E>> {
        logged("Select all", type_name::<E>(), || self.service.select_all())
    }

    fn select_individually<E, P>(&mut self, predicate: P) -> Result<Vec<E>>
    where
        E: Entity,
        P: FnMut(&Entry) -> bool,
    {
        logged("Select individually", type_name::<E>(), || {
            self.service.select_individually(predicate)
        })
    }

    fn select_on_condition<E, F>(&mut self, build_condition: F) -> Result<Vec<E>>
    where
        E: Entity,
        F: FnOnce(&mut ConditionBuilder) -> Result<()>,
    {
        logged("Select on condition", type_name::<E>(), || {
            self.service.select_on_condition(build_condition)
        })
    }
}

impl<S: PersistenceService> Transactional for LoggingPersistenceService<S> {
    fn begin(&mut self) -> Result<()> {
        logged("Begin", "transaction", || self.service.begin())
    }

    fn commit(&mut self) -> Result<()> {
        logged("Commit", "transaction", || self.service.commit())
    }

    fn rollback(&mut self) -> Result<()> {
        logged("Rollback", "transaction", || self.service.rollback())
    }
}
