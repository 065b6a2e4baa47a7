use crate::{Entity, Entry, Error, Properties, Result};
use std::ops::DerefMut;

/// Builds entities out of selected rows.
pub trait ObjectFactory {
    /// A blank instance to be populated afterwards.
    fn instantiate<E: Entity>(&self) -> Result<E>;

    /// Write the values of `entry` into `properties`, both keyed by column name.
    fn apply_properties<R>(&self, entry: &Entry, properties: &mut Properties<R>) -> Result<()>
    where
        R: DerefMut,
        R::Target: Entity;
}

/// Factory relying on [`Entity::blank`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleObjectFactory;

impl SimpleObjectFactory {
    pub const fn new() -> Self {
        Self
    }
}

impl ObjectFactory for SimpleObjectFactory {
    fn instantiate<E: Entity>(&self) -> Result<E> {
        E::blank().ok_or_else(|| {
            let error = Error::Instantiation(E::table_def().type_name);
            log::error!("{}", error);
            error
        })
    }

    fn apply_properties<R>(&self, entry: &Entry, properties: &mut Properties<R>) -> Result<()>
    where
        R: DerefMut,
        R::Target: Entity,
    {
        let columns: Vec<String> = properties.column_names().map(Into::into).collect();
        for column in columns {
            let Some(value) = entry.get_column(&column) else {
                let error = Error::Conversion(format!(
                    "the selected row has no column `{}`",
                    column
                ));
                log::error!("{}", error);
                return Err(error);
            };
            properties.set_value(&column, value.clone())?;
        }
        Ok(())
    }
}
