use crate::{Entity, Error, FieldDef, Result, Value};
use std::ops::{Deref, DerefMut};

/// Handle over one field of a borrowed entity.
///
/// `R` is the borrow it holds: with `&E` the field can only be read, with `&mut E` it can also be
/// written. The handle never outlives the entity it points to.
pub struct PropertyProxy<R> {
    target: R,
    field: &'static FieldDef,
    column: String,
}

impl<R> PropertyProxy<R>
where
    R: Deref,
    R::Target: Entity,
{
    pub fn new(target: R, field: &'static FieldDef, column: String) -> Self {
        Self {
            target,
            field,
            column,
        }
    }

    /// Property (field) name.
    pub fn name(&self) -> &'static str {
        self.field.name
    }

    pub fn column_name(&self) -> &str {
        &self.column
    }

    pub fn value(&self) -> Result<Value> {
        self.target.get_property(self.field.name)
    }
}

impl<R> PropertyProxy<R>
where
    R: DerefMut,
    R::Target: Entity,
{
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<()> {
        self.target.set_property(self.field.name, value.into())
    }
}

/// The properties of a borrowed entity keyed by column name, in column order.
pub struct Properties<R> {
    target: R,
    columns: Vec<(String, &'static FieldDef)>,
}

impl<R> Properties<R>
where
    R: Deref,
    R::Target: Entity,
{
    pub fn new(target: R, columns: Vec<(String, &'static FieldDef)>) -> Self {
        Self { target, columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.columns.iter().map(|(column, ..)| column.as_str())
    }

    fn find(&self, column: &str) -> Option<&(String, &'static FieldDef)> {
        self.columns.iter().find(|(c, ..)| c == column)
    }

    pub fn get(&self, column: &str) -> Option<PropertyProxy<&R::Target>> {
        self.find(column)
            .map(|(c, field)| PropertyProxy::new(&*self.target, *field, c.clone()))
    }

    pub fn value(&self, column: &str) -> Result<Value> {
        self.get(column)
            .ok_or_else(|| Error::PropertyNotFound(column.into()))?
            .value()
    }
}

impl<R> Properties<R>
where
    R: DerefMut,
    R::Target: Entity,
{
    pub fn get_mut(&mut self, column: &str) -> Option<PropertyProxy<&mut R::Target>> {
        let (c, field) = self.columns.iter().find(|(c, ..)| c == column)?;
        Some(PropertyProxy::new(&mut *self.target, *field, c.clone()))
    }

    pub fn set_value(&mut self, column: &str, value: impl Into<Value>) -> Result<()> {
        self.get_mut(column)
            .ok_or_else(|| Error::PropertyNotFound(column.into()))?
            .set_value(value)
    }
}
