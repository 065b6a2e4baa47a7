use crate::Value;

/// One row's content as an ordered `column name -> value` mapping, independent of any entity type.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Entry {
    labels: Vec<String>,
    values: Vec<Value>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            labels: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Labels and values must be aligned by index.
    pub fn from_parts(labels: Vec<String>, values: Vec<Value>) -> Self {
        debug_assert_eq!(labels.len(), values.len());
        Self { labels, values }
    }

    /// Sets the value of a column, appending the column when it is not present yet.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let column = column.into();
        let value = value.into();
        match self.labels.iter().position(|v| *v == column) {
            Some(i) => self.values[i] = value,
            None => {
                self.labels.push(column);
                self.values.push(value);
            }
        }
        self
    }

    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|v| v == name)
            .map(|i| &self.values[i])
    }

    pub fn names(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

impl<C: Into<String>, V: Into<Value>> FromIterator<(C, V)> for Entry {
    fn from_iter<T: IntoIterator<Item = (C, V)>>(iter: T) -> Self {
        let mut entry = Entry::new();
        for (column, value) in iter {
            entry.insert(column, value);
        }
        entry
    }
}

impl IntoIterator for Entry {
    type Item = (String, Value);
    type IntoIter = std::iter::Zip<std::vec::IntoIter<String>, std::vec::IntoIter<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.into_iter().zip(self.values)
    }
}
