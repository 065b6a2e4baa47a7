use crate::{Error, Result};

/// Explicit transaction control plus the scoped [`within_transaction`](Self::within_transaction).
///
/// Transactions do not nest: `begin` while one is open fails with [`Error::DatabaseAction`].
pub trait Transactional {
    fn begin(&mut self) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;

    /// Run `action` inside a transaction.
    ///
    /// Commits when `action` returns `Ok`. On `Err` the transaction is rolled back and the very same
    /// error is returned, a failing rollback is only logged. When the commit itself fails a rollback is
    /// attempted and the commit error is returned.
    fn within_transaction<T, E, F>(&mut self, action: F) -> std::result::Result<T, E>
    where
        Self: Sized,
        E: From<Error>,
        F: FnOnce(&mut Self) -> std::result::Result<T, E>,
    {
        self.begin()?;
        match action(self) {
            Ok(value) => {
                if let Err(error) = self.commit() {
                    log::error!("Commit failed: {}", error);
                    if let Err(e) = self.rollback() {
                        log::error!("Rollback after a failed commit also failed: {}", e);
                    }
                    return Err(error.into());
                }
                Ok(value)
            }
            Err(error) => {
                if let Err(e) = self.rollback() {
                    log::error!("Rollback failed: {}", e);
                }
                Err(error)
            }
        }
    }
}
