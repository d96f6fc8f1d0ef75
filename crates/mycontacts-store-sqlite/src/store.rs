//! [`SqliteStore`]: the SQLite implementation of [`Storage`].

use std::{future::Future, path::Path};

use mycontacts_core::store::{Storage, UnitOfWork};

use crate::{Error, Result, schema::SCHEMA, tables::SqliteTables};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl std::fmt::Debug for SqliteStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SqliteStore").finish_non_exhaustive()
  }
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, used by the tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a read-only closure directly against the connection, outside any
  /// unit of work.
  #[cfg(test)]
  pub(crate) async fn inspect<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&rusqlite::Connection) -> rusqlite::Result<T> + Send + 'static,
  {
    Ok(self.conn.call(move |conn| Ok(f(conn)?)).await?)
  }
}

// ─── Storage impl ────────────────────────────────────────────────────────────

impl Storage for SqliteStore {
  fn transaction<T, F>(
    &self,
    work: F,
  ) -> impl Future<Output = mycontacts_core::Result<T>> + Send + '_
  where
    T: Send + 'static,
    F: FnOnce(&dyn UnitOfWork) -> mycontacts_core::Result<T> + Send + 'static,
  {
    async move {
      let outcome = self
        .conn
        .call(move |conn| {
          let tx = conn.transaction()?;
          let outcome = work(&SqliteTables::new(&tx));
          // Dropping `tx` without committing rolls every write back.
          if outcome.is_ok() {
            tx.commit()?;
          }
          Ok(outcome)
        })
        .await
        .map_err(Error::from)?;

      if let Err(e) = &outcome {
        tracing::debug!(error = %e, "transaction rolled back");
      }
      outcome
    }
  }
}
