//! Record storage for the Cash Card service.
//!
//! This crate defines the [`CardStore`] trait — durable keyed storage of
//! [`CashCard`] records. The store knows nothing about HTTP or about who is
//! asking: `get` returns a card regardless of owner, and ownership is
//! enforced by the caller through `cashcard-core`. The one owner-aware
//! operation is `page`, which is a filter, not an access check.
//!
//! Two implementations are provided:
//!
//! - [`MemoryStore`] — in-memory, for development and tests
//! - [`PostgresStore`] — backed by `PostgreSQL` (feature `postgres-backend`)

mod error;
mod memory;
#[cfg(feature = "postgres-backend")]
mod postgres;

pub use error::StoreError;
pub use memory::MemoryStore;
#[cfg(feature = "postgres-backend")]
pub use postgres::PostgresStore;

use cashcard_core::{CashCard, PageRequest};
use rust_decimal::Decimal;

/// A pluggable card record store.
///
/// Ids are allocated by the store, are unique for its lifetime, and are
/// never reissued after a delete. Every operation is atomic with respect to
/// concurrent operations on the same id; concurrent updates resolve as
/// last-writer-wins.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait CardStore: Send + Sync + 'static {
    /// Persist a new card with the next free id and the given owner.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the underlying backend fails.
    async fn create(&self, amount: Decimal, owner: &str) -> Result<CashCard, StoreError>;

    /// Fetch a card by id, whoever owns it.
    ///
    /// Returns `Ok(None)` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the underlying backend fails.
    async fn get(&self, id: i64) -> Result<Option<CashCard>, StoreError>;

    /// Fetch one page of `owner`'s cards, sorted and sliced per `request`.
    ///
    /// A page past the end of the data is an empty vec, not an error. When
    /// `request.size` is `None` the whole result set is page zero and every
    /// later page is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the underlying backend fails.
    async fn page(&self, owner: &str, request: &PageRequest) -> Result<Vec<CashCard>, StoreError>;

    /// Replace the amount on an existing card; id and owner are untouched.
    ///
    /// Returns the updated card, or `Ok(None)` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the underlying backend fails.
    async fn update(&self, id: i64, amount: Decimal) -> Result<Option<CashCard>, StoreError>;

    /// Remove a card permanently. Its id is never reassigned.
    ///
    /// Returns `false` if the id was not present.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the underlying backend fails.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}
