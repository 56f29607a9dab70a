//! In-memory card store.
//!
//! Records live in a `BTreeMap` behind a single `RwLock`, together with the
//! id sequence. Holding both under one lock makes every operation atomic
//! with respect to the others; the sequence only ever moves forward, so a
//! deleted id is never handed out again. Data is lost when the process
//! exits — use this for development and tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use cashcard_core::{CashCard, PageRequest};
use rust_decimal::Decimal;

use crate::{CardStore, StoreError};

#[derive(Debug)]
struct Inner {
    next_id: i64,
    cards: BTreeMap<i64, CashCard>,
}

/// An in-memory [`CardStore`] backed by a `BTreeMap`.
///
/// Thread-safe and async-compatible. Clones share the same underlying data.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                next_id: 1,
                cards: BTreeMap::new(),
            })),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CardStore for MemoryStore {
    async fn create(&self, amount: Decimal, owner: &str) -> Result<CashCard, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;

        let card = CashCard {
            id,
            amount,
            owner: owner.to_owned(),
        };
        inner.cards.insert(id, card.clone());
        Ok(card)
    }

    async fn get(&self, id: i64) -> Result<Option<CashCard>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.cards.get(&id).cloned())
    }

    async fn page(&self, owner: &str, request: &PageRequest) -> Result<Vec<CashCard>, StoreError> {
        let inner = self.inner.read().await;

        let mut cards: Vec<CashCard> = inner
            .cards
            .values()
            .filter(|card| card.owner == owner)
            .cloned()
            .collect();
        cards.sort_by(|a, b| request.sort.compare(a, b));

        // No explicit size means the whole result set is page zero.
        let Some(size) = request.size else {
            return Ok(if request.page == 0 { cards } else { Vec::new() });
        };

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(size).unwrap_or(usize::MAX);
        Ok(cards.into_iter().skip(offset).take(size).collect())
    }

    async fn update(&self, id: i64, amount: Decimal) -> Result<Option<CashCard>, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.cards.get_mut(&id) {
            Some(card) => {
                card.amount = amount;
                Ok(Some(card.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.cards.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashcard_core::{Sort, SortField, SortOrder};

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn all(size: Option<u64>, page: u64, sort: Sort) -> PageRequest {
        PageRequest { page, size, sort }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let first = store.create(dec(12345), "LeudiX1").await.unwrap();
        let second = store.create(dec(10050), "Sarah").await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.owner, "LeudiX1");
    }

    #[tokio::test]
    async fn get_returns_card_regardless_of_owner() {
        let store = MemoryStore::new();
        let created = store.create(dec(32533), "Lucy2").await.unwrap();
        // The store does not filter by owner; that is the caller's job.
        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn get_unknown_id_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get(1000).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_replaces_amount_only() {
        let store = MemoryStore::new();
        let created = store.create(dec(10050), "Sarah").await.unwrap();

        let updated = store.update(created.id, dec(50050)).await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.owner, "Sarah");
        assert_eq!(updated.amount, dec(50050));
    }

    #[tokio::test]
    async fn update_unknown_id_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.update(999, dec(100)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_removes_the_card() {
        let store = MemoryStore::new();
        let created = store.create(dec(100), "Sarah").await.unwrap();

        assert!(store.delete(created.id).await.unwrap());
        assert_eq!(store.get(created.id).await.unwrap(), None);
        // A second delete reports the absence.
        assert!(!store.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn deleted_ids_are_never_reissued() {
        let store = MemoryStore::new();
        let first = store.create(dec(100), "Sarah").await.unwrap();
        store.delete(first.id).await.unwrap();

        let next = store.create(dec(200), "Sarah").await.unwrap();
        assert!(next.id > first.id);
    }

    #[tokio::test]
    async fn page_filters_by_owner() {
        let store = MemoryStore::new();
        store.create(dec(12345), "LeudiX1").await.unwrap();
        store.create(dec(10050), "Sarah").await.unwrap();
        store.create(dec(32533), "Lucy2").await.unwrap();

        let page = store
            .page("LeudiX1", &all(None, 0, Sort::default()))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].owner, "LeudiX1");
    }

    #[tokio::test]
    async fn page_for_owner_with_no_cards_is_empty() {
        let store = MemoryStore::new();
        store.create(dec(12345), "LeudiX1").await.unwrap();

        let page = store
            .page("hank-owns-no-cards", &all(None, 0, Sort::default()))
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn default_sort_is_amount_ascending() {
        let store = MemoryStore::new();
        store.create(dec(300), "Sarah").await.unwrap();
        store.create(dec(100), "Sarah").await.unwrap();
        store.create(dec(200), "Sarah").await.unwrap();

        let page = store
            .page("Sarah", &all(None, 0, Sort::default()))
            .await
            .unwrap();
        let amounts: Vec<Decimal> = page.iter().map(|c| c.amount).collect();
        assert_eq!(amounts, vec![dec(100), dec(200), dec(300)]);
    }

    #[tokio::test]
    async fn descending_sort_reverses_amounts() {
        let store = MemoryStore::new();
        store.create(dec(100), "Sarah").await.unwrap();
        store.create(dec(300), "Sarah").await.unwrap();
        store.create(dec(200), "Sarah").await.unwrap();

        let sort = Sort {
            field: SortField::Amount,
            order: SortOrder::Descending,
        };
        let page = store.page("Sarah", &all(None, 0, sort)).await.unwrap();
        let amounts: Vec<Decimal> = page.iter().map(|c| c.amount).collect();
        assert_eq!(amounts, vec![dec(300), dec(200), dec(100)]);
    }

    #[tokio::test]
    async fn pages_cover_all_cards_without_duplicates() {
        let store = MemoryStore::new();
        // Duplicate amounts on purpose — the id tiebreak must keep the
        // pagination a total order.
        for cents in [500, 100, 300, 100, 200] {
            store.create(dec(cents), "Sarah").await.unwrap();
        }

        let mut seen = Vec::new();
        for page_index in 0.. {
            let page = store
                .page("Sarah", &all(Some(2), page_index, Sort::default()))
                .await
                .unwrap();
            if page.is_empty() {
                break;
            }
            seen.extend(page.into_iter().map(|c| c.id));
        }

        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn out_of_range_page_is_empty_not_an_error() {
        let store = MemoryStore::new();
        store.create(dec(100), "Sarah").await.unwrap();

        let page = store
            .page("Sarah", &all(Some(10), 99, Sort::default()))
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn unsized_request_returns_everything_on_page_zero() {
        let store = MemoryStore::new();
        for cents in [100, 200, 300] {
            store.create(dec(cents), "Sarah").await.unwrap();
        }

        let first = store.page("Sarah", &all(None, 0, Sort::default())).await.unwrap();
        assert_eq!(first.len(), 3);

        let second = store.page("Sarah", &all(None, 1, Sort::default())).await.unwrap();
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn clone_shares_state() {
        let store = MemoryStore::new();
        let clone = store.clone();
        let created = store.create(dec(100), "Sarah").await.unwrap();
        assert_eq!(clone.get(created.id).await.unwrap(), Some(created));
    }
}
