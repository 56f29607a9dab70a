//! `PostgreSQL` card store (feature `postgres-backend`).
//!
//! Each trait operation maps to a single parameterized statement, so the
//! database provides the per-id atomicity the store contract asks for. Ids
//! come from a `BIGSERIAL` sequence, which never reissues a value after a
//! delete.

use cashcard_core::{CashCard, PageRequest};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::{CardStore, StoreError};

/// Row shape for `cash_cards`. Kept private so `cashcard-core` stays free
/// of sqlx derives.
#[derive(sqlx::FromRow)]
struct CardRow {
    id: i64,
    amount: Decimal,
    owner: String,
}

impl From<CardRow> for CashCard {
    fn from(row: CardRow) -> Self {
        Self {
            id: row.id,
            amount: row.amount,
            owner: row.owner,
        }
    }
}

/// A [`CardStore`] backed by `PostgreSQL`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to the database and ensure the schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the connection or schema setup fails.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new().max_connections(8).connect(url).await?;

        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS cash_cards (
                  id     BIGSERIAL PRIMARY KEY,
                  amount NUMERIC NOT NULL,
                  owner  TEXT NOT NULL
              )",
        )
        .execute(&pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS cash_cards_owner_idx ON cash_cards (owner)")
            .execute(&pool)
            .await?;

        info!("cash_cards schema ready");

        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by tests that manage their own schema).
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CardStore for PostgresStore {
    async fn create(&self, amount: Decimal, owner: &str) -> Result<CashCard, StoreError> {
        let row = sqlx::query_as::<_, CardRow>(
            r"INSERT INTO cash_cards (amount, owner)
              VALUES ($1, $2)
              RETURNING id, amount, owner",
        )
        .bind(amount)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get(&self, id: i64) -> Result<Option<CashCard>, StoreError> {
        let row =
            sqlx::query_as::<_, CardRow>("SELECT id, amount, owner FROM cash_cards WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Into::into))
    }

    async fn page(&self, owner: &str, request: &PageRequest) -> Result<Vec<CashCard>, StoreError> {
        // Sort tokens come from a closed enum, never from the request
        // string, so interpolating them is safe.
        let order_by = format!(
            "ORDER BY {} {}, id ASC",
            request.sort.field.column(),
            request.sort.order.keyword()
        );

        let rows = match request.size {
            None => {
                if request.page > 0 {
                    return Ok(Vec::new());
                }
                sqlx::query_as::<_, CardRow>(&format!(
                    "SELECT id, amount, owner FROM cash_cards WHERE owner = $1 {order_by}"
                ))
                .bind(owner)
                .fetch_all(&self.pool)
                .await?
            }
            Some(size) => sqlx::query_as::<_, CardRow>(&format!(
                "SELECT id, amount, owner FROM cash_cards WHERE owner = $1 {order_by} \
                 LIMIT $2 OFFSET $3"
            ))
            .bind(owner)
            .bind(i64::try_from(size).unwrap_or(i64::MAX))
            .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?,
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, amount: Decimal) -> Result<Option<CashCard>, StoreError> {
        let row = sqlx::query_as::<_, CardRow>(
            r"UPDATE cash_cards SET amount = $2
              WHERE id = $1
              RETURNING id, amount, owner",
        )
        .bind(id)
        .bind(amount)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM cash_cards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
