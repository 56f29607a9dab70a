//! Cash card routes: `/cashcards`.
//!
//! Every id-addressed handler follows the same shape: fetch the record,
//! ask `cashcard-core` for a [`Decision`], and only then act. The ownership
//! check always runs before anything about the record is revealed — a card
//! owned by someone else and a card that does not exist produce identical
//! 404 responses with empty bodies.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::{Extension, Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;

use cashcard_core::{decide, CashCard, Decision, PageRequest, Principal, Role, Sort};

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/cashcards` router.
///
/// Paths:
/// - `POST   /cashcards` — create
/// - `GET    /cashcards` — list (paged, sorted)
/// - `GET    /cashcards/{id}` — read one
/// - `PUT    /cashcards/{id}` — replace amount
/// - `DELETE /cashcards/{id}` — remove
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cashcards", get(list_cards).post(create_card))
        .route(
            "/cashcards/{id}",
            get(get_card).put(update_card).delete(delete_card),
        )
}

// ── Request types ────────────────────────────────────────────────────

/// Body for create and update. Any client-supplied `id` or `owner` field
/// is ignored — the server assigns both.
#[derive(Debug, Deserialize)]
struct CardRequest {
    amount: Decimal,
}

/// Query parameters for listing.
#[derive(Debug, Deserialize)]
struct ListParams {
    page: Option<u64>,
    size: Option<u64>,
    sort: Option<String>,
}

// ── Authorization helpers ────────────────────────────────────────────

/// Gate for collection-level operations, where no record exists yet.
fn require_card_owner(principal: &Principal) -> Result<(), AppError> {
    if principal.role == Role::CardOwner {
        Ok(())
    } else {
        Err(forbidden())
    }
}

/// Apply the ownership decision to a fetched record. `Allow` yields the
/// card; `Hidden` and a genuinely absent record both become the same 404.
fn authorized_card(principal: &Principal, card: Option<CashCard>) -> Result<CashCard, AppError> {
    match decide(principal, card.as_ref()) {
        Decision::Allow => card.ok_or(AppError::NotFound),
        Decision::Hidden => Err(AppError::NotFound),
        Decision::Forbidden => Err(forbidden()),
    }
}

fn forbidden() -> AppError {
    AppError::Forbidden("card access requires the card-owner role".to_owned())
}

// ── Handlers ─────────────────────────────────────────────────────────

/// Create a card. The owner is always the authenticated principal.
async fn create_card(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<CardRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1]), AppError> {
    require_card_owner(&principal)?;

    let card = state.store.create(body.amount, &principal.name).await?;
    tracing::info!(id = card.id, owner = %card.owner, "cash card created");

    let location = format!("/cashcards/{}", card.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

/// Read one card.
async fn get_card(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<CashCard>, AppError> {
    let card = state.store.get(id).await?;
    let card = authorized_card(&principal, card)?;
    Ok(Json(card))
}

/// List the principal's cards, paged and sorted.
async fn list_cards(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CashCard>>, AppError> {
    require_card_owner(&principal)?;

    let sort = match params.sort.as_deref() {
        Some(raw) => Sort::parse(raw)?,
        None => Sort::default(),
    };
    let request = PageRequest {
        page: params.page.unwrap_or(0),
        size: params.size,
        sort,
    };

    let cards = state.store.page(&principal.name, &request).await?;
    Ok(Json(cards))
}

/// Replace the amount on one card.
async fn update_card(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(body): Json<CardRequest>,
) -> Result<StatusCode, AppError> {
    let card = state.store.get(id).await?;
    authorized_card(&principal, card)?;

    // A concurrent delete between the check and the write surfaces as the
    // same 404 the check would have produced.
    match state.store.update(id, body.amount).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(AppError::NotFound),
    }
}

/// Remove one card.
async fn delete_card(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let card = state.store.get(id).await?;
    authorized_card(&principal, card)?;

    if state.store.delete(id).await? {
        tracing::info!(id, owner = %principal.name, "cash card deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
