//! The Cash Card record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single cash card: an identified monetary amount bound to one owner.
///
/// `id` is allocated by the store and never reused. `owner` is set from the
/// authenticated principal at creation time and is immutable — there is no
/// transfer-of-ownership operation. `amount` is an opaque signed decimal;
/// no ledger semantics are attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashCard {
    /// Server-generated unique identifier.
    pub id: i64,
    /// Current amount on the card. Serialized as a JSON number.
    pub amount: Decimal,
    /// Name of the principal that created the card.
    pub owner: String,
}
