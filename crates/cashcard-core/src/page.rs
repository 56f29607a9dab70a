//! Paging and sorting vocabulary for card listings.
//!
//! A [`PageRequest`] describes one bounded, ordered slice of an owner's
//! cards. The comparator lives here, next to the types, so every storage
//! backend slices the same total order — ties on the sort field are broken
//! by id, otherwise records could straddle page boundaries and be returned
//! twice (or never).

use std::cmp::Ordering;

use crate::card::CashCard;

/// Field a card listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Sort by `amount` (the default).
    #[default]
    Amount,
    /// Sort by `id`.
    Id,
}

impl SortField {
    /// Column name for SQL backends.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Id => "id",
        }
    }
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending (the default).
    #[default]
    Ascending,
    /// Descending.
    Descending,
}

impl SortOrder {
    /// SQL keyword for this direction.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// A sort specification: field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

/// Error parsing a `sort=` query parameter.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SortParseError {
    /// The field name is not sortable.
    #[error("unknown sort field '{0}', expected 'amount' or 'id'")]
    UnknownField(String),
    /// The direction is neither `asc` nor `desc`.
    #[error("unknown sort direction '{0}', expected 'asc' or 'desc'")]
    UnknownDirection(String),
}

impl Sort {
    /// Parse the `field[,direction]` form used in query strings, e.g.
    /// `amount,desc`. A bare field name sorts ascending.
    ///
    /// # Errors
    ///
    /// Returns [`SortParseError`] when the field or direction is not
    /// recognised.
    pub fn parse(input: &str) -> Result<Self, SortParseError> {
        let (field, order) = match input.split_once(',') {
            Some((field, dir)) => (field, Some(dir)),
            None => (input, None),
        };

        let field = match field.trim() {
            "amount" => SortField::Amount,
            "id" => SortField::Id,
            other => return Err(SortParseError::UnknownField(other.to_owned())),
        };

        let order = match order.map(str::trim) {
            None | Some("asc") => SortOrder::Ascending,
            Some("desc") => SortOrder::Descending,
            Some(other) => return Err(SortParseError::UnknownDirection(other.to_owned())),
        };

        Ok(Self { field, order })
    }

    /// Total order over cards for this sort. Ties on the sort field fall
    /// back to ascending id.
    #[must_use]
    pub fn compare(self, a: &CashCard, b: &CashCard) -> Ordering {
        let by_field = match self.field {
            SortField::Amount => a.amount.cmp(&b.amount),
            SortField::Id => a.id.cmp(&b.id),
        };
        let by_field = match self.order {
            SortOrder::Ascending => by_field,
            SortOrder::Descending => by_field.reverse(),
        };
        by_field.then(a.id.cmp(&b.id))
    }
}

/// One requested slice of an owner's cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u64,
    /// Page size; `None` means return everything.
    pub size: Option<u64>,
    /// Sort applied before slicing.
    pub sort: Sort,
}

impl PageRequest {
    /// Index of the first record on this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size.unwrap_or(0))
    }
}
