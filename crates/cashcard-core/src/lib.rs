//! Domain types for the Cash Card service.
//!
//! This crate holds everything the HTTP and storage layers agree on but
//! neither owns: the [`CashCard`] record itself, the paging and sorting
//! vocabulary ([`PageRequest`], [`Sort`]), and the ownership authorization
//! decision ([`decide`]). It performs no I/O and has no async code, so the
//! access rules can be unit-tested without a running server or store.

mod access;
mod card;
mod page;

pub use access::{decide, Decision, Principal, Role};
pub use card::CashCard;
pub use page::{PageRequest, Sort, SortField, SortOrder, SortParseError};
