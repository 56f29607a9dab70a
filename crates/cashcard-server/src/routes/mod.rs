//! HTTP route modules.

pub mod cards;
pub mod sys;
