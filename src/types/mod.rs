//! Shared type definitions
//!
//! This module contains the domain types used across the application.

pub mod book;
pub mod quote;

pub use book::{QuoteBook, QuoteError};
pub use quote::{Quote, QuoteKey};
