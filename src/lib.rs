//! QuoteSync Library
//!
//! Core library for the QuoteSync quote collection daemon.

pub mod storage;
pub mod sync;
pub mod types;
