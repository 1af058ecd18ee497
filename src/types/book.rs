//! Quote collection
//!
//! An owned, insertion-ordered collection of quotes with the operations the
//! application exposes: add, random pick, category filter, wholesale replace.

use crate::types::quote::{Quote, QuoteKey};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from collection mutations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("Please enter a quote text")]
    EmptyText,
    #[error("Please enter a category")]
    EmptyCategory,
    #[error("This quote already exists")]
    Duplicate,
}

/// Insertion-ordered quote collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteBook {
    quotes: Vec<Quote>,
}

impl QuoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_quotes(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    /// The hardcoded starter list used when nothing has been persisted yet
    pub fn seed() -> Self {
        Self::from_quotes(vec![
            Quote::new(
                "The journey of a thousand miles begins with one step.",
                "Motivation",
            ),
            Quote::new(
                "Life is what happens when you're busy making other plans.",
                "Life",
            ),
            Quote::new("Success is not final, failure is not fatal.", "Success"),
        ])
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn contains_key(&self, key: &QuoteKey) -> bool {
        self.quotes.iter().any(|q| q.key() == *key)
    }

    /// Add a new quote. Rejects missing fields and exact duplicates; nothing
    /// is stored on rejection.
    pub fn add(
        &mut self,
        text: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<(), QuoteError> {
        let quote = Quote::new(text, category);
        if quote.text.is_empty() {
            return Err(QuoteError::EmptyText);
        }
        if quote.category.is_empty() {
            return Err(QuoteError::EmptyCategory);
        }
        if self.contains_key(&quote.key()) {
            return Err(QuoteError::Duplicate);
        }

        self.quotes.push(quote);
        Ok(())
    }

    /// Pick a uniformly random quote
    pub fn random(&self) -> Option<&Quote> {
        self.quotes.choose(&mut rand::thread_rng())
    }

    /// Sorted, deduplicated list of categories
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.quotes.iter().map(|q| q.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Quotes in a category, insertion order preserved
    pub fn filter(&self, category: &str) -> Vec<&Quote> {
        self.quotes
            .iter()
            .filter(|q| q.category == category)
            .collect()
    }

    /// Wholesale overwrite, used by import and reconcile
    pub fn replace_all(&mut self, quotes: Vec<Quote>) {
        self.quotes = quotes;
    }

    pub fn into_quotes(self) -> Vec<Quote> {
        self.quotes
    }
}
