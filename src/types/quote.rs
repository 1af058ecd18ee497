//! Quote types
//!
//! Defines the quote record and its natural key.

use serde::{Deserialize, Serialize};

/// A single quote record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Server-assigned id, when the record came from a source that has them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// The quote text
    pub text: String,
    /// The category the quote belongs to
    pub category: String,
}

/// Natural key of a quote: the id when present, otherwise the text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuoteKey {
    Id(u64),
    Text(String),
}

impl std::fmt::Display for QuoteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteKey::Id(id) => write!(f, "#{}", id),
            QuoteKey::Text(text) => write!(f, "{}", text),
        }
    }
}

impl Quote {
    /// Create a new quote with trimmed fields
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into().trim().to_string(),
            category: category.into().trim().to_string(),
        }
    }

    /// The key records are matched on during reconciliation
    pub fn key(&self) -> QuoteKey {
        match self.id {
            Some(id) => QuoteKey::Id(id),
            None => QuoteKey::Text(self.text.clone()),
        }
    }

    /// A record is usable only with non-empty text and category
    pub fn is_well_formed(&self) -> bool {
        !self.text.trim().is_empty() && !self.category.trim().is_empty()
    }
}
