//! Reconciler
//!
//! Pure merge of the local collection with a fetched remote set. The remote
//! side wins on conflict; the caller persists the outcome.

use crate::types::{Quote, QuoteKey};
use std::collections::{HashMap, HashSet};

/// A key present on both sides with differing categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub key: QuoteKey,
    pub local_category: String,
    pub remote_category: String,
}

/// Result of a reconcile pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub quotes: Vec<Quote>,
    pub conflicts: Vec<Conflict>,
}

/// Merge `remote` into `local`, remote wins on conflict.
///
/// Keys absent locally are appended. Keys present on both sides are
/// overwritten with the remote record; a category change is recorded as a
/// conflict. Malformed remote records are dropped before merging, and a
/// duplicate key within `remote` takes its last value without counting a
/// second conflict.
pub fn reconcile(local: Vec<Quote>, remote: Vec<Quote>) -> MergeOutcome {
    let mut quotes = local;
    let mut index: HashMap<QuoteKey, usize> = quotes
        .iter()
        .enumerate()
        .map(|(i, q)| (q.key(), i))
        .collect();

    let mut conflicts = Vec::new();
    let mut touched: HashSet<QuoteKey> = HashSet::new();

    for incoming in remote.into_iter().filter(Quote::is_well_formed) {
        let key = incoming.key();
        match index.get(&key) {
            Some(&i) => {
                if !touched.contains(&key) && quotes[i].category != incoming.category {
                    conflicts.push(Conflict {
                        key: key.clone(),
                        local_category: quotes[i].category.clone(),
                        remote_category: incoming.category.clone(),
                    });
                }
                quotes[i] = incoming;
            }
            None => {
                index.insert(key.clone(), quotes.len());
                quotes.push(incoming);
            }
        }
        touched.insert(key);
    }

    MergeOutcome { quotes, conflicts }
}
