/// Document-frequency statistics over one batch of tabs
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::text::DocumentRecord;

/// Per-batch term statistics
///
/// Rebuilt from scratch by every `learn`; nothing carries over between batches.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStatistics {
    document_frequency: HashMap<String, usize>,
    total_documents: usize,
}

impl CorpusStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count, for every term, how many documents contain it at least once.
    pub fn from_documents(documents: &[DocumentRecord<'_>]) -> Self {
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for document in documents {
            let unique_terms: HashSet<&str> = document.terms.iter().map(String::as_str).collect();
            for term in unique_terms {
                *document_frequency.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        CorpusStatistics {
            document_frequency,
            total_documents: documents.len(),
        }
    }

    /// Replace the current statistics with those of `documents`.
    pub fn learn(&mut self, documents: &[DocumentRecord<'_>]) {
        *self = Self::from_documents(documents);
    }

    /// 0 for terms never seen, including when nothing has been learned yet
    pub fn document_frequency(&self, term: &str) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    pub fn total_documents(&self) -> usize {
        self.total_documents
    }

    pub fn vocabulary_size(&self) -> usize {
        self.document_frequency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_documents == 0
    }

    /// ln((N + 1) / (df + 1)); finite for every input.
    pub fn inverse_document_frequency(&self, term: &str) -> f64 {
        let total = self.total_documents as f64 + 1.0;
        let frequency = self.document_frequency(term) as f64 + 1.0;
        (total / frequency).ln()
    }

    pub fn tf_idf(&self, term: &str, document: &DocumentRecord<'_>) -> f64 {
        document.term_frequency(term) * self.inverse_document_frequency(term)
    }
}
