use serde::Serialize;
use std::collections::HashMap;

use crate::index::{DocId, InvertedIndex};
use crate::tokenizer::tokenize;

/// One ranked result: internal doc id (deterministic tie-break key),
/// the document's external id, and its summed TF-IDF score.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub external_id: String,
    pub score: f32,
}

impl InvertedIndex {
    /// Rank documents for a query by summed TF-IDF, descending.
    ///
    /// The query is tokenized exactly like document text. Each query token
    /// present in the dictionary contributes `tf * ln(num_docs / df)` to every
    /// document on its postings list; unknown tokens are skipped. Ties are
    /// broken by ascending doc id. An empty or fully-unknown query returns an
    /// empty list.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let terms = tokenize(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let n = self.num_docs.max(1) as f32;
        let mut scores: HashMap<DocId, f32> = HashMap::new();
        for term in &terms {
            let Some(&tid) = self.dictionary.get(term.as_str()) else {
                continue;
            };
            let df_t = self.df.get(tid as usize).copied().unwrap_or(1).max(1) as f32;
            let idf = (n / df_t).ln();
            if let Some(postings) = self.postings.get(&tid) {
                for p in postings {
                    *scores.entry(p.doc_id).or_insert(0.0) += p.term_frequency as f32 * idf;
                }
            }
        }

        let mut scored: Vec<(DocId, f32)> = scores.into_iter().collect();
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        tracing::debug!(query, num_terms = terms.len(), hits = scored.len(), "query scored");

        scored
            .into_iter()
            .map(|(doc_id, score)| SearchHit {
                doc_id,
                external_id: self
                    .docs
                    .get(&doc_id)
                    .map(|m| m.external_id.clone())
                    .unwrap_or_default(),
                score,
            })
            .collect()
    }
}
