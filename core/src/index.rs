use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::tokenizer::tokenize;

pub type TermId = u32;
pub type DocId = u32;

/// An input document: external identifier plus raw text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

/// Per-document metadata kept alongside the index for result display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocMeta {
    pub external_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    /// Raw occurrence count of the term within this document.
    pub term_frequency: u32,
}

/// In-memory inverted index: interned terms, per-term document frequencies,
/// and postings sorted by doc id. Read-only after `build`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InvertedIndex {
    pub dictionary: HashMap<String, TermId>,
    pub df: Vec<u32>,
    pub postings: HashMap<TermId, Vec<Posting>>, // postings sorted by doc_id
    pub docs: HashMap<DocId, DocMeta>,
    pub doc_id_map: HashMap<String, DocId>,
    pub num_docs: u32,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over a document collection. Internal doc ids and term ids
    /// are assigned in input order, so the same input yields the same index.
    pub fn build(documents: &[Document]) -> Self {
        let mut index = Self::new();
        for doc in documents {
            index.ingest(doc);
        }
        for plist in index.postings.values_mut() {
            plist.sort_by_key(|p| p.doc_id);
        }
        tracing::info!(
            num_docs = index.num_docs,
            num_terms = index.dictionary.len(),
            "index built"
        );
        index
    }

    fn ingest(&mut self, doc: &Document) {
        let doc_id = self.num_docs as DocId;
        self.num_docs += 1;
        self.doc_id_map.insert(doc.id.clone(), doc_id);
        self.docs.insert(
            doc_id,
            DocMeta { external_id: doc.id.clone(), text: doc.text.clone() },
        );

        // Term frequencies for this document
        let mut tf_counts: HashMap<TermId, u32> = HashMap::new();
        for term in tokenize(&doc.text) {
            let next_id = self.dictionary.len() as TermId;
            let tid = *self.dictionary.entry(term).or_insert(next_id);
            if self.df.len() <= tid as usize {
                self.df.resize(tid as usize + 1, 0);
            }
            *tf_counts.entry(tid).or_insert(0) += 1;
        }

        // Each term seen in this document bumps its df exactly once
        for (tid, tf) in tf_counts {
            self.df[tid as usize] += 1;
            self.postings
                .entry(tid)
                .or_default()
                .push(Posting { doc_id, term_frequency: tf });
        }
    }

    /// Number of documents containing the given normalized term.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.dictionary
            .get(term)
            .and_then(|&tid| self.df.get(tid as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Occurrence count of a term within one document, 0 if absent.
    pub fn term_frequency(&self, term: &str, doc_id: DocId) -> u32 {
        let Some(&tid) = self.dictionary.get(term) else {
            return 0;
        };
        self.postings
            .get(&tid)
            .and_then(|plist| {
                plist
                    .binary_search_by_key(&doc_id, |p| p.doc_id)
                    .ok()
                    .map(|i| plist[i].term_frequency)
            })
            .unwrap_or(0)
    }
}
