use minisearch_core::{Document, InvertedIndex};

fn doc(id: &str, text: &str) -> Document {
    Document { id: id.into(), text: text.into() }
}

#[test]
fn build_records_term_and_document_frequencies() {
    let index = InvertedIndex::build(&[
        doc("doc1", "hello hello hello world"),
        doc("doc2", "hello rust"),
    ]);
    assert_eq!(index.num_docs, 2);
    assert_eq!(index.document_frequency("hello"), 2);
    assert_eq!(index.document_frequency("world"), 1);
    assert_eq!(index.document_frequency("absent"), 0);
    assert_eq!(index.term_frequency("hello", 0), 3);
    assert_eq!(index.term_frequency("hello", 1), 1);
    assert_eq!(index.term_frequency("world", 1), 0);
}

#[test]
fn postings_are_sorted_by_doc_id_without_duplicates() {
    let index = InvertedIndex::build(&[
        doc("a", "shared unique1"),
        doc("b", "shared"),
        doc("c", "shared unique2 shared"),
    ]);
    let tid = index.dictionary["shared"];
    let ids: Vec<_> = index.postings[&tid].iter().map(|p| p.doc_id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn document_frequency_matches_postings_and_stays_within_corpus() {
    let index = InvertedIndex::build(&[doc("a", "cat dog"), doc("b", "dog bird")]);
    for (term, &tid) in &index.dictionary {
        let df = index.df[tid as usize];
        assert!(df >= 1, "term {term} indexed with zero df");
        assert!(df <= index.num_docs);
        assert_eq!(df as usize, index.postings[&tid].len());
    }
}

#[test]
fn rebuild_is_idempotent() {
    let docs = vec![
        doc("doc1", "Cats like pillows"),
        doc("doc2", "Dogs like couches"),
        doc("doc3", "Cats and dogs like treats"),
    ];
    let a = InvertedIndex::build(&docs);
    let b = InvertedIndex::build(&docs);
    assert_eq!(a.num_docs, b.num_docs);
    assert_eq!(a.dictionary, b.dictionary);
    assert_eq!(a.df, b.df);
    assert_eq!(a.postings, b.postings);
    assert_eq!(a.doc_id_map, b.doc_id_map);
}

#[test]
fn internal_ids_follow_input_order() {
    let index = InvertedIndex::build(&[doc("zeta", "one"), doc("alpha", "two")]);
    assert_eq!(index.doc_id_map["zeta"], 0);
    assert_eq!(index.doc_id_map["alpha"], 1);
    assert_eq!(index.docs[&0].external_id, "zeta");
    assert_eq!(index.docs[&1].text, "two");
}

#[test]
fn empty_collection_builds_empty_index() {
    let index = InvertedIndex::build(&[]);
    assert_eq!(index.num_docs, 0);
    assert!(index.dictionary.is_empty());
    assert!(index.search("anything").is_empty());
}
