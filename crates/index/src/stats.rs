//! Corpus-wide statistics: term frequency, document frequency, IDF and
//! vocabulary.
//!
//! Everything here is recomputed from scratch for the whole corpus. IDF
//! depends on the total chunk count, so there is no incremental update.

use crate::tokenizer::tokenize;
use crate::types::{IdfTable, TermFrequencies, Vocabulary};
use std::collections::{BTreeMap, HashSet};

/// Index structures derived from one set of chunks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusIndex {
    pub vocabulary: Vocabulary,
    pub idf: IdfTable,
    /// One entry per input chunk, in input order
    pub term_frequencies: Vec<TermFrequencies>,
}

/// Relative frequency of each token. Empty input gives an empty map.
pub fn term_frequencies<S: AsRef<str>>(tokens: &[S]) -> TermFrequencies {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.as_ref()).or_insert(0) += 1;
    }

    let total = tokens.len() as f64;
    counts
        .into_iter()
        .map(|(token, count)| (token.to_string(), count as f64 / total))
        .collect()
}

/// Number of chunks each token appears in at least once.
pub fn document_frequencies(chunk_tokens: &[Vec<String>]) -> BTreeMap<String, usize> {
    let mut frequencies = BTreeMap::new();
    for tokens in chunk_tokens {
        let distinct: HashSet<&String> = tokens.iter().collect();
        for token in distinct {
            *frequencies.entry(token.clone()).or_insert(0) += 1;
        }
    }
    frequencies
}

/// `ln(total_chunks / document_frequency)` for every observed token.
///
/// Only observed tokens get an entry, so the ratio is always >= 1 and the
/// weight is never negative. A token found in every chunk weighs zero.
pub fn inverse_document_frequency(chunk_tokens: &[Vec<String>]) -> IdfTable {
    let total = chunk_tokens.len() as f64;
    document_frequencies(chunk_tokens)
        .into_iter()
        .map(|(token, df)| (token, (total / df as f64).ln()))
        .collect()
}

/// Assign ids to distinct tokens in order of first appearance.
pub fn build_vocabulary(chunk_tokens: &[Vec<String>]) -> Vocabulary {
    let mut vocabulary = Vocabulary::new();
    for token in chunk_tokens.iter().flatten() {
        if !vocabulary.contains_key(token) {
            let id = vocabulary.len() as u32;
            vocabulary.insert(token.clone(), id);
        }
    }
    vocabulary
}

/// Tokenize every chunk and derive vocabulary, IDF and per-chunk TF.
pub fn build_index<S: AsRef<str>>(chunks: &[S]) -> CorpusIndex {
    let chunk_tokens: Vec<Vec<String>> = chunks.iter().map(|c| tokenize(c.as_ref())).collect();

    let index = CorpusIndex {
        vocabulary: build_vocabulary(&chunk_tokens),
        idf: inverse_document_frequency(&chunk_tokens),
        term_frequencies: chunk_tokens
            .iter()
            .map(|tokens| term_frequencies(tokens.as_slice()))
            .collect(),
    };

    tracing::debug!(
        "Built index over {} chunks: {} distinct tokens",
        chunks.len(),
        index.vocabulary.len()
    );

    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(chunks: &[&str]) -> Vec<Vec<String>> {
        chunks.iter().map(|c| tokenize(c)).collect()
    }

    #[test]
    fn test_term_frequencies() {
        let tf = term_frequencies(&["rio", "mar", "rio", "rio"]);
        assert_eq!(tf.len(), 2);
        assert_eq!(tf["rio"], 0.75);
        assert_eq!(tf["mar"], 0.25);
    }

    #[test]
    fn test_term_frequencies_empty() {
        let tf = term_frequencies::<&str>(&[]);
        assert!(tf.is_empty());
    }

    #[test]
    fn test_document_frequency_counts_chunks_not_occurrences() {
        let chunk_tokens = tokens(&["gato gato gato", "gato cachorro", "cachorro"]);
        let df = document_frequencies(&chunk_tokens);
        assert_eq!(df["gato"], 2);
        assert_eq!(df["cachorro"], 2);
    }

    #[test]
    fn test_idf_values() {
        let chunk_tokens = tokens(&[
            "o gato subiu no telhado",
            "o cachorro correu no parque",
            "o gato dormiu no sofá",
        ]);
        let idf = inverse_document_frequency(&chunk_tokens);

        assert!((idf["gato"] - (3.0f64 / 2.0).ln()).abs() < 1e-12);
        assert!((idf["parque"] - 3.0f64.ln()).abs() < 1e-12);
        assert!(!idf.contains_key("no"));
    }

    #[test]
    fn test_idf_is_zero_only_for_ubiquitous_tokens() {
        let chunk_tokens = tokens(&["relatório anual vendas", "relatório mensal", "relatório"]);
        let idf = inverse_document_frequency(&chunk_tokens);

        for (token, weight) in &idf {
            assert!(*weight >= 0.0);
            let everywhere = chunk_tokens.iter().all(|t| t.contains(token));
            assert_eq!(*weight == 0.0, everywhere, "token {:?}", token);
        }
        assert_eq!(idf["relatório"], 0.0);
    }

    #[test]
    fn test_vocabulary_ids_are_unique_and_dense() {
        let chunk_tokens = tokens(&["alfa beta alfa", "gama beta", "delta"]);
        let vocabulary = build_vocabulary(&chunk_tokens);

        assert_eq!(vocabulary.len(), 4);
        assert_eq!(vocabulary["alfa"], 0);
        assert_eq!(vocabulary["beta"], 1);
        assert_eq!(vocabulary["gama"], 2);
        assert_eq!(vocabulary["delta"], 3);
    }

    #[test]
    fn test_build_index_handles_tokenless_chunk() {
        let index = build_index(&["contrato assinado ontem", "de a o"]);
        assert_eq!(index.term_frequencies.len(), 2);
        assert!(index.term_frequencies[1].is_empty());
        assert_eq!(index.vocabulary.len(), 2);
        assert_eq!(index.idf.len(), index.vocabulary.len());
    }
}
