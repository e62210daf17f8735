//! Tests for processing, ranking and snapshot behaviour through the public
//! operations.

use crate::{
    answer_context, clear, export_snapshot, get_statistics, import_snapshot, process, search,
    search_with_total, ChunkConfig, Corpus, CorpusStatus, CorpusStore,
};

const REPORT: &str = "Página 1\n\
O relatório financeiro descreve receitas, despesas operacionais, impostos trimestrais e projeções de caixa para o próximo exercício contábil da empresa.\n\
##\n\
A equipe de engenharia migrou os servidores para contêineres, reduziu a latência das consultas e automatizou os testes de integração contínua.\n\
Durante a expedição, os geólogos mediram a temperatura do vulcão ativo, coletaram amostras de lava e registraram tremores sísmicos frequentes.\n";

fn animal_store() -> CorpusStore {
    let store = CorpusStore::new();
    store.replace(Corpus::build(
        vec![
            "o gato subiu no telhado".to_string(),
            "o cachorro correu no parque".to_string(),
            "o gato dormiu no sofá".to_string(),
        ],
        None,
        15,
    ));
    store
}

fn report_store() -> CorpusStore {
    let store = CorpusStore::new();
    let outcome = process(&store, &ChunkConfig::new(20, 5), REPORT, "relatorio.pdf");
    assert!(outcome.success, "processing failed: {:?}", outcome.error);
    store
}

#[test]
fn test_gato_ranks_matching_chunks_equally() {
    let store = animal_store();
    let hits = search(&store, "gato", 5);

    let indices: Vec<usize> = hits.iter().map(|h| h.chunk_index).collect();
    assert_eq!(indices, vec![0, 2]);
    assert!(hits[0].similarity > 0.0);
    assert_eq!(hits[0].similarity, hits[1].similarity);
    assert_eq!(hits[0].text, "o gato subiu no telhado");
}

#[test]
fn test_stop_word_query_is_empty_not_error() {
    let store = animal_store();
    assert!(search(&store, "de a o", 5).is_empty());
}

#[test]
fn test_out_of_vocabulary_query_is_empty() {
    let store = animal_store();
    assert!(search(&store, "dinossauro voador", 5).is_empty());
}

#[test]
fn test_search_on_empty_store() {
    let store = CorpusStore::new();
    let response = search_with_total(&store, "gato", 5);
    assert!(response.hits.is_empty());
    assert_eq!(response.total_found, 0);
}

#[test]
fn test_search_never_returns_non_positive_similarity() {
    let store = report_store();
    for query in ["vulcão", "receitas impostos", "servidores lava", "contêineres", "nada"] {
        for hit in search(&store, query, 10) {
            assert!(hit.similarity > 0.0, "query {:?} hit {:?}", query, hit);
            assert!(hit.similarity <= 1.0);
        }
    }
}

#[test]
fn test_process_builds_multiple_chunks() {
    let store = report_store();
    let corpus = store.current();

    assert!(corpus.chunks().len() > 1);
    assert_eq!(corpus.chunks().len(), corpus.vectors().len());
    assert!(corpus.chunks()[0].text.starts_with("Página 1 O relatório"));
    assert!(corpus
        .chunks()
        .iter()
        .all(|c| !c.text.contains('\n') && !c.text.contains('#')));

    let stats = get_statistics(&store);
    assert_eq!(stats.total_documents, 1);
    assert_eq!(stats.total_chunks, corpus.chunks().len());
    assert_eq!(stats.vocabulary_size, corpus.vocabulary().len());
    assert_eq!(stats.status, CorpusStatus::Active);
    assert!(stats.last_processed.is_some());

    let document = corpus.document().unwrap();
    assert_eq!(document.filename, "relatorio.pdf");
    assert_eq!(document.file_type, ".pdf");
    assert_eq!(document.byte_count, REPORT.len() as u64);
}

#[test]
fn test_total_words_counts_cleaned_text_once() {
    let store = report_store();
    let stats = get_statistics(&store);

    let summed: usize = store.current().chunks().iter().map(|c| c.word_count).sum();
    assert!(stats.total_words > 0);
    assert!(stats.total_words < summed, "overlap should not be double counted");
}

#[test]
fn test_relevant_chunk_ranks_first() {
    let store = report_store();
    let hits = search(&store, "temperatura do vulcão", 3);

    assert!(!hits.is_empty());
    for hit in &hits {
        assert!(hit.text.contains("vulcão") || hit.text.contains("temperatura"));
    }
}

#[test]
fn test_total_found_counts_before_truncation() {
    let store = report_store();
    let all = search_with_total(&store, "vulcão lava servidores receitas", 100);
    let one = search_with_total(&store, "vulcão lava servidores receitas", 1);

    assert_eq!(one.hits.len(), 1);
    assert_eq!(one.total_found, all.hits.len());
    assert_eq!(one.hits[0], all.hits[0]);
}

#[test]
fn test_answer_context_is_capped() {
    let store = report_store();
    let context = answer_context(&store, "vulcão lava servidores receitas despesas latência");
    assert!(context.len() <= crate::ANSWER_CONTEXT_TOP_K);
    assert!(!context.is_empty());
}

#[test]
fn test_empty_text_fails_and_keeps_prior_corpus() {
    let store = animal_store();
    let before = store.current();

    let outcome = process(&store, &ChunkConfig::default(), "   \n  ", "vazio.pdf");
    assert!(!outcome.success);
    assert_eq!(outcome.error_kind.as_deref(), Some("empty_input"));
    assert_eq!(outcome.chunk_count, 0);
    assert_eq!(*store.current(), *before);
}

#[test]
fn test_noise_only_text_is_empty_input() {
    let store = CorpusStore::new();
    let outcome = process(&store, &ChunkConfig::default(), "@@@ ### $$$\n***", "ruido.csv");
    assert!(!outcome.success);
    assert_eq!(outcome.error_kind.as_deref(), Some("empty_input"));
}

#[test]
fn test_stop_word_only_text_is_empty_input() {
    let store = CorpusStore::new();
    let text = "de para com sobre também mais muito quando onde porque";
    let outcome = process(&store, &ChunkConfig::default(), text, "vazio.txt");
    assert!(!outcome.success);
    assert_eq!(outcome.error_kind.as_deref(), Some("empty_input"));
    assert_eq!(get_statistics(&store).status, CorpusStatus::Empty);
}

#[test]
fn test_malformed_chunk_config_is_rejected_without_hanging() {
    let store = CorpusStore::new();
    let text = "palavra ".repeat(2000);
    let outcome = process(&store, &ChunkConfig::new(500, 500), &text, "longo.txt");
    assert!(!outcome.success);
    assert_eq!(outcome.error_kind.as_deref(), Some("unsupported_operation"));
}

#[test]
fn test_words_only_in_short_tail_window_are_not_indexed() {
    // Windows start every 8 words; the last one holds words 96..100, which
    // is under the minimum chunk length and is dropped
    let text: String = (0..100)
        .map(|i| format!("termo{:03}", i))
        .collect::<Vec<_>>()
        .join(" ");
    let store = CorpusStore::new();
    let outcome = process(&store, &ChunkConfig::new(10, 2), &text, "termos.txt");
    assert!(outcome.success);

    let corpus = store.current();
    assert_eq!(corpus.chunks().len(), 12);
    assert!(corpus.chunks()[11].text.ends_with("termo097"));
    assert!(corpus.vocabulary().contains_key("termo097"));
    assert!(!corpus.vocabulary().contains_key("termo098"));
    assert!(!corpus.vocabulary().contains_key("termo099"));
    assert_eq!(corpus.vocabulary().len(), 98);
    assert_eq!(get_statistics(&store).total_words, 100);
}

#[test]
fn test_reprocessing_replaces_corpus() {
    let store = report_store();
    let outcome = process(
        &store,
        &ChunkConfig::new(20, 5),
        "Um texto completamente diferente sobre jardinagem, adubo orgânico e regas.\n\
         Outro parágrafo sobre podas de roseiras e canteiros no inverno.",
        "jardim.txt",
    );
    assert!(outcome.success);

    assert!(search(&store, "vulcão", 5).is_empty());
    assert!(!store.current().vocabulary().contains_key("vulcão"));
    assert_eq!(get_statistics(&store).total_documents, 1);
}

#[test]
fn test_snapshot_round_trip_preserves_search() {
    let source = report_store();
    let data = serde_json::to_value(export_snapshot(&source)).unwrap();

    let target = CorpusStore::new();
    import_snapshot(&target, data).unwrap();

    assert_eq!(*target.current(), *source.current());
    assert_eq!(
        search(&target, "vulcão servidores", 5),
        search(&source, "vulcão servidores", 5)
    );
}

#[test]
fn test_import_garbage_keeps_prior_corpus() {
    let store = animal_store();
    let before = store.current();

    let result = import_snapshot(&store, serde_json::json!({ "chunks": "nope" }));
    assert!(result.is_err());
    assert_eq!(*store.current(), *before);
}

#[test]
fn test_clear_then_search_is_empty() {
    let store = animal_store();
    clear(&store);

    assert!(search(&store, "gato", 5).is_empty());
    let stats = get_statistics(&store);
    assert_eq!(stats.total_chunks, 0);
    assert_eq!(stats.vocabulary_size, 0);
    assert_eq!(stats.status, CorpusStatus::Empty);
}
