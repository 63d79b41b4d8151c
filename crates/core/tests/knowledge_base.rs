use faq_search_core::{
    BundledCorpus, Corpus, CorpusSource, EmbeddedCorpus, Envelope, RecordId, SearchEngine,
    SearchPayload, SearchQuery,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn engine() -> SearchEngine {
    let corpus = EmbeddedCorpus(BundledCorpus::MedicalFaq)
        .load()
        .expect("bundled faq loads");
    SearchEngine::new(corpus)
}

#[test]
fn blood_pressure_query_ranks_hypertension_entry_first() {
    let outcome = engine()
        .search(&SearchQuery::new("blood pressure"))
        .expect("search should succeed");

    // title 10 + tag 5 + body 2
    assert_eq!(outcome.results[0].record.id, RecordId(3));
    assert_eq!(outcome.results[0].relevance_score, 17);
    // heart disease answer mentions blood pressure in its body only
    assert_eq!(outcome.results[1].record.id, RecordId(2));
    assert_eq!(outcome.results[1].relevance_score, 2);
    assert_eq!(outcome.categories_found, vec!["cardiology"]);
}

#[test]
fn multi_word_query_matches_short_tags_in_reverse() {
    let outcome = engine()
        .search(&SearchQuery::new("panic about diabetes today"))
        .expect("search should succeed");

    let ids: HashSet<RecordId> = outcome.results.iter().map(|hit| hit.record.id).collect();
    assert!(ids.contains(&RecordId(1)));
    assert!(outcome.results.iter().all(|hit| hit.relevance_score == 0));
}

#[test]
fn nutrition_filter_returns_only_nutrition() {
    let outcome = engine()
        .search(&SearchQuery::new("vitamin").with_category("nutrition"))
        .expect("search should succeed");

    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].record.category, "nutrition");
}

#[test]
fn categories_cover_bundled_faq() {
    let listing = engine().list_categories();
    let names: Vec<&str> = listing
        .categories
        .iter()
        .map(|category| category.name.as_str())
        .collect();

    assert_eq!(
        names,
        vec!["diabetes", "cardiology", "mental_health", "nutrition", "general_health"]
    );
    assert_eq!(listing.categories[2].display_name, "Mental Health");
    assert_eq!(listing.categories[2].count, 2);
    assert_eq!(listing.total_records, 7);
}

#[test]
fn random_sample_never_duplicates() {
    let engine = engine();
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let sample = engine
            .random_sample(&mut rng, 100, None)
            .expect("sample should succeed");
        let ids: HashSet<RecordId> = sample.iter().map(|record| record.id).collect();
        assert_eq!(sample.len(), 7);
        assert_eq!(ids.len(), 7);
    }
}

#[test]
fn envelope_carries_search_payload() {
    let engine = engine();
    let result = engine
        .search(&SearchQuery::new("sleep"))
        .map(|outcome| SearchPayload::new("sleep", outcome));
    let envelope = Envelope::from_result(result, "Unable to search knowledge base");
    let value = serde_json::to_value(&envelope).expect("envelope serializes");

    assert_eq!(value["success"], true);
    assert_eq!(value["data"]["query"], "sleep");
    assert_eq!(value["data"]["faqs"][0]["id"], 7);
    assert_eq!(value["data"]["faqs"][0]["relevance_score"], 22);
    assert_eq!(value["data"]["faqs"][0]["last_updated"], "2024-01-01");
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = engine();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                engine
                    .search(&SearchQuery::new("anxiety"))
                    .map(|outcome| outcome.total_candidates)
            })
        })
        .collect();

    let counts: Vec<usize> = handles
        .into_iter()
        .map(|handle| {
            handle
                .join()
                .expect("thread completes")
                .expect("search should succeed")
        })
        .collect();
    assert!(counts.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn cbt_corpus_supports_recommendations() {
    let engine = SearchEngine::new(
        Corpus::bundled(BundledCorpus::CbtExercises).expect("bundled cbt loads"),
    );
    let recommendation = engine
        .recommend("panic", RecordId(2))
        .expect("recommend should succeed");

    assert!(recommendation.matched);
    assert_eq!(recommendation.record.id, RecordId(1));
}
