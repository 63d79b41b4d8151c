pub mod corpus;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod models;
pub mod scoring;
pub mod text;
pub mod traits;

pub use corpus::{
    discover_corpus_files, load_corpus_dir, load_corpus_dir_best_effort, load_corpus_file,
    BundledCorpus, Corpus, CorpusLoadReport, SkippedFile,
};
pub use engine::SearchEngine;
pub use envelope::{CategoriesPayload, Envelope, RandomPayload, SearchPayload};
pub use error::{CorpusError, SearchError};
pub use models::{
    CategoryListing, CategorySummary, CorpusFingerprint, Recommendation, Record, RecordDraft,
    RecordId, ScoredRecord, SearchOutcome, SearchQuery, DEFAULT_LIMIT, MIN_TERM_CHARS,
};
pub use scoring::{relevance, BODY_WEIGHT, TAG_WEIGHT, TITLE_WEIGHT};
pub use text::{display_name, normalize_term};
pub use traits::{source_for_path, CorpusSource, DirectorySource, EmbeddedCorpus, JsonFileSource};
