use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use faq_search_core::{
    source_for_path, BundledCorpus, CategoriesPayload, CorpusSource, EmbeddedCorpus, Envelope,
    RandomPayload, RecordId, SearchEngine, SearchError, SearchPayload, SearchQuery, DEFAULT_LIMIT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "faq-search", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON corpus file, or a directory of JSON files. Overrides --bundled.
    #[arg(long, env = "FAQ_SEARCH_CORPUS")]
    corpus: Option<PathBuf>,

    /// Bundled corpus used when --corpus is not given.
    #[arg(long, value_enum, default_value_t = Bundled::Faq, env = "FAQ_SEARCH_BUNDLED")]
    bundled: Bundled,

    /// Pretty-print the JSON envelope.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Bundled {
    Faq,
    Cbt,
    Shifa,
    Remedies,
}

impl From<Bundled> for BundledCorpus {
    fn from(value: Bundled) -> Self {
        match value {
            Bundled::Faq => BundledCorpus::MedicalFaq,
            Bundled::Cbt => BundledCorpus::CbtExercises,
            Bundled::Shifa => BundledCorpus::ShifaDuas,
            Bundled::Remedies => BundledCorpus::PropheticRemedies,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Rank records against a free-text query.
    Search {
        /// Search query, at least 2 characters after trimming.
        #[arg(long, default_value = "")]
        query: String,
        /// Only search records in this category (case-sensitive).
        #[arg(long)]
        category: Option<String>,
        /// Maximum number of results to return.
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
    /// List categories with record counts.
    Categories,
    /// Show one record by id.
    Faq {
        #[arg(long)]
        id: u64,
    },
    /// Pick random records, optionally from one category.
    Random {
        #[arg(long, default_value = "3")]
        count: usize,
        #[arg(long)]
        category: Option<String>,
        /// Also accept records carrying --category as a tag.
        #[arg(long, default_value_t = false)]
        match_tags: bool,
        /// Seed for reproducible picks.
        #[arg(long, env = "FAQ_SEARCH_SEED")]
        seed: Option<u64>,
    },
    /// Best match for a query, or the fallback record when nothing matches.
    Recommend {
        #[arg(long, default_value = "")]
        query: String,
        /// Record returned when the query matches nothing.
        #[arg(long, default_value = "1")]
        fallback: u64,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let source: Box<dyn CorpusSource> = match &cli.corpus {
        Some(path) => source_for_path(path),
        None => Box::new(EmbeddedCorpus(cli.bundled.into())),
    };

    let engine = match source.load() {
        Ok(corpus) => {
            let fingerprint = corpus.fingerprint();
            info!(
                version = app_version,
                started_at = %Utc::now().to_rfc3339(),
                corpus = %fingerprint.source,
                records = fingerprint.record_count,
                checksum = %fingerprint.checksum,
                "faq-search boot"
            );
            SearchEngine::new(corpus)
        }
        Err(error) => {
            warn!(source = %source.describe(), "corpus load failed");
            let envelope: Envelope<()> =
                Envelope::failure(&SearchError::from(error), "Unable to load knowledge base");
            return emit(&envelope, cli.pretty);
        }
    };

    match cli.command {
        Command::Search {
            query,
            category,
            limit,
        } => {
            let mut search_query = SearchQuery::new(query.clone()).with_limit(limit);
            if let Some(category) = category {
                search_query = search_query.with_category(category);
            }

            let result = engine
                .search(&search_query)
                .map(|outcome| SearchPayload::new(query, outcome));
            emit(
                &Envelope::from_result(result, "Unable to search knowledge base"),
                cli.pretty,
            )
        }
        Command::Categories => {
            let payload = CategoriesPayload::from(engine.list_categories());
            emit(&Envelope::ok(payload), cli.pretty)
        }
        Command::Faq { id } => {
            let result = engine.get(RecordId(id)).cloned();
            emit(
                &Envelope::from_result(result, "Unable to retrieve FAQ"),
                cli.pretty,
            )
        }
        Command::Random {
            count,
            category,
            match_tags,
            seed,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let facet = category.as_deref();
            let (sample, total_available) = if match_tags {
                (
                    engine.random_sample_matching(&mut rng, count, facet),
                    engine.matching_pool_size(facet),
                )
            } else {
                (
                    engine.random_sample(&mut rng, count, facet),
                    engine.sample_pool_size(facet),
                )
            };

            let result = sample.map(|faqs| RandomPayload {
                faqs,
                total_available,
            });
            emit(
                &Envelope::from_result(result, "Unable to retrieve random FAQs"),
                cli.pretty,
            )
        }
        Command::Recommend { query, fallback } => {
            let result = engine.recommend(&query, RecordId(fallback));
            emit(
                &Envelope::from_result(result, "Unable to provide recommendation"),
                cli.pretty,
            )
        }
    }
}

fn emit<T: Serialize>(envelope: &Envelope<T>, pretty: bool) -> anyhow::Result<ExitCode> {
    let rendered = if pretty {
        serde_json::to_string_pretty(envelope)?
    } else {
        serde_json::to_string(envelope)?
    };
    println!("{rendered}");

    if envelope.success {
        Ok(ExitCode::SUCCESS)
    } else {
        info!(status = envelope.status, "request failed");
        Ok(ExitCode::FAILURE)
    }
}
