use crate::error::CorpusError;
use crate::models::{CorpusFingerprint, Record, RecordDraft, RecordId};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

const MEDICAL_FAQ_JSON: &str = include_str!("../data/medical_faq.json");
const CBT_EXERCISES_JSON: &str = include_str!("../data/cbt_exercises.json");
const SHIFA_DUAS_JSON: &str = include_str!("../data/shifa_duas.json");
const PROPHETIC_REMEDIES_JSON: &str = include_str!("../data/prophetic_remedies.json");

#[derive(Debug, Clone)]
pub struct Corpus {
    records: Arc<[Record]>,
    fingerprint: Arc<CorpusFingerprint>,
}

impl Corpus {
    pub fn from_records(
        mut records: Vec<Record>,
        source: impl Into<String>,
    ) -> Result<Self, CorpusError> {
        let source = source.into();
        let mut seen = HashSet::with_capacity(records.len());
        for (position, record) in records.iter_mut().enumerate() {
            // a blank tag is contained in every term
            record.tags.retain(|tag| !tag.trim().is_empty());
            validate_record(record, position, &source)?;
            if !seen.insert(record.id) {
                return Err(CorpusError::DuplicateId {
                    id: record.id,
                    source_label: source,
                });
            }
        }

        let checksum = checksum_records(&records)?;
        Ok(Self::assemble(records, source, checksum))
    }

    pub fn from_json_str(json: &str, source: impl Into<String>) -> Result<Self, CorpusError> {
        let source = source.into();
        let drafts: Vec<RecordDraft> = serde_json::from_str(json)?;
        let records = assign_ids(drafts);
        let mut corpus = Self::from_records(records, source)?;
        corpus.fingerprint = Arc::new(CorpusFingerprint {
            checksum: digest_bytes(json.as_bytes()),
            ..(*corpus.fingerprint).clone()
        });
        Ok(corpus)
    }

    pub fn bundled(which: BundledCorpus) -> Result<Self, CorpusError> {
        match which {
            BundledCorpus::MedicalFaq => Self::from_json_str(MEDICAL_FAQ_JSON, "bundled:medical_faq"),
            BundledCorpus::CbtExercises => {
                Self::from_json_str(CBT_EXERCISES_JSON, "bundled:cbt_exercises")
            }
            BundledCorpus::ShifaDuas => Self::from_json_str(SHIFA_DUAS_JSON, "bundled:shifa_duas"),
            BundledCorpus::PropheticRemedies => {
                Self::from_json_str(PROPHETIC_REMEDIES_JSON, "bundled:prophetic_remedies")
            }
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn fingerprint(&self) -> &CorpusFingerprint {
        &self.fingerprint
    }

    fn assemble(records: Vec<Record>, source: String, checksum: String) -> Self {
        let fingerprint = CorpusFingerprint {
            source,
            checksum,
            record_count: records.len(),
            loaded_at: Utc::now(),
        };

        Self {
            records: records.into(),
            fingerprint: Arc::new(fingerprint),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundledCorpus {
    MedicalFaq,
    CbtExercises,
    ShifaDuas,
    PropheticRemedies,
}

pub fn load_corpus_file(path: &Path) -> Result<Corpus, CorpusError> {
    let json = fs::read_to_string(path)?;
    Corpus::from_json_str(&json, path.display().to_string())
}

// dot-prefixed files and directories are never part of the corpus
pub fn discover_corpus_files(folder: &Path) -> Vec<PathBuf> {
    WalkDir::new(folder)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|item| match item {
            Ok(entry) => Some(entry),
            Err(error) => {
                warn!(reason = %error, "unreadable corpus path");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_json_file(entry.path()))
        .map(DirEntry::into_path)
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

pub struct CorpusLoadReport {
    pub corpus: Corpus,
    pub skipped_files: Vec<SkippedFile>,
}

pub fn load_corpus_dir(folder: &Path) -> Result<Corpus, CorpusError> {
    let report = load_corpus_dir_best_effort(folder)?;
    match report.skipped_files.into_iter().next() {
        Some(skipped) => Err(CorpusError::Skipped {
            path: skipped.path,
            reason: skipped.reason,
        }),
        None => Ok(report.corpus),
    }
}

pub fn load_corpus_dir_best_effort(folder: &Path) -> Result<CorpusLoadReport, CorpusError> {
    let files = discover_corpus_files(folder);

    if files.is_empty() {
        return Err(CorpusError::InvalidArgument(format!(
            "no json files found in {}",
            folder.display()
        )));
    }

    let mut drafts = Vec::new();
    let mut skipped_files = Vec::new();
    let mut hasher = Sha256::new();

    for path in files {
        let parsed = fs::read(&path)
            .map_err(CorpusError::from)
            .and_then(|bytes| {
                let file_drafts: Vec<RecordDraft> = serde_json::from_slice(&bytes)?;
                Ok((bytes, file_drafts))
            });

        match parsed {
            Ok((bytes, file_drafts)) => {
                debug!(path = %path.display(), records = file_drafts.len(), "corpus file parsed");
                hasher.update(&bytes);
                drafts.extend(file_drafts);
            }
            Err(error) => {
                warn!(path = %path.display(), reason = %error, "skipping corpus file");
                skipped_files.push(SkippedFile {
                    path,
                    reason: error.to_string(),
                });
            }
        }
    }

    if drafts.is_empty() {
        return Err(CorpusError::InvalidArgument(format!(
            "no records loaded from {}",
            folder.display()
        )));
    }

    let source = folder.display().to_string();
    let mut corpus = Corpus::from_records(assign_ids(drafts), source)?;
    corpus.fingerprint = Arc::new(CorpusFingerprint {
        checksum: format!("{:x}", hasher.finalize()),
        ..(*corpus.fingerprint).clone()
    });

    Ok(CorpusLoadReport {
        corpus,
        skipped_files,
    })
}

fn assign_ids(drafts: Vec<RecordDraft>) -> Vec<Record> {
    drafts
        .into_iter()
        .enumerate()
        .map(|(position, draft)| {
            let id = draft.id.unwrap_or(RecordId(position as u64 + 1));
            draft.into_record(id)
        })
        .collect()
}

fn validate_record(record: &Record, position: usize, source: &str) -> Result<(), CorpusError> {
    let reason = if record.title.trim().is_empty() {
        Some("title is empty")
    } else if record.category.trim().is_empty() {
        Some("category is empty")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CorpusError::InvalidRecord {
            position,
            source_label: source.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

fn checksum_records(records: &[Record]) -> Result<String, CorpusError> {
    let bytes = serde_json::to_vec(records)?;
    Ok(digest_bytes(&bytes))
}

fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
