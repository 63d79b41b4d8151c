use crate::corpus::{load_corpus_dir, load_corpus_file, BundledCorpus, Corpus};
use crate::error::CorpusError;
use std::path::PathBuf;

/// Supplies the corpus once at process start.
pub trait CorpusSource {
    fn describe(&self) -> String;

    fn load(&self) -> Result<Corpus, CorpusError>;
}

#[derive(Debug, Clone, Copy)]
pub struct EmbeddedCorpus(pub BundledCorpus);

impl CorpusSource for EmbeddedCorpus {
    fn describe(&self) -> String {
        format!("bundled {:?}", self.0)
    }

    fn load(&self) -> Result<Corpus, CorpusError> {
        Corpus::bundled(self.0)
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    pub path: PathBuf,
}

impl CorpusSource for JsonFileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn load(&self) -> Result<Corpus, CorpusError> {
        load_corpus_file(&self.path)
    }
}

#[derive(Debug, Clone)]
pub struct DirectorySource {
    pub folder: PathBuf,
}

impl CorpusSource for DirectorySource {
    fn describe(&self) -> String {
        format!("directory {}", self.folder.display())
    }

    fn load(&self) -> Result<Corpus, CorpusError> {
        load_corpus_dir(&self.folder)
    }
}

pub fn source_for_path(path: impl Into<PathBuf>) -> Box<dyn CorpusSource> {
    let path = path.into();
    if path.is_dir() {
        Box::new(DirectorySource { folder: path })
    } else {
        Box::new(JsonFileSource { path })
    }
}
