use crate::models::Record;

pub const TITLE_WEIGHT: u32 = 10;
pub const TAG_WEIGHT: u32 = 5;
pub const BODY_WEIGHT: u32 = 2;

#[derive(Debug)]
struct FoldedRecord {
    title: String,
    body: String,
    tags: Vec<String>,
}

impl FoldedRecord {
    fn new(record: &Record) -> Self {
        Self {
            title: record.title.to_lowercase(),
            body: record.body.to_lowercase(),
            tags: record.tags.iter().map(|tag| tag.to_lowercase()).collect(),
        }
    }

    // tags match both ways for inclusion, only forward for score
    fn is_candidate(&self, term: &str) -> bool {
        self.title.contains(term)
            || self.body.contains(term)
            || self
                .tags
                .iter()
                .any(|tag| tag.contains(term) || term.contains(tag.as_str()))
    }

    fn score(&self, term: &str) -> u32 {
        let mut score = 0;

        if self.title.contains(term) {
            score += TITLE_WEIGHT;
        }

        for tag in &self.tags {
            if tag.contains(term) {
                score += TAG_WEIGHT;
            }
        }

        if self.body.contains(term) {
            score += BODY_WEIGHT;
        }

        score
    }
}

/// `term` must already be trimmed and lowercased.
pub fn relevance(record: &Record, term: &str) -> Option<u32> {
    let folded = FoldedRecord::new(record);
    folded.is_candidate(term).then(|| folded.score(term))
}
