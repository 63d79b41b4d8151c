use crate::corpus::Corpus;
use crate::error::SearchError;
use crate::models::{
    CategoryListing, CategorySummary, Recommendation, Record, RecordId, ScoredRecord,
    SearchOutcome, SearchQuery,
};
use crate::scoring::relevance;
use crate::text::{display_name, normalize_term};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SearchEngine {
    corpus: Corpus,
}

impl SearchEngine {
    pub fn new(corpus: Corpus) -> Self {
        Self { corpus }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn search(&self, query: &SearchQuery) -> Result<SearchOutcome, SearchError> {
        let term = normalize_term(&query.term)?;
        if query.limit == 0 {
            return Err(SearchError::Validation(
                "limit must be a positive integer".to_string(),
            ));
        }

        let mut candidates: Vec<ScoredRecord> = self
            .filtered(query.category.as_deref())
            .filter_map(|record| {
                relevance(record, &term).map(|relevance_score| ScoredRecord {
                    record: record.clone(),
                    relevance_score,
                })
            })
            .collect();

        // stable: equal scores keep corpus order
        candidates.sort_by(|left, right| right.relevance_score.cmp(&left.relevance_score));

        let total_candidates = candidates.len();
        let categories_found = distinct_in_order(
            candidates
                .iter()
                .map(|candidate| candidate.record.category.as_str()),
        );
        candidates.truncate(query.limit);

        debug!(
            term = %term,
            category = ?query.category,
            total_candidates,
            returned = candidates.len(),
            "search complete"
        );

        Ok(SearchOutcome {
            results: candidates,
            total_candidates,
            categories_found,
        })
    }

    pub fn list_categories(&self) -> CategoryListing {
        let records = self.corpus.records();
        let names = distinct_in_order(records.iter().map(|record| record.category.as_str()));

        let categories: Vec<CategorySummary> = names
            .into_iter()
            .map(|name| CategorySummary {
                count: records
                    .iter()
                    .filter(|record| record.category == name)
                    .count(),
                display_name: display_name(&name),
                name,
            })
            .collect();

        CategoryListing {
            total_categories: categories.len(),
            total_records: records.len(),
            categories,
        }
    }

    pub fn random_sample<R>(
        &self,
        rng: &mut R,
        count: usize,
        category: Option<&str>,
    ) -> Result<Vec<Record>, SearchError>
    where
        R: Rng + ?Sized,
    {
        debug!(count, category = ?category, "sampling by category");
        self.draw(rng, count, self.filtered(category).collect())
    }

    // `facet` names a category or a tag, compared exactly.
    pub fn random_sample_matching<R>(
        &self,
        rng: &mut R,
        count: usize,
        facet: Option<&str>,
    ) -> Result<Vec<Record>, SearchError>
    where
        R: Rng + ?Sized,
    {
        debug!(count, facet = ?facet, "sampling by category or tag");
        self.draw(rng, count, self.matching(facet).collect())
    }

    pub fn sample_pool_size(&self, category: Option<&str>) -> usize {
        self.pool_or_corpus(self.filtered(category).count())
    }

    pub fn matching_pool_size(&self, facet: Option<&str>) -> usize {
        self.pool_or_corpus(self.matching(facet).count())
    }

    pub fn get(&self, id: RecordId) -> Result<&Record, SearchError> {
        self.corpus
            .records()
            .iter()
            .find(|record| record.id == id)
            .ok_or_else(|| SearchError::NotFound(format!("record {id} not found")))
    }

    pub fn recommend(&self, term: &str, fallback: RecordId) -> Result<Recommendation, SearchError> {
        let outcome = self.search(&SearchQuery::new(term).with_limit(1))?;

        match outcome.results.into_iter().next() {
            Some(best) => Ok(Recommendation {
                record: best.record,
                relevance_score: best.relevance_score,
                matched: true,
            }),
            None => {
                debug!(term = %term, fallback = %fallback, "no match, using fallback");
                Ok(Recommendation {
                    record: self.get(fallback)?.clone(),
                    relevance_score: 0,
                    matched: false,
                })
            }
        }
    }

    fn filtered<'a>(&'a self, category: Option<&'a str>) -> impl Iterator<Item = &'a Record> + 'a {
        self.corpus
            .records()
            .iter()
            .filter(move |record| category.map_or(true, |wanted| record.category == wanted))
    }

    fn matching<'a>(&'a self, facet: Option<&'a str>) -> impl Iterator<Item = &'a Record> + 'a {
        self.corpus.records().iter().filter(move |record| {
            facet.map_or(true, |wanted| {
                record.category == wanted || record.tags.iter().any(|tag| tag == wanted)
            })
        })
    }

    // an empty selection falls back to the whole corpus
    fn draw<'a, R>(
        &'a self,
        rng: &mut R,
        count: usize,
        mut pool: Vec<&'a Record>,
    ) -> Result<Vec<Record>, SearchError>
    where
        R: Rng + ?Sized,
    {
        if count == 0 {
            return Err(SearchError::Validation(
                "count must be a positive integer".to_string(),
            ));
        }

        if pool.is_empty() {
            pool = self.corpus.records().iter().collect();
        }

        pool.shuffle(rng);
        pool.truncate(count);
        Ok(pool.into_iter().cloned().collect())
    }

    fn pool_or_corpus(&self, selected: usize) -> usize {
        match selected {
            0 => self.corpus.len(),
            selected => selected,
        }
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|existing| existing == value) {
            seen.push(value.to_string());
        }
    }
    seen
}
