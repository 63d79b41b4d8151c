use crate::error::SearchError;
use crate::models::MIN_TERM_CHARS;

pub fn normalize_term(term: &str) -> Result<String, SearchError> {
    let trimmed = term.trim();
    if trimmed.chars().count() < MIN_TERM_CHARS {
        return Err(SearchError::Validation(format!(
            "Search query must be at least {MIN_TERM_CHARS} characters long"
        )));
    }

    Ok(trimmed.to_lowercase())
}

/// `mental_health` -> `Mental Health`
pub fn display_name(category: &str) -> String {
    category
        .split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(capitalize_ascii)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_ascii(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut capitalized = String::with_capacity(word.len());
            capitalized.push(first.to_ascii_uppercase());
            capitalized.push_str(chars.as_str());
            capitalized
        }
        None => String::new(),
    }
}
