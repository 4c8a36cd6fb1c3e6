//! Word-cloud keywords over the sampled descriptions.

use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

pub const TOP_KEYWORDS: usize = 20;

const STRIP_CHARS: &[char] = &['.', ',', '!', '?', ':', ';', '(', ')', '[', ']', '"', '\''];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct KeywordCount {
    pub text: String,
    pub value: u32,
}

/// Most frequent tokens across `texts`, ties broken by first appearance.
///
/// Tokens are whitespace-separated, lower-cased and stripped of surrounding
/// punctuation. Anything of three characters or fewer, or containing a digit
/// in any script, is ignored.
pub fn top_keywords<'a>(texts: impl IntoIterator<Item = &'a str>, limit: usize) -> Vec<KeywordCount> {
    let mut counts: HashMap<String, (u32, usize)> = HashMap::new();

    let tokens = texts
        .into_iter()
        .flat_map(str::split_whitespace)
        .map(|t| t.to_lowercase().trim_matches(STRIP_CHARS).to_string())
        .filter(|t| t.chars().count() > 3 && !t.chars().any(char::is_numeric));

    for (position, token) in tokens.enumerate() {
        counts.entry(token).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, u32, usize)> = counts
        .into_iter()
        .map(|(text, (count, first))| (text, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(text, value, _)| KeywordCount { text, value })
        .collect()
}
