//! Column role detection for catalogs with an unknown layout.

const NAME_KEYWORDS: &[&str] = &["product_name", "product name", "title", "name"];
const DESCRIPTION_KEYWORDS: &[&str] = &["description", "desc", "details", "spec", "summary"];
const RATING_KEYWORDS: &[&str] = &["rating", "stars"];
const RATING_EXACT: &str = "rate";
const REVIEW_COUNT_KEYWORDS: &[&str] =
    &["review_count", "reviews count", "review count", "reviewcount"];

/// What the mapper needs to know about one raw column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    /// True when the column holds free text rather than numbers.
    pub is_text: bool,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, is_text: bool) -> Self {
        Self {
            name: name.into(),
            is_text,
        }
    }
}

/// Raw column chosen for each semantic role, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub rating: Option<String>,
    pub review_count: Option<String>,
}

impl ColumnMapping {
    /// The two columns every usable table needs, or `None` when either is missing.
    pub fn required(&self) -> Option<(&str, &str)> {
        match (&self.product_name, &self.description) {
            (Some(name), Some(description)) => Some((name.as_str(), description.as_str())),
            _ => None,
        }
    }
}

/// Infers the column mapping from column names and their text-ness.
///
/// Each role takes the first column (in table order) whose lower-cased name
/// contains one of its keywords. Name and description then fall back to
/// unused text columns.
pub fn detect_columns(columns: &[ColumnInfo]) -> ColumnMapping {
    let lower: Vec<String> = columns.iter().map(|c| c.name.to_lowercase()).collect();

    let mut mapping = ColumnMapping {
        product_name: first_match(columns, &lower, |c| contains_any(c, NAME_KEYWORDS)),
        description: first_match(columns, &lower, |c| contains_any(c, DESCRIPTION_KEYWORDS)),
        rating: first_match(columns, &lower, |c| {
            c == RATING_EXACT || contains_any(c, RATING_KEYWORDS)
        }),
        review_count: first_match(columns, &lower, |c| contains_any(c, REVIEW_COUNT_KEYWORDS)),
    };

    let text_columns: Vec<&str> = columns
        .iter()
        .filter(|c| c.is_text)
        .map(|c| c.name.as_str())
        .collect();
    let sole_text_column = match text_columns.as_slice() {
        [only] => Some(only.to_string()),
        _ => None,
    };

    if mapping.product_name.is_none() {
        mapping.product_name = first_unused(&text_columns, &mapping).or(sole_text_column.clone());
    }
    if mapping.description.is_none() {
        mapping.description = first_unused(&text_columns, &mapping).or(sole_text_column);
    }

    mapping
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

fn first_match(
    columns: &[ColumnInfo],
    lower: &[String],
    matches: impl Fn(&str) -> bool,
) -> Option<String> {
    lower
        .iter()
        .position(|c| matches(c.as_str()))
        .map(|i| columns[i].name.clone())
}

fn first_unused(text_columns: &[&str], mapping: &ColumnMapping) -> Option<String> {
    let used = [
        &mapping.product_name,
        &mapping.description,
        &mapping.rating,
        &mapping.review_count,
    ];
    text_columns
        .iter()
        .find(|name| !used.iter().any(|u| u.as_deref() == Some(**name)))
        .map(|name| name.to_string())
}
