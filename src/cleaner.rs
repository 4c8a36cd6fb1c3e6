//! Product name cleanup.
//!
//! Catalog exports are noisy: names carry tracking URLs, column-name
//! placeholders, snake_case separators and the occasional row of dashes.
//! [`clean_product_name`] turns all of that into either a readable name or the
//! [`UNKNOWN_PRODUCT`] sentinel.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel returned for names that carry no usable information.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Longest name kept verbatim; longer names are cut and suffixed with `...`.
pub const MAX_NAME_LEN: usize = 80;

const ELLIPSIS: &str = "...";

/// Raw cell values that are really a header leaking into the data.
const PLACEHOLDERS: &[&str] = &["product_name", "name", "product"];

/// Marketplace hosts whose deep links show up pasted into name cells.
const SITE_ARTIFACTS: &[&str] = &["flipkart.com", "amazon.com", "amazon.in"];

static SCHEME_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9+.\-]*://\S+").unwrap());

static WWW_HOST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)www\.\S+").unwrap());

static SITE_FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    let hosts: Vec<String> = SITE_ARTIFACTS.iter().map(|h| regex::escape(h)).collect();
    Regex::new(&format!(r"(?i)(?:{})/\S*", hosts.join("|"))).unwrap()
});

static PLACEHOLDER_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:product_name|product name)\b").unwrap());

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_\-]+").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static NO_WORD_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\W_]*$").unwrap());

static DIGITS_AND_DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9\-]+$").unwrap());

/// Cleans a raw product name. Total and idempotent.
pub fn clean_product_name(raw: &str) -> String {
    // Truncation can expose a fragment ("product name...", "www....") that a
    // second pass strips, so run to a fixed point. Every pass after the first
    // either removes characters or settles on the sentinel.
    let mut current = clean_once(raw);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(raw: &str) -> String {
    let n = raw.trim();

    let n = SCHEME_URL.replace_all(n, "");
    let n = SITE_FRAGMENT.replace_all(&n, "");
    let n = WWW_HOST.replace_all(&n, "");

    let lowered = n.trim().to_lowercase();
    if PLACEHOLDERS.contains(&lowered.as_str()) {
        return UNKNOWN_PRODUCT.to_string();
    }

    let n = PLACEHOLDER_WORDS.replace_all(&n, "");
    let n = SEPARATORS.replace_all(&n, " ");
    let n = WHITESPACE.replace_all(&n, " ");
    let n = n.trim();

    if NO_WORD_CHARS.is_match(n) || DIGITS_AND_DASHES.is_match(n) {
        return UNKNOWN_PRODUCT.to_string();
    }
    if n.chars().count() < 2 {
        return UNKNOWN_PRODUCT.to_string();
    }

    if n.chars().count() > MAX_NAME_LEN {
        let keep = MAX_NAME_LEN - ELLIPSIS.len();
        let mut truncated: String = n.chars().take(keep).collect();
        truncated.push_str(ELLIPSIS);
        return truncated;
    }

    n.to_string()
}
