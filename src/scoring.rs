//! Composite trend score over one request's sample.

use crate::dataset::ProductRecord;
use crate::normalize::normalize;
use crate::sentiment::SentimentAdapter;

pub const SENTIMENT_WEIGHT: f64 = 0.6;
pub const RATING_WEIGHT: f64 = 0.25;
pub const REVIEWS_WEIGHT: f64 = 0.15;

const SNIPPET_LEN: usize = 160;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredProduct {
    pub product_name: String,
    pub description_snippet: String,
    pub score: f64,
    /// Adapter polarity before shifting and normalization. Diagnostic only;
    /// it does not reach the response.
    pub raw_sentiment: f64,
}

/// Scores every record of the sample, preserving sample order.
///
/// Each signal is min-max normalized across the sample, so a score only
/// means something relative to the other products drawn with it.
pub fn score_sample(sample: &[&ProductRecord], sentiment: &SentimentAdapter) -> Vec<ScoredProduct> {
    let raw_sentiments: Vec<f64> = sample.iter().map(|r| sentiment.score(&r.description)).collect();

    let shifted: Vec<Option<f64>> = raw_sentiments.iter().map(|s| Some((s + 1.0) / 2.0)).collect();
    let sentiment_norm = normalize(&shifted);

    let ratings: Vec<Option<f64>> = sample.iter().map(|r| r.rating).collect();
    let rating_norm = if ratings.iter().any(Option::is_some) {
        normalize(&ratings)
    } else {
        vec![0.0; sample.len()]
    };

    let log_reviews: Vec<Option<f64>> = sample
        .iter()
        .map(|r| r.review_count.filter(|c| *c > 0.0).map(f64::ln_1p))
        .collect();
    let review_norm = if log_reviews.iter().any(Option::is_some) {
        normalize(&log_reviews)
    } else {
        vec![0.0; sample.len()]
    };

    sample
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let score = SENTIMENT_WEIGHT * sentiment_norm[i]
                + RATING_WEIGHT * rating_norm[i]
                + REVIEWS_WEIGHT * review_norm[i];

            ScoredProduct {
                product_name: record.product_name.clone(),
                description_snippet: snippet(&record.description),
                score: round_to(score, 3),
                raw_sentiment: round_to(raw_sentiments[i], 3),
            }
        })
        .collect()
}

/// Description cut to at most 160 characters, ellipsis included.
pub fn snippet(description: &str) -> String {
    if description.chars().count() <= SNIPPET_LEN {
        return description.to_string();
    }
    let mut cut: String = description.chars().take(SNIPPET_LEN - ELLIPSIS.len()).collect();
    cut.push_str(ELLIPSIS);
    cut
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
