//! Trending / Not Trending split over a scored sample.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::ops::RangeInclusive;
use utoipa::ToSchema;

use crate::scoring::ScoredProduct;

/// Confidence shown for Trending products.
pub const TRENDING_CONFIDENCE: RangeInclusive<u32> = 70..=98;
/// Confidence shown for Not Trending products.
pub const NOT_TRENDING_CONFIDENCE: RangeInclusive<u32> = 40..=80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum TrendLabel {
    Trending,
    #[serde(rename = "Not Trending")]
    NotTrending,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrendResult {
    pub product_name: String,
    pub predicted_trend: TrendLabel,
    pub score: f64,
    /// Display value drawn from the label's range. Not derived from `score`.
    pub confidence: u32,
}

/// Outcome of one classification.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Both classes, shuffled.
    pub products: Vec<TrendResult>,
    /// Trending products in rank order.
    pub trending: Vec<TrendResult>,
    /// Not Trending products in rank order.
    pub not_trending: Vec<TrendResult>,
    /// Indices into the scored sample, best first.
    pub ranking: Vec<usize>,
}

/// Number of products labelled Trending out of `n`: 40%, rounded half-up,
/// at least one. `0.4 * n` is never exactly halfway between integers, so the
/// half-up choice never changes a result.
pub fn top_k(n: usize) -> usize {
    ((4 * n + 5) / 10).max(1)
}

/// Ranks `scored` by score (stable, descending) and labels the top 40%.
pub fn classify<R: Rng + ?Sized>(scored: &[ScoredProduct], rng: &mut R) -> Classification {
    let mut ranking: Vec<usize> = (0..scored.len()).collect();
    ranking.sort_by(|&a, &b| scored[b].score.total_cmp(&scored[a].score));

    let k = top_k(ranking.len()).min(ranking.len());
    let (top, rest) = ranking.split_at(k);

    let trending: Vec<TrendResult> = top
        .iter()
        .map(|&i| label(&scored[i], TrendLabel::Trending, rng.gen_range(TRENDING_CONFIDENCE)))
        .collect();
    let not_trending: Vec<TrendResult> = rest
        .iter()
        .map(|&i| label(&scored[i], TrendLabel::NotTrending, rng.gen_range(NOT_TRENDING_CONFIDENCE)))
        .collect();

    let mut products: Vec<TrendResult> = trending.iter().chain(&not_trending).cloned().collect();
    products.shuffle(rng);

    Classification {
        products,
        trending,
        not_trending,
        ranking,
    }
}

fn label(product: &ScoredProduct, predicted_trend: TrendLabel, confidence: u32) -> TrendResult {
    TrendResult {
        product_name: product.product_name.clone(),
        predicted_trend,
        score: product.score,
        confidence,
    }
}
