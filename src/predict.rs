//! One full predict run: sample, score, classify, summarize.

use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::dataset::CanonicalTable;
use crate::error::ApiError;
use crate::forecast::{monthly_forecast, ForecastPoint};
use crate::keywords::{top_keywords, KeywordCount, TOP_KEYWORDS};
use crate::scoring::{round_to, score_sample};
use crate::sentiment::SentimentAdapter;
use crate::trend::{classify, TrendLabel, TrendResult};

/// Upper bound on products analyzed per request.
pub const SAMPLE_SIZE: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SentimentSummary {
    /// Mean score over every returned product.
    pub avg: f64,
    pub total_analyzed: usize,
    pub trending_count: usize,
    pub non_trending_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PredictionReport {
    pub predictions: BTreeMap<String, TrendLabel>,
    pub products: Vec<TrendResult>,
    pub trending_products: Vec<TrendResult>,
    pub non_trending_products: Vec<TrendResult>,
    pub forecasts: Vec<ForecastPoint>,
    pub sentiment: SentimentSummary,
    #[serde(rename = "wordCloudData")]
    pub word_cloud_data: Vec<KeywordCount>,
}

/// Runs the scoring pipeline over a fresh sample of `table`.
///
/// All randomness (sampling, confidences, shuffle, forecast) comes from `rng`,
/// so a seeded generator reproduces the report exactly.
pub fn predict<R: Rng + ?Sized>(
    table: &CanonicalTable,
    sentiment: &SentimentAdapter,
    rng: &mut R,
) -> Result<PredictionReport, ApiError> {
    if table.is_empty() {
        return Err(ApiError::NoData);
    }

    let sample = table.sample(rng, SAMPLE_SIZE);
    let scored = score_sample(&sample, sentiment);
    let classification = classify(&scored, rng);

    let corpus = classification
        .ranking
        .iter()
        .map(|&i| scored[i].description_snippet.as_str());
    let word_cloud_data = top_keywords(corpus, TOP_KEYWORDS);

    let forecasts = monthly_forecast(rng);

    let products = classification.products;
    let avg = products.iter().map(|p| p.score).sum::<f64>() / products.len() as f64;
    let sentiment = SentimentSummary {
        avg: round_to(avg, 3),
        total_analyzed: scored.len(),
        trending_count: classification.trending.len(),
        non_trending_count: classification.not_trending.len(),
    };

    let predictions = products
        .iter()
        .map(|p| (p.product_name.clone(), p.predicted_trend))
        .collect();

    tracing::info!(
        "Returning {} products ({} trending / {} non-trending)",
        products.len(),
        sentiment.trending_count,
        sentiment.non_trending_count
    );

    Ok(PredictionReport {
        predictions,
        products,
        trending_products: classification.trending,
        non_trending_products: classification.not_trending,
        forecasts,
        sentiment,
        word_cloud_data,
    })
}
