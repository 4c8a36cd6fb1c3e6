//! Placeholder monthly forecast for the dashboard chart.
//!
//! The series is noise around an upward drift. It is not derived from the
//! catalog and carries no predictive meaning.

use chrono::{Datelike, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;

use crate::scoring::round_to;

pub const FORECAST_MONTHS: u32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ForecastPoint {
    /// First day of the month, `YYYY-MM-DD`.
    pub date: String,
    pub value: f64,
}

pub fn monthly_forecast<R: Rng + ?Sized>(rng: &mut R) -> Vec<ForecastPoint> {
    forecast_for_year(Utc::now().year(), rng)
}

pub fn forecast_for_year<R: Rng + ?Sized>(year: i32, rng: &mut R) -> Vec<ForecastPoint> {
    (0..FORECAST_MONTHS)
        .filter_map(|i| {
            let date = NaiveDate::from_ymd_opt(year, i + 1, 1)?;
            let drift = f64::from(i) * rng.gen_range(0.5..3.0);
            let noise = rng.gen_range(-4.0..4.0);
            Some(ForecastPoint {
                date: date.format("%Y-%m-%d").to_string(),
                value: round_to(50.0 + drift + noise, 1),
            })
        })
        .collect()
}
