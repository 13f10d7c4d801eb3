//! Rule-based short-term AQI trend prediction.
//!
//! The model compares the first and last readings of a ward's recent history
//! and classifies the movement as INCREASING, DECREASING or STABLE against a
//! threshold of 10 AQI points or 5% of the baseline, whichever is larger.
//! It is deliberately simple so that every verdict can be explained to a
//! non-technical audience in one sentence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily AQI observation for a ward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AqiSample {
    pub date: NaiveDate,
    pub aqi: f64,
}

/// Direction of the predicted short-term trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

/// Coarse label for how strongly the data supports the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Trend verdict returned to API and CLI callers, serialized in the wire
/// shape the dashboard consumes (`wardId`, `changeAmount`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPrediction {
    pub ward_id: String,
    pub trend: Trend,
    pub explanation: String,
    pub confidence: Confidence,
    pub change_amount: i64,
    pub change_percent: f64,
    pub data_points: usize,
}

const INSUFFICIENT_DATA: &str =
    "Insufficient data for trend prediction. Need at least 7 days of historical data.";

const LIMITED_DATA_CAVEAT: &str = " Note: Prediction based on limited data points. \
     For more accurate predictions, use 10-14 days of historical data.";

/// Predict the short-term AQI trend for a ward from its recent history.
///
/// Total function: any input, including an empty slice, yields a well-formed
/// verdict. The input is sorted chronologically on a copy (stable, so samples
/// sharing a date keep their relative order) and is never mutated, which makes
/// the result independent of the order the caller supplies.
pub fn predict_trend(ward_id: &str, samples: &[AqiSample]) -> TrendPrediction {
    if samples.is_empty() {
        return TrendPrediction {
            ward_id: ward_id.to_string(),
            trend: Trend::Stable,
            explanation: INSUFFICIENT_DATA.to_string(),
            confidence: Confidence::Low,
            change_amount: 0,
            change_percent: 0.0,
            data_points: 0,
        };
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by_key(|sample| sample.date);

    let first = sorted[0].aqi;
    let last = sorted[sorted.len() - 1].aqi;
    let change = last - first;
    let percent = if first > 0.0 { change / first * 100.0 } else { 0.0 };
    let days = sorted.len();

    // 10-point floor, scaled to 5% of the baseline for high starting values.
    let threshold = 10.0_f64.max(first * 0.05);

    let (trend, confidence, mut explanation) = if change > threshold {
        (
            Trend::Increasing,
            percent_confidence(percent),
            format!(
                "Air quality is showing an upward trend. AQI increased by {} points \
                 ({:.1}%) over the last {} days, indicating deteriorating conditions.",
                change.round(),
                percent,
                days
            ),
        )
    } else if change < -threshold {
        (
            Trend::Decreasing,
            percent_confidence(percent),
            format!(
                "Air quality is showing improvement. AQI decreased by {} points \
                 ({:.1}%) over the last {} days, indicating better conditions.",
                change.abs().round(),
                percent.abs(),
                days
            ),
        )
    } else {
        // A change of exactly ±threshold lands here: the strict comparison is
        // intentional so the boundary reads as stable.
        let confidence = if days >= 10 {
            Confidence::High
        } else if days >= 7 {
            Confidence::Medium
        } else {
            Confidence::Low
        };
        (
            Trend::Stable,
            confidence,
            format!(
                "Air quality is relatively stable. AQI changed by {} points \
                 ({:.1}%) over the last {} days, indicating consistent conditions.",
                change.abs().round(),
                percent.abs(),
                days
            ),
        )
    };

    if days < 7 {
        explanation.push_str(LIMITED_DATA_CAVEAT);
    }

    TrendPrediction {
        ward_id: ward_id.to_string(),
        trend,
        confidence,
        explanation,
        change_amount: change.round() as i64,
        change_percent: (percent * 10.0).round() / 10.0,
        data_points: days,
    }
}

/// Confidence banding for directional trends.
///
/// Banded on the relative change, while classification uses the absolute
/// threshold above, so a small move on a high baseline can clear the
/// classification gate and still report LOW. That asymmetry mirrors the
/// governance rule table and is relied upon by callers.
fn percent_confidence(percent: f64) -> Confidence {
    if percent.abs() > 15.0 {
        Confidence::High
    } else if percent.abs() > 8.0 {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}
