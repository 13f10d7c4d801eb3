use chrono::NaiveDate;
use proptest::prelude::*;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use wardair::trend::{predict_trend, AqiSample, Confidence, Trend};

fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date") + chrono::Duration::days(offset as i64)
}

fn series(values: &[f64]) -> Vec<AqiSample> {
    values
        .iter()
        .enumerate()
        .map(|(i, &aqi)| AqiSample {
            date: day(i as u32),
            aqi,
        })
        .collect()
}

#[test]
fn empty_series_yields_stable_low_sentinel() {
    let verdict = predict_trend("W001", &[]);
    assert_eq!(verdict.trend, Trend::Stable);
    assert_eq!(verdict.confidence, Confidence::Low);
    assert_eq!(verdict.change_amount, 0);
    assert_eq!(verdict.change_percent, 0.0);
    assert_eq!(verdict.data_points, 0);
    assert!(verdict.explanation.contains("Insufficient data"));
}

#[test]
fn single_sample_is_stable_with_caveat() {
    let verdict = predict_trend("W001", &series(&[180.0]));
    assert_eq!(verdict.trend, Trend::Stable);
    assert_eq!(verdict.confidence, Confidence::Low);
    assert_eq!(verdict.change_amount, 0);
    assert_eq!(verdict.data_points, 1);
    assert!(verdict.explanation.contains("limited data points"));
}

#[test]
fn change_equal_to_threshold_is_stable() {
    // delta 10 against threshold max(10, 200 * 0.05) = 10: strict inequality.
    let verdict = predict_trend("W001", &series(&[200.0, 210.0]));
    assert_eq!(verdict.trend, Trend::Stable);
    assert_eq!(verdict.change_amount, 10);
}

#[test]
fn change_just_over_threshold_is_increasing() {
    let verdict = predict_trend("W001", &series(&[200.0, 211.0]));
    assert_eq!(verdict.trend, Trend::Increasing);
    assert_eq!(verdict.change_amount, 11);
    // 5.5% change clears the absolute gate but stays under the 8% band.
    assert_eq!(verdict.confidence, Confidence::Low);
}

#[test]
fn high_baseline_scales_the_threshold() {
    // threshold = max(10, 300 * 0.05) = 15, so a 14-point rise stays stable.
    let verdict = predict_trend("W001", &series(&[300.0, 314.0]));
    assert_eq!(verdict.trend, Trend::Stable);
    assert_eq!(verdict.change_amount, 14);
}

#[test]
fn rising_and_falling_series_mirror_change_amount() {
    let up = predict_trend("W001", &series(&[100.0, 130.0]));
    assert_eq!(up.trend, Trend::Increasing);
    assert_eq!(up.change_amount, 30);
    assert!((up.change_percent - 30.0).abs() < 1e-9);

    let down = predict_trend("W001", &series(&[130.0, 100.0]));
    assert_eq!(down.trend, Trend::Decreasing);
    assert_eq!(down.change_amount, -30);
    // Percent is relative to the (higher) starting value on the way down.
    assert!((down.change_percent - (-23.1)).abs() < 1e-9);
}

#[test]
fn zero_baseline_guards_division() {
    let verdict = predict_trend("W001", &series(&[0.0, 50.0]));
    assert_eq!(verdict.trend, Trend::Increasing);
    assert_eq!(verdict.change_amount, 50);
    assert_eq!(verdict.change_percent, 0.0);
}

#[test]
fn strong_two_week_rise_reports_high_confidence() {
    // 150 -> 180 over 14 points: 20% change, well above the 15% band.
    let mut values: Vec<f64> = (0..14).map(|i| 150.0 + i as f64 * 30.0 / 13.0).collect();
    values[0] = 150.0;
    values[13] = 180.0;
    let verdict = predict_trend("W001", &series(&values));
    assert_eq!(verdict.trend, Trend::Increasing);
    assert_eq!(verdict.confidence, Confidence::High);
    assert_eq!(verdict.data_points, 14);
    assert!((verdict.change_percent - 20.0).abs() < 1e-9);
    assert!(!verdict.explanation.contains("limited data points"));
}

#[test]
fn stable_confidence_bands_on_sample_count() {
    let ten_flat: Vec<f64> = vec![100.0; 10];
    assert_eq!(
        predict_trend("W001", &series(&ten_flat)).confidence,
        Confidence::High
    );

    let seven_flat: Vec<f64> = vec![100.0; 7];
    assert_eq!(
        predict_trend("W001", &series(&seven_flat)).confidence,
        Confidence::Medium
    );

    let five_flat: Vec<f64> = vec![100.0; 5];
    let verdict = predict_trend("W001", &series(&five_flat));
    assert_eq!(verdict.confidence, Confidence::Low);
    assert!(verdict.explanation.contains("limited data points"));
}

#[test]
fn short_series_caveat_applies_to_every_branch() {
    let increasing = predict_trend("W001", &series(&[100.0, 150.0]));
    let decreasing = predict_trend("W001", &series(&[150.0, 100.0]));
    let stable = predict_trend("W001", &series(&[100.0, 101.0]));
    for verdict in [increasing, decreasing, stable] {
        assert!(verdict.data_points < 7);
        assert!(
            verdict.explanation.contains("use 10-14 days of historical data"),
            "missing caveat: {}",
            verdict.explanation
        );
    }
}

#[test]
fn explanations_name_the_direction() {
    let up = predict_trend("W001", &series(&[100.0, 130.0]));
    assert!(up.explanation.contains("upward trend"));
    assert!(up.explanation.contains("increased by 30 points (30.0%)"));
    assert!(up.explanation.contains("deteriorating conditions"));

    let down = predict_trend("W001", &series(&[130.0, 100.0]));
    assert!(down.explanation.contains("showing improvement"));
    assert!(down.explanation.contains("decreased by 30 points (23.1%)"));
    assert!(down.explanation.contains("better conditions"));

    let flat = predict_trend("W001", &series(&[100.0, 102.0]));
    assert!(flat.explanation.contains("relatively stable"));
    assert!(flat.explanation.contains("consistent conditions"));
}

#[test]
fn outputs_are_rounded_but_comparisons_are_not() {
    let verdict = predict_trend("W001", &series(&[150.0, 163.33]));
    // raw delta 13.33 clears the 10-point threshold before rounding
    assert_eq!(verdict.trend, Trend::Increasing);
    assert_eq!(verdict.change_amount, 13);
    assert!((verdict.change_percent - 8.9).abs() < 1e-9);
}

#[test]
fn ward_id_passes_through_untouched() {
    let verdict = predict_trend("zone-42", &series(&[100.0, 120.0]));
    assert_eq!(verdict.ward_id, "zone-42");
}

proptest! {
    /// Shuffling the input never changes the verdict: ordering comes from
    /// the sample dates, not the sequence the caller happens to supply.
    #[test]
    fn verdict_is_order_independent(
        values in proptest::collection::vec(0u32..500, 1..30),
        seed in any::<u64>(),
    ) {
        let samples: Vec<AqiSample> = values
            .iter()
            .enumerate()
            .map(|(i, &aqi)| AqiSample { date: day(i as u32), aqi: aqi as f64 })
            .collect();
        let mut shuffled = samples.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(
            predict_trend("W001", &samples),
            predict_trend("W001", &shuffled)
        );
    }

    /// Totality plus rounding: any series yields a verdict whose percent is
    /// a multiple of 0.1.
    #[test]
    fn verdict_fields_are_always_well_formed(
        values in proptest::collection::vec(0u32..500, 0..30),
    ) {
        let samples: Vec<AqiSample> = values
            .iter()
            .enumerate()
            .map(|(i, &aqi)| AqiSample { date: day(i as u32), aqi: aqi as f64 })
            .collect();
        let verdict = predict_trend("W001", &samples);
        prop_assert_eq!(verdict.data_points, samples.len());
        let tenths = verdict.change_percent * 10.0;
        prop_assert!((tenths - tenths.round()).abs() < 1e-6);
    }
}
