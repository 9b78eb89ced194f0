/// Round to a fixed number of decimal places, ties to even
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Round to one decimal, the precision all reported risk figures use
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Clamp a percentage into [0, cap]
pub fn clamp_percent(value: f64, cap: f64) -> f64 {
    value.max(0.0).min(cap)
}

/// Convert a cumulative probability over `from_years` into the cumulative
/// probability over `to_years` under a constant annual hazard.
pub fn rescale_probability(probability: f64, from_years: f64, to_years: f64) -> f64 {
    if from_years <= 0.0 || to_years <= 0.0 {
        return 0.0;
    }
    let annual = annual_probability(probability, from_years);
    1.0 - (1.0 - annual).powf(to_years)
}

/// Implied constant annual event probability for a cumulative probability
pub fn annual_probability(probability: f64, years: f64) -> f64 {
    let p = probability.max(0.0).min(1.0);
    1.0 - (1.0 - p).powf(1.0 / years)
}

/// Apply a relative reduction (percent) to a remaining fraction
pub fn apply_relative_reduction(remaining: f64, reduction_percent: f64) -> f64 {
    remaining * (1.0 - reduction_percent / 100.0)
}
