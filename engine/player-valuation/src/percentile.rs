//! Percentile ranks and sample-size shrinkage within a role bucket

/// Percentile assigned when a bucket has one member or none
pub const DEFAULT_PERCENTILE: f64 = 50.0;

/// Percentile rank (0-100) of every value within its own slice.
///
/// `rank = (strictly_less + 0.5 * equal_excluding_self) / (n - 1) * 100`
pub fn percentile_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n <= 1 {
        return vec![DEFAULT_PERCENTILE; n];
    }

    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let denominator = (n - 1) as f64;

    values
        .iter()
        .map(|value| {
            let less = sorted.partition_point(|x| x.total_cmp(value).is_lt());
            let less_or_equal = sorted.partition_point(|x| x.total_cmp(value).is_le());
            let equal_others = (less_or_equal - less).saturating_sub(1);
            ((less as f64 + 0.5 * equal_others as f64) / denominator * 100.0).clamp(0.0, 100.0)
        })
        .collect()
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Weight given to the raw value: `games / (games + k)`
pub fn shrink_weight(games: f64, k: f64) -> f64 {
    let games = games.max(0.0);
    let k = k.max(0.0);
    if games + k <= 0.0 {
        return 0.0;
    }
    games / (games + k)
}

/// Blend a raw value toward its bucket mean according to sample size
pub fn shrink_toward_mean(raw: f64, mean: f64, games: f64, k: f64) -> f64 {
    let weight = shrink_weight(games, k);
    raw * weight + mean * (1.0 - weight)
}
