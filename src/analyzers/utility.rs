/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Divides `numerator` by `denominator`, treating a zero denominator as 1.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    let denominator = if denominator == 0.0 { 1.0 } else { denominator };
    numerator / denominator
}

/// Linearly maps `value` from the `src` range onto the `dst` range.
pub fn scale(value: f64, src: (f64, f64), dst: (f64, f64)) -> f64 {
    (value - src.0) / (src.1 - src.0) * (dst.1 - dst.0) + dst.0
}
