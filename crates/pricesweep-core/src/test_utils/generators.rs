//! Deterministic price distributions for sweep tests
//!
//! All functions are pure: same input, same output, no randomness.

/// `n` prices spread evenly over `[min, max]`, ascending
///
/// Prices are distinct whenever `max - min >= n`.
pub fn uniform_prices(min: i64, max: i64, n: usize) -> Vec<i64> {
    if n == 0 || min > max {
        return Vec::new();
    }
    let span = i128::from(max) - i128::from(min);
    (0..n)
        .map(|i| {
            let offset = span * i as i128 / n as i128;
            (i128::from(min) + offset) as i64
        })
        .collect()
}

/// `k` records sharing one price, nothing else
pub fn hotspot_prices(price: i64, k: usize) -> Vec<i64> {
    vec![price; k]
}

/// Uniform background plus `k` records co-located at `hotspot`
pub fn uniform_with_hotspot(min: i64, max: i64, n: usize, hotspot: i64, k: usize) -> Vec<i64> {
    let mut prices = uniform_prices(min, max, n);
    // Keep the hotspot the only shared price
    prices.retain(|&p| p != hotspot);
    prices.extend(hotspot_prices(hotspot, k));
    prices.sort_unstable();
    prices
}
