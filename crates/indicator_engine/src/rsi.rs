//! Relative Strength Index from simple averages of gains and losses.

use std::iter;

use crate::moving_average::sma;

/// RSI over `closes`.
///
/// Index 0 has no delta, so the first defined value is at index `period`.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|w| {
            let delta = w[1] - w[0];
            (delta.max(0.0), (-delta).max(0.0))
        })
        .unzip();

    let averages = sma(&gains, period).into_iter().zip(sma(&losses, period));

    iter::once(None)
        .chain(averages.map(|(gain, loss)| Some(rsi_from_averages(gain?, loss?))))
        .take(closes.len())
        .collect()
}

/// `100 - 100 / (1 + avg_gain / avg_loss)`.
///
/// With no losses in the window the result is 100 if there were gains and 0
/// for a completely flat window.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { 0.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
