//! Simple and exponential moving averages over close prices.

/// Simple moving average.
///
/// The value at index `i` is the mean of `values[i + 1 - window..=i]` and is
/// `None` while fewer than `window` values are available.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|end| trailing_mean(values, end, window))
        .collect()
}

fn trailing_mean(values: &[f64], end: usize, window: usize) -> Option<f64> {
    if window == 0 || end + 1 < window {
        return None;
    }
    let sum: f64 = values[end + 1 - window..=end].iter().sum();
    Some(sum / window as f64)
}

/// Exponential moving average with `alpha = 2 / (span + 1)`, seeded with the
/// first value. Defined at every index.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    values
        .iter()
        .scan(None, |prev: &mut Option<f64>, &value| {
            let next = match *prev {
                None => value,
                Some(prev) => alpha * value + (1.0 - alpha) * prev,
            };
            *prev = Some(next);
            Some(next)
        })
        .collect()
}

/// MACD line: fast EMA minus slow EMA.
pub fn macd(values: &[f64], fast_span: usize, slow_span: usize) -> Vec<f64> {
    ema(values, fast_span)
        .into_iter()
        .zip(ema(values, slow_span))
        .map(|(fast, slow)| fast - slow)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_undefined_until_window_filled() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma(&data, 3);

        assert_eq!(result, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn sma_window_longer_than_data() {
        assert!(sma(&[1.0, 2.0], 3).iter().all(Option::is_none));
    }

    #[test]
    fn sma_zero_window_is_never_defined() {
        assert_eq!(sma(&[1.0, 2.0], 0), vec![None, None]);
    }

    #[test]
    fn sma_empty() {
        assert!(sma(&[], 50).is_empty());
    }

    #[test]
    fn ema_seeded_with_first_value() {
        let data = vec![10.0, 20.0, 30.0];
        let result = ema(&data, 3);

        // alpha = 0.5
        assert_eq!(result[0], 10.0);
        assert!((result[1] - 15.0).abs() < 1e-12);
        assert!((result[2] - 22.5).abs() < 1e-12);
    }

    #[test]
    fn ema_of_constant_is_constant() {
        let data = vec![42.0; 30];
        assert!(ema(&data, 12).iter().all(|v| (v - 42.0).abs() < 1e-12));
    }

    #[test]
    fn macd_zero_on_first_point() {
        let data = vec![100.0, 105.0, 95.0];
        let result = macd(&data, 12, 26);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0], 0.0);
        assert!(result[1] > 0.0);
    }
}
