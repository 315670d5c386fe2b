//! Technical indicators over a daily price series.
//!
//! [`calculate_indicators`] derives MA_50, MA_200, RSI(14) and MACD(12, 26)
//! from the close prices and keeps only the rows where every indicator is
//! defined.

use history_model::{PricePoint, PriceSeries};
use itertools::izip;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod moving_average;
pub mod rsi;

pub use error::IndicatorError;

pub const MA_SHORT_WINDOW: usize = 50;
pub const MA_LONG_WINDOW: usize = 200;
pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST_SPAN: usize = 12;
pub const MACD_SLOW_SPAN: usize = 26;

/// Shortest series that yields at least one row.
pub const MIN_HISTORY: usize = MA_LONG_WINDOW;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    #[serde(flatten)]
    pub point: PricePoint,
    pub ma_50: f64,
    pub ma_200: f64,
    pub rsi: f64,
    pub macd: f64,
}

/// Computes indicators for `series`, which must be sorted by date.
///
/// Rows without enough history for every indicator are dropped, so a series
/// shorter than [`MIN_HISTORY`] gives an empty result.
pub fn calculate_indicators(series: &PriceSeries) -> Result<Vec<IndicatorRow>, IndicatorError> {
    validate(series.points())?;

    let closes = series.closes();
    let ma_50 = moving_average::sma(&closes, MA_SHORT_WINDOW);
    let ma_200 = moving_average::sma(&closes, MA_LONG_WINDOW);
    let rsi = rsi::rsi(&closes, RSI_PERIOD);
    let macd = moving_average::macd(&closes, MACD_FAST_SPAN, MACD_SLOW_SPAN);

    let rows = izip!(series.points(), ma_50, ma_200, rsi, macd)
        .filter_map(|(point, ma_50, ma_200, rsi, macd)| {
            Some(IndicatorRow {
                point: *point,
                ma_50: ma_50?,
                ma_200: ma_200?,
                rsi: rsi?,
                macd,
            })
        })
        .collect();

    Ok(rows)
}

fn validate(points: &[PricePoint]) -> Result<(), IndicatorError> {
    for (index, point) in points.iter().enumerate() {
        if !point.close.is_finite() || point.close < 0.0 {
            return Err(IndicatorError::InvalidClose {
                index,
                date: point.date,
                close: point.close,
            });
        }
        if index > 0 && points[index - 1].date >= point.date {
            return Err(IndicatorError::UnorderedDates {
                index,
                previous: points[index - 1].date,
                date: point.date,
            });
        }
    }
    Ok(())
}
