use history_model::Quote;
use indicator_engine::IndicatorRow;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct LatestIndicatorsRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Open")]
    open: String,
    #[tabled(rename = "High")]
    high: String,
    #[tabled(rename = "Low")]
    low: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "Volume")]
    volume: i64,
    #[tabled(rename = "MA_50")]
    ma_50: String,
    #[tabled(rename = "MA_200")]
    ma_200: String,
    #[tabled(rename = "RSI")]
    rsi: String,
    #[tabled(rename = "MACD")]
    macd: String,
}

/// Quote as a two column metric/value table.
pub fn quote_table(quote: &Quote) -> String {
    let metric = |metric: &'static str, value: String| MetricRow { metric, value };
    let rows = vec![
        metric("Symbol", quote.symbol.clone()),
        metric("Open", format!("{:.2}", quote.open)),
        metric("High", format!("{:.2}", quote.high)),
        metric("Low", format!("{:.2}", quote.low)),
        metric("Price", format!("{:.2}", quote.price)),
        metric("Volume", quote.volume.to_string()),
        metric("Latest trading day", quote.latest_trading_day.to_string()),
        metric("Previous close", format!("{:.2}", quote.previous_close)),
        metric("Change", format!("{:+.2}", quote.change)),
        metric("Change percent", format!("{:+.4}%", quote.change_percent)),
    ];

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

/// Single row table for the most recent indicator values.
pub fn indicator_table(row: &IndicatorRow) -> String {
    let point = &row.point;
    let latest = LatestIndicatorsRow {
        date: point.date.to_string(),
        open: format!("{:.2}", point.open),
        high: format!("{:.2}", point.high),
        low: format!("{:.2}", point.low),
        close: format!("{:.2}", point.close),
        volume: point.volume,
        ma_50: format!("{:.2}", row.ma_50),
        ma_200: format!("{:.2}", row.ma_200),
        rsi: format!("{:.2}", row.rsi),
        macd: format!("{:.4}", row.macd),
    };

    let mut table = Table::new([latest]);
    table.with(Style::modern());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use history_model::PricePoint;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn quote_table_lists_metrics() {
        let quote = Quote {
            symbol: "IBM".to_string(),
            open: 187.0,
            high: 189.5,
            low: 186.25,
            price: 188.91,
            volume: 3841223,
            latest_trading_day: date(),
            previous_close: 186.98,
            change: 1.93,
            change_percent: 1.0322,
        };

        let table = quote_table(&quote);

        assert!(table.contains("Metric"));
        assert!(table.contains("Value"));
        assert!(table.contains("IBM"));
        assert!(table.contains("188.91"));
        assert!(table.contains("2024-05-17"));
        assert!(table.contains("+1.0322%"));
        assert_eq!(table.matches("Previous close").count(), 1);
    }

    #[test]
    fn indicator_table_has_all_columns() {
        let row = IndicatorRow {
            point: PricePoint {
                date: date(),
                open: 187.0,
                high: 189.5,
                low: 186.25,
                close: 188.91,
                volume: 3841223,
            },
            ma_50: 180.123,
            ma_200: 170.5,
            rsi: 64.4444,
            macd: 1.23461,
        };

        let table = indicator_table(&row);

        for header in ["Date", "Close", "Volume", "MA_50", "MA_200", "RSI", "MACD"] {
            assert!(table.contains(header), "missing {header}");
        }
        assert!(table.contains("180.12"));
        assert!(table.contains("64.44"));
        assert!(table.contains("1.2346"));
    }
}
