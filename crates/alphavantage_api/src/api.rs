use chrono::NaiveDate;
use history_model::{PricePoint, PriceSeries, Quote};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ALPHAVANTAGE_BASE_API_URL: &str = "https://www.alphavantage.co";
const GLOBAL_QUOTE_KEY: &str = "Global Quote";
const DAILY_SERIES_KEY: &str = "Time Series (Daily)";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Serialize, Deserialize)]
struct GlobalQuoteJSON {
    #[serde(rename = "01. symbol")]
    symbol: String,
    #[serde(rename = "02. open")]
    open: String,
    #[serde(rename = "03. high")]
    high: String,
    #[serde(rename = "04. low")]
    low: String,
    #[serde(rename = "05. price")]
    price: String,
    #[serde(rename = "06. volume")]
    volume: String,
    #[serde(rename = "07. latest trading day")]
    latest_trading_day: String,
    #[serde(rename = "08. previous close")]
    previous_close: String,
    #[serde(rename = "09. change")]
    change: String,
    #[serde(rename = "10. change percent")]
    change_percent: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct DailyBarJSON {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

/// How much daily history `TIME_SERIES_DAILY` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputSize {
    /// Latest 100 trading days.
    Compact,
    /// Full history.
    #[default]
    Full,
}

impl OutputSize {
    fn as_str(&self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputSize {
    type Err = AlphaVantageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(OutputSize::Compact),
            "full" => Ok(OutputSize::Full),
            other => Err(AlphaVantageError::InvalidOutputSize(other.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct AlphaVantageAPI {
    base_url: String,
    api_key: String,
    output_size: OutputSize,
    client: reqwest::Client,
}

impl AlphaVantageAPI {
    pub fn new(api_key: impl Into<String>) -> Self {
        AlphaVantageAPI {
            base_url: ALPHAVANTAGE_BASE_API_URL.to_string(),
            api_key: api_key.into(),
            output_size: OutputSize::default(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_output_size(mut self, output_size: OutputSize) -> Self {
        self.output_size = output_size;
        self
    }

    /// Current quote for `symbol` (`GLOBAL_QUOTE`).
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote, AlphaVantageError> {
        let json = self
            .query(&[("function", "GLOBAL_QUOTE"), ("symbol", symbol)])
            .await?;

        debug!("get_quote | symbol: {} | parsing", symbol);
        parse_global_quote(&json)
    }

    /// Daily history for `symbol` (`TIME_SERIES_DAILY`), oldest first.
    pub async fn get_daily_history(&self, symbol: &str) -> Result<PriceSeries, AlphaVantageError> {
        let json = self
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("outputsize", self.output_size.as_str()),
            ])
            .await?;

        let series = parse_daily_series(&json)?;
        debug!(
            "get_daily_history | symbol: {} | points: {}",
            symbol,
            series.len()
        );
        Ok(series)
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<Value, AlphaVantageError> {
        let url = format!("{}/query", self.base_url);

        debug!("query | url: {} | params: {:?}", url, params);

        let json = self
            .client
            .get(&url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(json)
    }
}

/// Alpha Vantage answers HTTP 200 with a message object when throttling or
/// rejecting a request.
fn check_error_shapes(json: &Value) -> Result<(), AlphaVantageError> {
    for key in ["Note", "Information"] {
        if let Some(message) = json.get(key) {
            warn!("check_error_shapes | rate limit | {}", message);
            return Err(AlphaVantageError::RateLimited(message_text(message)));
        }
    }
    if let Some(message) = json.get("Error Message") {
        warn!("check_error_shapes | api error | {}", message);
        return Err(AlphaVantageError::Api(message_text(message)));
    }
    Ok(())
}

fn message_text(message: &Value) -> String {
    match message.as_str() {
        Some(text) => text.to_string(),
        None => message.to_string(),
    }
}

fn parse_global_quote(json: &Value) -> Result<Quote, AlphaVantageError> {
    check_error_shapes(json)?;

    // unknown symbols come back as an empty object
    let payload = json
        .get(GLOBAL_QUOTE_KEY)
        .filter(|v| v.as_object().is_some_and(|o| !o.is_empty()))
        .ok_or_else(|| {
            warn!("parse_global_quote | no data | {}", json);
            AlphaVantageError::NoData(GLOBAL_QUOTE_KEY)
        })?;

    let raw = GlobalQuoteJSON::deserialize(payload)?;

    Ok(Quote {
        open: parse_number("open", &raw.open)?,
        high: parse_number("high", &raw.high)?,
        low: parse_number("low", &raw.low)?,
        price: parse_number("price", &raw.price)?,
        volume: parse_volume(&raw.volume)?,
        latest_trading_day: parse_date(&raw.latest_trading_day)?,
        previous_close: parse_number("previous close", &raw.previous_close)?,
        change: parse_number("change", &raw.change)?,
        change_percent: parse_number("change percent", raw.change_percent.trim_end_matches('%'))?,
        symbol: raw.symbol,
    })
}

fn parse_daily_series(json: &Value) -> Result<PriceSeries, AlphaVantageError> {
    check_error_shapes(json)?;

    let payload = json.get(DAILY_SERIES_KEY).ok_or_else(|| {
        warn!("parse_daily_series | no data | {}", json);
        AlphaVantageError::NoData(DAILY_SERIES_KEY)
    })?;

    let bars = HashMap::<String, DailyBarJSON>::deserialize(payload)?;

    let mut points = Vec::with_capacity(bars.len());
    for (date, bar) in bars {
        points.push(PricePoint {
            date: parse_date(&date)?,
            open: parse_number("open", &bar.open)?,
            high: parse_number("high", &bar.high)?,
            low: parse_number("low", &bar.low)?,
            close: parse_number("close", &bar.close)?,
            volume: parse_volume(&bar.volume)?,
        });
    }

    Ok(PriceSeries::from_unsorted(points))
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, AlphaVantageError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AlphaVantageError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_volume(value: &str) -> Result<i64, AlphaVantageError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| AlphaVantageError::InvalidNumber {
            field: "volume",
            value: value.to_string(),
        })
}

fn parse_date(value: &str) -> Result<NaiveDate, AlphaVantageError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|source| {
        AlphaVantageError::InvalidDate {
            value: value.to_string(),
            source,
        }
    })
}

#[derive(Error, Debug)]
pub enum AlphaVantageError {
    #[error("request failed: {0}")]
    Request(reqwest::Error),
    #[error("API rate limit hit: {0}")]
    RateLimited(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("{0} not available")]
    NoData(&'static str),
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("invalid {field} value {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("invalid date {value:?}: {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },
    #[error("unknown output size {0:?}, expected compact or full")]
    InvalidOutputSize(String),
}

// request URLs carry the API key
impl From<reqwest::Error> for AlphaVantageError {
    fn from(err: reqwest::Error) -> AlphaVantageError {
        AlphaVantageError::Request(err.without_url())
    }
}
