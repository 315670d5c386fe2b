use alphavantage_api::api::{AlphaVantageAPI, OutputSize};
use clap::Parser;
use dotenvy::dotenv;
use indicator_engine::{MIN_HISTORY, calculate_indicators};
use log::{error, info, warn};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use std::{env, process::exit};

mod table;
mod utils;

const DEFAULT_FETCH_DELAY_SECS: u64 = 15;

#[derive(Parser, Debug)]
#[command(author, version, about = "Quote and technical indicators for a single stock symbol")]
struct Args {
    /// Stock symbol, e.g. AAPL. Prompted for when omitted
    symbol: Option<String>,
}

struct Config {
    api_key: String,
    base_url: Option<String>,
    fetch_delay: Duration,
    output_size: OutputSize,
}

impl Config {
    fn new() -> Result<Config, Box<dyn Error>> {
        dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, Box<dyn Error>> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = var("SCREENER_API_KEY").ok_or("SCREENER_API_KEY is not set")?;
        let base_url = var("SCREENER_BASE_URL");

        let fetch_delay_secs = match var("SCREENER_FETCH_DELAY_SECS") {
            Some(secs) => secs.trim().parse()?,
            None => DEFAULT_FETCH_DELAY_SECS,
        };

        let output_size = match var("SCREENER_OUTPUT_SIZE") {
            Some(size) => size.parse()?,
            None => OutputSize::default(),
        };

        let config = Config {
            api_key,
            base_url,
            fetch_delay: Duration::from_secs(fetch_delay_secs),
            output_size,
        };
        Ok(config)
    }
}

fn prompt_symbol() -> io::Result<String> {
    print!("Enter stock symbol (Example: AAPL, MSFT, TSLA): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

#[tokio::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let args = Args::parse();

    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Could not create config: {}", e);
            exit(1);
        }
    };

    println!("\nSTOCK SCREENER\n");

    let raw_symbol = match args.symbol {
        Some(symbol) => symbol,
        None => match prompt_symbol() {
            Ok(symbol) => symbol,
            Err(e) => {
                error!("Could not read symbol: {}", e);
                exit(1);
            }
        },
    };

    let symbol = utils::sanitize_symbol(&raw_symbol);
    if symbol.is_empty() {
        error!("No valid symbol given");
        exit(1);
    }

    let mut api = AlphaVantageAPI::new(config.api_key).with_output_size(config.output_size);
    if let Some(base_url) = config.base_url {
        api = api.with_base_url(base_url);
    }

    info!("Fetching real-time quote for {}", symbol);
    let quote = api.get_quote(&symbol).await;
    if let Err(e) = &quote {
        error!("Real-time data not available: {}", e);
    }

    // the free tier allows only a few calls per minute
    info!("Waiting {}s before the next request", config.fetch_delay.as_secs());
    tokio::time::sleep(config.fetch_delay).await;

    info!("Fetching daily history for {}", symbol);
    let history = api.get_daily_history(&symbol).await;
    if let Err(e) = &history {
        error!("Historical data not available: {}", e);
    }

    let (quote, history) = match (quote, history) {
        (Ok(quote), Ok(history)) => (quote, history),
        _ => {
            println!("\nFailed to fetch complete stock data.");
            println!("Please wait 1 minute and try again.");
            exit(1);
        }
    };

    let indicators = match calculate_indicators(&history) {
        Ok(rows) => rows,
        Err(e) => {
            error!("Could not calculate indicators: {}", e);
            exit(1);
        }
    };

    println!("\nREAL-TIME STOCK DATA");
    println!("{}", table::quote_table(&quote));

    println!("\nTECHNICAL INDICATORS (LATEST)");
    match indicators.last() {
        Some(row) => println!("{}", table::indicator_table(row)),
        None => warn!(
            "Not enough history for {}: {} daily points, at least {} needed",
            symbol,
            history.len(),
            MIN_HISTORY
        ),
    }

    println!("\nAnalysis completed.");
}
