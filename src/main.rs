use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use swap_quote::config::Config;
use swap_quote::convert::{exchange_rate, try_convert};
use swap_quote::form::{reduce, SwapEvent, SwapFormState};
use swap_quote::output;
use swap_quote::sources::{HttpPriceSource, PriceSource};
use swap_quote::submit::Submitter;
use swap_quote::sum::{sum_to_n_a, sum_to_n_b, sum_to_n_c};
use swap_quote::types::TokenPriceMap;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "swap-quote",
    about = "Fetch token prices, quote currency swaps, and simulate swap submission"
)]
struct Args {
    /// Path to config YAML file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the token price API
    #[arg(long, env = "API_BASE_URL")]
    api_base_url: Option<String>,

    /// Base URL for token icons
    #[arg(long, env = "TOKEN_ICON_BASE_URL")]
    icon_base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the latest price per currency
    Prices {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Quote a swap without submitting it
    Quote(SwapArgs),
    /// Quote a swap, validate it, and run the simulated submission
    Swap(SwapArgs),
    /// Print 1 + 2 + ... + n using each summation variant
    Sum {
        #[arg(allow_negative_numbers = true)]
        n: i64,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(clap::Args, Debug)]
struct SwapArgs {
    /// Currency to send (config default when omitted)
    #[arg(long)]
    from: Option<String>,

    /// Currency to receive (config default when omitted)
    #[arg(long)]
    to: Option<String>,

    /// Amount as typed; sanitized before use
    #[arg(short, long)]
    amount: String,

    /// Treat the amount as the receiving side
    #[arg(long)]
    reverse: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    }
    .with_overrides(args.api_base_url.clone(), args.icon_base_url.clone())
    .context("applying URL overrides")?;

    match args.command {
        Command::Sum { n } => {
            for (name, f) in [
                ("sum_to_n_a", sum_to_n_a as fn(i64) -> Option<i64>),
                ("sum_to_n_b", sum_to_n_b),
                ("sum_to_n_c", sum_to_n_c),
            ] {
                let sum = f(n).with_context(|| format!("{}({}) overflows i64", name, n))?;
                println!("{}({}) = {}", name, n, sum);
            }
        }
        Command::Prices { output: output_format } => {
            let prices = fetch_prices(&cfg).await?;
            match output_format {
                OutputFormat::Json => output::print_json(&prices)?,
                OutputFormat::Table => output::print_table(&prices, &cfg.icon_base_url),
            }
        }
        Command::Quote(swap) => {
            let prices = fetch_prices(&cfg).await?;
            let state = quote(&cfg, &swap, &prices);
            let rate = exchange_rate(&state.from_currency, &state.to_currency, Some(&prices));
            output::print_quote(&state, &prices, rate.as_deref());
        }
        Command::Swap(swap) => {
            let prices = fetch_prices(&cfg).await?;
            let state = quote(&cfg, &swap, &prices);
            let rate = exchange_rate(&state.from_currency, &state.to_currency, Some(&prices));
            output::print_quote(&state, &prices, rate.as_deref());

            let submitter = Submitter::new(cfg.submit_delay());
            info!("Processing swap ({} ms simulated delay)", submitter.delay().as_millis());
            match submitter.submit(&state).await {
                Ok(receipt) => println!("{}", receipt.message),
                Err(errors) => {
                    for e in errors.errors() {
                        eprintln!("  {}: {}", e.field, e.message);
                    }
                    return Err(errors).context("swap rejected");
                }
            }
        }
    }

    Ok(())
}

async fn fetch_prices(cfg: &Config) -> Result<TokenPriceMap> {
    let client = reqwest::Client::builder()
        .user_agent("swap-quote/0.1")
        .timeout(cfg.request_timeout())
        .build()
        .context("building HTTP client")?;

    let source = HttpPriceSource::new(client, &cfg.api_base_url, &cfg.prices_path)
        .context("configuring price source")?;
    info!("Fetching token prices from {}", source.url());

    let prices = source
        .fetch_price_map()
        .await
        .context("fetching token prices")?;
    info!("Loaded prices for {} currencies", prices.len());
    Ok(prices)
}

fn quote(cfg: &Config, args: &SwapArgs, prices: &TokenPriceMap) -> SwapFormState {
    let from = args
        .from
        .clone()
        .unwrap_or_else(|| cfg.default_from_currency.clone());
    let to = args
        .to
        .clone()
        .unwrap_or_else(|| cfg.default_to_currency.clone());

    if let Err(e) = try_convert("1", &from, &to, Some(prices)) {
        warn!("{} -> {}: {}; converted amount will be 0", from, to, e);
    }

    let event = if args.reverse {
        SwapEvent::ToAmountChanged(args.amount.clone())
    } else {
        SwapEvent::FromAmountChanged(args.amount.clone())
    };
    reduce(SwapFormState::new(from, to), event, Some(prices))
}
