use mister_balance::analyzer::{Analyzer, AnalyticsResult, AnalyzerImpl};
use mister_balance::config::{AppConfig, load_config};
use mister_balance::model::{AppError, ParserError, TransactionRecord};
use mister_balance::normalizer::{filter_by_range, normalize_all};
use mister_balance::parser::{MisterParser, Parser};
use mister_balance::report::{render_text, write_json, write_text};
use mister_balance::utils::format_amount;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Reads the ledger page, analyzes it and writes the reports.
async fn run(config: &AppConfig) -> Result<(), AppError> {
    info!("Reading ledger: {}", config.input_html);
    let html = tokio::fs::read_to_string(&config.input_html)
        .await
        .map_err(|e| AppError::Input(config.input_html.clone(), e))?;

    let records = load_records(&html, config)?;

    info!("Analyzing {} transactions...", records.len());
    let result = AnalyzerImpl::with_ranking_limit(config.ranking_limit).analyze(&records);
    log_headline(&result);

    write_json(&config.output_json, &result).await?;
    if let Some(path) = &config.output_text {
        write_text(path, &render_text(&result)).await?;
    }

    info!("Finished.");
    Ok(())
}

fn load_records(html: &str, config: &AppConfig) -> Result<Vec<TransactionRecord>, AppError> {
    let parser = MisterParser::new()?;
    let raw = match parser.parse(html) {
        Ok(raw) => raw,
        Err(ParserError::Empty) => {
            warn!("No movements found in {}, reporting an empty ledger", config.input_html);
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    let records = normalize_all(&raw);
    let (start, end) = config.date_range()?;
    let total = records.len();
    let records = filter_by_range(records, start, end);
    if records.len() != total {
        info!("Date range kept {} of {} transactions", records.len(), total);
    }
    Ok(records)
}

fn log_headline(result: &AnalyticsResult) {
    info!("Total profitability: {}", format_amount(result.total_profitability));
    info!(
        "Traded players: {} ({} profitable, {} losing)",
        result.player_profitability.len(),
        result.best_deals.len(),
        result.biggest_losses.len()
    );
    info!(
        "Current squad: {} players, {} invested",
        result.current_squad.len(),
        format_amount(result.current_squad_total_investment)
    );
    info!(
        "Win rate: {:.1}% over {} trades, average hold {:.1} days",
        result.win_rate.win_rate, result.win_rate.total_trades, result.average_hold_time
    );
}
