use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use sendtx::application::send_tx::SendTxSlice;
use sendtx::config::SliceConfig;
use sendtx::domain::action::ErrorDataPolicy;
use sendtx::domain::payment::AuthType;
use sendtx::infrastructure::formatter::HorizonErrorFormatter;
use sendtx::infrastructure::simulated::SimulatedLedger;
use sendtx::interfaces::csv::payment_reader::PaymentReader;
use sendtx::interfaces::json::state_writer::StateWriter;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input payments CSV file
    input: PathBuf,

    /// JSON config file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Auth type for rows that do not name one
    #[arg(long)]
    auth_type: Option<AuthType>,

    /// Whether a failed payment clears the last receipt (clear) or keeps it (retain)
    #[arg(long)]
    error_data: Option<ErrorDataPolicy>,

    /// Balance of accounts the simulated ledger has not seen yet
    #[arg(long)]
    starting_balance: Option<Decimal>,

    /// Reset the state before every payment
    #[arg(long)]
    reset_between: bool,

    /// Logging level
    #[arg(short, long, default_value = "warn")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cli.log_level.to_string()))
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => SliceConfig::load(path).into_diagnostic()?,
        None => SliceConfig::default(),
    };
    if let Some(auth_type) = cli.auth_type {
        config.auth_type = auth_type;
    }
    if let Some(policy) = cli.error_data {
        config.error_data_policy = policy;
    }
    if let Some(balance) = cli.starting_balance {
        config.simulation.starting_balance = balance;
    }
    config.validate().into_diagnostic()?;
    tracing::debug!(?config, "configuration loaded");

    let ledger = SimulatedLedger::new(&config.simulation);
    let slice = SendTxSlice::new(Box::new(ledger), Box::new(HorizonErrorFormatter), &config);

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = PaymentReader::new(file);
    let stdout = io::stdout();
    let mut writer = StateWriter::new(stdout.lock());

    for (index, payment) in reader.payments().enumerate() {
        let row = index + 1;
        match payment {
            Ok(params) => {
                if cli.reset_between {
                    slice.reset();
                }
                slice.submit(params).await;
                writer.write_state(row, &slice.state()).into_diagnostic()?;
            }
            Err(e) => {
                eprintln!("Error reading payment on row {}: {}", row, e);
            }
        }
    }

    Ok(())
}
