//! Wait Estimator CLI
//!
//! Terminal front end for the hospital wait-time estimator:
//! - Interactive form session (default)
//! - One-shot prediction
//! - Reference chart
//! - Default config generation

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wait_estimator::config::{generate_default_config, Config, LoggingConfig};
use wait_estimator::controller::{FormController, SubmitOutcome};
use wait_estimator::form::FormField;
use wait_estimator::session::Session;
use wait_estimator::ui::{self, ViewOptions};
use wait_estimator::PredictionClient;

#[derive(Parser)]
#[command(name = "wait-estimator")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Estimate hospital wait times from a prediction backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Prediction backend URL (overrides config)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive form session
    Run {
        /// Hide the reference chart from the full screen
        #[arg(long)]
        no_chart: bool,
    },

    /// Submit one prediction and print the estimate
    Predict {
        /// Arrival hour (0-23)
        #[arg(long)]
        hour: String,
        /// Day of week (Monday..Sunday)
        #[arg(long)]
        day: String,
        /// Doctor type (ANCHOR, FLOATING, LOCUM)
        #[arg(long)]
        doctor: String,
        /// Patient type (OUTPATIENT, INPATIENT)
        #[arg(long)]
        patient: String,
    },

    /// Print the average wait per day reference chart
    Chart {
        /// Width of the longest bar
        #[arg(short, long, default_value = "30")]
        width: usize,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, config_errors) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, Vec::new()),
        None => Config::discover(),
    };
    if let Some(url) = cli.backend_url {
        config.backend.url = url;
    }

    init_logging(&config.logging);
    tracing::info!("Wait Estimator v{}", env!("CARGO_PKG_VERSION"));
    for e in &config_errors {
        tracing::warn!("{} (falling back to defaults)", e);
    }

    match cli.command.unwrap_or(Commands::Run { no_chart: false }) {
        Commands::Run { no_chart } => {
            let client = PredictionClient::new(config.backend.client_config())
                .context("Failed to create HTTP client")?;
            tracing::info!("Prediction backend: {}", client.config().predict_url());

            let view = ViewOptions {
                show_chart: !no_chart,
                ..ViewOptions::default()
            };
            let session = Session::new(Arc::new(client), view, chrono::Local::now());

            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let controller = session
                .run(stdin, tokio::io::stdout(), config.clock.tick_interval())
                .await?;

            tracing::info!(
                predictions = controller.history().len(),
                "Session ended"
            );
        }

        Commands::Predict {
            hour,
            day,
            doctor,
            patient,
        } => {
            let client = PredictionClient::new(config.backend.client_config())
                .context("Failed to create HTTP client")?;

            let mut form = FormController::new(chrono::Local::now());
            form.update_field(FormField::ArrivalHour, hour);
            form.update_field(FormField::DayOfWeek, day);
            form.update_field(FormField::DoctorType, doctor);
            form.update_field(FormField::PatientType, patient);

            if let Some(tier) = form.peak_advisory() {
                println!("{}", tier.label());
            }

            match form.submit(&client).await {
                SubmitOutcome::Predicted(minutes) => {
                    print!("{}", ui::view::render_result(minutes));
                }
                SubmitOutcome::Failed(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
                SubmitOutcome::Busy => {
                    anyhow::bail!("A prediction is already in progress");
                }
            }
        }

        Commands::Chart { width } => {
            print!("{}", ui::reference_chart(width));
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so they never interleave with the rendered screen
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("wait_estimator={}", logging.level))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
