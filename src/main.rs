use clap::Parser;
use lm_footprint::{
    ImpactResult, ModelConfig, Result, SanityReport, Scenario, check_against_gpt3, daily_macs,
    default_intermediate_size, estimate_impact,
};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Estimate compute, energy and CO2e of running a GPT-3 sized model on
/// every message written worldwide in a day.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of transformer blocks
    #[arg(long, default_value_t = 96)]
    num_modules: u64,

    /// Model width
    #[arg(long, default_value_t = 12288)]
    hidden_size: u64,

    /// FFN intermediate width (default: 4 * hidden size)
    #[arg(long)]
    intermediate_size: Option<u64>,

    #[arg(long, default_value_t = 30000)]
    vocab_size: u64,

    #[arg(long, default_value_t = 1.0)]
    batch: f64,

    /// Words per message
    #[arg(long, default_value_t = 50)]
    seq_len: u64,

    /// Words predicted after each typed word
    #[arg(long, default_value_t = 5)]
    autocomplete_len: u64,

    #[arg(long, default_value_t = 3e11)]
    messages_per_day: f64,

    /// Achievable throughput of one accelerator, in tera-macs per second
    #[arg(long, default_value_t = 30.0)]
    tmac_per_sec: f64,

    /// Accelerator power draw at full load
    #[arg(long, default_value_t = 250.0)]
    gpu_watts: f64,

    /// Days of usage covered by the estimate (only 1 is supported)
    #[arg(long, default_value_t = 1)]
    num_days: u32,

    /// Only run one scenario: classification or autocomplete
    #[arg(long)]
    scenario: Option<Scenario>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn model_config(&self) -> Result<ModelConfig> {
        let intermediate_size = match self.intermediate_size {
            Some(size) => size,
            None => default_intermediate_size(self.hidden_size)?,
        };
        ModelConfig::builder()
            .num_modules(self.num_modules)
            .hidden_size(self.hidden_size)
            .intermediate_size(intermediate_size)
            .vocab_size(self.vocab_size)
            .batch(self.batch)
            .seq_len(self.seq_len)
            .autocomplete_len(self.autocomplete_len)
            .messages_per_day(self.messages_per_day)
            .build()
    }
}

#[derive(Serialize)]
struct ScenarioReport {
    scenario: Scenario,
    macs_per_message: f64,
    daily_macs: f64,
    impact: ImpactResult,
}

#[derive(Serialize)]
struct Report {
    config: ModelConfig,
    sanity_check: SanityReport,
    scenarios: Vec<ScenarioReport>,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lm_footprint=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.model_config()?;
    info!(
        num_modules = config.num_modules,
        hidden_size = config.hidden_size,
        seq_len = config.seq_len,
        autocomplete_len = config.autocomplete_len,
        "configuration ready"
    );

    let sanity = check_against_gpt3(&config);
    if !sanity.within_tolerance {
        warn!(
            params = sanity.cost.params,
            relative_error = sanity.relative_error,
            "parameter count is far from the published GPT-3 figure"
        );
    }

    let scenarios = match cli.scenario {
        Some(s) => vec![s],
        None => Scenario::ALL.to_vec(),
    };

    let mut reports = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let macs_per_message = scenario.macs_per_message(&config);
        let macs_per_day = daily_macs(macs_per_message, &config);
        let impact =
            estimate_impact(macs_per_day, cli.tmac_per_sec, cli.gpu_watts, cli.num_days)?;
        info!(
            %scenario,
            macs_per_day,
            num_gpus_needed = impact.num_gpus_needed,
            "scenario priced"
        );
        reports.push(ScenarioReport {
            scenario,
            macs_per_message,
            daily_macs: macs_per_day,
            impact,
        });
    }

    if cli.json {
        let report = Report {
            config,
            sanity_check: sanity,
            scenarios: reports,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("GPT-3 sanity check at seq_len 2048: {sanity}");
    println!();
    for report in &reports {
        match report.scenario {
            Scenario::Classification => println!(
                "GPT-3 sized text classifier (like BERT) run on every message written each day:"
            ),
            Scenario::Autocomplete => {
                println!("GPT-3 as an autocomplete system for every message written each day:")
            }
        }
        println!("  macs per message: {:e}", report.macs_per_message);
        println!("{}", report.impact);
        println!();
    }

    Ok(())
}
