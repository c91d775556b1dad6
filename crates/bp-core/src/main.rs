//! bayesprop: Bayesian A/B comparison of two binomial proportions.
//!
//! Builds one estimation session from flags and/or a config file, runs the
//! requested query over its posterior draws and prints the result on
//! stdout. Logs go to stderr.

use std::io::Write;
use std::path::PathBuf;

use bp_core::config::{load_config, ConfigError, RawNumber, SessionConfig};
use bp_core::error::ValidationError;
use bp_core::exit_codes::ExitCode;
use bp_core::inference::InferenceQuery;
use bp_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use bp_core::output::{envelope, render, OutputError, OutputFormat, SCHEMA_VERSION};
use bp_core::plot::{IntervalMethod, PlotRequest};
use bp_core::session::EstimationSession;
use bp_core::summary::{HdiRequest, QuantileRequest, DEFAULT_INTERVAL, DEFAULT_QUANTILES};
use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::debug;

/// Bayesian estimation and comparison of two binomial proportions
#[derive(Parser)]
#[command(name = "bayesprop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Session inputs and output options shared by every command
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Group A counts as successes,trials
    #[arg(long = "a", global = true, value_delimiter = ',', allow_negative_numbers = true)]
    a: Option<Vec<f64>>,

    /// Group B counts as successes,trials
    #[arg(long = "b", global = true, value_delimiter = ',', allow_negative_numbers = true)]
    b: Option<Vec<f64>>,

    /// Alpha of the shared Beta prior [default: 0.5]
    #[arg(long, global = true, allow_negative_numbers = true)]
    prior_alpha: Option<f64>,

    /// Beta of the shared Beta prior [default: 0.5]
    #[arg(long, global = true, allow_negative_numbers = true)]
    prior_beta: Option<f64>,

    /// Posterior draws per group [default: 10000]
    #[arg(long, global = true, allow_hyphen_values = true)]
    draws: Option<RawNumber>,

    /// Random seed for reproducible draws
    #[arg(long, global = true, allow_hyphen_values = true)]
    seed: Option<RawNumber>,

    /// Session config file (TOML, or JSON with a .json extension)
    #[arg(long, global = true, env = "BAYESPROP_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log format on stderr (human or jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Omit timestamps from human-readable logs
    #[arg(long, global = true)]
    no_log_timestamps: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the posterior draws of theta_a, theta_b and delta
    Posteriors,

    /// Summarize the posteriors by quantiles or HDI/MAP
    Summary(SummaryArgs),

    /// Probability that delta lies above or below zero
    Probability(InferArgs),

    /// Bayes factor for delta lying above or below a value
    BayesFactor(InferArgs),

    /// Plot-ready KDE, histogram and interval data
    PlotData(PlotArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    Quantile,
    Hdi,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    /// Summary method
    #[arg(long, value_enum, default_value_t = Method::Quantile)]
    method: Method,

    /// Quantile levels (quantile method) [default: 0.025,0.5,0.975]
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    quantiles: Option<Vec<f64>>,

    /// HDI probability mass (hdi method)
    #[arg(long, default_value_t = DEFAULT_INTERVAL, allow_negative_numbers = true)]
    interval: f64,

    /// Leave out the mean column
    #[arg(long)]
    no_mean: bool,

    /// Parameter labels for theta_a, theta_b and delta
    #[arg(long, value_delimiter = ',')]
    names: Option<Vec<String>>,
}

#[derive(Args, Debug)]
struct InferArgs {
    /// "greater than" or "less than"
    #[arg(long, default_value = "greater than")]
    direction: String,

    /// Comparison value for delta
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    value: f64,

    /// Skip the interpretation sentence
    #[arg(long)]
    no_message: bool,

    /// Parameter labels for theta_a, theta_b and delta
    #[arg(long, value_delimiter = ',')]
    names: Option<Vec<String>>,
}

#[derive(Args, Debug)]
struct PlotArgs {
    /// Interval method
    #[arg(long, value_enum, default_value_t = Method::Hdi)]
    method: Method,

    /// Lower and upper quantile levels (quantile method) [default: 0.025,0.975]
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    bounds: Option<Vec<f64>>,

    /// HDI probability mass (hdi method)
    #[arg(long, default_value_t = DEFAULT_INTERVAL, allow_negative_numbers = true)]
    interval: f64,

    /// x position of a reference line on the delta panel
    #[arg(long, allow_negative_numbers = true)]
    delta_line: Option<f64>,

    /// Parameter labels for theta_a, theta_b and delta
    #[arg(long, value_delimiter = ',')]
    names: Option<Vec<String>>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Validation(_) | CliError::Config(ConfigError::Validation(_)) => {
                ExitCode::ArgsError
            }
            CliError::Config(_) | CliError::Write(_) => ExitCode::IoError,
            CliError::Output(_) | CliError::Serialize(_) => ExitCode::InternalError,
        }
    }

    fn code(&self) -> u32 {
        match self {
            CliError::Validation(e) | CliError::Config(ConfigError::Validation(e)) => e.code(),
            _ => self.exit_code().as_i32() as u32,
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let log_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else if cli.global.verbose > 0 {
        Some((0..cli.global.verbose).fold(LogLevel::Warn, |level, _| level.more_verbose()))
    } else {
        None
    };
    init_logging(
        &LogConfig::from_env(log_level, cli.global.log_format)
            .with_timestamps(!cli.global.no_log_timestamps),
    );

    let exit_code = match run(&cli) {
        Ok(()) => ExitCode::Clean,
        Err(err) => {
            report_error(&cli.global, &err);
            err.exit_code()
        }
    };
    std::process::exit(exit_code.as_i32());
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let global = &cli.global;
    let session = load_session(global)?;

    let payload = match &cli.command {
        Commands::Posteriors => render("posteriors", session.draws(), global.format)?,
        Commands::Summary(args) => {
            let table = match args.method {
                Method::Quantile => session.quantile_summary(&QuantileRequest {
                    quantiles: args
                        .quantiles
                        .clone()
                        .unwrap_or_else(|| DEFAULT_QUANTILES.to_vec()),
                    mean: !args.no_mean,
                    names: args.names.clone(),
                })?,
                Method::Hdi => session.hdi_summary(&HdiRequest {
                    interval: args.interval,
                    mean: !args.no_mean,
                    names: args.names.clone(),
                })?,
            };
            render("summary", &table, global.format)?
        }
        Commands::Probability(args) => {
            let result = session.infer_delta_probability(&inference_query(args)?)?;
            render("probability", &result, global.format)?
        }
        Commands::BayesFactor(args) => {
            let result = session.infer_delta_bayes_factor(&inference_query(args)?)?;
            render("bayes-factor", &result, global.format)?
        }
        Commands::PlotData(args) => {
            let method = match args.method {
                Method::Quantile => IntervalMethod::quantiles(
                    args.bounds.as_deref().unwrap_or(&[0.025, 0.975]),
                )?,
                Method::Hdi => IntervalMethod::hdi(args.interval)?,
            };
            let data = session.plot_data(&PlotRequest {
                method,
                names: args.names.clone(),
                delta_line: args.delta_line,
            })?;
            // Plot data is nested; it only has a JSON form.
            envelope("plot-data", &data)?
        }
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", payload.trim_end())?;
    Ok(())
}

fn load_session(global: &GlobalOpts) -> Result<EstimationSession, CliError> {
    let base = match &global.config {
        Some(path) => load_config(path)?,
        None => SessionConfig::default(),
    };
    let overrides = SessionConfig {
        a: global.a.clone(),
        b: global.b.clone(),
        prior_alpha: global.prior_alpha,
        prior_beta: global.prior_beta,
        draws: global.draws.clone(),
        seed: global.seed.clone(),
    };
    let config = base.merge(overrides);
    debug!(?config, "resolved session config");
    Ok(config.into_session()?)
}

fn inference_query(args: &InferArgs) -> Result<InferenceQuery, ValidationError> {
    let mut query = InferenceQuery::parse(&args.direction, args.value)?;
    query.render = !args.no_message;
    query.names = args.names.clone();
    Ok(query)
}

fn report_error(global: &GlobalOpts, err: &CliError) {
    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "status": "error",
                "error": {
                    "code": err.code(),
                    "exit_code": err.exit_code().as_i32(),
                    "message": err.to_string(),
                }
            });
            match serde_json::to_string_pretty(&response) {
                Ok(text) => eprintln!("{text}"),
                Err(_) => eprintln!("error: {err}"),
            }
        }
        OutputFormat::Md | OutputFormat::Csv => eprintln!("error: {err}"),
    }
}
