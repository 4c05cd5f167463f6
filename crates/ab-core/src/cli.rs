//! Command-line host: gathers variant rows, runs the engine, prints results.

use std::path::{Path, PathBuf};

use ab_common::schema::is_compatible;
use ab_common::{Error, OutputFormat, Result, SCHEMA_VERSION};
use ab_config::{resolve_config, ConfigOverrides, ConfigPaths, ConversionPrior, GammaParams};
use clap::{Args, Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{config_error, BayesianEngine};
use crate::exit_codes::ExitCode;
use crate::experiment::Experiment;
use crate::model::AnalyticMethod;
use crate::observation::{parse_variant_spec, ObservationRecord, VariantObservation};
use crate::render::{render_probability_bars, render_summary_table};
use crate::report::EvaluationReport;

/// Bayesian probability-to-be-best calculator for A/B/N tests.
#[derive(Parser, Debug)]
#[command(name = "ab-core", version, about)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Summary)]
    pub format: OutputFormat,

    /// Config file (TOML or JSON)
    #[arg(long, global = true, env = "AB_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute each variant's probability to be best
    Evaluate(EvaluateArgs),
    /// List supported models and their default priors
    Models,
    /// Print a JSON Schema
    Schema {
        /// Document to describe
        #[arg(value_enum, default_value_t = SchemaTarget::Input)]
        target: SchemaTarget,
    },
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaTarget {
    /// `evaluate --input` file
    Input,
    /// Engine config file
    Config,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Model: "conversion", "numeric, continuous" or "numeric, discrete"
    #[arg(long, short)]
    pub model: Option<String>,

    /// Variant row; repeat once per variant
    #[arg(long = "variant", value_name = "LABEL:SAMPLE_SIZE:CONVERSIONS[:SUM_NUMERIC]")]
    pub variants: Vec<String>,

    /// JSON input file with `model` and `variants`
    #[arg(long, short, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Monte Carlo draws per variant
    #[arg(long)]
    pub simulation_size: Option<usize>,

    /// RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Prior pseudo-successes for the conversion model
    #[arg(long)]
    pub prior_success: Option<u64>,

    /// Prior pseudo-failures for the conversion model
    #[arg(long)]
    pub prior_failure: Option<u64>,

    /// Significance threshold (%) a variant must exceed to lead
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Histogram bins for distribution plot data in JSON output (0 disables)
    #[arg(long, default_value_t = 30)]
    pub bins: usize,

    /// Embed the raw simulation matrix in JSON output
    #[arg(long)]
    pub include_samples: bool,
}

/// Input file layout accepted by `evaluate --input`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InputFile {
    /// Schema version the document was written against; major must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Model name; `--model` takes precedence.
    #[serde(default)]
    pub model: Option<String>,
    pub variants: Vec<ObservationRecord>,
}

impl InputFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: InputFile = serde_json::from_str(&content)
            .map_err(|e| Error::InvalidInput(format!("{}: {e}", path.display())))?;
        if let Some(version) = file.schema_version.as_deref() {
            if !is_compatible(version) {
                return Err(Error::InvalidInput(format!(
                    "{}: schema_version {version} is incompatible with {SCHEMA_VERSION}",
                    path.display()
                )));
            }
        }
        Ok(file)
    }
}

/// Dispatch a parsed command line.
pub fn run(cli: &Cli) -> ExitCode {
    let outcome = match &cli.command {
        Commands::Evaluate(args) => run_evaluate(cli, args),
        Commands::Models => run_models(cli.format),
        Commands::Schema { target } => run_schema(*target),
    };
    match outcome {
        Ok(code) => code,
        Err(err) => {
            report_error(cli.format, &err);
            ExitCode::from(&err)
        }
    }
}

fn report_error(format: OutputFormat, err: &Error) {
    match format {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "error": { "code": err.code(), "message": err.to_string() },
            });
            println!("{doc}");
        }
        OutputFormat::Summary => eprintln!("error: {err}"),
    }
}

/// Collect observations from the input file first, then `--variant` flags.
fn gather_input(args: &EvaluateArgs) -> Result<(AnalyticMethod, Vec<VariantObservation>)> {
    let file = args.input.as_deref().map(InputFile::load).transpose()?;

    let model = args
        .model
        .clone()
        .or_else(|| file.as_ref().and_then(|f| f.model.clone()))
        .ok_or_else(|| Error::Config("no model given; pass --model or set it in the input file".into()))?;
    let method: AnalyticMethod = model.parse()?;

    let mut records: Vec<ObservationRecord> = file.map(|f| f.variants).unwrap_or_default();
    for spec in &args.variants {
        records.push(parse_variant_spec(spec)?);
    }
    let observations = records
        .into_iter()
        .map(VariantObservation::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok((method, observations))
}

fn run_evaluate(cli: &Cli, args: &EvaluateArgs) -> Result<ExitCode> {
    let (method, observations) = gather_input(args)?;

    let overrides = ConfigOverrides {
        simulation_size: args.simulation_size,
        seed: args.seed,
        significance_threshold: args.threshold,
        prior_success: args.prior_success,
        prior_failure: args.prior_failure,
    };
    let paths = ConfigPaths::discover(cli.config.clone());
    let config = resolve_config(&paths, &overrides).map_err(config_error)?;
    debug!(?config, "resolved engine config");

    let engine = BayesianEngine::from_config(&config)?;
    let mut experiment = Experiment::new(method, observations)?;
    experiment.calculate(&engine, config.conversion_prior)?;

    let report = EvaluationReport::build(
        &experiment,
        config.significance_threshold,
        args.bins,
        args.include_samples,
    )?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Summary => print!("{}", render_report(&experiment, &report)?),
    }

    Ok(if report.leader.is_some() {
        ExitCode::Clean
    } else {
        ExitCode::NoLeader
    })
}

fn render_report(experiment: &Experiment, report: &EvaluationReport) -> Result<String> {
    let result = experiment.result()?;
    let mut out = format!(
        "Bayesian evaluation (model: {}, {} draws per variant, seed {})\n\n",
        report.model, report.simulation_size, report.seed
    );
    out.push_str(&render_summary_table(&report.summary, report.model));
    out.push('\n');

    match &report.leader {
        Some(leader) => out.push_str(&format!(
            "Leader: {} ({:.2}% > {}%)\n\n",
            leader,
            result.probability_to_be_best(leader.as_str()),
            report.significance_threshold
        )),
        None => out.push_str(&format!(
            "No leader found (no variant exceeds {}%)\n\n",
            report.significance_threshold
        )),
    }

    out.push_str("Probability to be best\n");
    out.push_str(&render_probability_bars(&result.filled_probabilities(), 40));
    out.push('\n');
    out.push_str(&report.description);
    out.push('\n');
    Ok(out)
}

fn run_models(format: OutputFormat) -> Result<ExitCode> {
    let models: Vec<serde_json::Value> = AnalyticMethod::ALL
        .iter()
        .map(|m| {
            let priors = m.priors(ConversionPrior::default(), GammaParams::weak());
            serde_json::json!({
                "name": m.as_str(),
                "numeric": m.is_numeric(),
                "priors": priors,
            })
        })
        .collect();

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "models": models,
            }))?
        ),
        OutputFormat::Summary => {
            for m in AnalyticMethod::ALL {
                let (a, b) = m
                    .priors(ConversionPrior::default(), GammaParams::weak())
                    .hyperparameters();
                let kind = if m.is_numeric() { "gamma" } else { "beta" };
                println!("{:<20} {kind}({a}, {b})", m.as_str());
            }
        }
    }
    Ok(ExitCode::Clean)
}

fn run_schema(target: SchemaTarget) -> Result<ExitCode> {
    let schema = match target {
        SchemaTarget::Input => schemars::schema_for!(InputFile),
        SchemaTarget::Config => schemars::schema_for!(ab_config::EngineConfig),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(ExitCode::Clean)
}
