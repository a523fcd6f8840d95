use anyhow::{Context, Result};
use clap::Parser;
use propsig::cli::{Cli, Commands, OutputFormat};
use propsig::config::{self, SignatureConfig, CONFIG_FILE_NAME};
use propsig::{flatten, ConcreteValue, Object, ReducedFeature, SignatureEncoder, Value};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match cli.command {
        Commands::Init { force } => init_config(force),
        command => {
            let config = match &cli.config {
                Some(path) => config::load_config_from(path)?,
                None => config::get_config().clone(),
            };
            let encoder = SignatureEncoder::new(&config)?;
            run(command, &config, &encoder)
        }
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, config: &SignatureConfig, encoder: &SignatureEncoder) -> Result<()> {
    match command {
        Commands::Layout { json } => {
            let layout = encoder.layout();
            if json {
                println!("{}", serde_json::to_string_pretty(layout)?);
            } else {
                println!("max inputs:        {}", layout.max_inputs);
                println!("basic widths:      {:?}", layout.basic_signature_length_by_type);
                println!("compare widths:    {:?}", layout.compare_length_by_types);
                println!("concrete value:    {}", layout.concrete_value_signature_length);
                println!("lambda value:      {}", layout.lambda_value_signature_length);
                println!("io examples:       {}", layout.io_examples_signature_length);
                println!("value:             {}", layout.value_signature_length);
            }
            Ok(())
        }
        Commands::Io {
            inputs,
            output,
            variable_length,
            format,
        } => {
            let columns: Vec<Vec<Object>> =
                serde_json::from_str(&inputs).context("Failed to parse --inputs")?;
            let inputs: Vec<ConcreteValue> = columns.into_iter().map(ConcreteValue::new).collect();
            let input_refs: Vec<&dyn Value> = inputs.iter().map(|v| v as &dyn Value).collect();
            let output = parse_column(&output, "--output")?;
            let fixed_length = config.fixed_length && !variable_length;

            let signature =
                encoder.property_signature_io_examples(&input_refs, &output, fixed_length)?;
            print_signature(&signature, format)
        }
        Commands::Value {
            value,
            output,
            variable_length,
            format,
        } => {
            let value = parse_column(&value, "--value")?;
            let output = parse_column(&output, "--output")?;
            let fixed_length = config.fixed_length && !variable_length;

            let signature = encoder.property_signature_value(&value, &output, fixed_length)?;
            print_signature(&signature, format)
        }
        Commands::Init { force } => init_config(force),
    }
}

fn parse_column(json: &str, flag: &str) -> Result<ConcreteValue> {
    let objects: Vec<Object> =
        serde_json::from_str(json).with_context(|| format!("Failed to parse {}", flag))?;
    Ok(ConcreteValue::new(objects))
}

fn print_signature(signature: &[ReducedFeature], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("length: {}", signature.len());
            for (i, f) in signature.iter().enumerate() {
                println!(
                    "{:4}: coverage={:.3} all_true={} all_false={} frac_true={:.3}",
                    i, f.coverage, f.all_true, f.all_false, f.frac_true
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(signature)?),
        OutputFormat::Flat => println!("{}", serde_json::to_string(&flatten(signature))?),
    }
    Ok(())
}

fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# propsig configuration

# Reserve per-type slots so every signature has the same width
fixed_length = true

# Inputs kept per example in fixed-length mode
max_inputs = 3
"#;

    std::fs::write(&config_path, default_config)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}
