//! Termtext Measurement Tool
//!
//! Reads text from stdin or a file, splits it into units and prints the
//! cursor advance of each unit followed by the width of each line.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use serde::Serialize;
use termtext::app::Config;
use termtext::measure::Advance;
use termtext::parser::Unit;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Parse command line arguments
    let mut tab_size: Option<usize> = None;
    let mut no_clusters = false;
    let mut config_file: Option<PathBuf> = None;
    let mut input_file: Option<String> = None;
    let mut output_format = OutputFormat::Text;
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-t" | "--tab-size" => {
                i += 1;
                match args.get(i).map(|s| s.parse()) {
                    Some(Ok(n)) => tab_size = Some(n),
                    _ => {
                        eprintln!("--tab-size expects a number");
                        return ExitCode::FAILURE;
                    },
                }
            },
            "--no-clusters" => {
                no_clusters = true;
            },
            "-c" | "--config" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(PathBuf::from(&args[i]));
                }
            },
            "-j" | "--json" => {
                output_format = OutputFormat::Json;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            _ => {
                // Treat as input file if no flag
                if input_file.is_none() && !args[i].starts_with('-') {
                    input_file = Some(args[i].clone());
                }
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let mut config = match &config_file {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            },
        },
        None => Config::load_or_default(),
    };
    if let Some(n) = tab_size {
        config.tab_size = n;
    }
    if no_clusters {
        config.clusters = false;
    }
    let measurer = match config.measurer() {
        Ok(measurer) => measurer,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        },
    };

    // Open input
    let reader: Box<dyn Read> = match &input_file {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => Box::new(io::stdin().lock()),
    };

    // Tokenize
    let tokenizer = termtext::tokenize_reader(reader);
    let units: io::Result<Vec<Unit>> = if config.clusters {
        tokenizer.clusters().collect()
    } else {
        tokenizer.collect()
    };
    let units = match units {
        Ok(units) => units,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            return ExitCode::FAILURE;
        },
    };

    let report = Report {
        tab_size: measurer.tab_size(),
        units: measurer
            .measure(&units)
            .with_units()
            .map(|(advance, unit)| MeasuredUnit {
                advance,
                unit: unit.clone(),
            })
            .collect(),
        line_widths: measurer.line_widths(&units),
    };

    // Output result
    match output_format {
        OutputFormat::Text => {
            for measured in &report.units {
                println!(
                    "{:>2} {:>4}  {:?}",
                    measured.advance.lines,
                    measured.advance.columns,
                    measured.unit.to_string()
                );
            }
            println!("---");
            println!("Line widths: {:?}", report.line_widths);
        },
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                return ExitCode::FAILURE;
            },
        },
    }

    ExitCode::SUCCESS
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct MeasuredUnit {
    advance: Advance,
    unit: Unit,
}

#[derive(Serialize)]
struct Report {
    tab_size: usize,
    units: Vec<MeasuredUnit>,
    line_widths: Vec<usize>,
}

fn print_help() {
    println!("Termtext Measurement Tool");
    println!();
    println!("Usage: termtext [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -t, --tab-size <N>    Tab stop interval (default: 8)");
    println!("      --no-clusters     Do not attach combining marks to the preceding unit");
    println!("  -c, --config <PATH>   Load configuration from a JSON file");
    println!("  -j, --json            Output measurements as JSON");
    println!("  -h, --help            Show this help message");
    println!();
    println!("Environment:");
    println!("  RUST_LOG              Log filter (default: warn)");
}
