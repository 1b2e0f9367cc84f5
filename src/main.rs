use cube_summation::{
    format_output, parse_with_limits, run_all, write_atomically, ConfigError,
    CubeSummationConfig, ParseError,
};
use log::{debug, info, LevelFilter};
use simple_logger::SimpleLogger;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;
use thiserror::Error;

// Command-line arguments for the tool.
#[derive(StructOpt)]
struct Cli {
    /// Log level
    #[structopt(short, long, case_insensitive = true, default_value = "INFO")]
    log_level: LevelFilter,

    /// Optional TOML file overriding the input limits.
    #[structopt(short, long, parse(from_os_str))]
    config_file: Option<PathBuf>,

    /// Input file, stdin when omitted.
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Output file, stdout when omitted.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Print the parsed input as JSON on stderr.
    #[structopt(short, long)]
    debug: bool,
}

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("error reading input {0}: {1}")]
    Input(String, io::Error),
    #[error("error writing output {0}: {1}")]
    Output(String, io::Error),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("error serializing parsed input: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::Parse(_) => 1,
            _ => 2,
        }
    }
}

fn read_input(path: &Option<PathBuf>) -> Result<String, AppError> {
    match path {
        Some(path) => {
            info!("reading input from {}", path.display());
            fs::read_to_string(path).map_err(|e| AppError::Input(path.display().to_string(), e))
        }
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .map_err(|e| AppError::Input("<stdin>".to_string(), e))?;
            Ok(raw)
        }
    }
}

fn run(args: &Cli) -> Result<(), AppError> {
    let config = match &args.config_file {
        Some(path) => CubeSummationConfig::load(path)?,
        None => CubeSummationConfig::default(),
    };
    debug!("{:?}", config);

    let raw = read_input(&args.input)?;
    let parsed = parse_with_limits(&raw, &config.limits)?;
    info!("parsed {} test cases", parsed.test_cases.len());

    if args.debug || config.output.debug {
        eprintln!("Structured data: {}", serde_json::to_string_pretty(&parsed)?);
    }

    let out = format_output(&run_all(&parsed));
    match &args.output {
        Some(path) => {
            write_atomically(path, &out)
                .map_err(|e| AppError::Output(path.display().to_string(), e))?;
            info!("wrote results to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(out.as_bytes())
                .and_then(|()| handle.flush())
                .map_err(|e| AppError::Output("<stdout>".to_string(), e))?;
        }
    }
    Ok(())
}

fn main() {
    let args = Cli::from_args();
    if let Err(e) = SimpleLogger::new().with_level(args.log_level).init() {
        eprintln!("Unable to initialise the logger: {}", e);
    }

    if let Err(e) = run(&args) {
        eprintln!("{}", e);
        process::exit(e.exit_code());
    }
}
