mod config;
mod cube;
mod input;
mod operation;
mod output;

pub use config::{ConfigError, CubeSummationConfig, Limits, OutputConfig};
pub use cube::{run, run_all, Cube};
pub use input::{parse, parse_with_limits, ErrorKind, ParseError, ParsedInput, TestCase};
pub use operation::{Operation, OperationError, Point};
pub use output::{format_output, write_atomically};

/// Parses `raw` with `limits` and returns the output text for every query.
pub fn solve_with_limits(raw: &str, limits: &Limits) -> Result<String, ParseError> {
    let parsed = parse_with_limits(raw, limits)?;
    Ok(format_output(&run_all(&parsed)))
}

pub fn solve(raw: &str) -> Result<String, ParseError> {
    solve_with_limits(raw, &Limits::default())
}
