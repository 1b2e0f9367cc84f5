use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

use crate::config::Limits;

/// A 1-based cell coordinate, exactly as written in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Point {
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "UPPERCASE")]
pub enum Operation {
    /// Sets a single cell to `value`.
    Update { at: Point, value: i64 },
    /// Sums every cell in the inclusive box `from..=to`.
    Query { from: Point, to: Point },
}

/// Token-level failure while reading one operation line. The input parser
/// attaches the line number before surfacing it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("only UPDATE or QUERY operations allowed, current: {0:?}")]
    Unknown(String),
    #[error("parameter must be a number, current: {0:?}")]
    NotANumber(String),
    #[error("{name} expects {expected} parameters, found {found}")]
    Arity {
        name: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("constraint error: {0}")]
    Constraint(String),
}

impl FromStr for Operation {
    type Err = OperationError;

    /// Parses the syntax of an operation line. Bounds depend on the cube size
    /// and are checked separately by [`Operation::check_bounds`].
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut tokens = value.split_whitespace();
        let name = tokens.next().unwrap_or_default();
        let params: Vec<&str> = tokens.collect();
        match name {
            "UPDATE" => {
                let v = parse_params("UPDATE", &params, 4)?;
                Ok(Operation::Update {
                    at: Point::new(v[0], v[1], v[2]),
                    value: v[3],
                })
            }
            "QUERY" => {
                let v = parse_params("QUERY", &params, 6)?;
                Ok(Operation::Query {
                    from: Point::new(v[0], v[1], v[2]),
                    to: Point::new(v[3], v[4], v[5]),
                })
            }
            other => Err(OperationError::Unknown(other.to_string())),
        }
    }
}

fn parse_params(
    name: &'static str,
    params: &[&str],
    expected: usize,
) -> Result<Vec<i64>, OperationError> {
    // Missing parameters read as non-numeric, like any other bad token.
    if params.len() < expected {
        return Err(OperationError::NotANumber(String::new()));
    }
    let v = params
        .iter()
        .map(|p| {
            p.parse::<i64>()
                .map_err(|_| OperationError::NotANumber(p.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if v.len() != expected {
        return Err(OperationError::Arity {
            name,
            expected,
            found: v.len(),
        });
    }
    Ok(v)
}

impl Operation {
    pub fn is_query(&self) -> bool {
        matches!(self, Operation::Query { .. })
    }

    /// Checks coordinates against `cube_size` and update values against the
    /// configured magnitude limit. Query axes are checked x, then y, then z.
    pub fn check_bounds(&self, cube_size: i64, limits: &Limits) -> Result<(), OperationError> {
        match *self {
            Operation::Update { at, value } => {
                for (axis, c) in [("x", at.x), ("y", at.y), ("z", at.z)].iter() {
                    if *c < 1 || *c > cube_size {
                        return Err(OperationError::Constraint(format!(
                            "1 <= {} <= N, current {}: {}, N: {}",
                            axis, axis, c, cube_size
                        )));
                    }
                }
                let max = limits.max_abs_value;
                if value < -max || value > max {
                    return Err(OperationError::Constraint(format!(
                        "-{} <= W <= {}, current: {}",
                        max, max, value
                    )));
                }
                Ok(())
            }
            Operation::Query { from, to } => {
                let axes = [
                    ("x", from.x, to.x),
                    ("y", from.y, to.y),
                    ("z", from.z, to.z),
                ];
                for (axis, lo, hi) in axes.iter() {
                    if *lo < 1 || lo > hi || *hi > cube_size {
                        return Err(OperationError::Constraint(format!(
                            "1 <= {a}1 <= {a}2 <= N, current {a}1, {a}2: {}, {}, N: {}",
                            lo,
                            hi,
                            cube_size,
                            a = axis
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}
