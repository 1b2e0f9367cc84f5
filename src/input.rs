use log::{debug, trace};
use serde::Serialize;
use thiserror::Error;

use crate::config::Limits;
use crate::operation::{Operation, OperationError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub cube_size: usize,
    pub operations: Vec<Operation>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParsedInput {
    pub test_cases: Vec<TestCase>,
}

/// Category of a [`ParseError`], for callers that only care which rule failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyOrTooShort,
    NotANumber,
    ConstraintViolation,
    UnexpectedEndOfInput,
    UnknownOperation,
    TrailingOrMissingLines,
}

/// Line numbers are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("bad input, enter minimum data for at least one test case ({lines} lines found)")]
    EmptyOrTooShort { lines: usize },
    #[error("line {line}: bad input, parameter must be a number, current: {token:?}")]
    NotANumber { line: usize, token: String },
    #[error("line {line}: constraint error: {message}")]
    ConstraintViolation { line: usize, message: String },
    #[error("line {line}: bad input, end of input reached with pending test cases")]
    UnexpectedEndOfInput { line: usize },
    #[error("line {line}: bad input, only UPDATE or QUERY operations allowed, current: {token:?}")]
    UnknownOperation { line: usize, token: String },
    #[error("bad input, line count mismatch, expected/current: {expected}/{found}")]
    TrailingOrMissingLines { expected: usize, found: usize },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::EmptyOrTooShort { .. } => ErrorKind::EmptyOrTooShort,
            ParseError::NotANumber { .. } => ErrorKind::NotANumber,
            ParseError::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
            ParseError::UnexpectedEndOfInput { .. } => ErrorKind::UnexpectedEndOfInput,
            ParseError::UnknownOperation { .. } => ErrorKind::UnknownOperation,
            ParseError::TrailingOrMissingLines { .. } => ErrorKind::TrailingOrMissingLines,
        }
    }

    fn from_operation(line: usize, e: OperationError) -> Self {
        match e {
            OperationError::Unknown(token) => ParseError::UnknownOperation { line, token },
            OperationError::NotANumber(token) => ParseError::NotANumber { line, token },
            OperationError::Constraint(message) => {
                ParseError::ConstraintViolation { line, message }
            }
            e @ OperationError::Arity { .. } => ParseError::ConstraintViolation {
                line,
                message: e.to_string(),
            },
        }
    }
}

/// Parses `raw` with the default limits.
pub fn parse(raw: &str) -> Result<ParsedInput, ParseError> {
    parse_with_limits(raw, &Limits::default())
}

pub fn parse_with_limits(raw: &str, limits: &Limits) -> Result<ParsedInput, ParseError> {
    let lines: Vec<&str> = raw.trim().lines().map(str::trim).collect();
    if lines.len() < 3 {
        return Err(ParseError::EmptyOrTooShort { lines: lines.len() });
    }

    let num_test_cases = parse_number(lines[0], 1)?;
    check_range("T", num_test_cases, 1, limits.max_test_cases, 1)?;

    let mut test_cases = Vec::with_capacity(num_test_cases as usize);
    let mut cursor = 1;
    for _ in 0..num_test_cases {
        let test_case = parse_test_case(&lines, cursor, limits)?;
        debug!(
            "test case {} at line {}: N = {}, M = {}",
            test_cases.len() + 1,
            cursor + 1,
            test_case.cube_size,
            test_case.operations.len()
        );
        cursor += 1 + test_case.operations.len();
        test_cases.push(test_case);
    }

    if cursor != lines.len() {
        return Err(ParseError::TrailingOrMissingLines {
            expected: cursor,
            found: lines.len(),
        });
    }
    Ok(ParsedInput { test_cases })
}

fn parse_test_case(
    lines: &[&str],
    cursor: usize,
    limits: &Limits,
) -> Result<TestCase, ParseError> {
    let header = *lines
        .get(cursor)
        .ok_or(ParseError::UnexpectedEndOfInput { line: cursor + 1 })?;
    let line = cursor + 1;

    let mut tokens = header.split_whitespace();
    let cube_size = parse_number(tokens.next().unwrap_or_default(), line)?;
    let num_operations = parse_number(tokens.next().unwrap_or_default(), line)?;
    if let Some(extra) = tokens.next() {
        return Err(ParseError::ConstraintViolation {
            line,
            message: format!("expected only N and M, found extra token {:?}", extra),
        });
    }
    check_range("N", cube_size, 1, limits.max_cube_size, line)?;
    check_range("M", num_operations, 1, limits.max_operations, line)?;

    let mut operations = Vec::with_capacity(num_operations as usize);
    for index in cursor + 1..=cursor + num_operations as usize {
        let text = *lines
            .get(index)
            .ok_or(ParseError::UnexpectedEndOfInput { line: index + 1 })?;
        let operation = text
            .parse::<Operation>()
            .and_then(|op| op.check_bounds(cube_size, limits).map(|()| op))
            .map_err(|e| ParseError::from_operation(index + 1, e))?;
        trace!("line {}: {:?}", index + 1, operation);
        operations.push(operation);
    }

    Ok(TestCase {
        cube_size: cube_size as usize,
        operations,
    })
}

fn parse_number(token: &str, line: usize) -> Result<i64, ParseError> {
    token.parse::<i64>().map_err(|_| ParseError::NotANumber {
        line,
        token: token.to_string(),
    })
}

fn check_range(name: &str, value: i64, min: i64, max: i64, line: usize) -> Result<(), ParseError> {
    if value < min || value > max {
        return Err(ParseError::ConstraintViolation {
            line,
            message: format!("{} <= {} <= {}, current: {}", min, name, max, value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Point;

    fn kind_of(raw: &str) -> ErrorKind {
        parse(raw).unwrap_err().kind()
    }

    #[test]
    fn test_parse_sample() {
        let parsed = parse("1\n2 3\nUPDATE 1 1 1 5\nUPDATE 2 2 2 7\nQUERY 1 1 1 2 2 2").unwrap();
        assert_eq!(
            parsed,
            ParsedInput {
                test_cases: vec![TestCase {
                    cube_size: 2,
                    operations: vec![
                        Operation::Update {
                            at: Point::new(1, 1, 1),
                            value: 5
                        },
                        Operation::Update {
                            at: Point::new(2, 2, 2),
                            value: 7
                        },
                        Operation::Query {
                            from: Point::new(1, 1, 1),
                            to: Point::new(2, 2, 2)
                        },
                    ],
                }],
            }
        );
    }

    #[test]
    fn test_parse_many_test_cases() {
        for t in [1usize, 2, 17, 50].iter() {
            let mut raw = format!("{}\n", t);
            for i in 0..*t {
                let n = i % 100 + 1;
                raw.push_str(&format!(
                    "{} 2\nUPDATE {} 1 1 {}\nQUERY 1 1 1 {} {} {}\n",
                    n, n, i, n, n, n
                ));
            }
            let parsed = parse(&raw).unwrap();
            assert_eq!(parsed.test_cases.len(), *t);
            for (i, tc) in parsed.test_cases.iter().enumerate() {
                assert_eq!(tc.cube_size, i % 100 + 1);
                assert_eq!(tc.operations.len(), 2);
                assert_eq!(
                    tc.operations[0],
                    Operation::Update {
                        at: Point::new(tc.cube_size as i64, 1, 1),
                        value: i as i64
                    }
                );
            }
        }
    }

    #[test]
    fn test_windows_line_endings_and_padding() {
        let parsed = parse("  1\r\n 1 1 \r\n  QUERY 1 1 1 1 1 1  \r\n\n").unwrap();
        assert_eq!(parsed.test_cases.len(), 1);
        assert!(parsed.test_cases[0].operations[0].is_query());
    }

    #[test]
    fn test_too_short() {
        assert_eq!(parse(""), Err(ParseError::EmptyOrTooShort { lines: 0 }));
        assert_eq!(kind_of("1\n1 1"), ErrorKind::EmptyOrTooShort);
        assert_eq!(kind_of("\n\n1\n1 1\n\n"), ErrorKind::EmptyOrTooShort);
    }

    #[test]
    fn test_test_case_count() {
        assert_eq!(kind_of("x\n1 1\nQUERY 1 1 1 1 1 1"), ErrorKind::NotANumber);
        assert_eq!(kind_of("0\n1 1\nQUERY 1 1 1 1 1 1"), ErrorKind::ConstraintViolation);
        assert_eq!(kind_of("51\n1 1\nQUERY 1 1 1 1 1 1"), ErrorKind::ConstraintViolation);
    }

    #[test]
    fn test_header() {
        assert_eq!(
            parse("1\n101 1\nUPDATE 1 1 1 5"),
            Err(ParseError::ConstraintViolation {
                line: 2,
                message: "1 <= N <= 100, current: 101".to_string()
            })
        );
        assert_eq!(kind_of("1\n0 1\nUPDATE 1 1 1 5"), ErrorKind::ConstraintViolation);
        assert_eq!(kind_of("1\n1 1001\nUPDATE 1 1 1 5"), ErrorKind::ConstraintViolation);
        assert_eq!(kind_of("1\n1 0\nUPDATE 1 1 1 5"), ErrorKind::ConstraintViolation);
        assert_eq!(kind_of("1\n1 1 1\nUPDATE 1 1 1 5"), ErrorKind::ConstraintViolation);
        assert_eq!(kind_of("1\n1\nUPDATE 1 1 1 5"), ErrorKind::NotANumber);
        assert_eq!(kind_of("1\ntwo 1\nUPDATE 1 1 1 5"), ErrorKind::NotANumber);
    }

    #[test]
    fn test_missing_test_case() {
        assert_eq!(
            parse("2\n1 1\nUPDATE 1 1 1 5"),
            Err(ParseError::UnexpectedEndOfInput { line: 4 })
        );
    }

    #[test]
    fn test_missing_operation() {
        assert_eq!(
            parse("1\n2 3\nUPDATE 1 1 1 5\nQUERY 1 1 1 2 2 2"),
            Err(ParseError::UnexpectedEndOfInput { line: 5 })
        );
    }

    #[test]
    fn test_trailing_lines() {
        assert_eq!(
            parse("1\n1 1\nUPDATE 1 1 1 5\nQUERY 1 1 1 1 1 1"),
            Err(ParseError::TrailingOrMissingLines {
                expected: 3,
                found: 4
            })
        );
    }

    #[test]
    fn test_operation_errors_carry_line() {
        assert_eq!(
            parse("1\n2 2\nUPDATE 1 1 1 5\nDELETE 1 1 1"),
            Err(ParseError::UnknownOperation {
                line: 4,
                token: "DELETE".to_string()
            })
        );
        assert_eq!(
            parse("1\n2 1\nQUERY 1 1 1 2 b 2"),
            Err(ParseError::NotANumber {
                line: 3,
                token: "b".to_string()
            })
        );
        assert_eq!(kind_of("1\n2 1\nUPDATE 3 1 1 5"), ErrorKind::ConstraintViolation);
        assert_eq!(kind_of("1\n2 1\nUPDATE 1 1 1 10000000000"), ErrorKind::ConstraintViolation);
        assert_eq!(kind_of("1\n2 1\nQUERY 2 1 1 1 2 2"), ErrorKind::ConstraintViolation);
        assert_eq!(kind_of("1\n2 1\nQUERY 1 1 1 2 2 2 2"), ErrorKind::ConstraintViolation);
    }

    #[test]
    fn test_first_error_wins() {
        // Line 3 is out of range; the unknown operation on line 4 is never read.
        assert_eq!(
            kind_of("1\n2 2\nUPDATE 9 1 1 5\nNOPE"),
            ErrorKind::ConstraintViolation
        );
    }

    #[test]
    fn test_custom_limits() {
        let limits = Limits {
            max_cube_size: 3,
            max_abs_value: 10,
            ..Limits::default()
        };
        assert!(parse_with_limits("1\n3 1\nUPDATE 3 3 3 10", &limits).is_ok());
        assert_eq!(
            parse_with_limits("1\n4 1\nUPDATE 3 3 3 10", &limits).unwrap_err().kind(),
            ErrorKind::ConstraintViolation
        );
        assert_eq!(
            parse_with_limits("1\n3 1\nUPDATE 3 3 3 11", &limits).unwrap_err().kind(),
            ErrorKind::ConstraintViolation
        );
    }
}
