use cube_summation::{write_atomically, Limits};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;

/// Generates random, valid cube summation inputs.
#[derive(StructOpt)]
struct Cli {
    /// Log level
    #[structopt(short, long, case_insensitive = true, default_value = "INFO")]
    log_level: LevelFilter,

    /// Number of test cases (1 to 50)
    #[structopt(short, long, default_value = "1")]
    test_cases: i64,

    /// Cube size of every test case (1 to 100)
    #[structopt(short = "n", long, default_value = "10")]
    cube_size: i64,

    /// Operations per test case (1 to 1000)
    #[structopt(short = "m", long, default_value = "100")]
    operations: i64,

    /// Seed for reproducible output.
    #[structopt(short, long)]
    seed: Option<u64>,

    /// Output file, stdout when omitted.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

fn generate(
    rng: &fastrand::Rng,
    limits: &Limits,
    test_cases: i64,
    cube_size: i64,
    operations: i64,
) -> String {
    let max = limits.max_abs_value;
    let mut out = String::new();
    // Writing to a String cannot fail, so the fmt results below are dropped.
    let _ = writeln!(out, "{}", test_cases);
    for _ in 0..test_cases {
        let _ = writeln!(out, "{} {}", cube_size, operations);
        for _ in 0..operations {
            if rng.bool() {
                let _ = writeln!(
                    out,
                    "UPDATE {} {} {} {}",
                    rng.i64(1..=cube_size),
                    rng.i64(1..=cube_size),
                    rng.i64(1..=cube_size),
                    rng.i64(-max..=max)
                );
            } else {
                let axis = || {
                    let (a, b) = (rng.i64(1..=cube_size), rng.i64(1..=cube_size));
                    (a.min(b), a.max(b))
                };
                let (x1, x2) = axis();
                let (y1, y2) = axis();
                let (z1, z2) = axis();
                let _ = writeln!(out, "QUERY {} {} {} {} {} {}", x1, y1, z1, x2, y2, z2);
            }
        }
    }
    out
}

fn main() {
    let args = Cli::from_args();
    if let Err(e) = SimpleLogger::new().with_level(args.log_level).init() {
        eprintln!("Unable to initialise the logger: {}", e);
    }

    let limits = Limits::default();
    if !(1..=limits.max_test_cases).contains(&args.test_cases)
        || !(1..=limits.max_cube_size).contains(&args.cube_size)
        || !(1..=limits.max_operations).contains(&args.operations)
    {
        eprintln!(
            "Constraint error: 1 <= T <= {}, 1 <= N <= {}, 1 <= M <= {}",
            limits.max_test_cases, limits.max_cube_size, limits.max_operations
        );
        process::exit(2);
    }

    let rng = fastrand::Rng::new();
    if let Some(seed) = args.seed {
        rng.seed(seed);
    }
    let text = generate(
        &rng,
        &limits,
        args.test_cases,
        args.cube_size,
        args.operations,
    );

    match &args.output {
        Some(path) => {
            if let Err(e) = write_atomically(path, &text) {
                eprintln!("Unable to write {}: {}", path.display(), e);
                process::exit(2);
            }
            info!("wrote {} test cases to {}", args.test_cases, path.display());
        }
        None => print!("{}", text),
    }
}
