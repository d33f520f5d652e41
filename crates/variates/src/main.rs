//! variates - print draws from a random variate family
//!
//! Usage:
//!   variates unit 5
//!   variates normal 1000 0 1
//!   variates gamma 10 2.5 1

use clap::{Parser, Subcommand};
use rpn_variates::{
    ExponentialRandom, GammaRandom, NormalRandom, PearsonVRandom, UniformRandom, UnitRandom,
    Variate, WeibullRandom,
};
use std::io::{self, BufWriter, Write};
use std::process;

#[derive(Parser)]
#[command(name = "variates")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Print draws from a random variate family, one per line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    family: Family,
}

#[derive(Subcommand)]
enum Family {
    /// Uniform on [0, 1)
    Unit { count: usize },
    /// Uniform on [a, b)
    Uniform { count: usize, a: f64, b: f64 },
    /// Normal with mean and standard deviation
    Normal { count: usize, mean: f64, sd: f64 },
    /// Exponential with the given mean
    Exponential { count: usize, mean: f64 },
    /// Weibull with shape and scale
    Weibull { count: usize, shape: f64, scale: f64 },
    /// Gamma with shape and scale
    Gamma { count: usize, shape: f64, scale: f64 },
    /// Pearson type V with shape and scale
    #[command(name = "pearson_v")]
    PearsonV { count: usize, shape: f64, scale: f64 },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let failed = e.use_stderr();
            let _ = e.print();
            process::exit(if failed { 1 } else { 0 });
        }
    };

    let (count, mut source): (usize, Box<dyn Variate>) = match cli.family {
        Family::Unit { count } => (count, Box::new(UnitRandom::new())),
        Family::Uniform { count, a, b } => (count, Box::new(UniformRandom::new(a, b))),
        Family::Normal { count, mean, sd } => (count, Box::new(NormalRandom::new(mean, sd))),
        Family::Exponential { count, mean } => (count, Box::new(ExponentialRandom::new(mean))),
        Family::Weibull {
            count,
            shape,
            scale,
        } => (count, Box::new(WeibullRandom::new(shape, scale))),
        Family::Gamma {
            count,
            shape,
            scale,
        } => (count, Box::new(GammaRandom::new(shape, scale))),
        Family::PearsonV {
            count,
            shape,
            scale,
        } => (count, Box::new(PearsonVRandom::new(shape, scale))),
    };

    if let Err(e) = write_draws(&mut *source, count) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

fn write_draws(source: &mut dyn Variate, count: usize) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for _ in 0..count {
        writeln!(out, "{:.6}", source.sample())?;
    }
    out.flush()
}
