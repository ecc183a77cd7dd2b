use clap::Parser;
use fermi_core::sampling::{Sampler, SamplingConfig, DEFAULT_CONFIDENCE, DEFAULT_SAMPLES};
use fermi_core::units::si::{day, hour, kilogram, meter, year, KILO};
use fermi_core::{FermiError, HumanNames, Quantity, Report};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Fermi estimation demo with configurable sampling
#[derive(Parser, Debug)]
#[command(name = "fermi-demo")]
#[command(about = "Order-of-magnitude estimates with sampled uncertainty", long_about = None)]
struct Args {
    /// Samples drawn per quantity
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLES)]
    samples: usize,

    /// Confidence of every reported interval and every calibrated range
    #[arg(short, long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Seed for a reproducible run (default: seeded from the OS)
    #[arg(short, long)]
    seed: Option<u64>,
}

fn build_sampler(args: &Args) -> Result<Sampler, FermiError> {
    let config = SamplingConfig::default()
        .with_samples(args.samples)
        .with_confidence(args.confidence);
    match args.seed {
        Some(seed) => Sampler::seeded(seed, config),
        None => Sampler::new(config),
    }
}

/// Kinetic energy of a family car at highway speed.
fn car_kinetic_energy(sampler: &mut Sampler) -> Result<Quantity, FermiError> {
    let mass = &sampler.normal(1_200.0, 1_800.0)? * &kilogram();
    let speed = &sampler.normal(90.0, 120.0)? * &(&(KILO * &meter()) / &hour());
    Ok(0.5 * &(&mass * &speed.powi(2)))
}

/// Distance a commuter drives in a year.
fn yearly_commute(sampler: &mut Sampler) -> Result<Quantity, FermiError> {
    let per_day = &sampler.lognormal(10.0, 60.0)? * &(KILO * &meter());
    let working_share = sampler.outof(230.0, 365.0)?;
    let days = year(sampler)?.checked_div(&day())?;
    Ok(&(&per_day * &working_share) * &days)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    info!(?args, "starting estimates");

    let mut sampler = match build_sampler(&args) {
        Ok(sampler) => sampler,
        Err(e) => {
            error!(%e, "invalid sampling configuration");
            return ExitCode::FAILURE;
        }
    };
    let names = HumanNames::si();

    println!("=== Fermi Estimation Demo ===\n");
    println!(
        "{} samples per quantity, {:.1}% intervals\n",
        sampler.samples(),
        sampler.config().confidence * 100.0
    );

    let estimates: [(&str, fn(&mut Sampler) -> Result<Quantity, FermiError>); 2] = [
        ("Car kinetic energy", car_kinetic_energy),
        ("Yearly commute", yearly_commute),
    ];

    for (label, estimate) in estimates {
        let quantity = match estimate(&mut sampler) {
            Ok(quantity) => quantity,
            Err(e) => {
                error!(%e, label, "estimate failed");
                return ExitCode::FAILURE;
            }
        };
        match Report::new(&quantity, args.confidence) {
            Some(report) => println!("{label}: {}", report.with_names(&names)),
            None => println!("{label}: no samples"),
        }
    }

    ExitCode::SUCCESS
}
