mod interactive;
mod render;

use std::{fs::File, io::Read, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use core_cache::{
    bits::BitString, cache::DirectMappedCache, config::CacheConfig, exercise::Exercise,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// simulate an address sequence against a direct-mapped cache
    Solve(SolveArgs),
    /// solve a prepared exercise file (JSON), or the built-in one
    Exercise(ExerciseArgs),
    /// drive the cache one command at a time
    Interactive(InteractiveArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct GeometryArgs {
    /// Bit width of every address
    #[arg(short, long)]
    address_bits: usize,
    /// Number of cache lines (must be a power of two)
    #[arg(short, long)]
    lines: usize,
}

#[derive(Args, Debug)]
struct SolveArgs {
    #[command(flatten)]
    delegate: CommonArgs,
    #[command(flatten)]
    geometry: GeometryArgs,
    /// File with whitespace-separated binary addresses
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Binary addresses, e.g. 10011 11011
    addresses: Vec<String>,
}

#[derive(Args, Debug)]
struct ExerciseArgs {
    #[command(flatten)]
    delegate: CommonArgs,
    /// File path to the exercise JSON (omit for the built-in exercise)
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InteractiveArgs {
    #[command(flatten)]
    delegate: CommonArgs,
    #[command(flatten)]
    geometry: GeometryArgs,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    match args.command {
        Command::Solve(SolveArgs {
            delegate,
            geometry,
            input,
            addresses,
        }) => {
            init_logger(delegate.verbose);
            let raw = match input {
                Some(path) => read_addresses(&path)?,
                None => addresses,
            };
            if raw.is_empty() {
                bail!("no addresses given; pass them as arguments or via --input");
            }
            let sequence = parse_addresses(&raw, geometry.address_bits)?;
            let config = CacheConfig::new(geometry.address_bits, geometry.lines)?;
            let mut cache = DirectMappedCache::new(config);
            cache.run_sequence(&sequence)?;
            log::info!("simulated {} accesses.", sequence.len());
            println!("{}", render::detailed_analysis(&cache));
            Ok(())
        }
        Command::Exercise(ExerciseArgs { delegate, file }) => {
            init_logger(delegate.verbose);
            let exercise = match file {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("opening exercise file {}", path.display()))?;
                    Exercise::from_reader(file)?
                }
                None => Exercise::builtin(),
            };
            log::info!(
                "exercise loaded: {} addresses, {} lines.",
                exercise.sequence.len(),
                exercise.num_lines
            );
            let cache = exercise.solve()?;
            println!("{}", render::detailed_analysis(&cache));
            Ok(())
        }
        Command::Interactive(InteractiveArgs { delegate, geometry }) => {
            init_logger(delegate.verbose);
            let config = CacheConfig::new(geometry.address_bits, geometry.lines)?;
            let mut cache = DirectMappedCache::new(config);
            interactive::execute_interactive(&mut cache)
        }
    }
}

fn init_logger(verbose: bool) {
    if verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::init();
    }
}

fn read_addresses(path: &PathBuf) -> Result<Vec<String>> {
    let mut buf = String::new();
    let mut file = File::open(path)?;
    file.read_to_string(&mut buf)?;
    Ok(buf.split_whitespace().map(str::to_owned).collect())
}

/// Input-source validation: binary characters and bit width are
/// checked here, before anything reaches the engine. Short addresses
/// are padded with a warning.
fn parse_addresses(raw: &[String], address_bits: usize) -> Result<Vec<BitString>> {
    let mut out = Vec::with_capacity(raw.len());
    for (i, s) in raw.iter().enumerate() {
        let address = BitString::parse(s).with_context(|| format!("address #{} ({s:?})", i + 1))?;
        if address.len() > address_bits {
            bail!(
                "address #{} ({s}) is {} bits wide, expected at most {address_bits}",
                i + 1,
                address.len()
            );
        }
        if address.len() < address_bits {
            log::warn!(
                "address #{} ({s}) is shorter than {address_bits} bits, padded to {}",
                i + 1,
                address.zero_extend(address_bits)
            );
        }
        out.push(address);
    }
    Ok(out)
}
