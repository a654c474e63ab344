use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scorestore::{
    bench::{run_benchmarks, run_mixed_suite},
    config::{self, BenchConfig, MixConfig},
    report, run_workload, Variant,
};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the full benchmark suite and write the results as CSV.
    Bench {
        #[arg(long, default_value = "benchmark_results.csv")]
        output: PathBuf,
        /// Variants to benchmark; all of them when omitted.
        #[arg(long = "variant")]
        variants: Vec<Variant>,
        /// Workload sizes; 1,000 doubling to 16,384,000 when omitted.
        #[arg(long, value_delimiter = ',')]
        sizes: Vec<usize>,
        #[arg(long)]
        repeats: Option<usize>,
        /// Per-repeat wall-clock ceiling in seconds.
        #[arg(long)]
        max_secs: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Small ad hoc workload against every variant.
    Run {
        #[arg(long, default_value_t = 1000)]
        inserts: usize,
        #[arg(long, default_value_t = 1000)]
        searches: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Mixed insert/search/sum workloads.
    Mix {
        #[arg(long, default_value = "mixed_ops_results.csv")]
        output: PathBuf,
        #[arg(long, default_value_t = 100_000)]
        ops: usize,
        #[arg(long, default_value_t = 5)]
        trials: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Bench {
            output,
            variants,
            sizes,
            repeats,
            max_secs,
            seed,
        } => {
            let mut config = BenchConfig::from_env();
            if !sizes.is_empty() {
                config.sizes = sizes;
            }
            if let Some(repeats) = repeats {
                config.repeats = repeats;
            }
            if let Some(secs) = max_secs {
                config.max_duration = Duration::from_secs(secs);
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }
            let variants = if variants.is_empty() {
                Variant::ALL.to_vec()
            } else {
                variants
            };
            bench(&config, &variants, &output)
        }
        Cmd::Run {
            inserts,
            searches,
            seed,
        } => {
            let seed = seed.unwrap_or_else(config::clock_seed);
            for variant in Variant::ALL {
                let mut store = variant.build();
                run_workload(&mut store, inserts, searches, seed);
            }
            println!("workload finished");
            Ok(())
        }
        Cmd::Mix {
            output,
            ops,
            trials,
        } => {
            let config = MixConfig {
                ops,
                trials,
                ..MixConfig::default()
            };
            let results = run_mixed_suite(&config, &Variant::ALL);
            report::write_mix_results(&results, &output)
                .with_context(|| format!("failed to write results to {}", output.display()))?;
            println!("mixed workloads complete, results written to {}", output.display());
            Ok(())
        }
    }
}

fn bench(config: &BenchConfig, variants: &[Variant], output: &Path) -> Result<()> {
    tracing::info!(
        seed = config.seed,
        repeats = config.repeats,
        "benchmarking {} variants over {} sizes",
        variants.len(),
        config.sizes.len()
    );
    let results = run_benchmarks(config, variants);
    report::write_results(&results, output)
        .with_context(|| format!("failed to write results to {}", output.display()))?;
    println!("benchmark complete, results written to {}", output.display());
    Ok(())
}
