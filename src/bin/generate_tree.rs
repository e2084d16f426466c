// src/bin/generate_tree.rs
//! Write a random tree instance for the ground-state solver.

use anyhow::{Context, Result};
use clap::Parser;
use isingtree::generate::{random_tree, write_instance};
use isingtree::utils::rng::seeded;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
struct Cli {
    /// Number of spins
    #[arg(long, default_value_t = 16)]
    nodes: usize,

    /// Weights are drawn from -max..=max
    #[arg(long, default_value_t = 3)]
    max_weight: u32,

    /// RNG seed (OS entropy if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Problem name written to the header
    #[arg(long, default_value = "random")]
    name: String,

    /// Output file (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = seeded(cli.seed);
    let lines = random_tree(&mut rng, &cli.name, cli.nodes, cli.max_weight);
    let comment = format!("random tree, {} spins, |w| <= {}", cli.nodes, cli.max_weight);

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    write_instance(&mut out, &comment, &lines)?;
    out.flush()?;
    Ok(())
}
