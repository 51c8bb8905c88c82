use std::path::PathBuf;
use std::time::Instant;
use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;
use torrechess::dataset::{generate_legal_moves_dataset, load_dataset, save_dataset};

/// Generates a legal-moves dataset from random chess960 games.
#[derive(StructOpt)]
struct DatasetOptions {
    #[structopt(long, default_value = "10000")]
    games: usize,
    /// Defaults to legal_moves_dataset_<records>.bin in the working directory
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
    #[structopt(long)]
    seed: Option<u64>,
    /// Encode every record after writing it, to catch records the encoder rejects
    #[structopt(long)]
    check: bool,
    #[structopt(long)]
    mirror_if_black: bool,
}

impl DatasetOptions {
    fn run(&self) -> anyhow::Result<()> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let timer = Instant::now();
        let dataset = generate_legal_moves_dataset(self.games, &mut rng)?;
        println!(
            "Generated {} records from {} games in {:.1}s",
            dataset.len(),
            self.games,
            timer.elapsed().as_secs_f32()
        );

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("legal_moves_dataset_{}.bin", dataset.len())));
        save_dataset(&dataset, &output).with_context(|| format!("Failed to write {}", output.display()))?;
        println!("Dataset saved to {}", output.display());

        if self.check {
            let reloaded = load_dataset(&output)?;
            for (i, record) in reloaded.iter().enumerate() {
                record
                    .to_training_pair(self.mirror_if_black)
                    .with_context(|| format!("Record {} ({}) cannot be encoded", i, record.fen))?;
            }
            println!("All {} records encode", reloaded.len());
        }

        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    DatasetOptions::from_args().run()
}
