use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Context;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use structopt::StructOpt;
use torrechess::engine::{play_game, AnyEngine, EngineKind, NeuralEngineConfig};
use torrechess::neural::{ConvPolicyNet, ConvPolicyNetConfig, DeviceChoice, PolicyModel};
use torrechess::position::{Outcome, Position};
use torrechess::utils::Color;

/// Plays a match between two engines and reports the score.
#[derive(StructOpt)]
struct CompeteOptions {
    #[structopt(long, default_value = "material")]
    white: EngineKind,
    #[structopt(long, default_value = "random")]
    black: EngineKind,
    #[structopt(long, default_value = "10")]
    games: usize,
    #[structopt(long, default_value = "400")]
    max_plies: usize,
    /// Seeds the heuristic engines and the chess960 start positions
    #[structopt(long)]
    seed: Option<u64>,
    /// Start every game from a random chess960 position
    #[structopt(long)]
    chess960: bool,
    /// Policy network weights for neural engines
    #[structopt(long, parse(from_os_str))]
    weights: Option<PathBuf>,
    #[structopt(long, default_value = "auto")]
    device: DeviceChoice,
    #[structopt(long)]
    mirror_if_black: bool,
    /// Fail instead of falling back when the best scored move is illegal
    #[structopt(long)]
    allow_illegal_moves: bool,
}

impl CompeteOptions {
    fn neural_config(&self) -> NeuralEngineConfig {
        NeuralEngineConfig {
            mirror_if_black: self.mirror_if_black,
            prevent_illegal_move: !self.allow_illegal_moves,
        }
    }

    fn load_model(&self) -> anyhow::Result<Option<Arc<dyn PolicyModel>>> {
        if !self.white.needs_model() && !self.black.needs_model() {
            return Ok(None);
        }
        let device = self.device.resolve();
        let model = match &self.weights {
            Some(path) => ConvPolicyNet::load(path, device, ConvPolicyNetConfig::default())
                .with_context(|| format!("Failed to load weights from {}", path.display()))?,
            None => {
                println!("No weights given, the neural engine plays with fresh weights");
                ConvPolicyNet::new(device, ConvPolicyNetConfig::default())?
            }
        };
        println!("Policy network on {:?}", device);
        Ok(Some(Arc::new(model)))
    }

    fn run(&self) -> anyhow::Result<()> {
        let model = self.load_model()?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut score = [0., 0.];
        for game in 0..self.games {
            let mut white = AnyEngine::build(self.white, Some(rng.gen()), model.clone(), self.neural_config())?;
            let mut black = AnyEngine::build(self.black, Some(rng.gen()), model.clone(), self.neural_config())?;
            let mut position = if self.chess960 {
                Position::random_chess960(&mut rng)?
            } else {
                Position::new()
            };
            let start_fen = position.fen();

            let record = play_game(&mut white, &mut black, &mut position, self.max_plies)
                .with_context(|| format!("Game {} from {} failed", game + 1, start_fen))?;

            let result = match record.outcome {
                Some(outcome) => outcome.to_string(),
                None => "*".to_string(),
            };
            match record.outcome {
                Some(Outcome::Decisive { winner: Color::White }) => score[0] += 1.,
                Some(Outcome::Decisive { winner: Color::Black }) => score[1] += 1.,
                _ => {
                    score[0] += 0.5;
                    score[1] += 0.5;
                }
            }

            println!(
                "Game {}: {} vs {} {} ({:?}, {} plies)",
                game + 1,
                record.white,
                record.black,
                result,
                record.termination,
                record.moves.len()
            );
            println!("Moves: {}", record.moves.join(" "));
            println!("Final position: {}", record.final_fen);
            println!();
        }

        println!("Score: {} {} - {} {}", self.white, score[0], score[1], self.black);
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    CompeteOptions::from_args().run()
}
