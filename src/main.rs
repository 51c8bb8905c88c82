use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use structopt::StructOpt;
use torrechess::engine::{AnyEngine, Engine, EngineKind, NeuralEngineConfig};
use torrechess::neural::{ConvPolicyNet, ConvPolicyNetConfig, DeviceChoice, PolicyModel};
use torrechess::position::Position;
use torrechess::utils::Color;

/// Play against one of the engines from the terminal, entering moves in UCI notation.
#[derive(StructOpt)]
struct PlayOptions {
    #[structopt(long, default_value = "material")]
    engine: EngineKind,
    /// Play Black instead of White
    #[structopt(long)]
    black: bool,
    #[structopt(long)]
    fen: Option<String>,
    #[structopt(long)]
    seed: Option<u64>,
    #[structopt(long, parse(from_os_str))]
    weights: Option<PathBuf>,
    #[structopt(long, default_value = "auto")]
    device: DeviceChoice,
    #[structopt(long)]
    mirror_if_black: bool,
}

fn main() -> anyhow::Result<()> {
    let options = PlayOptions::from_args();

    let model: Option<Arc<dyn PolicyModel>> = if options.engine.needs_model() {
        let device = options.device.resolve();
        let net = match &options.weights {
            Some(path) => ConvPolicyNet::load(path, device, ConvPolicyNetConfig::default())?,
            None => ConvPolicyNet::new(device, ConvPolicyNetConfig::default())?,
        };
        Some(Arc::new(net))
    } else {
        None
    };
    let config = NeuralEngineConfig {
        mirror_if_black: options.mirror_if_black,
        ..Default::default()
    };
    let mut engine = AnyEngine::build(options.engine, options.seed, model, config)?;

    let mut position = match &options.fen {
        Some(fen) => Position::from_fen(fen)?,
        None => Position::new(),
    };
    let human = if options.black { Color::Black } else { Color::White };

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    while !position.is_game_over() {
        position.print();
        println!();

        if position.turn() != human {
            let mv = engine.play_move_on_chessboard(&mut position)?;
            println!("{} plays {}", engine.name(), position.to_uci(&mv));
            continue;
        }

        let legal_moves: Vec<String> = position.legal_moves().iter().map(|mv| position.to_uci(mv)).collect();
        println!("Moves: {}", legal_moves.join(" "));
        println!("Enter move (q to quit, u to undo): ");
        let Some(input) = lines.next() else {
            return Ok(());
        };
        let input = input?;
        match input.trim() {
            "q" => return Ok(()),
            "u" => {
                // Take back the engine's reply and our own move
                position.pop();
                position.pop();
            }
            uci => {
                if let Err(e) = position.push_uci(uci) {
                    println!("Invalid move: {}", e);
                }
            }
        }
    }

    position.print();
    if let (Some(termination), Some(outcome)) = (position.termination(), position.outcome()) {
        println!("{:?}, {}", termination, outcome);
    }
    Ok(())
}
