use std::sync::Arc;
use crate::engine::{Engine, EngineError};
use crate::neural::constants::MOVE_INDEX_SIZE;
use crate::neural::{select_move, unmirror_probabilities, ModelError, PolicyModel, PositionEncoder};
use crate::position::{Move, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeuralEngineConfig {
    /// Encode Black-to-move positions from Black's side of the board. Must match the setting the
    /// model was trained with.
    pub mirror_if_black: bool,
    /// Fall back to the best scored legal move instead of failing when the top move is illegal.
    pub prevent_illegal_move: bool,
}

impl Default for NeuralEngineConfig {
    fn default() -> Self {
        NeuralEngineConfig {
            mirror_if_black: false,
            prevent_illegal_move: true,
        }
    }
}

/// Plays the move a policy model scores highest.
pub struct NeuralEngine {
    model: Arc<dyn PolicyModel>,
    encoder: PositionEncoder,
    config: NeuralEngineConfig,
}

impl NeuralEngine {
    pub fn new(model: Arc<dyn PolicyModel>, config: NeuralEngineConfig) -> Result<NeuralEngine, EngineError> {
        let encoder = PositionEncoder::new(model.input_channels(), config.mirror_if_black)?;
        Ok(NeuralEngine { model, encoder, config })
    }

    pub fn config(&self) -> NeuralEngineConfig {
        self.config
    }

    /// Model scores for every move index, in absolute board orientation.
    pub fn evaluate_moves_probabilities(&self, position: &Position) -> Result<Vec<f32>, EngineError> {
        let input = self.encoder.encode(position)?;
        let probabilities = self.model.infer(&input)?;
        if probabilities.len() != MOVE_INDEX_SIZE {
            return Err(ModelError::OutputSize {
                expected: MOVE_INDEX_SIZE,
                actual: probabilities.len(),
            }.into());
        }

        if self.encoder.is_mirrored(position) {
            unmirror_probabilities(&probabilities)
        } else {
            Ok(probabilities)
        }
    }
}

impl Engine for NeuralEngine {
    fn name(&self) -> &str {
        "neural"
    }

    fn play_move_on_chessboard(&mut self, position: &mut Position) -> Result<Move, EngineError> {
        let probabilities = self.evaluate_moves_probabilities(position)?;
        select_move(position, &probabilities, self.config.prevent_illegal_move)
    }
}

#[cfg(test)]
mod tests {
    use tch::Device;
    use super::*;
    use crate::neural::constants::NUM_CHANNELS;
    use crate::neural::{index_of, BoardTensor, ConvPolicyNet, ConvPolicyNetConfig, EncodingError};

    /// Scores the given move shapes highest regardless of the input.
    struct StubModel {
        favored: Vec<&'static str>,
        output_size: usize,
    }

    impl StubModel {
        fn favoring(favored: &[&'static str]) -> StubModel {
            StubModel {
                favored: favored.to_vec(),
                output_size: MOVE_INDEX_SIZE,
            }
        }
    }

    impl PolicyModel for StubModel {
        fn input_channels(&self) -> usize {
            NUM_CHANNELS
        }

        fn infer_batch(&self, inputs: &[BoardTensor]) -> Result<Vec<Vec<f32>>, ModelError> {
            let mut outputs = Vec::new();
            for input in inputs {
                if input.channels() != NUM_CHANNELS {
                    return Err(EncodingError::ChannelMismatch { expected: NUM_CHANNELS, actual: input.channels() }.into());
                }
                let mut probabilities = vec![0.; self.output_size];
                for (i, uci) in self.favored.iter().enumerate() {
                    let index = index_of(&uci.parse().unwrap()).unwrap();
                    probabilities[index] = 1. - i as f32 * 0.1;
                }
                outputs.push(probabilities);
            }
            Ok(outputs)
        }
    }

    fn engine(model: StubModel, mirror_if_black: bool, prevent_illegal_move: bool) -> NeuralEngine {
        NeuralEngine::new(Arc::new(model), NeuralEngineConfig { mirror_if_black, prevent_illegal_move }).unwrap()
    }

    #[test]
    fn test_plays_favored_move() {
        let mut position = Position::new();
        let mut engine = engine(StubModel::favoring(&["d2d4"]), false, true);
        let mv = engine.play_move_on_chessboard(&mut position).unwrap();
        assert_eq!(position.to_uci(&mv), "d2d4");
        assert_eq!(position.ply(), 1);
    }

    #[test]
    fn test_mirror_flag_changes_black_reply() {
        let mut position = Position::new();
        position.push_uci("e2e4").unwrap();

        // Mirrored, the model's "e2e4" means Black's e7e5
        let mut mirrored = position.clone();
        let mv = engine(StubModel::favoring(&["e2e4"]), true, true)
            .play_move_on_chessboard(&mut mirrored)
            .unwrap();
        assert_eq!(mirrored.to_uci(&mv), "e7e5");

        // In absolute orientation e2e4 is not legal for Black, so the first legal index wins
        let mut absolute = position.clone();
        let mv = engine(StubModel::favoring(&["e2e4"]), false, true)
            .play_move_on_chessboard(&mut absolute)
            .unwrap();
        assert_eq!(absolute.to_uci(&mv), "a7a5");
    }

    #[test]
    fn test_mirror_flag_is_irrelevant_for_white() {
        let position = Position::new();
        let mirrored = engine(StubModel::favoring(&["g1f3"]), true, true);
        let absolute = engine(StubModel::favoring(&["g1f3"]), false, true);
        assert_eq!(
            mirrored.evaluate_moves_probabilities(&position).unwrap(),
            absolute.evaluate_moves_probabilities(&position).unwrap()
        );
    }

    #[test]
    fn test_illegal_top_move_without_prevention() {
        let mut position = Position::new();
        let mut engine = engine(StubModel::favoring(&["e1e2", "e2e4"]), false, false);
        assert!(matches!(engine.play_move_on_chessboard(&mut position), Err(EngineError::IllegalMove { .. })));
        assert_eq!(position.ply(), 0);
    }

    #[test]
    fn test_wrong_output_size() {
        let model = StubModel { favored: Vec::new(), output_size: 1858 };
        let engine = engine(model, false, true);
        assert!(matches!(
            engine.evaluate_moves_probabilities(&Position::new()),
            Err(EngineError::Model(ModelError::OutputSize { expected: MOVE_INDEX_SIZE, actual: 1858 }))
        ));
    }

    #[test]
    fn test_game_over() {
        let mut position = Position::new();
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            position.push_uci(uci).unwrap();
        }
        let mut engine = engine(StubModel::favoring(&[]), true, true);
        assert!(matches!(engine.play_move_on_chessboard(&mut position), Err(EngineError::NoLegalMove)));
    }

    #[test]
    fn test_with_conv_policy_net() {
        let config = ConvPolicyNetConfig { num_layers: 1, features: 8, fc_hidden_size: 8, ..Default::default() };
        let model = Arc::new(ConvPolicyNet::new(Device::Cpu, config).unwrap());
        let mut engine = NeuralEngine::new(model, NeuralEngineConfig { mirror_if_black: true, prevent_illegal_move: true }).unwrap();

        let mut position = Position::new();
        for _ in 0..4 {
            let legal_moves = position.legal_moves();
            let mv = engine.play_move_on_chessboard(&mut position).unwrap();
            assert!(legal_moves.contains(&mv));
        }
        assert_eq!(position.ply(), 4);
    }
}
