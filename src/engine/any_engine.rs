use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use crate::engine::*;
use crate::neural::PolicyModel;
use crate::position::{Move, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    Random,
    RandomCapture,
    RandomCheck,
    Material,
    Neural,
}

const ALL_ENGINE_KINDS: [EngineKind; 5] = [
    EngineKind::Random,
    EngineKind::RandomCapture,
    EngineKind::RandomCheck,
    EngineKind::Material,
    EngineKind::Neural,
];

impl EngineKind {
    pub const fn name(&self) -> &'static str {
        match self {
            EngineKind::Random => "random",
            EngineKind::RandomCapture => "random-capture",
            EngineKind::RandomCheck => "random-check",
            EngineKind::Material => "material",
            EngineKind::Neural => "neural",
        }
    }

    pub fn iter() -> impl Iterator<Item = EngineKind> {
        ALL_ENGINE_KINDS.iter().copied()
    }

    pub const fn needs_model(&self) -> bool {
        matches!(self, EngineKind::Neural)
    }
}

impl Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown engine {0:?}, expected random, random-capture, random-check, material or neural")]
pub struct ParseEngineKindError(pub String);

impl FromStr for EngineKind {
    type Err = ParseEngineKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        EngineKind::iter()
            .find(|kind| kind.name() == s)
            .ok_or(ParseEngineKindError(s))
    }
}

/// One of the engine variants, chosen when the engine is built.
pub enum AnyEngine {
    Random(RandomEngine),
    RandomCapture(RandomCaptureEngine),
    RandomCheck(RandomCheckEngine),
    Material(MaterialGreedyEngine),
    Neural(NeuralEngine),
}

impl AnyEngine {
    /// Builds an engine of the given kind. Heuristic engines use `seed` if given and fresh entropy
    /// otherwise; the neural engine needs `model`.
    pub fn build(
        kind: EngineKind,
        seed: Option<u64>,
        model: Option<Arc<dyn PolicyModel>>,
        config: NeuralEngineConfig,
    ) -> Result<AnyEngine, EngineError> {
        let engine = match (kind, seed) {
            (EngineKind::Random, Some(seed)) => AnyEngine::Random(RandomEngine::with_seed(seed)),
            (EngineKind::Random, None) => AnyEngine::Random(RandomEngine::new()),
            (EngineKind::RandomCapture, Some(seed)) => AnyEngine::RandomCapture(RandomCaptureEngine::with_seed(seed)),
            (EngineKind::RandomCapture, None) => AnyEngine::RandomCapture(RandomCaptureEngine::new()),
            (EngineKind::RandomCheck, Some(seed)) => AnyEngine::RandomCheck(RandomCheckEngine::with_seed(seed)),
            (EngineKind::RandomCheck, None) => AnyEngine::RandomCheck(RandomCheckEngine::new()),
            (EngineKind::Material, Some(seed)) => AnyEngine::Material(MaterialGreedyEngine::with_seed(seed)),
            (EngineKind::Material, None) => AnyEngine::Material(MaterialGreedyEngine::new()),
            (EngineKind::Neural, _) => {
                let model = model.ok_or(EngineError::ModelRequired)?;
                AnyEngine::Neural(NeuralEngine::new(model, config)?)
            }
        };
        Ok(engine)
    }

    pub fn heuristic(kind: EngineKind, seed: Option<u64>) -> Result<AnyEngine, EngineError> {
        AnyEngine::build(kind, seed, None, NeuralEngineConfig::default())
    }

    pub fn kind(&self) -> EngineKind {
        match self {
            AnyEngine::Random(_) => EngineKind::Random,
            AnyEngine::RandomCapture(_) => EngineKind::RandomCapture,
            AnyEngine::RandomCheck(_) => EngineKind::RandomCheck,
            AnyEngine::Material(_) => EngineKind::Material,
            AnyEngine::Neural(_) => EngineKind::Neural,
        }
    }
}

impl Engine for AnyEngine {
    fn name(&self) -> &str {
        match self {
            AnyEngine::Random(engine) => engine.name(),
            AnyEngine::RandomCapture(engine) => engine.name(),
            AnyEngine::RandomCheck(engine) => engine.name(),
            AnyEngine::Material(engine) => engine.name(),
            AnyEngine::Neural(engine) => engine.name(),
        }
    }

    fn play_move_on_chessboard(&mut self, position: &mut Position) -> Result<Move, EngineError> {
        match self {
            AnyEngine::Random(engine) => engine.play_move_on_chessboard(position),
            AnyEngine::RandomCapture(engine) => engine.play_move_on_chessboard(position),
            AnyEngine::RandomCheck(engine) => engine.play_move_on_chessboard(position),
            AnyEngine::Material(engine) => engine.play_move_on_chessboard(position),
            AnyEngine::Neural(engine) => engine.play_move_on_chessboard(position),
        }
    }
}
