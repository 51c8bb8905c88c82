use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::engine::{play_uniformly_random, Engine, EngineError};
use crate::position::{Move, Position};

/// Plays a uniformly random legal move.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> RandomEngine {
        RandomEngine { rng: StdRng::from_entropy() }
    }

    pub fn with_seed(seed: u64) -> RandomEngine {
        RandomEngine { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        RandomEngine::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "random"
    }

    fn play_move_on_chessboard(&mut self, position: &mut Position) -> Result<Move, EngineError> {
        let legal_moves = position.legal_moves();
        play_uniformly_random(&mut self.rng, position, &legal_moves)
    }
}

/// Plays a random capture when there is one, otherwise any random legal move.
#[derive(Debug, Clone)]
pub struct RandomCaptureEngine {
    rng: StdRng,
}

impl RandomCaptureEngine {
    pub fn new() -> RandomCaptureEngine {
        RandomCaptureEngine { rng: StdRng::from_entropy() }
    }

    pub fn with_seed(seed: u64) -> RandomCaptureEngine {
        RandomCaptureEngine { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomCaptureEngine {
    fn default() -> Self {
        RandomCaptureEngine::new()
    }
}

impl Engine for RandomCaptureEngine {
    fn name(&self) -> &str {
        "random-capture"
    }

    fn play_move_on_chessboard(&mut self, position: &mut Position) -> Result<Move, EngineError> {
        let legal_moves = position.legal_moves();
        let captures: Vec<Move> = legal_moves
            .iter()
            .filter(|mv| position.is_capture(mv))
            .cloned()
            .collect();

        if captures.is_empty() {
            play_uniformly_random(&mut self.rng, position, &legal_moves)
        } else {
            play_uniformly_random(&mut self.rng, position, &captures)
        }
    }
}

/// Plays a random checking move when there is one, otherwise any random legal move.
#[derive(Debug, Clone)]
pub struct RandomCheckEngine {
    rng: StdRng,
}

impl RandomCheckEngine {
    pub fn new() -> RandomCheckEngine {
        RandomCheckEngine { rng: StdRng::from_entropy() }
    }

    pub fn with_seed(seed: u64) -> RandomCheckEngine {
        RandomCheckEngine { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomCheckEngine {
    fn default() -> Self {
        RandomCheckEngine::new()
    }
}

impl Engine for RandomCheckEngine {
    fn name(&self) -> &str {
        "random-check"
    }

    fn play_move_on_chessboard(&mut self, position: &mut Position) -> Result<Move, EngineError> {
        let legal_moves = position.legal_moves();
        let checks: Vec<Move> = legal_moves
            .iter()
            .filter(|mv| position.gives_check(mv))
            .cloned()
            .collect();

        if checks.is_empty() {
            play_uniformly_random(&mut self.rng, position, &legal_moves)
        } else {
            play_uniformly_random(&mut self.rng, position, &checks)
        }
    }
}
