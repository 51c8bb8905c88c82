//! The bridge between positions and the policy model: input encoding, the move index space, and
//! turning model output back into a move.

pub mod constants;
mod error;
mod move_shape;
mod board_tensor;
mod encoder;
mod move_index;
mod selector;
mod model;
mod conv_net;
mod device;

pub use error::*;
pub use move_shape::*;
pub use board_tensor::*;
pub use encoder::*;
pub use move_index::*;
pub use selector::*;
pub use model::*;
pub use conv_net::*;
pub use device::*;
