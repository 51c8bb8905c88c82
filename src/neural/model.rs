use crate::neural::constants::MOVE_INDEX_SIZE;
use crate::neural::{BoardTensor, ModelError};

/// Anything that scores every move index for an encoded position.
///
/// Outputs are probability vectors of length `MOVE_INDEX_SIZE`, ordered like the move index
/// enumeration.
pub trait PolicyModel {
    /// Channel count the model expects its inputs to have.
    fn input_channels(&self) -> usize;

    fn infer_batch(&self, inputs: &[BoardTensor]) -> Result<Vec<Vec<f32>>, ModelError>;

    fn infer(&self, input: &BoardTensor) -> Result<Vec<f32>, ModelError> {
        self.infer_batch(std::slice::from_ref(input))?
            .pop()
            .ok_or(ModelError::OutputSize { expected: MOVE_INDEX_SIZE, actual: 0 })
    }
}
