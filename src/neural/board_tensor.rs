use tch::{Device, Tensor};
use crate::neural::constants::{BOARD_SIZE, NUM_SQUARES};
use crate::neural::EncodingError;

/// A `[channels, 8, 8]` stack of board planes stored row-major as `[channel][rank][file]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardTensor {
    channels: usize,
    data: Vec<f32>,
}

impl BoardTensor {
    pub fn zeros(channels: usize) -> BoardTensor {
        BoardTensor {
            channels,
            data: vec![0.; channels * NUM_SQUARES],
        }
    }

    pub fn from_vec(channels: usize, data: Vec<f32>) -> Result<BoardTensor, EncodingError> {
        if data.len() != channels * NUM_SQUARES {
            return Err(EncodingError::ShapeMismatch {
                expected: channels * NUM_SQUARES,
                actual: data.len(),
            });
        }
        Ok(BoardTensor { channels, data })
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn shape(&self) -> [usize; 3] {
        [self.channels, BOARD_SIZE, BOARD_SIZE]
    }

    const fn offset(channel: usize, rank: usize, file: usize) -> usize {
        channel * NUM_SQUARES + rank * BOARD_SIZE + file
    }

    pub fn get(&self, channel: usize, rank: usize, file: usize) -> f32 {
        self.data[Self::offset(channel, rank, file)]
    }

    pub(crate) fn set(&mut self, channel: usize, rank: usize, file: usize, value: f32) {
        self.data[Self::offset(channel, rank, file)] = value;
    }

    pub(crate) fn fill_plane(&mut self, channel: usize, value: f32) {
        self.data[channel * NUM_SQUARES..(channel + 1) * NUM_SQUARES].fill(value);
    }

    pub fn plane(&self, channel: usize) -> &[f32] {
        &self.data[channel * NUM_SQUARES..(channel + 1) * NUM_SQUARES]
    }

    pub fn plane_sum(&self, channel: usize) -> f32 {
        self.plane(channel).iter().sum()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Copies the planes into a `[channels, 8, 8]` float tensor on `device`.
    pub fn to_tensor(&self, device: Device) -> Tensor {
        Tensor::from_slice(&self.data)
            .view([self.channels as i64, BOARD_SIZE as i64, BOARD_SIZE as i64])
            .to_device(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planes() {
        let mut tensor = BoardTensor::zeros(3);
        assert_eq!(tensor.shape(), [3, 8, 8]);
        tensor.set(1, 2, 3, 1.);
        tensor.fill_plane(2, 0.5);
        assert_eq!(tensor.get(1, 2, 3), 1.);
        assert_eq!(tensor.get(1, 3, 2), 0.);
        assert_eq!(tensor.plane_sum(0), 0.);
        assert_eq!(tensor.plane_sum(1), 1.);
        assert_eq!(tensor.plane_sum(2), 32.);
        assert_eq!(tensor.as_slice()[64 + 2 * 8 + 3], 1.);
    }

    #[test]
    fn test_from_vec() {
        assert!(BoardTensor::from_vec(2, vec![0.; 128]).is_ok());
        assert_eq!(
            BoardTensor::from_vec(2, vec![0.; 100]),
            Err(EncodingError::ShapeMismatch { expected: 128, actual: 100 })
        );
    }

    #[test]
    fn test_to_tensor() {
        let mut board_tensor = BoardTensor::zeros(2);
        board_tensor.set(1, 7, 0, 1.);
        let tensor = board_tensor.to_tensor(Device::Cpu);
        assert_eq!(tensor.size(), vec![2, 8, 8]);
        assert_eq!(tensor.double_value(&[1, 7, 0]), 1.);
        assert_eq!(tensor.double_value(&[0, 7, 0]), 0.);
    }
}
