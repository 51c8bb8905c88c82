use std::path::Path;
use tch::{nn, Device, Kind, Tensor};
use crate::neural::constants::{BOARD_SIZE, MOVE_INDEX_SIZE, NUM_CHANNELS};
use crate::neural::{BoardTensor, EncodingError, ModelError, PolicyModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvPolicyNetConfig {
    pub channels: usize,
    pub num_layers: usize,
    pub features: i64,
    pub fc_hidden_size: i64,
}

impl Default for ConvPolicyNetConfig {
    fn default() -> Self {
        ConvPolicyNetConfig {
            channels: NUM_CHANNELS,
            num_layers: 12,
            features: 64,
            fc_hidden_size: 64,
        }
    }
}

/// Convolutional policy network: a stack of 3x3 conv blocks, global average pooling and a small
/// fully connected head with one logit per move index.
#[derive(Debug)]
pub struct ConvPolicyNet {
    vs: nn::VarStore,
    config: ConvPolicyNetConfig,
    blocks: Vec<(nn::Conv2D, nn::BatchNorm)>,
    final_conv: nn::Conv2D,
    fc1: nn::Linear,
    fc2: nn::Linear,
    output: nn::Linear,
}

impl ConvPolicyNet {
    pub fn new(device: Device, config: ConvPolicyNetConfig) -> Result<ConvPolicyNet, ModelError> {
        if config.channels != NUM_CHANNELS {
            return Err(EncodingError::ChannelMismatch {
                expected: NUM_CHANNELS,
                actual: config.channels,
            }.into());
        }

        let vs = nn::VarStore::new(device);
        let root = &vs.root();

        let mut blocks = Vec::with_capacity(config.num_layers);
        let mut in_channels = config.channels as i64;
        for i in 0..config.num_layers {
            let padded = nn::ConvConfig { padding: 1, ..Default::default() };
            let conv = nn::conv2d(root / format!("conv{}", i), in_channels, config.features, 3, padded);
            let bn = nn::batch_norm2d(root / format!("bn{}", i), config.features, Default::default());
            blocks.push((conv, bn));
            in_channels = config.features;
        }

        // Final conv has no bias, its output goes straight into the pooling
        let final_conv = nn::conv2d(
            root / "final_conv",
            in_channels,
            config.features,
            3,
            nn::ConvConfig { padding: 1, bias: false, ..Default::default() },
        );

        let fc1 = nn::linear(root / "fc1", config.features, config.fc_hidden_size, Default::default());
        let fc2 = nn::linear(root / "fc2", config.fc_hidden_size, config.fc_hidden_size, Default::default());
        let output = nn::linear(root / "output", config.fc_hidden_size, MOVE_INDEX_SIZE as i64, Default::default());

        Ok(ConvPolicyNet {
            vs,
            config,
            blocks,
            final_conv,
            fc1,
            fc2,
            output,
        })
    }

    /// Builds the network and restores its weights from `path` if the file exists.
    /// A missing file leaves the freshly initialized weights in place.
    pub fn load<P: AsRef<Path>>(path: P, device: Device, config: ConvPolicyNetConfig) -> Result<ConvPolicyNet, ModelError> {
        let mut net = ConvPolicyNet::new(device, config)?;
        if path.as_ref().exists() {
            net.vs.load(path)?;
        }
        Ok(net)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
        self.vs.save(path)?;
        Ok(())
    }

    pub fn config(&self) -> ConvPolicyNetConfig {
        self.config
    }

    pub fn device(&self) -> Device {
        self.vs.device()
    }

    pub fn var_store(&self) -> &nn::VarStore {
        &self.vs
    }

    /// Logits of shape `[batch, MOVE_INDEX_SIZE]` for inputs of shape `[batch, channels, 8, 8]`.
    pub fn forward_t(&self, x: &Tensor, train: bool) -> Tensor {
        let board_size = BOARD_SIZE as i64;
        let mut x = x.view([-1, self.config.channels as i64, board_size, board_size]);

        for (conv, bn) in &self.blocks {
            x = x.apply(conv).apply_t(bn, train).relu();
        }

        x.apply(&self.final_conv)
            .adaptive_avg_pool2d([1, 1])
            .flatten(1, -1)
            .apply(&self.fc1)
            .relu()
            .apply(&self.fc2)
            .relu()
            .apply(&self.output)
    }
}

impl PolicyModel for ConvPolicyNet {
    fn input_channels(&self) -> usize {
        self.config.channels
    }

    fn infer_batch(&self, inputs: &[BoardTensor]) -> Result<Vec<Vec<f32>>, ModelError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let device = self.device();
        let mut tensors = Vec::with_capacity(inputs.len());
        for input in inputs {
            if input.channels() != self.config.channels {
                return Err(EncodingError::ChannelMismatch {
                    expected: self.config.channels,
                    actual: input.channels(),
                }.into());
            }
            tensors.push(input.to_tensor(device));
        }
        let batch = Tensor::stack(&tensors, 0);

        let probabilities = tch::no_grad(|| self.forward_t(&batch, false).softmax(-1, Kind::Float));
        let size = probabilities.size();
        if size.len() != 2 || size[1] != MOVE_INDEX_SIZE as i64 {
            return Err(ModelError::OutputSize {
                expected: MOVE_INDEX_SIZE,
                actual: size.last().copied().unwrap_or(0) as usize,
            });
        }

        let flat = Vec::<f32>::try_from(&probabilities.to_device(Device::Cpu).flatten(0, -1))?;
        Ok(flat.chunks(MOVE_INDEX_SIZE).map(|chunk| chunk.to_vec()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neural::encode;
    use crate::position::Position;

    fn small_config() -> ConvPolicyNetConfig {
        ConvPolicyNetConfig {
            num_layers: 2,
            features: 8,
            fc_hidden_size: 16,
            ..Default::default()
        }
    }

    #[test]
    fn test_forward_shape() {
        let net = ConvPolicyNet::new(Device::Cpu, small_config()).unwrap();
        let input = encode(&Position::new(), false).unwrap().to_tensor(Device::Cpu);
        let logits = net.forward_t(&Tensor::stack(&[input.shallow_clone(), input], 0), false);
        assert_eq!(logits.size(), vec![2, MOVE_INDEX_SIZE as i64]);
    }

    #[test]
    fn test_infer() {
        let net = ConvPolicyNet::new(Device::Cpu, small_config()).unwrap();
        let input = encode(&Position::new(), false).unwrap();
        let probabilities = net.infer(&input).unwrap();
        assert_eq!(probabilities.len(), MOVE_INDEX_SIZE);
        assert!(probabilities.iter().all(|&p| p >= 0.));
        let sum: f32 = probabilities.iter().sum();
        assert!((sum - 1.).abs() < 1e-3);
    }

    #[test]
    fn test_infer_batch() {
        let net = ConvPolicyNet::new(Device::Cpu, small_config()).unwrap();
        let mut position = Position::new();
        let first = encode(&position, true).unwrap();
        position.push_uci("e2e4").unwrap();
        let second = encode(&position, true).unwrap();

        let outputs = net.infer_batch(&[first.clone(), second]).unwrap();
        assert_eq!(outputs.len(), 2);
        assert!(outputs.iter().all(|output| output.len() == MOVE_INDEX_SIZE));

        let single = net.infer(&first).unwrap();
        for (a, b) in single.iter().zip(&outputs[0]) {
            assert!((a - b).abs() < 1e-6);
        }

        assert!(net.infer_batch(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_channel_mismatch() {
        let config = ConvPolicyNetConfig { channels: 17, ..small_config() };
        assert!(matches!(
            ConvPolicyNet::new(Device::Cpu, config),
            Err(ModelError::Encoding(EncodingError::ChannelMismatch { expected: NUM_CHANNELS, actual: 17 }))
        ));

        let net = ConvPolicyNet::new(Device::Cpu, small_config()).unwrap();
        assert!(matches!(
            net.infer(&BoardTensor::zeros(12)),
            Err(ModelError::Encoding(EncodingError::ChannelMismatch { .. }))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("torrechess_conv_policy_net_{}.ot", std::process::id()));
        let net = ConvPolicyNet::new(Device::Cpu, small_config()).unwrap();
        net.save(&path).unwrap();

        let loaded = ConvPolicyNet::load(&path, Device::Cpu, small_config()).unwrap();
        let input = encode(&Position::new(), false).unwrap();
        assert_eq!(net.infer(&input).unwrap(), loaded.infer(&input).unwrap());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_starts_fresh() {
        let path = std::env::temp_dir().join("torrechess_missing_weights.ot");
        let net = ConvPolicyNet::load(&path, Device::Cpu, small_config()).unwrap();
        assert_eq!(net.config(), small_config());
    }
}
