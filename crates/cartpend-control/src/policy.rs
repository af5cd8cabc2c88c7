//! Dense tanh network mapping observation features to a cart command.

use std::fs;
use std::path::Path;

use cartpend::cartpend_math::{DMat, DVec};
use cartpend::{Controller, FEATURE_COUNT, Features};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{PolicyError, Result};

/// One fully connected layer: `tanh(W·x + b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    /// `outputs × inputs`
    weights: DMat,
    bias: DVec,
}

impl DenseLayer {
    /// Shapes are checked when the layer joins a [`FeedForwardPolicy`].
    pub fn new(weights: DMat, bias: DVec) -> Self {
        Self { weights, bias }
    }

    pub fn inputs(&self) -> usize {
        self.weights.ncols()
    }

    pub fn outputs(&self) -> usize {
        self.weights.nrows()
    }

    fn forward(&self, x: &DVec) -> DVec {
        (&self.weights * x + &self.bias).map(f64::tanh)
    }
}

/// Feed-forward policy: 8 features in, one command in `[-1, 1]` out.
///
/// Keeps the activations of the most recent [`forward`](Self::forward) pass
/// so a renderer can show them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolicySpec", into = "PolicySpec")]
pub struct FeedForwardPolicy {
    layers: Vec<DenseLayer>,
    activations: Vec<DVec>,
}

impl FeedForwardPolicy {
    /// Validate layer shapes and build the policy.
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self> {
        let first = layers.first().ok_or(PolicyError::Empty)?;
        if first.inputs() != FEATURE_COUNT {
            return Err(PolicyError::InputSize {
                expected: FEATURE_COUNT,
                found: first.inputs(),
            });
        }

        let mut width = FEATURE_COUNT;
        for (i, layer) in layers.iter().enumerate() {
            if layer.bias.len() != layer.outputs() {
                return Err(PolicyError::BiasMismatch {
                    layer: i,
                    rows: layer.outputs(),
                    bias: layer.bias.len(),
                });
            }
            if layer.inputs() != width {
                return Err(PolicyError::LayerMismatch {
                    layer: i,
                    expected: layer.inputs(),
                    found: width,
                });
            }
            width = layer.outputs();
        }
        if width != 1 {
            return Err(PolicyError::OutputSize(width));
        }

        Ok(Self::from_layers(layers))
    }

    /// Uniform random weights and biases in `[-1, 1)`.
    ///
    /// `hidden` lists the hidden layer widths; input and output sizes are fixed.
    pub fn random<R: Rng>(hidden: &[usize], rng: &mut R) -> Self {
        let sizes: Vec<usize> = std::iter::once(FEATURE_COUNT)
            .chain(hidden.iter().copied())
            .chain(std::iter::once(1))
            .collect();

        let layers = sizes
            .windows(2)
            .map(|pair| {
                let (inputs, outputs) = (pair[0], pair[1]);
                let weights = DMat::from_fn(outputs, inputs, |_, _| rng.random_range(-1.0..1.0));
                let bias = DVec::from_fn(outputs, |_, _| rng.random_range(-1.0..1.0));
                DenseLayer::new(weights, bias)
            })
            .collect();

        Self::from_layers(layers)
    }

    fn from_layers(layers: Vec<DenseLayer>) -> Self {
        let activations = std::iter::once(DVec::zeros(FEATURE_COUNT))
            .chain(layers.iter().map(|l| DVec::zeros(l.outputs())))
            .collect();
        Self {
            layers,
            activations,
        }
    }

    /// Parse weights from JSON: `{"layers": [{"weights": [[..], ..], "bias": [..]}, ..]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: PolicySpec = serde_json::from_str(json)?;
        Self::try_from(spec)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load weights from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let policy = Self::from_json(&fs::read_to_string(path)?)?;
        debug!(path = %path.display(), layers = ?policy.layer_sizes(), "loaded policy");
        Ok(policy)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Neuron count per layer, input layer included.
    pub fn layer_sizes(&self) -> Vec<usize> {
        self.activations.iter().map(|a| a.len()).collect()
    }

    /// Activations from the last forward pass, input layer first.
    pub fn activations(&self) -> &[DVec] {
        &self.activations
    }

    /// Run the network without recording activations.
    pub fn evaluate(&self, features: &Features) -> f64 {
        let x = self
            .layers
            .iter()
            .fold(DVec::from_vec(features.to_vec()), |x, layer| layer.forward(&x));
        x[0]
    }

    /// Run the network, recording every layer's activations.
    pub fn forward(&mut self, features: &Features) -> f64 {
        let mut x = DVec::from_vec(features.to_vec());
        self.activations[0].copy_from(&x);
        for (i, layer) in self.layers.iter().enumerate() {
            x = layer.forward(&x);
            self.activations[i + 1].copy_from(&x);
        }
        x[0]
    }
}

impl Controller for FeedForwardPolicy {
    fn act(&mut self, features: &Features) -> f64 {
        self.forward(features)
    }
}

/// On-disk form: plain nested arrays, row-major weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PolicySpec {
    layers: Vec<LayerSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayerSpec {
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

impl TryFrom<PolicySpec> for FeedForwardPolicy {
    type Error = PolicyError;

    fn try_from(spec: PolicySpec) -> Result<Self> {
        let layers = spec
            .layers
            .into_iter()
            .enumerate()
            .map(|(i, layer)| {
                let rows = layer.weights.len();
                let cols = layer.weights.first().map_or(0, Vec::len);
                if layer.weights.iter().any(|row| row.len() != cols) {
                    return Err(PolicyError::Ragged { layer: i });
                }
                let weights = DMat::from_fn(rows, cols, |r, c| layer.weights[r][c]);
                Ok(DenseLayer::new(weights, DVec::from_vec(layer.bias)))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(layers)
    }
}

impl From<FeedForwardPolicy> for PolicySpec {
    fn from(policy: FeedForwardPolicy) -> Self {
        let layers = policy
            .layers
            .iter()
            .map(|layer| LayerSpec {
                weights: layer
                    .weights
                    .row_iter()
                    .map(|row| row.iter().copied().collect())
                    .collect(),
                bias: layer.bias.iter().copied().collect(),
            })
            .collect();
        Self { layers }
    }
}
