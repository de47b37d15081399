//! Multi-layer perceptron: layers chained output to input.

use rand::Rng;

use super::{Layer, Module, NnError};
use crate::autograd::ValueRef;

/// A stack of [`Layer`]s with sizes `nin → nouts[0] → … → nouts[k-1]`.
pub struct Mlp {
    nin: usize,
    layers: Vec<Layer>,
}

impl Mlp {
    /// Builds one layer per entry in `nouts`, randomly initialized from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if `init_range` is negative or not finite.
    pub fn new<R: Rng>(nin: usize, nouts: &[usize], init_range: f64, rng: &mut R) -> Self {
        let mut layers = Vec::with_capacity(nouts.len());
        let mut width = nin;
        for &nout in nouts {
            layers.push(Layer::new(width, nout, init_range, rng));
            width = nout;
        }
        log::debug!("built mlp {nin} -> {nouts:?}");
        Mlp { nin, layers }
    }

    /// Input width.
    #[must_use]
    pub fn nin(&self) -> usize {
        self.nin
    }

    /// Output width (the input width when there are no layers).
    #[must_use]
    pub fn nout(&self) -> usize {
        self.layers.last().map_or(self.nin, Layer::nout)
    }

    /// The layers, input side first.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Threads `x` through every layer in order.
    pub fn forward(&self, x: &[ValueRef]) -> Result<Vec<ValueRef>, NnError> {
        let mut x = x.to_vec();
        for layer in &self.layers {
            x = layer.forward(&x)?;
        }
        Ok(x)
    }
}

impl Module for Mlp {
    /// Parameters of every layer, in layer order.
    fn parameters(&self) -> Vec<ValueRef> {
        self.layers.iter().flat_map(Module::parameters).collect()
    }
}
