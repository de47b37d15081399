//! A fully connected layer of tanh neurons.

use rand::Rng;

use super::{Module, Neuron, NnError};
use crate::autograd::ValueRef;

/// `nout` neurons that all read the same `nin` inputs.
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Creates `nout` randomly initialized neurons with `nin` inputs each.
    ///
    /// # Panics
    ///
    /// Panics if `init_range` is negative or not finite.
    pub fn new<R: Rng>(nin: usize, nout: usize, init_range: f64, rng: &mut R) -> Self {
        Layer {
            neurons: (0..nout).map(|_| Neuron::new(nin, init_range, rng)).collect(),
        }
    }

    /// Wraps already built neurons; they should all share the same input width.
    #[must_use]
    pub fn from_neurons(neurons: Vec<Neuron>) -> Self {
        Layer { neurons }
    }

    /// Input width, taken from the first neuron (0 for an empty layer).
    #[must_use]
    pub fn nin(&self) -> usize {
        self.neurons.first().map_or(0, Neuron::nin)
    }

    /// Number of neurons, i.e. output width.
    #[must_use]
    pub fn nout(&self) -> usize {
        self.neurons.len()
    }

    /// The layer's neurons, in output order.
    #[must_use]
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// One output per neuron. Every input node fans out to every neuron.
    pub fn forward(&self, x: &[ValueRef]) -> Result<Vec<ValueRef>, NnError> {
        self.neurons.iter().map(|n| n.forward(x)).collect()
    }
}

impl Module for Layer {
    fn parameters(&self) -> Vec<ValueRef> {
        self.neurons.iter().flat_map(Module::parameters).collect()
    }
}
