//! A single tanh neuron.

use rand::Rng;

use super::{Module, NnError};
use crate::autograd::{Tanh, ValueRef};

/// `tanh(b + Σ wᵢ·xᵢ)` over leaf weights `w` and a leaf bias `b`.
pub struct Neuron {
    w: Vec<ValueRef>,
    b: ValueRef,
}

impl Neuron {
    /// Creates a neuron with `nin` weights and a bias, each drawn uniformly from
    /// `[-init_range, init_range]`.
    ///
    /// # Panics
    ///
    /// Panics if `init_range` is negative or not finite.
    pub fn new<R: Rng>(nin: usize, init_range: f64, rng: &mut R) -> Self {
        let mut draw = || ValueRef::new(rng.random_range(-init_range..=init_range));
        let w = (0..nin).map(|_| draw()).collect();
        let b = draw();
        Neuron { w, b }
    }

    /// Creates a neuron with fixed weights and bias.
    #[must_use]
    pub fn from_weights(w: &[f64], b: f64) -> Self {
        Neuron {
            w: super::values(w),
            b: ValueRef::new(b),
        }
    }

    /// Number of inputs (weights).
    #[must_use]
    pub fn nin(&self) -> usize {
        self.w.len()
    }

    /// Builds `tanh(b + Σ wᵢ·xᵢ)`, accumulating from the bias in input order.
    pub fn forward(&self, x: &[ValueRef]) -> Result<ValueRef, NnError> {
        if x.len() != self.w.len() {
            return Err(NnError::InputSize {
                expected: self.w.len(),
                got: x.len(),
            });
        }
        let act = self
            .w
            .iter()
            .zip(x)
            .fold(self.b.clone(), |act, (wi, xi)| &act + &(wi * xi));
        Ok(act.tanh())
    }
}

impl Module for Neuron {
    /// Weights in input order, then the bias.
    fn parameters(&self) -> Vec<ValueRef> {
        let mut params = self.w.clone();
        params.push(self.b.clone());
        params
    }
}
