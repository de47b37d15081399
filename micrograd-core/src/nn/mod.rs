//! Neuron, layer and multi-layer perceptron built from scalar autograd nodes.
//!
//! Every weight and bias is a leaf [`ValueRef`]. A forward pass builds a fresh graph
//! on top of those leaves, so gradients from a backward pass land on the parameters
//! returned by [`Module::parameters`].

mod error;
mod layer;
mod mlp;
mod neuron;

pub use error::NnError;
pub use layer::Layer;
pub use mlp::Mlp;
pub use neuron::Neuron;

use crate::autograd::{ScalarNode, ValueRef};

/// Anything that owns trainable leaf parameters.
pub trait Module {
    /// All trainable leaves, in a stable order.
    fn parameters(&self) -> Vec<ValueRef>;

    /// Zeros the gradient of every parameter.
    fn zero_grad(&self) {
        for p in self.parameters() {
            p.zero_grad();
        }
    }
}

/// Wraps raw inputs as leaf nodes.
#[must_use]
pub fn values(data: &[f64]) -> Vec<ValueRef> {
    data.iter().copied().map(ValueRef::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn neuron_forward_is_tanh_of_weighted_sum() {
        let n = Neuron::from_weights(&[0.5, -1.0], 0.25);
        let x = values(&[2.0, 1.0]);
        let out = n.forward(&x).unwrap();
        assert_relative_eq!(out.data(), (0.25_f64 + 1.0 - 1.0).tanh(), epsilon = 1e-12);
    }

    #[test]
    fn neuron_backward_reaches_weights_bias_and_inputs() {
        let n = Neuron::from_weights(&[0.5, -1.0], 0.0);
        let x = values(&[2.0, 3.0]);
        let out = n.forward(&x).unwrap();
        out.backward();

        // act = -2, d tanh = 1 - tanh(-2)^2
        let dt = 1.0 - (-2.0_f64).tanh().powi(2);
        let params = n.parameters();
        assert_eq!(params.len(), 3);
        assert_relative_eq!(params[0].grad(), 2.0 * dt, epsilon = 1e-12);
        assert_relative_eq!(params[1].grad(), 3.0 * dt, epsilon = 1e-12);
        assert_relative_eq!(params[2].grad(), dt, epsilon = 1e-12);
        assert_relative_eq!(x[0].grad(), 0.5 * dt, epsilon = 1e-12);
        assert_relative_eq!(x[1].grad(), -dt, epsilon = 1e-12);
    }

    #[test]
    fn neuron_rejects_wrong_input_length() {
        let n = Neuron::from_weights(&[1.0, 1.0, 1.0], 0.0);
        let err = n.forward(&values(&[1.0])).unwrap_err();
        assert_eq!(
            err,
            NnError::InputSize {
                expected: 3,
                got: 1
            }
        );
        assert_eq!(err.to_string(), "expected 3 inputs, got 1");
    }

    #[test]
    fn neuron_init_within_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = Neuron::new(16, 0.5, &mut rng);
        assert_eq!(n.nin(), 16);
        for p in n.parameters() {
            assert!(p.is_leaf());
            assert!((-0.5..=0.5).contains(&p.data()));
        }
    }

    #[test]
    fn same_seed_same_parameters() {
        let a = Mlp::new(3, &[4, 4, 1], 1.0, &mut StdRng::seed_from_u64(42));
        let b = Mlp::new(3, &[4, 4, 1], 1.0, &mut StdRng::seed_from_u64(42));
        let pa: Vec<f64> = a.parameters().iter().map(ValueRef::data).collect();
        let pb: Vec<f64> = b.parameters().iter().map(ValueRef::data).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn layer_shapes_and_parameter_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Layer::new(3, 2, 1.0, &mut rng);
        assert_eq!(layer.nin(), 3);
        assert_eq!(layer.nout(), 2);
        assert_eq!(layer.parameters().len(), 2 * (3 + 1));
        assert_eq!(layer.neurons().len(), 2);
        assert!(layer.neurons().iter().all(|n| n.nin() == 3));
        let outs = layer.forward(&values(&[0.4, 0.7, 0.8])).unwrap();
        assert_eq!(outs.len(), 2);
        for o in &outs {
            assert!(o.data().abs() < 1.0);
        }
    }

    #[test]
    fn layer_backward_through_summed_outputs() {
        let layer = Layer::from_neurons(vec![
            Neuron::from_weights(&[1.0], 0.0),
            Neuron::from_weights(&[-1.0], 0.0),
        ]);
        let x = values(&[0.5]);
        let outs = layer.forward(&x).unwrap();
        let total = &outs[0] + &outs[1];
        total.backward();
        // tanh is odd, so the two paths cancel at the input
        assert_relative_eq!(x[0].grad(), 0.0, epsilon = 1e-12);
        let dt = 1.0 - 0.5_f64.tanh().powi(2);
        assert_relative_eq!(layer.parameters()[0].grad(), 0.5 * dt, epsilon = 1e-12);
    }

    #[test]
    fn mlp_parameter_count_and_output_width() {
        let mut rng = StdRng::seed_from_u64(42);
        let mlp = Mlp::new(3, &[4, 4, 1], 1.0, &mut rng);
        assert_eq!(mlp.nin(), 3);
        assert_eq!(mlp.nout(), 1);
        assert_eq!(mlp.layers().len(), 3);
        assert_eq!(mlp.parameters().len(), 4 * 4 + 4 * 5 + 5);
        let out = mlp.forward(&values(&[0.4, 0.7, 0.8])).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn mlp_without_layers_is_identity() {
        let mut rng = StdRng::seed_from_u64(0);
        let mlp = Mlp::new(2, &[], 1.0, &mut rng);
        assert_eq!(mlp.nout(), 2);
        assert!(mlp.parameters().is_empty());
        let x = values(&[1.0, 2.0]);
        let out = mlp.forward(&x).unwrap();
        assert!(out[0].ptr_eq(&x[0]));
    }

    #[test]
    fn mlp_rejects_wrong_input_length() {
        let mut rng = StdRng::seed_from_u64(0);
        let mlp = Mlp::new(3, &[2, 1], 1.0, &mut rng);
        assert!(matches!(
            mlp.forward(&values(&[1.0, 2.0])),
            Err(NnError::InputSize { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn zero_grad_clears_every_parameter() {
        let mut rng = StdRng::seed_from_u64(3);
        let mlp = Mlp::new(2, &[3, 1], 1.0, &mut rng);
        let out = mlp.forward(&values(&[0.1, -0.2])).unwrap();
        out[0].backward();
        assert!(mlp.parameters().iter().any(|p| p.grad() != 0.0));
        mlp.zero_grad();
        assert!(mlp.parameters().iter().all(|p| p.grad() == 0.0));
    }
}
