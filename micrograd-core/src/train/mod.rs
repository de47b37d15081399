//! Gradient-descent training of an [`Mlp`] on a squared-error loss.
//!
//! Each step rebuilds the forward graph over every sample, sums the squared errors,
//! zeros parameter gradients, runs one backward pass and applies a plain SGD update
//! to the leaf parameters.

mod error;

pub use error::TrainError;

use log::{debug, info};

use crate::autograd::{Pow, ScalarNode, ValueRef};
use crate::config::Config;
use crate::nn::{values, Mlp, Module};

/// One training example: raw inputs and the expected scalar output.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub inputs: Vec<f64>,
    pub target: f64,
}

impl Sample {
    #[must_use]
    pub fn new(inputs: Vec<f64>, target: f64) -> Self {
        Sample { inputs, target }
    }
}

/// Loss recorded at every step, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrainReport {
    pub losses: Vec<f64>,
}

impl TrainReport {
    /// Loss before the first update.
    #[must_use]
    pub fn first(&self) -> Option<f64> {
        self.losses.first().copied()
    }

    /// Loss before the last update.
    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.losses.last().copied()
    }
}

/// `0 + Σ (targetᵢ − predᵢ)²`, built from graph nodes so it can be backpropagated.
pub fn squared_error_loss(
    preds: &[ValueRef],
    targets: &[ValueRef],
) -> Result<ValueRef, TrainError> {
    if preds.len() != targets.len() {
        return Err(TrainError::LengthMismatch {
            preds: preds.len(),
            targets: targets.len(),
        });
    }
    Ok(preds
        .iter()
        .zip(targets)
        .fold(ValueRef::new(0.0), |loss, (pred, target)| {
            &loss + &(target - pred).pow(2.0)
        }))
}

/// `p.value += -learning_rate * p.grad` for every parameter.
pub fn sgd_step(params: &[ValueRef], learning_rate: f64) {
    for p in params {
        p.set_data(p.data() + -learning_rate * p.grad());
    }
}

/// Runs `config.num_steps` steps of full-batch gradient descent on `samples`.
///
/// `config` is validated first. The network must have a single output. Stops with [`TrainError::NonFiniteLoss`]
/// before updating parameters if the loss turns NaN or infinite.
pub fn train(mlp: &Mlp, samples: &[Sample], config: &Config) -> Result<TrainReport, TrainError> {
    config.validate()?;
    if samples.is_empty() {
        return Err(TrainError::EmptyDataset);
    }
    if mlp.nout() != 1 {
        return Err(TrainError::OutputWidth { got: mlp.nout() });
    }

    let xs: Vec<Vec<ValueRef>> = samples.iter().map(|s| values(&s.inputs)).collect();
    let ys: Vec<ValueRef> = samples.iter().map(|s| ValueRef::new(s.target)).collect();
    let params = mlp.parameters();
    debug!(
        "training {} params on {} samples for {} steps",
        params.len(),
        samples.len(),
        config.num_steps
    );

    let mut report = TrainReport {
        losses: Vec::with_capacity(config.num_steps),
    };
    for step in 0..config.num_steps {
        let mut ypred = Vec::with_capacity(xs.len());
        for x in &xs {
            let out = mlp.forward(x)?;
            let pred = out
                .into_iter()
                .next()
                .ok_or(TrainError::OutputWidth { got: 0 })?;
            ypred.push(pred);
        }
        let loss = squared_error_loss(&ypred, &ys)?;
        let loss_value = loss.data();
        if !loss_value.is_finite() {
            return Err(TrainError::NonFiniteLoss { step });
        }

        mlp.zero_grad();
        loss.backward();
        sgd_step(&params, config.learning_rate);

        if step == 0 || (step + 1) % config.loss_log_every == 0 || step + 1 == config.num_steps {
            info!(
                "step {:4} / {:4} | loss {:.6}",
                step + 1,
                config.num_steps,
                loss_value
            );
        }
        report.losses.push(loss_value);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::ConfigError;
    use crate::nn::{Layer, Neuron};

    fn toy_samples() -> Vec<Sample> {
        vec![
            Sample::new(vec![2.0, 3.0, -1.0], 1.0),
            Sample::new(vec![3.0, -1.0, 0.5], -1.0),
            Sample::new(vec![0.5, 1.0, 1.0], -1.0),
            Sample::new(vec![1.0, 1.0, -1.0], 1.0),
        ]
    }

    #[test]
    fn squared_error_loss_value_and_gradient() {
        let preds = values(&[0.5, -0.25]);
        let targets = values(&[1.0, -1.0]);
        let loss = squared_error_loss(&preds, &targets).unwrap();
        assert_relative_eq!(loss.data(), 0.25 + 0.5625, epsilon = 1e-12);
        loss.backward();
        // d/dpred (t - p)^2 = -2 (t - p)
        assert_relative_eq!(preds[0].grad(), -1.0, epsilon = 1e-12);
        assert_relative_eq!(preds[1].grad(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn squared_error_loss_rejects_length_mismatch() {
        let res = squared_error_loss(&values(&[1.0]), &values(&[1.0, 2.0]));
        assert_eq!(
            res.unwrap_err(),
            TrainError::LengthMismatch {
                preds: 1,
                targets: 2
            }
        );
    }

    #[test]
    fn sgd_step_moves_against_gradient() {
        let p = ValueRef::new(1.0);
        p.set_grad(2.0);
        sgd_step(std::slice::from_ref(&p), 0.1);
        assert_relative_eq!(p.data(), 0.8, epsilon = 1e-12);
        // the step does not touch gradients
        assert_eq!(p.grad(), 2.0);
    }

    #[test]
    fn training_reduces_loss() {
        let mut rng = StdRng::seed_from_u64(42);
        let mlp = Mlp::new(3, &[4, 4, 1], 1.0, &mut rng);
        let config = Config {
            num_steps: 50,
            loss_log_every: 10,
            ..Config::default()
        };
        let report = train(&mlp, &toy_samples(), &config).unwrap();
        assert_eq!(report.losses.len(), 50);
        let (first, last) = (report.first().unwrap(), report.last().unwrap());
        assert!(last < first, "loss went from {first} to {last}");
    }

    #[test]
    fn one_step_matches_manual_update() {
        // single neuron, single sample: loss = (t - tanh(w x + b))^2
        let mlp_layer = Layer::from_neurons(vec![Neuron::from_weights(&[0.5], 0.1)]);
        let w0 = mlp_layer.parameters()[0].data();
        let b0 = mlp_layer.parameters()[1].data();
        let (x, t, lr) = (2.0, 0.5, 0.1);

        let y = (w0 * x + b0).tanh();
        let dl_dact = -2.0 * (t - y) * (1.0 - y * y);

        let pred = mlp_layer.forward(&values(&[x])).unwrap();
        let loss = squared_error_loss(&pred, &values(&[t])).unwrap();
        loss.backward();
        sgd_step(&mlp_layer.parameters(), lr);

        let params = mlp_layer.parameters();
        assert_relative_eq!(params[0].data(), w0 - lr * dl_dact * x, epsilon = 1e-12);
        assert_relative_eq!(params[1].data(), b0 - lr * dl_dact, epsilon = 1e-12);
    }

    #[test]
    fn train_rejects_empty_dataset() {
        let mut rng = StdRng::seed_from_u64(0);
        let mlp = Mlp::new(3, &[1], 1.0, &mut rng);
        assert_eq!(
            train(&mlp, &[], &Config::default()).unwrap_err(),
            TrainError::EmptyDataset
        );
    }

    #[test]
    fn train_rejects_multi_output_network() {
        let mut rng = StdRng::seed_from_u64(0);
        let mlp = Mlp::new(3, &[2], 1.0, &mut rng);
        assert_eq!(
            train(&mlp, &toy_samples(), &Config::default()).unwrap_err(),
            TrainError::OutputWidth { got: 2 }
        );
    }

    #[test]
    fn train_surfaces_input_size_errors() {
        let mut rng = StdRng::seed_from_u64(0);
        let mlp = Mlp::new(2, &[1], 1.0, &mut rng);
        let err = train(&mlp, &toy_samples(), &Config::default()).unwrap_err();
        assert!(matches!(err, TrainError::Nn(_)));
    }

    #[test]
    fn train_rejects_zero_log_interval() {
        let mut rng = StdRng::seed_from_u64(0);
        let mlp = Mlp::new(1, &[1], 1.0, &mut rng);
        let samples = vec![Sample::new(vec![0.5], 1.0)];
        let config = Config {
            num_steps: 3,
            loss_log_every: 0,
            ..Config::default()
        };
        let err = train(&mlp, &samples, &config).unwrap_err();
        assert!(matches!(err, TrainError::Config(ConfigError::Validation(_))));
    }

    #[test]
    fn train_stops_on_non_finite_loss() {
        let mut rng = StdRng::seed_from_u64(0);
        let mlp = Mlp::new(1, &[1], 1.0, &mut rng);
        let samples = vec![Sample::new(vec![f64::NAN], 1.0)];
        let before: Vec<f64> = mlp.parameters().iter().map(ValueRef::data).collect();
        let err = train(&mlp, &samples, &Config::default()).unwrap_err();
        assert_eq!(err, TrainError::NonFiniteLoss { step: 0 });
        let after: Vec<f64> = mlp.parameters().iter().map(ValueRef::data).collect();
        assert_eq!(before, after);
    }
}
