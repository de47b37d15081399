//! End-to-end demonstration: a neuron, a layer and an MLP forward/backward on a fixed
//! input, then gradient-descent training on a four-sample toy dataset.

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::autograd::{ScalarNode, ValueRef};
use crate::config::Config;
use crate::nn::{values, Layer, Mlp, Module, Neuron};
use crate::train::{train, Sample, TrainReport};

/// Fixed input fed to the neuron, layer and MLP demos.
pub const DEMO_INPUT: [f64; 3] = [0.4, 0.7, 0.8];

/// What each stage of [`run`] produced.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoReport {
    pub neuron_output: f64,
    pub layer_outputs: Vec<f64>,
    pub mlp_output: f64,
    pub training: TrainReport,
}

/// The four-sample toy dataset: three inputs, target ±1.
#[must_use]
pub fn toy_dataset() -> Vec<Sample> {
    vec![
        Sample::new(vec![2.0, 3.0, -1.0], 1.0),
        Sample::new(vec![3.0, -1.0, 0.5], -1.0),
        Sample::new(vec![0.5, 1.0, 1.0], -1.0),
        Sample::new(vec![1.0, 1.0, -1.0], 1.0),
    ]
}

fn fmt_list(nodes: &[ValueRef], f: impl Fn(&ValueRef) -> f64) -> String {
    nodes
        .iter()
        .map(|n| format!("{:.4}", f(n)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Runs every demo stage with parameters drawn from `config.seed`.
pub fn run(config: &Config) -> crate::Result<DemoReport> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let nin = DEMO_INPUT.len();

    // --- neuron ---
    let neuron = Neuron::new(nin, config.init_range, &mut rng);
    let params = neuron.parameters();
    info!("neuron params: [{}]", fmt_list(&params, ValueRef::data));
    let x = values(&DEMO_INPUT);
    let out = neuron.forward(&x)?;
    out.backward();
    info!("neuron output: {out}");
    for (i, xi) in x.iter().enumerate() {
        info!("  x[{i}]: {xi}");
    }
    info!("neuron param grads: [{}]", fmt_list(&params, ValueRef::grad));
    let neuron_output = out.data();

    // --- layer ---
    let layer = Layer::new(nin, nin, config.init_range, &mut rng);
    let outs = layer.forward(&values(&DEMO_INPUT))?;
    info!("layer outputs: [{}]", fmt_list(&outs, ValueRef::data));
    let total = outs
        .iter()
        .skip(1)
        .fold(outs[0].clone(), |acc, o| &acc + o);
    total.backward();
    info!("layer param grads: [{}]", fmt_list(&layer.parameters(), ValueRef::grad));
    let layer_outputs = outs.iter().map(ValueRef::data).collect();

    // --- mlp ---
    let mlp = Mlp::new(nin, &config.layer_sizes, config.init_range, &mut rng);
    let outs = mlp.forward(&values(&DEMO_INPUT))?;
    info!("mlp outputs: [{}]", fmt_list(&outs, ValueRef::data));
    outs[0].backward();
    info!("mlp param grads: [{}]", fmt_list(&mlp.parameters(), ValueRef::grad));
    let mlp_output = outs[0].data();

    // --- training ---
    let mlp = Mlp::new(nin, &config.layer_sizes, config.init_range, &mut rng);
    info!("training mlp with {} params", mlp.parameters().len());
    let data = toy_dataset();
    let training = train(&mlp, &data, config)?;
    for sample in &data {
        let pred = mlp.forward(&values(&sample.inputs))?;
        info!(
            "  target {:+.1} | prediction {:+.4}",
            sample.target,
            pred[0].data()
        );
    }

    Ok(DemoReport {
        neuron_output,
        layer_outputs,
        mlp_output,
        training,
    })
}
