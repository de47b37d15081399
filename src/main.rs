//! Binary entrypoint: runs the neuron/layer/MLP demo and the toy training loop.
//!
//! Configuration comes from `MICROGRAD_*` environment variables (see
//! [`micrograd_core::config`]); log verbosity from `RUST_LOG` (default `info`).

use log::info;
use micrograd_core::{config, demo};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = config::from_env()?;
    cfg.validate()?;
    info!("config: {cfg:?}");

    let report = demo::run(&cfg)?;
    if let (Some(first), Some(last)) = (report.training.first(), report.training.last()) {
        info!("loss {first:.6} -> {last:.6}");
    }
    Ok(())
}
