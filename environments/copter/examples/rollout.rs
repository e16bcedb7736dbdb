//! Roll out episodes of the copter environment with a fixed policy.
//!
//! Run with: cargo run --example rollout -p copter-env -- --episodes 5 --policy random
//! Custom airframe: cargo run --example rollout -p copter-env -- --params airframe.json
//! Step traces: RUST_LOG=copter_env=trace cargo run --example rollout -p copter-env

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use copter_env::{CopterConfig, CopterParams, ObsMode, TerminationConfig};
use log::info;
use operant_core::Env;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    /// Always command zero
    Zero,
    /// Uniform random actions in [-1, 1]
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "rollout", about = "Roll out copter episodes and report returns")]
struct Opts {
    /// Number of episodes
    #[arg(long, default_value_t = 3)]
    episodes: u32,

    /// Environment seed (drawn from entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Action policy
    #[arg(long, value_enum, default_value_t = Policy::Random)]
    policy: Policy,

    /// Step budget per episode
    #[arg(long, default_value_t = 300)]
    max_steps: u32,

    /// Airframe parameters as JSON (reference airframe when omitted)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Include position and velocity in observations
    #[arg(long)]
    full_obs: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let opts = Opts::parse();

    let params = match &opts.params {
        Some(path) => serde_json::from_str::<CopterParams>(&fs::read_to_string(path)?)?,
        None => CopterParams::default(),
    };
    let obs_mode = if opts.full_obs { ObsMode::Full } else { ObsMode::Attitude };

    let mut env = CopterConfig::new()
        .with_params(params)
        .with_observation(obs_mode)
        .with_termination(TerminationConfig::default().with_max_steps(opts.max_steps))
        .build()?;
    let seed = env.seed(opts.seed);
    info!("rolling out {} episodes with seed {seed}", opts.episodes);

    let mut policy_rng = Xoshiro256StarStar::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);

    for episode in 0..opts.episodes {
        env.reset();
        let (outcome, steps) = loop {
            let action: [f64; 4] = match opts.policy {
                Policy::Zero => [0.0; 4],
                Policy::Random => std::array::from_fn(|_| policy_rng.gen_range(-1.0..=1.0)),
            };
            let t = env.step(&action)?;
            if t.terminated {
                break ("failure", env.step_count());
            }
            if t.truncated {
                break ("time limit", env.step_count());
            }
        };

        println!(
            "episode {episode:>3}: {steps:>4} steps, return {:>8.3}, ended by {outcome}",
            env.episode_reward()
        );
    }

    let log = env.log();
    println!(
        "{} episodes, mean return {:.3}, {} failures, {} time limits",
        log.episode_count,
        log.mean_reward(),
        log.failures,
        log.time_limits
    );
    Ok(())
}
