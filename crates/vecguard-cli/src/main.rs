//! vecguard CLI
//!
//! Drives a NaN-checked vectorized environment with a random policy.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use vecguard::check::{CheckNanConfig, VecCheckNan};
use vecguard::env::{Env, Fault, FaultTarget, InjectFault};
use vecguard::vector::{Serial, VecEnv, VecEnvConfig};
use vecguard_envs::{Bandit, Identity};

const BANDIT_ARMS: usize = 4;
const IDENTITY_SIZE: usize = 2;

#[derive(Parser)]
#[command(name = "vecguard")]
#[command(version, about = "vecguard - NaN and inf checks for vectorized RL environments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available environments
    List,

    /// Run a guarded vectorized environment with a random policy
    Run {
        /// Environment name
        #[arg(value_enum, default_value = "identity")]
        env: EnvKind,

        /// Number of vectorized steps
        #[arg(long, default_value = "100")]
        steps: usize,

        /// Number of environments
        #[arg(long, default_value = "4")]
        num_envs: usize,

        /// Seed for environments and policy
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Fail on the first NaN/inf instead of warning
        #[arg(long)]
        raise: bool,

        /// Report every offending step, not just the first
        #[arg(long)]
        warn_always: bool,

        /// Only look for NaN, not +inf/-inf
        #[arg(long)]
        ignore_inf: bool,

        /// Corrupt every sub-environment with this value
        #[arg(long, value_enum)]
        fault: Option<FaultArg>,

        /// Step (1-based) on which the fault is injected
        #[arg(long, default_value = "10")]
        fault_step: u64,

        /// Where the fault is written
        #[arg(long, value_enum, default_value = "observation")]
        fault_target: FaultTargetArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EnvKind {
    Bandit,
    Identity,
}

impl EnvKind {
    fn make(self) -> Box<dyn Env> {
        match self {
            EnvKind::Bandit => Box::new(Bandit::new(BANDIT_ARMS)),
            EnvKind::Identity => Box::new(Identity::new(IDENTITY_SIZE)),
        }
    }

    /// Random action for one sub-environment
    fn sample(self, rng: &mut StdRng, out: &mut [f32]) {
        for a in out.iter_mut() {
            *a = match self {
                EnvKind::Bandit => rng.gen_range(0..BANDIT_ARMS) as f32,
                EnvKind::Identity => rng.gen_range(-1.0..1.0),
            };
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FaultArg {
    Nan,
    Inf,
    NegInf,
}

impl From<FaultArg> for Fault {
    fn from(arg: FaultArg) -> Self {
        match arg {
            FaultArg::Nan => Fault::Nan,
            FaultArg::Inf => Fault::PosInf,
            FaultArg::NegInf => Fault::NegInf,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FaultTargetArg {
    Observation,
    Reward,
}

impl From<FaultTargetArg> for FaultTarget {
    fn from(arg: FaultTargetArg) -> Self {
        match arg {
            FaultTargetArg::Observation => FaultTarget::Observation,
            FaultTargetArg::Reward => FaultTarget::Reward,
        }
    }
}

struct RunArgs {
    env: EnvKind,
    steps: usize,
    vec_config: VecEnvConfig,
    guard_config: CheckNanConfig,
    fault: Option<(Fault, FaultTarget, u64)>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            list_envs();
        }
        Commands::Run {
            env,
            steps,
            num_envs,
            seed,
            raise,
            warn_always,
            ignore_inf,
            fault,
            fault_step,
            fault_target,
        } => {
            anyhow::ensure!(num_envs > 0, "--num-envs must be at least 1");

            let args = RunArgs {
                env,
                steps,
                vec_config: VecEnvConfig::new(num_envs).with_seed(seed),
                guard_config: CheckNanConfig::default()
                    .with_raise(raise)
                    .with_warn_once(!warn_always)
                    .with_check_inf(!ignore_inf),
                fault: fault.map(|f| (f.into(), fault_target.into(), fault_step)),
            };
            run(args)?;
        }
    }

    Ok(())
}

fn run(args: RunArgs) -> Result<()> {
    let RunArgs {
        env,
        steps,
        vec_config,
        guard_config,
        fault,
    } = args;

    tracing::info!(
        version = vecguard::VERSION,
        env = ?env,
        steps,
        num_envs = vec_config.num_envs,
        seed = vec_config.seed,
        fault = ?fault.map(|(f, _, _)| f),
        "Starting run"
    );

    let make_env = move || -> Box<dyn Env> {
        match fault {
            Some((value, target, at_step)) => {
                Box::new(InjectFault::new(env.make(), value, target, at_step))
            }
            None => env.make(),
        }
    };

    let backend = Serial::from_config(make_env, &vec_config);
    let action_dim: usize = backend.envs()[0].action_shape().iter().product();
    let mut venv = VecCheckNan::with_config(backend, guard_config);
    let mut rng = StdRng::seed_from_u64(vec_config.seed);

    venv.reset(Some(vec_config.seed))
        .context("guard tripped on reset")?;

    let mut actions = Array2::<f32>::zeros((vec_config.num_envs, action_dim));
    let mut total_reward = 0.0f64;
    let mut episodes = 0usize;

    for step in 1..=steps {
        for mut row in actions.rows_mut() {
            if let Some(slice) = row.as_slice_mut() {
                env.sample(&mut rng, slice);
            }
        }

        let result = venv
            .step(&actions)
            .with_context(|| format!("guard tripped at step {}", step))?;

        total_reward += result.rewards.iter().map(|&r| r as f64).sum::<f64>();
        episodes += result.dones.iter().filter(|&&d| d).count();

        if step % 50 == 0 {
            tracing::info!(step, episodes, "Progress");
        }
    }

    venv.close();

    let mean_reward = total_reward / (steps.max(1) * vec_config.num_envs) as f64;
    tracing::info!(
        steps,
        episodes,
        mean_reward,
        guard = ?venv.state(),
        "Run complete"
    );

    Ok(())
}

fn list_envs() {
    println!("Available environments:");
    println!();
    println!("  bandit     Multi-armed bandit ({} arms, one-step episodes)", BANDIT_ARMS);
    println!();
    println!(
        "  identity   Continuous target matching ({} dims); NaN actions yield NaN rewards",
        IDENTITY_SIZE
    );
    println!();
    println!("Use --fault nan|inf|neg-inf to corrupt a step and watch the guard report it.");
}
