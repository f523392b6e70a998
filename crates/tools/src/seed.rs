//! Seed selection for a generation run: command line, then environment, then runtime entropy.

use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const SEED_ENV_VAR: &str = "MAZE_SEED";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Env(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Env(seed) | Self::Generated(seed) => seed,
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            Self::Cli(_) => "--seed",
            Self::Env(_) => SEED_ENV_VAR,
            Self::Generated(_) => "generated",
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(std::process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

/// Resolves the seed from the flag value, the raw `MAZE_SEED` value, or the fallback.
pub fn resolve_seed(
    cli_seed: Option<u64>,
    env_value: Option<&str>,
    generated_seed: u64,
) -> Result<SeedChoice, String> {
    if let Some(seed) = cli_seed {
        return Ok(SeedChoice::Cli(seed));
    }
    match env_value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(raw_value) => parse_seed_value(raw_value).map(SeedChoice::Env),
        None => Ok(SeedChoice::Generated(generated_seed)),
    }
}

pub fn resolve_seed_from_env(cli_seed: Option<u64>) -> Result<SeedChoice, String> {
    let env_value = env::var(SEED_ENV_VAR).ok();
    resolve_seed(cli_seed, env_value.as_deref(), generate_runtime_seed())
}

fn parse_seed_value(raw_value: &str) -> Result<u64, String> {
    raw_value
        .parse::<u64>()
        .map_err(|_| format!("{SEED_ENV_VAR} value '{raw_value}' must be a number"))
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
