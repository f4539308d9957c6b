use holdem_engine::engine::{TableConfig, MAX_SEATS, MIN_SEATS};
use holdem_engine::player::STARTING_STACK;
use serde::{Deserialize, Serialize};
use std::fs;

pub const ENV_CONFIG: &str = "HOLDEM_CONFIG";
pub const ENV_SEED: &str = "HOLDEM_SEED";
pub const ENV_STARTING_STACK: &str = "HOLDEM_STARTING_STACK";
pub const ENV_PLAYERS: &str = "HOLDEM_PLAYERS";
pub const ENV_TIMEOUT_MS: &str = "HOLDEM_TIMEOUT_MS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub players: usize,
    pub seed: Option<u64>,
    pub decision_timeout_ms: u64,
    /// Policy names assigned to seats in order, repeating when shorter than the table
    pub policies: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let table = TableConfig::default();
        Self {
            starting_stack: STARTING_STACK,
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            players: 2,
            seed: None,
            decision_timeout_ms: table.decision_timeout_ms,
            policies: vec!["baseline".into()],
        }
    }
}

impl Config {
    pub fn table(&self) -> TableConfig {
        TableConfig {
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            decision_timeout_ms: self.decision_timeout_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_stack: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub players: ValueSource,
    pub seed: ValueSource,
    pub decision_timeout_ms: ValueSource,
    pub policies: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_stack: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            players: ValueSource::Default,
            seed: ValueSource::Default,
            decision_timeout_ms: ValueSource::Default,
            policies: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

/// Defaults, then the TOML file named by `HOLDEM_CONFIG`, then `HOLDEM_*`
/// environment overrides. Command-line flags are applied by each command.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env_value(ENV_CONFIG) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.decision_timeout_ms {
            cfg.decision_timeout_ms = v;
            sources.decision_timeout_ms = ValueSource::File;
        }
        if let Some(v) = f.policies {
            cfg.policies = v;
            sources.policies = ValueSource::File;
        }
    }

    if let Some(seed) = env_value(ENV_SEED) {
        cfg.seed = Some(parse_env(ENV_SEED, &seed)?);
        sources.seed = ValueSource::Env;
    }
    if let Some(stack) = env_value(ENV_STARTING_STACK) {
        cfg.starting_stack = parse_env(ENV_STARTING_STACK, &stack)?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Some(players) = env_value(ENV_PLAYERS) {
        cfg.players = parse_env(ENV_PLAYERS, &players)?;
        sources.players = ValueSource::Env;
    }
    if let Some(ms) = env_value(ENV_TIMEOUT_MS) {
        cfg.decision_timeout_ms = parse_env(ENV_TIMEOUT_MS, &ms)?;
        sources.decision_timeout_ms = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    decision_timeout_ms: Option<u64>,
    #[serde(default)]
    policies: Option<Vec<String>>,
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid value for {}: {}", key, raw)))
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if !(MIN_SEATS..=MAX_SEATS).contains(&cfg.players) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: players must be between {} and {}",
            MIN_SEATS, MAX_SEATS
        )));
    }
    cfg.table()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    if cfg.policies.is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: policies must not be empty".into(),
        ));
    }
    for name in &cfg.policies {
        holdem_ai::create_ai(name)
            .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    }
    Ok(())
}
