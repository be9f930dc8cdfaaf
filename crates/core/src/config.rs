//! Session configuration.
//!
//! A configuration starts from one of the two built-in variants, may be
//! overlaid by a JSON file and by `GRID_DUEL_*` environment variables, and is
//! validated before a session is allowed to start.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::rng::{grid_size_from_roll, SimpleRng};
use crate::types::{
    DEFAULT_IDLE_POLL_MS, DEFAULT_MOVE_COOLDOWN_MS, DEFAULT_ROLL, DEFAULT_SESSION_SECS,
    MAX_GRID_SIZE, MAX_OBSTACLES, MIN_GRID_SIZE,
};

/// Configuration errors. All of them are fatal at session start.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid size {size} is below the minimum playable size {min}")]
    GridTooSmall { size: u16, min: u16 },

    #[error("grid size {size} exceeds the maximum {max}")]
    GridTooLarge { size: u16, max: u16 },

    #[error("{count} obstacles do not fit: the interior has room for {capacity}")]
    TooManyObstacles { count: usize, capacity: usize },

    #[error("invalid arena layout: {reason}")]
    InvalidLayout { reason: &'static str },

    #[error("session duration must be greater than zero")]
    ZeroDuration,

    #[error("{name} must be greater than zero")]
    ZeroInterval { name: &'static str },

    #[error("unknown variant '{name}' (expected 'classic' or 'timed')")]
    UnknownVariant { name: String },

    #[error("invalid value '{value}' for {key}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Input producer pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProducerTiming {
    /// Sleep after an intent was emitted.
    pub cooldown: Duration,
    /// Sleep after a poll that found no direction held.
    pub idle: Duration,
}

impl Default for ProducerTiming {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_millis(DEFAULT_MOVE_COOLDOWN_MS),
            idle: Duration::from_millis(DEFAULT_IDLE_POLL_MS),
        }
    }
}

/// Everything a session needs to know before it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Side length `N` of the square arena, boundary ring included.
    pub grid_size: u16,
    pub duration: Duration,
    /// Maximum number of uncollected items on the board.
    pub item_cap: usize,
    /// Minimum time between two successful spawns.
    pub spawn_interval: Duration,
    /// Uncollected items older than this are removed. `None` keeps them forever.
    pub item_expiry: Option<Duration>,
    pub obstacle_count: usize,
    /// Whether a participant's cell blocks the other participant.
    pub participants_block: bool,
    /// Seed for obstacle layout and item placement.
    pub seed: u32,
    pub producer: ProducerTiming,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl SessionConfig {
    /// Many items, fast spawns, seven obstacles, items never expire.
    pub fn classic() -> Self {
        Self {
            grid_size: 15,
            duration: Duration::from_secs(DEFAULT_SESSION_SECS),
            item_cap: 40,
            spawn_interval: Duration::from_secs(2),
            item_expiry: None,
            obstacle_count: 7,
            participants_block: false,
            seed: 1,
            producer: ProducerTiming::default(),
        }
    }

    /// Few items, slow spawns, five obstacles, items vanish after 15 seconds.
    pub fn timed() -> Self {
        Self {
            item_cap: 10,
            spawn_interval: Duration::from_secs(5),
            item_expiry: Some(Duration::from_secs(15)),
            obstacle_count: 5,
            ..Self::classic()
        }
    }

    pub fn variant(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_lowercase().as_str() {
            "" | "classic" => Ok(Self::classic()),
            "timed" => Ok(Self::timed()),
            _ => Err(ConfigError::UnknownVariant {
                name: name.to_string(),
            }),
        }
    }

    /// Derive the arena size from a roll number (see [`grid_size_from_roll`]).
    pub fn with_rolled_grid_size(mut self, roll: u32, rng: &mut SimpleRng) -> Self {
        self.grid_size = grid_size_from_roll(roll, rng);
        self
    }

    /// Interior cells available to obstacles once both start cells are reserved.
    pub fn obstacle_capacity(&self) -> usize {
        let side = (self.grid_size as usize).saturating_sub(2);
        (side * side).saturating_sub(2).min(MAX_OBSTACLES)
    }

    /// Reject configurations that cannot produce a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                size: self.grid_size,
                min: MIN_GRID_SIZE,
            });
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }
        let capacity = self.obstacle_capacity();
        if self.obstacle_count > capacity {
            return Err(ConfigError::TooManyObstacles {
                count: self.obstacle_count,
                capacity,
            });
        }
        if self.duration.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }
        if self.spawn_interval.is_zero() {
            return Err(ConfigError::ZeroInterval {
                name: "spawn interval",
            });
        }
        if self.producer.cooldown.is_zero() {
            return Err(ConfigError::ZeroInterval {
                name: "producer cooldown",
            });
        }
        if self.producer.idle.is_zero() {
            return Err(ConfigError::ZeroInterval {
                name: "producer idle poll",
            });
        }
        Ok(())
    }

    /// Build the runtime configuration.
    ///
    /// Order: variant preset (`GRID_DUEL_VARIANT`), JSON file (`GRID_DUEL_CONFIG`),
    /// environment overrides, then the grid size is rolled from the final seed
    /// unless the file or environment set it, then validation.
    pub fn load() -> Result<Self, ConfigError> {
        let variant = std::env::var("GRID_DUEL_VARIANT").unwrap_or_default();
        let mut config = Self::variant(&variant)?;
        let mut explicit_grid_size = false;

        if let Ok(path) = std::env::var("GRID_DUEL_CONFIG") {
            let path = path.trim();
            if !path.is_empty() {
                let file = ConfigFile::read(Path::new(path))?;
                explicit_grid_size |= file.grid_size.is_some();
                file.apply(&mut config);
            }
        }

        explicit_grid_size |= config.apply_env()?;
        let config = config.settle_grid_size(explicit_grid_size);
        config.validate()?;
        Ok(config)
    }

    /// Roll the grid size from the current seed unless it was set explicitly.
    fn settle_grid_size(self, explicit: bool) -> Self {
        if explicit {
            return self;
        }
        let mut rng = SimpleRng::new(self.seed);
        self.with_rolled_grid_size(DEFAULT_ROLL, &mut rng)
    }

    /// Returns whether the grid size was overridden.
    fn apply_env(&mut self) -> Result<bool, ConfigError> {
        let grid_size = env_parse::<u16>("GRID_DUEL_GRID_SIZE")?;
        if let Some(v) = grid_size {
            self.grid_size = v;
        }
        if let Some(v) = env_parse::<u64>("GRID_DUEL_DURATION_SECS")? {
            self.duration = Duration::from_secs(v);
        }
        if let Some(v) = env_parse::<usize>("GRID_DUEL_ITEM_CAP")? {
            self.item_cap = v;
        }
        if let Some(v) = env_parse::<u64>("GRID_DUEL_SPAWN_INTERVAL_MS")? {
            self.spawn_interval = Duration::from_millis(v);
        }
        if let Some(v) = env_parse::<u64>("GRID_DUEL_ITEM_EXPIRY_MS")? {
            // Zero disables expiry.
            self.item_expiry = (v > 0).then(|| Duration::from_millis(v));
        }
        if let Some(v) = env_parse::<usize>("GRID_DUEL_OBSTACLES")? {
            self.obstacle_count = v;
        }
        if let Some(v) = env_parse_bool("GRID_DUEL_BLOCKING")? {
            self.participants_block = v;
        }
        if let Some(v) = env_parse::<u32>("GRID_DUEL_SEED")? {
            self.seed = v;
        }
        Ok(grid_size.is_some())
    }
}

fn env_parse<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { key, value: raw }),
        _ => Ok(None),
    }
}

fn env_parse_bool(key: &'static str) -> Result<Option<bool>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidEnv { key, value: raw }),
        },
        Err(_) => Ok(None),
    }
}

/// On-disk overlay. Every field is optional; absent fields keep the preset value.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub grid_size: Option<u16>,
    pub duration_secs: Option<u64>,
    pub item_cap: Option<usize>,
    pub spawn_interval_ms: Option<u64>,
    pub item_expiry_ms: Option<u64>,
    pub obstacle_count: Option<usize>,
    pub participants_block: Option<bool>,
    pub seed: Option<u32>,
    pub move_cooldown_ms: Option<u64>,
    pub idle_poll_ms: Option<u64>,
}

impl ConfigFile {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn apply(&self, config: &mut SessionConfig) {
        if let Some(v) = self.grid_size {
            config.grid_size = v;
        }
        if let Some(v) = self.duration_secs {
            config.duration = Duration::from_secs(v);
        }
        if let Some(v) = self.item_cap {
            config.item_cap = v;
        }
        if let Some(v) = self.spawn_interval_ms {
            config.spawn_interval = Duration::from_millis(v);
        }
        if let Some(v) = self.item_expiry_ms {
            config.item_expiry = (v > 0).then(|| Duration::from_millis(v));
        }
        if let Some(v) = self.obstacle_count {
            config.obstacle_count = v;
        }
        if let Some(v) = self.participants_block {
            config.participants_block = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if let Some(v) = self.move_cooldown_ms {
            config.producer.cooldown = Duration::from_millis(v);
        }
        if let Some(v) = self.idle_poll_ms {
            config.producer.idle = Duration::from_millis(v);
        }
    }
}
