use chrono::Duration;

/// Timing and randomness knobs for a [`crate::session::Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Interval of the ambient screening tick.
    pub background_tick: Duration,
    /// Interval of the fast tick that runs after criteria are saved.
    pub accelerated_tick: Duration,
    /// How often a random insight toast appears.
    pub insight_interval: Duration,
    /// Simulated save latency for criteria.
    pub save_delay: Duration,
    /// Delay before the review zone finishes "loading".
    pub review_zone_delay: Duration,
    /// Delay before dashboard stat cards update after a hand-off.
    pub metrics_delay: Duration,
    /// Seed for the session RNG; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            background_tick: Duration::milliseconds(3_000),
            accelerated_tick: Duration::milliseconds(1_000),
            insight_interval: Duration::milliseconds(15_000),
            save_delay: Duration::milliseconds(1_500),
            review_zone_delay: Duration::milliseconds(1_500),
            metrics_delay: Duration::milliseconds(1_000),
            seed: None,
        }
    }
}

fn env_millis(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::milliseconds)
}

impl SessionConfig {
    /// Defaults overridden by `SL_*` environment variables where set and valid.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            background_tick: env_millis("SL_BACKGROUND_TICK_MS").unwrap_or(defaults.background_tick),
            accelerated_tick: env_millis("SL_ACCELERATED_TICK_MS")
                .unwrap_or(defaults.accelerated_tick),
            insight_interval: env_millis("SL_INSIGHT_INTERVAL_MS")
                .unwrap_or(defaults.insight_interval),
            save_delay: env_millis("SL_SAVE_DELAY_MS").unwrap_or(defaults.save_delay),
            review_zone_delay: env_millis("SL_REVIEW_ZONE_DELAY_MS")
                .unwrap_or(defaults.review_zone_delay),
            metrics_delay: env_millis("SL_METRICS_DELAY_MS").unwrap_or(defaults.metrics_delay),
            seed: std::env::var("SL_SEED")
                .ok()
                .and_then(|raw| raw.trim().parse().ok()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
