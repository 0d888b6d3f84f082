//! Politeness controller for outbound request pacing
//!
//! Every network-issuing component shares one injected [`Politeness`]
//! instance. It owns the randomized inter-request delays and the user-agent
//! pool; nothing here is module-level state, so tests construct a zero-delay
//! instance and stay deterministic.

use crate::config::PolitenessConfig;
use rand::Rng;
use std::time::Duration;

/// An inclusive delay interval in milliseconds
#[derive(Debug, Clone, Copy)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    /// Draws a duration uniformly from the interval
    fn sample(&self) -> Duration {
        if self.max_ms == 0 {
            return Duration::ZERO;
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }
}

/// Randomized delays and user-agent rotation shared by all fetching code
#[derive(Debug, Clone)]
pub struct Politeness {
    search_delay: DelayRange,
    validation_delay: DelayRange,
    user_agents: Vec<String>,
}

impl Politeness {
    /// Creates a controller from the politeness configuration
    pub fn new(config: &PolitenessConfig) -> Self {
        Self {
            search_delay: DelayRange {
                min_ms: config.search_delay_min_ms,
                max_ms: config.search_delay_max_ms,
            },
            validation_delay: DelayRange {
                min_ms: config.validation_delay_min_ms,
                max_ms: config.validation_delay_max_ms,
            },
            user_agents: config.user_agents.clone(),
        }
    }

    /// A controller with zero delays and a fixed agent, for tests
    pub fn none() -> Self {
        Self {
            search_delay: DelayRange { min_ms: 0, max_ms: 0 },
            validation_delay: DelayRange { min_ms: 0, max_ms: 0 },
            user_agents: vec!["pdfscout-test/1.0".to_string()],
        }
    }

    /// Suspends the caller before issuing a search or crawl request
    pub async fn delay_search(&self) {
        let pause = self.search_delay.sample();
        if !pause.is_zero() {
            tracing::trace!("Politeness pause before search request: {:?}", pause);
            tokio::time::sleep(pause).await;
        }
    }

    /// Suspends the caller between consecutive candidate validations
    pub async fn delay_validation(&self) {
        let pause = self.validation_delay.sample();
        if !pause.is_zero() {
            tracing::trace!("Politeness pause before validation: {:?}", pause);
            tokio::time::sleep(pause).await;
        }
    }

    /// Returns a user agent chosen uniformly at random from the pool
    pub fn pick_user_agent(&self) -> &str {
        let index = rand::thread_rng().gen_range(0..self.user_agents.len());
        &self.user_agents[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_user_agents;

    fn create_test_config() -> PolitenessConfig {
        PolitenessConfig {
            search_delay_min_ms: 5,
            search_delay_max_ms: 10,
            validation_delay_min_ms: 1,
            validation_delay_max_ms: 2,
            user_agents: default_user_agents(),
        }
    }

    #[test]
    fn test_sample_within_range() {
        let range = DelayRange {
            min_ms: 5,
            max_ms: 10,
        };

        for _ in 0..100 {
            let d = range.sample();
            assert!(d >= Duration::from_millis(5));
            assert!(d <= Duration::from_millis(10));
        }
    }

    #[test]
    fn test_zero_range_samples_zero() {
        let range = DelayRange { min_ms: 0, max_ms: 0 };
        assert_eq!(range.sample(), Duration::ZERO);
    }

    #[test]
    fn test_pick_user_agent_from_pool() {
        let politeness = Politeness::new(&create_test_config());
        let pool = default_user_agents();

        for _ in 0..100 {
            let agent = politeness.pick_user_agent();
            assert!(pool.iter().any(|ua| ua == agent));
        }
    }

    #[test]
    fn test_pick_user_agent_covers_pool() {
        // With 4 agents and 200 draws, every agent should appear
        let politeness = Politeness::new(&create_test_config());
        let pool = default_user_agents();

        let mut seen = vec![false; pool.len()];
        for _ in 0..200 {
            let agent = politeness.pick_user_agent();
            let index = pool.iter().position(|ua| ua == agent).unwrap();
            seen[index] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[tokio::test]
    async fn test_none_controller_does_not_sleep() {
        let politeness = Politeness::none();

        let start = std::time::Instant::now();
        politeness.delay_search().await;
        politeness.delay_validation().await;

        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_delay_search_waits() {
        let politeness = Politeness::new(&create_test_config());

        let start = std::time::Instant::now();
        politeness.delay_search().await;

        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
