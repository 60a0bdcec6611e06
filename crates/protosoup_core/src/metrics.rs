//! Counters and structured logging for observing the soup.
//!
//! Everything here is advisory output: pattern emergences and tick
//! statistics are reported as log lines and atomic counters, never as part
//! of the engine's programmatic contract.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Atomic statistics readable from other threads without the soup lock.
pub struct SoupMetrics {
    tick_count: AtomicU64,
    entity_count: AtomicU64,
    chain_count: AtomicU64,
    mutation_count: AtomicU64,
    crossover_count: AtomicU64,
    pattern_hits: AtomicU64,
    start_time: Instant,
}

impl Default for SoupMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SoupMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            entity_count: AtomicU64::new(0),
            chain_count: AtomicU64::new(0),
            mutation_count: AtomicU64::new(0),
            crossover_count: AtomicU64::new(0),
            pattern_hits: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick and its resulting population counts.
    pub fn record_tick(&self, entities: usize, chains: usize) {
        self.tick_count.fetch_add(1, Ordering::Relaxed);
        self.entity_count.store(entities as u64, Ordering::Relaxed);
        self.chain_count.store(chains as u64, Ordering::Relaxed);

        let tick = self.tick_count.load(Ordering::Relaxed);
        if tick % 1000 == 0 {
            tracing::info!(tick, entities, chains, "simulation tick");
        }
    }

    pub fn record_mutation(&self) {
        self.mutation_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_crossover(&self) {
        self.crossover_count.fetch_add(1, Ordering::Relaxed);
    }

    /// One emergence event per matching chain per tick.
    pub fn record_pattern_hit(&self, sequence: &str) {
        self.pattern_hits.fetch_add(1, Ordering::Relaxed);
        tracing::info!(sequence, "target pattern emerged");
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn entity_count(&self) -> u64 {
        self.entity_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn chain_count(&self) -> u64 {
        self.chain_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn mutation_count(&self) -> u64 {
        self.mutation_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn crossover_count(&self) -> u64 {
        self.crossover_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn pattern_hits(&self) -> u64 {
        self.pattern_hits.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .ok();
}
