//! Cross-thread handle to a running soup.
//!
//! The simulation thread and any reporting/presentation thread share one
//! [`Soup`] through this handle. A full tick runs under the lock and
//! snapshots are taken under the same lock, so a reader can never observe
//! the population in the middle of a rebuild pass.

use crate::metrics::SoupMetrics;
use crate::molecule::Entity;
use crate::soup::Soup;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub struct SharedSoup {
    inner: Arc<Mutex<Soup>>,
}

impl SharedSoup {
    #[must_use]
    pub fn new(soup: Soup) -> Self {
        Self {
            inner: Arc::new(Mutex::new(soup)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Soup> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Runs one full tick under the lock.
    pub fn advance(&self) {
        self.lock().advance();
    }

    /// Owned population snapshot, taken under the lock.
    #[must_use]
    pub fn snapshot_entities(&self) -> Vec<Entity> {
        self.lock().snapshot_entities()
    }

    /// Metrics are atomics; reading them never contends with the tick.
    #[must_use]
    pub fn metrics(&self) -> Arc<SoupMetrics> {
        self.lock().metrics()
    }

    pub fn add_entity(&self, entity: Entity) -> bool {
        self.lock().add_entity(entity)
    }

    pub fn set_width(&self, width: u32) {
        self.lock().set_width(width);
    }

    pub fn set_height(&self, height: u32) {
        self.lock().set_height(height);
    }

    pub fn set_temperature(&self, temperature: f64) {
        self.lock().set_temperature(temperature);
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        let soup = self.lock();
        (soup.width(), soup.height())
    }

    /// Scoped access for anything the convenience methods don't cover.
    pub fn with<T>(&self, f: impl FnOnce(&mut Soup) -> T) -> T {
        f(&mut self.lock())
    }
}
