use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::errors::CoreError;
use crate::models::fund::FundSnapshot;
use crate::models::manager::FundManager;
use super::traits::SubgraphSource;

/// Default time a cached query result stays valid.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

/// Default cap on entries per cached operation.
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

/// Time-bounded map of query results keyed by their variables.
#[derive(Debug)]
struct TtlMap<T> {
    entries: HashMap<String, (Instant, T)>,
}

impl<T: Clone> TtlMap<T> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    fn get(&self, key: &str, ttl: Duration) -> Option<T> {
        self.entries
            .get(key)
            .filter(|(stored, _)| stored.elapsed() < ttl)
            .map(|(_, value)| value.clone())
    }

    /// Store `value`, keeping at most `max` entries: a full map first drops
    /// expired entries, then the oldest one.
    fn insert(&mut self, key: String, value: T, ttl: Duration, max: usize) {
        if !self.entries.contains_key(&key) && self.entries.len() >= max {
            self.prune(ttl);
            while self.entries.len() >= max {
                let oldest = self
                    .entries
                    .iter()
                    .min_by_key(|(_, (stored, _))| *stored)
                    .map(|(k, _)| k.clone());
                match oldest {
                    Some(k) => self.entries.remove(&k),
                    None => break,
                };
            }
        }
        self.entries.insert(key, (Instant::now(), value));
    }

    fn prune(&mut self, ttl: Duration) {
        self.entries.retain(|_, (stored, _)| stored.elapsed() < ttl);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug)]
struct CacheState {
    managers: TtlMap<Vec<FundManager>>,
    manager: TtlMap<Option<FundManager>>,
    funds: TtlMap<Option<FundSnapshot>>,
}

/// Query cache in front of another [`SubgraphSource`].
///
/// Only successful responses are stored, so a failed fetch is retried on the
/// next request. A zero TTL disables caching entirely. Each operation keeps
/// at most `max_entries` results. The lock is never held across an `.await`.
pub struct CachedSubgraph<S> {
    inner: S,
    ttl: Duration,
    max_entries: usize,
    state: Mutex<CacheState>,
}

impl<S: SubgraphSource> CachedSubgraph<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            max_entries: DEFAULT_MAX_ENTRIES,
            state: Mutex::new(CacheState {
                managers: TtlMap::new(),
                manager: TtlMap::new(),
                funds: TtlMap::new(),
            }),
        }
    }

    /// Override the per-operation entry cap (at least 1).
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached query results, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        let state = self.lock();
        state.managers.len() + state.manager.len() + state.funds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop expired entries. Returns how many were removed.
    pub fn prune_expired(&self) -> usize {
        let mut state = self.lock();
        let before = state.managers.len() + state.manager.len() + state.funds.len();
        state.managers.prune(self.ttl);
        state.manager.prune(self.ttl);
        state.funds.prune(self.ttl);
        before - (state.managers.len() + state.manager.len() + state.funds.len())
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.managers = TtlMap::new();
        state.manager = TtlMap::new();
        state.funds = TtlMap::new();
    }

    fn enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn cache_key(address: &str) -> String {
    address.trim().to_lowercase()
}

#[async_trait]
impl<S: SubgraphSource> SubgraphSource for CachedSubgraph<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fund_managers(&self) -> Result<Vec<FundManager>, CoreError> {
        if self.enabled() {
            let cached = self.lock().managers.get("", self.ttl);
            if let Some(hit) = cached {
                log::debug!("cache hit: fund managers");
                return Ok(hit);
            }
        }

        let managers = self.inner.fund_managers().await?;
        if self.enabled() {
            self.lock()
                .managers
                .insert(String::new(), managers.clone(), self.ttl, self.max_entries);
        }
        Ok(managers)
    }

    async fn fund_manager(&self, address: &str) -> Result<Option<FundManager>, CoreError> {
        let key = cache_key(address);
        if self.enabled() {
            let cached = self.lock().manager.get(&key, self.ttl);
            if let Some(hit) = cached {
                log::debug!("cache hit: fund manager {key}");
                return Ok(hit);
            }
        }

        let manager = self.inner.fund_manager(address).await?;
        if self.enabled() {
            self.lock()
                .manager
                .insert(key, manager.clone(), self.ttl, self.max_entries);
        }
        Ok(manager)
    }

    async fn fund_details(&self, address: &str) -> Result<Option<FundSnapshot>, CoreError> {
        let key = cache_key(address);
        if self.enabled() {
            let cached = self.lock().funds.get(&key, self.ttl);
            if let Some(hit) = cached {
                log::debug!("cache hit: fund {key}");
                return Ok(hit);
            }
        }

        let snapshot = self.inner.fund_details(address).await?;
        if self.enabled() {
            self.lock()
                .funds
                .insert(key, snapshot.clone(), self.ttl, self.max_entries);
        }
        Ok(snapshot)
    }
}
