//! Hub settings cache for the VoltBank client
//!
//! In-memory map from hub id to an immutable [`HubSettings`] snapshot, owned
//! explicitly by the application session and injected into the components
//! that read it. Duplicate fetches for the same hub are coalesced per key:
//! concurrent callers await one shared in-flight future instead of issuing
//! redundant requests, and fetches for different hubs never block each
//! other.
//!
//! Entries never expire by time. Staleness is resolved only by an explicit
//! [`update`](HubSettingsCache::update) after a settings edit is persisted
//! server-side, or by [`invalidate`](HubSettingsCache::invalidate) /
//! [`clear`](HubSettingsCache::clear).
//!
//! A failed fetch is absorbed here: the slot resolves to
//! [`HubSettings::fallback`] so downstream consumers never observe an absent
//! configuration for a hub they attempted to load. The failure is logged,
//! not re-thrown.

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use voltbank_core::models::{HubSettings, HubSettingsPatch};
use voltbank_core::traits::SettingsService;

type SettingsFuture = Shared<BoxFuture<'static, Arc<HubSettings>>>;

/// One cache slot per hub id
enum Slot {
    /// Resolved snapshot
    Ready(Arc<HubSettings>),
    /// Fetch in flight; late callers clone and await this future
    Pending(SettingsFuture),
}

/// Hub settings cache
///
/// Cheap to share behind an `Arc`; the inner map is the only shared mutable
/// state and its writers are exactly `load` (promote), `update` (merge), and
/// `invalidate`/`clear` (remove). The lock is never held across an await.
pub struct HubSettingsCache<S: SettingsService + 'static> {
    service: Arc<S>,
    slots: Mutex<HashMap<i32, Slot>>,
}

impl<S: SettingsService + 'static> HubSettingsCache<S> {
    /// Create a cache backed by the given settings service
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Get the settings for a hub, fetching on first use
    ///
    /// - Cached: returns the snapshot without touching the network.
    /// - Fetch in flight for this hub: awaits the same fetch as the caller
    ///   that started it.
    /// - Absent: issues one remote fetch; on failure, logs and resolves to
    ///   the fallback defaults.
    ///
    /// An explicit `update` or `invalidate` racing an in-flight fetch wins
    /// over the fetched value.
    pub async fn load(&self, hub_id: i32) -> Arc<HubSettings> {
        let fut = {
            let mut slots = self.slots.lock();
            match slots.get(&hub_id) {
                Some(Slot::Ready(settings)) => {
                    debug!("Settings cache HIT for hub {}", hub_id);
                    return settings.clone();
                }
                Some(Slot::Pending(fut)) => {
                    debug!("Joining in-flight settings fetch for hub {}", hub_id);
                    fut.clone()
                }
                None => {
                    debug!("Settings cache MISS for hub {}", hub_id);
                    let service = self.service.clone();
                    let fut = async move {
                        match service.get_hub_settings(hub_id).await {
                            Ok(settings) => Arc::new(settings),
                            Err(e) => {
                                warn!(
                                    "Failed to load settings for hub {}: {}; using defaults",
                                    hub_id, e
                                );
                                Arc::new(HubSettings::fallback(hub_id))
                            }
                        }
                    }
                    .boxed()
                    .shared();
                    slots.insert(hub_id, Slot::Pending(fut.clone()));
                    fut
                }
            }
        };

        let settings = fut.await;

        let mut slots = self.slots.lock();
        match slots.get(&hub_id) {
            // Normal path: promote the resolved fetch
            Some(Slot::Pending(_)) => {
                slots.insert(hub_id, Slot::Ready(settings.clone()));
                settings
            }
            // An explicit update replaced the slot mid-flight; it wins
            Some(Slot::Ready(current)) => current.clone(),
            // Invalidated mid-flight; hand back the result without caching it
            None => settings,
        }
    }

    /// Read the cached snapshot without fetching
    pub fn peek(&self, hub_id: i32) -> Option<Arc<HubSettings>> {
        match self.slots.lock().get(&hub_id) {
            Some(Slot::Ready(settings)) => Some(settings.clone()),
            _ => None,
        }
    }

    /// Shallow-merge a partial update into the cached entry, creating one
    /// from the fallback defaults when absent
    ///
    /// Called after a settings edit has been persisted server-side.
    pub fn update(&self, hub_id: i32, patch: &HubSettingsPatch) -> Arc<HubSettings> {
        let mut slots = self.slots.lock();
        let base = match slots.get(&hub_id) {
            Some(Slot::Ready(settings)) => (**settings).clone(),
            _ => HubSettings::fallback(hub_id),
        };
        let merged = Arc::new(base.apply(patch));
        slots.insert(hub_id, Slot::Ready(merged.clone()));
        debug!("Settings updated for hub {}", hub_id);
        merged
    }

    /// Drop the cached entry for one hub
    pub fn invalidate(&self, hub_id: i32) {
        if self.slots.lock().remove(&hub_id).is_some() {
            debug!("Settings invalidated for hub {}", hub_id);
        }
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.slots.lock().clear();
        debug!("Settings cache cleared");
    }

    /// Cached pagination size for a hub, default when not cached
    pub fn rows_per_page(&self, hub_id: i32) -> u32 {
        self.peek(hub_id)
            .map(|s| s.default_table_rows_per_page)
            .unwrap_or(50)
    }

    /// Number of resolved or in-flight entries
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// True when nothing is cached or in flight
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}
