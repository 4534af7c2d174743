//! Catalog reads and the fetch orchestrator.
//!
//! The catalog service is an abstract collaborator with two reads: the
//! vehicle list, and the add-ons compatible with one vehicle. [`Catalog`]
//! wraps a service with a bounded-freshness response cache and drives the
//! booking engine by emitting request and completion intents.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::Booking;
use crate::model::{Addon, Intent, Vehicle, VehicleId};

mod error;
pub use error::FetchError;

mod http;
pub use http::HttpCatalog;

/// Remote catalog contract. Transport is the implementor's concern; the
/// orchestrator only sees the closed [`FetchError`] taxonomy.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, FetchError>;

    async fn fetch_addons(&self, vehicle: VehicleId) -> Result<Vec<Addon>, FetchError>;
}

/// How long a successful response stays fresh.
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

struct CacheEntry<T> {
    fetched_at: Instant,
    data: T,
}

impl<T: Clone> CacheEntry<T> {
    fn fresh(&self, ttl: Duration) -> Option<T> {
        (self.fetched_at.elapsed() < ttl).then(|| self.data.clone())
    }
}

#[derive(Default)]
struct CacheInner {
    vehicles: Option<CacheEntry<Vec<Vehicle>>>,
    addons: HashMap<VehicleId, CacheEntry<Vec<Addon>>>,
}

/// Fetch orchestrator: issues catalog reads, caches successful responses
/// for a bounded freshness window, and feeds results into the booking
/// engine as intents.
pub struct Catalog<S> {
    service: S,
    ttl: Duration,
    cache: Mutex<CacheInner>,
}

impl<S: CatalogService> Catalog<S> {
    pub fn new(service: S) -> Self {
        Self::with_ttl(service, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(service: S, ttl: Duration) -> Self {
        Self {
            service,
            ttl,
            cache: Mutex::new(CacheInner::default()),
        }
    }

    /// Load the vehicle list into the booking engine.
    ///
    /// Emits `RequestVehicles`, then `VehiclesLoaded` or `VehiclesFailed`.
    /// A failure here blocks the form until retried.
    pub async fn load_vehicles(&self, booking: &mut Booking) {
        let _ = booking.apply(Intent::RequestVehicles);
        match self.vehicles().await {
            Ok(vehicles) => {
                info!(count = vehicles.len(), "fetched vehicles");
                let _ = booking.apply(Intent::VehiclesLoaded(vehicles));
            }
            Err(error) => {
                warn!(key = error.display_key(), "failed to fetch vehicles");
                let _ = booking.apply(Intent::VehiclesFailed(error));
            }
        }
    }

    /// Load the add-ons for `vehicle` into the booking engine.
    ///
    /// Completions are tagged with the vehicle id so the engine can discard
    /// results for a since-deselected vehicle. A failure here is non-fatal.
    pub async fn load_addons(&self, vehicle: VehicleId, booking: &mut Booking) {
        match self.addons(vehicle).await {
            Ok(addons) => {
                info!(vehicle, count = addons.len(), "fetched add-ons");
                let _ = booking.apply(Intent::AddonsLoaded { vehicle, addons });
            }
            Err(error) => {
                warn!(vehicle, key = error.display_key(), "failed to fetch add-ons");
                let _ = booking.apply(Intent::AddonsFailed { vehicle, error });
            }
        }
    }

    /// Fetch the vehicle list, reusing a fresh cached response if present.
    pub async fn vehicles(&self) -> Result<Vec<Vehicle>, FetchError> {
        if let Some(cached) = self.cached_vehicles() {
            debug!("vehicle list served from cache");
            return Ok(cached);
        }

        let vehicles = self.service.fetch_vehicles().await?;
        self.lock_cache().vehicles = Some(CacheEntry {
            fetched_at: Instant::now(),
            data: vehicles.clone(),
        });
        Ok(vehicles)
    }

    /// Fetch add-ons for one vehicle, reusing a fresh cached response if
    /// present.
    pub async fn addons(&self, vehicle: VehicleId) -> Result<Vec<Addon>, FetchError> {
        if let Some(cached) = self.cached_addons(vehicle) {
            debug!(vehicle, "add-on list served from cache");
            return Ok(cached);
        }

        let addons = self.service.fetch_addons(vehicle).await?;
        self.lock_cache().addons.insert(
            vehicle,
            CacheEntry {
                fetched_at: Instant::now(),
                data: addons.clone(),
            },
        );
        Ok(addons)
    }

    pub fn clear_cache(&self) {
        let mut cache = self.lock_cache();
        cache.vehicles = None;
        cache.addons.clear();
    }

    fn cached_vehicles(&self) -> Option<Vec<Vehicle>> {
        self.lock_cache()
            .vehicles
            .as_ref()
            .and_then(|entry| entry.fresh(self.ttl))
    }

    fn cached_addons(&self, vehicle: VehicleId) -> Option<Vec<Addon>> {
        self.lock_cache()
            .addons
            .get(&vehicle)
            .and_then(|entry| entry.fresh(self.ttl))
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        // the lock is never held across an await point
        self.cache.lock().expect("catalog cache mutex poisoned")
    }
}
