//! Full booking flow driven through the fetch orchestrator with a mock
//! catalog service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use booking_eng::clock::FixedClock;
use booking_eng::{
    Addon, Amount, Booking, Catalog, CatalogService, FetchError, Intent, RequestStatus, Vehicle,
    VehicleId,
};

fn sedan() -> Vehicle {
    Vehicle {
        id: 1,
        name: "Sedan".into(),
        cost_per_day: Amount::from_units(1000),
        glyph: "🚗".into(),
    }
}

fn suv() -> Vehicle {
    Vehicle {
        id: 2,
        name: "SUV".into(),
        cost_per_day: Amount::from_units(1500),
        glyph: "🚙".into(),
    }
}

fn gps() -> Addon {
    Addon {
        id: 5,
        name: "GPS Navigation".into(),
        cost_per_day: Amount::from_units(200),
    }
}

/// Mock catalog whose responses can be swapped from the outside through
/// the shared handles.
#[derive(Clone)]
struct MockCatalog {
    vehicles: Arc<Mutex<Result<Vec<Vehicle>, FetchError>>>,
    addons: Arc<Mutex<Result<Vec<Addon>, FetchError>>>,
}

impl MockCatalog {
    fn healthy() -> Self {
        Self {
            vehicles: Arc::new(Mutex::new(Ok(vec![sedan(), suv()]))),
            addons: Arc::new(Mutex::new(Ok(vec![gps()]))),
        }
    }

    fn fail_vehicles(self, error: FetchError) -> Self {
        *self.vehicles.lock().unwrap() = Err(error);
        self
    }

    fn fail_addons(self, error: FetchError) -> Self {
        *self.addons.lock().unwrap() = Err(error);
        self
    }
}

#[async_trait]
impl CatalogService for MockCatalog {
    async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, FetchError> {
        self.vehicles.lock().unwrap().clone()
    }

    async fn fetch_addons(&self, _vehicle: VehicleId) -> Result<Vec<Addon>, FetchError> {
        self.addons.lock().unwrap().clone()
    }
}

fn booking() -> Booking {
    let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    Booking::with_clock(Box::new(FixedClock(today)))
}

#[tokio::test]
async fn happy_path_end_to_end() {
    let catalog = Catalog::new(MockCatalog::healthy());
    let mut booking = booking();

    catalog.load_vehicles(&mut booking).await;
    assert_eq!(booking.state().request_status, RequestStatus::Idle);
    assert_eq!(booking.state().vehicles.len(), 2);

    booking.apply(Intent::SelectVehicle(sedan())).unwrap();
    catalog.load_addons(1, &mut booking).await;
    assert_eq!(booking.state().addons, vec![gps()]);

    booking.apply(Intent::ToggleAddon(5)).unwrap();
    booking
        .apply(Intent::SetPickupDate("2024-06-01".into()))
        .unwrap();
    booking
        .apply(Intent::SetDropoffDate("2024-06-04".into()))
        .unwrap();

    let summary = booking.summary().expect("booking should be valid");
    assert_eq!(summary.days, 3);
    assert_eq!(summary.total, Amount::from_units(4248));

    booking.apply(Intent::ShowConfirmation).unwrap();
    assert!(booking.state().confirmation_visible);

    booking.apply(Intent::HideConfirmation).unwrap();
    assert!(!booking.state().confirmation_visible);
    assert!(booking.state().vehicles.is_empty());
    assert!(booking.summary().is_none());
}

#[tokio::test]
async fn vehicle_fetch_failure_blocks_the_form() {
    let catalog = Catalog::new(MockCatalog::healthy().fail_vehicles(FetchError::Offline));
    let mut booking = booking();

    catalog.load_vehicles(&mut booking).await;

    assert_eq!(
        booking.state().request_status,
        RequestStatus::Error(FetchError::Offline)
    );
    assert!(booking.state().vehicles.is_empty());
}

#[tokio::test]
async fn retry_after_failure_recovers() {
    let service = MockCatalog::healthy().fail_vehicles(FetchError::Timeout);
    let vehicles = service.vehicles.clone();
    let catalog = Catalog::new(service);
    let mut booking = booking();

    catalog.load_vehicles(&mut booking).await;
    assert!(matches!(
        booking.state().request_status,
        RequestStatus::Error(_)
    ));

    *vehicles.lock().unwrap() = Ok(vec![sedan()]);
    catalog.load_vehicles(&mut booking).await;

    assert_eq!(booking.state().request_status, RequestStatus::Idle);
    assert_eq!(booking.state().vehicles, vec![sedan()]);
}

#[tokio::test]
async fn addon_failure_is_non_fatal() {
    let catalog = Catalog::new(
        MockCatalog::healthy().fail_addons(FetchError::ServerError("addons unavailable".into())),
    );
    let mut booking = booking();

    catalog.load_vehicles(&mut booking).await;
    booking.apply(Intent::SelectVehicle(sedan())).unwrap();
    catalog.load_addons(1, &mut booking).await;

    // the booking flow continues without add-ons
    assert_eq!(booking.state().request_status, RequestStatus::Idle);
    assert!(booking.state().addons.is_empty());

    booking
        .apply(Intent::SetPickupDate("2024-06-01".into()))
        .unwrap();
    booking
        .apply(Intent::SetDropoffDate("2024-06-02".into()))
        .unwrap();

    let summary = booking.summary().expect("still bookable without add-ons");
    assert_eq!(summary.addons_cost, Amount::default());
    assert_eq!(summary.total, Amount::from_units(1180));
}

#[tokio::test]
async fn stale_addon_completion_is_discarded() {
    let catalog = Catalog::new(MockCatalog::healthy());
    let mut booking = booking();

    catalog.load_vehicles(&mut booking).await;
    booking.apply(Intent::SelectVehicle(sedan())).unwrap();

    // the user switches vehicles before the sedan's add-ons land
    booking.apply(Intent::SelectVehicle(suv())).unwrap();
    catalog.load_addons(1, &mut booking).await;

    assert!(booking.state().addons.is_empty());
}

#[tokio::test]
async fn second_cycle_reuses_cached_catalog() {
    let service = MockCatalog::healthy();
    let vehicles = service.vehicles.clone();
    let catalog = Catalog::new(service);
    let mut booking = booking();

    catalog.load_vehicles(&mut booking).await;
    booking.apply(Intent::SelectVehicle(sedan())).unwrap();
    booking
        .apply(Intent::SetPickupDate("2024-06-01".into()))
        .unwrap();
    booking
        .apply(Intent::SetDropoffDate("2024-06-02".into()))
        .unwrap();
    booking.apply(Intent::ShowConfirmation).unwrap();
    booking.apply(Intent::HideConfirmation).unwrap();

    // the upstream now fails, but the fresh cache still serves the list
    *vehicles.lock().unwrap() = Err(FetchError::NetworkError);
    catalog.load_vehicles(&mut booking).await;

    assert_eq!(booking.state().request_status, RequestStatus::Idle);
    assert_eq!(booking.state().vehicles.len(), 2);
}
