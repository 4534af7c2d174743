use std::env;

use async_trait::async_trait;
use chrono::Days;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use booking_eng::clock::{Clock, SystemClock};
use booking_eng::{
    Addon, Amount, Booking, Catalog, CatalogService, Config, FetchError, HttpCatalog, Intent,
    RequestStatus, Summary, Vehicle, VehicleId,
};

/// Built-in catalog for running the flow without a server.
struct DemoCatalog;

#[async_trait]
impl CatalogService for DemoCatalog {
    async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, FetchError> {
        Ok(vec![
            Vehicle {
                id: 1,
                name: "Sedan".into(),
                cost_per_day: Amount::from_units(1000),
                glyph: "🚗".into(),
            },
            Vehicle {
                id: 2,
                name: "SUV".into(),
                cost_per_day: Amount::from_units(1500),
                glyph: "🚙".into(),
            },
        ])
    }

    async fn fetch_addons(&self, vehicle: VehicleId) -> Result<Vec<Addon>, FetchError> {
        match vehicle {
            1 => Ok(vec![
                Addon {
                    id: 5,
                    name: "GPS Navigation".into(),
                    cost_per_day: Amount::from_units(200),
                },
                Addon {
                    id: 6,
                    name: "Child Seat".into(),
                    cost_per_day: Amount::from_units(150),
                },
            ]),
            _ => Ok(vec![]),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();
    dotenv::dotenv().ok();

    let config = Config::from_env();
    let mut booking = Booking::new();

    // with a base URL argument the session runs against a live catalog,
    // otherwise against the built-in demo data
    match env::args().nth(1) {
        Some(base_url) => {
            let config = Config {
                api_base_url: base_url,
                ..config
            };
            let service = HttpCatalog::new(&config).expect("failed to build http client");
            let catalog = Catalog::with_ttl(service, config.cache_ttl);
            run_session(&catalog, &mut booking).await;
        }
        None => {
            let catalog = Catalog::with_ttl(DemoCatalog, config.cache_ttl);
            run_session(&catalog, &mut booking).await;
        }
    }
}

/// Scripted booking session: first vehicle, first add-on, a three-day
/// rental starting today.
async fn run_session<S: CatalogService>(catalog: &Catalog<S>, booking: &mut Booking) {
    catalog.load_vehicles(booking).await;

    if let RequestStatus::Error(e) = &booking.state().request_status {
        error!(key = e.display_key(), "vehicle catalog unavailable");
        return;
    }
    let Some(vehicle) = booking.state().vehicles.first().cloned() else {
        warn!("vehicle catalog is empty");
        return;
    };

    let vehicle_id = vehicle.id;
    let _ = booking.apply(Intent::SelectVehicle(vehicle));
    catalog.load_addons(vehicle_id, booking).await;

    if let Some(id) = booking.state().addons.first().map(|addon| addon.id) {
        let _ = booking.apply(Intent::ToggleAddon(id));
    }

    let today = SystemClock.today();
    let dropoff = today + Days::new(3);
    let _ = booking.apply(Intent::SetPickupDate(today.format("%Y-%m-%d").to_string()));
    let _ = booking.apply(Intent::SetDropoffDate(dropoff.format("%Y-%m-%d").to_string()));

    match booking.summary() {
        Some(summary) => {
            print_summary(&summary);
            let _ = booking.apply(Intent::ShowConfirmation);
            let _ = booking.apply(Intent::HideConfirmation);
        }
        None => warn!("booking is incomplete, nothing to summarize"),
    }
}

fn print_summary(summary: &Summary) {
    println!("vehicle,days,base_cost,addons_cost,subtotal,gst,total");
    println!(
        "{},{},{},{},{},{},{}",
        summary.vehicle.name,
        summary.days,
        summary.base_cost.to_units(),
        summary.addons_cost.to_units(),
        summary.subtotal.to_units(),
        summary.gst.to_units(),
        summary.total.to_units(),
    );
}
