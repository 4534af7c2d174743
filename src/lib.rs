pub mod amount;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod date;
pub mod engine;
pub mod model;
pub mod summary;

pub use amount::Amount;
pub use catalog::{Catalog, CatalogService, FetchError, HttpCatalog};
pub use config::Config;
pub use engine::{Booking, BookingError, BookingState, DateError, RequestStatus};
pub use model::{Addon, AddonId, Intent, Vehicle, VehicleId};
pub use summary::Summary;
