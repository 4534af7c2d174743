//! Core domain types for the booking engine.

use serde::{Deserialize, Serialize};

use crate::Amount;
use crate::catalog::FetchError;

/// Vehicle identifier.
pub type VehicleId = u32;

/// Add-on identifier.
pub type AddonId = u32;

/// A rentable vehicle from the catalog. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    #[serde(rename = "costPerDay")]
    pub cost_per_day: Amount,
    /// Decorative glyph shown next to the name.
    #[serde(default)]
    pub glyph: String,
}

/// An optional extra scoped to the vehicle it was fetched for.
/// Replaced wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addon {
    pub id: AddonId,
    pub name: String,
    #[serde(rename = "costPerDay")]
    pub cost_per_day: Amount,
}

/// An intent representing the possible inputs of the booking engine.
///
/// User events and fetch completions alike enter the engine through this
/// closed set; each maps to exactly one synchronous transition.
#[derive(Debug, Clone)]
pub enum Intent {
    /// Choose a vehicle; clears the add-on selection, and the date range
    /// too when the vehicle differs from the previous choice.
    SelectVehicle(Vehicle),
    /// Commit a pickup date string; empty clears it.
    SetPickupDate(String),
    /// Commit a dropoff date string; empty clears it.
    SetDropoffDate(String),
    /// Add or remove an add-on from the selection.
    ToggleAddon(AddonId),
    /// A vehicle-list fetch has started.
    RequestVehicles,
    /// A vehicle-list fetch succeeded.
    VehiclesLoaded(Vec<Vehicle>),
    /// A vehicle-list fetch failed; blocks the form until retried.
    VehiclesFailed(FetchError),
    /// An add-on fetch succeeded for the tagged vehicle.
    AddonsLoaded {
        vehicle: VehicleId,
        addons: Vec<Addon>,
    },
    /// An add-on fetch failed for the tagged vehicle; non-fatal.
    AddonsFailed {
        vehicle: VehicleId,
        error: FetchError,
    },
    /// Open the confirmation overlay; requires a valid booking.
    ShowConfirmation,
    /// Dismiss the overlay and reset the booking for the next cycle.
    HideConfirmation,
}

impl Intent {
    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::SelectVehicle(_) => "select_vehicle",
            Intent::SetPickupDate(_) => "set_pickup_date",
            Intent::SetDropoffDate(_) => "set_dropoff_date",
            Intent::ToggleAddon(_) => "toggle_addon",
            Intent::RequestVehicles => "request_vehicles",
            Intent::VehiclesLoaded(_) => "vehicles_loaded",
            Intent::VehiclesFailed(_) => "vehicles_failed",
            Intent::AddonsLoaded { .. } => "addons_loaded",
            Intent::AddonsFailed { .. } => "addons_failed",
            Intent::ShowConfirmation => "show_confirmation",
            Intent::HideConfirmation => "hide_confirmation",
        }
    }
}
