use std::collections::HashSet;

use chrono::NaiveDate;

use crate::catalog::FetchError;
use crate::model::{Addon, AddonId, Vehicle};

/// Lifecycle of the vehicle-list fetch.
///
/// Add-on fetch failures never set this; they silently empty the add-on
/// list so the rest of the form stays usable.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Error(FetchError),
}

/// The single mutable aggregate behind one booking cycle.
///
/// Mutated exclusively through [`Booking::apply`](super::Booking::apply);
/// the presentation layer only ever sees a read-only snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingState {
    pub selected_vehicle: Option<Vehicle>,
    pub pickup_date: Option<NaiveDate>,
    pub dropoff_date: Option<NaiveDate>,
    pub selected_addon_ids: HashSet<AddonId>,
    /// Last successful vehicle fetch, in catalog order.
    pub vehicles: Vec<Vehicle>,
    /// Add-ons scoped to `selected_vehicle`; empty when none is selected
    /// or the fetch is pending or failed.
    pub addons: Vec<Addon>,
    pub request_status: RequestStatus,
    pub confirmation_visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_empty() {
        let state = BookingState::default();
        assert!(state.selected_vehicle.is_none());
        assert!(state.pickup_date.is_none());
        assert!(state.dropoff_date.is_none());
        assert!(state.selected_addon_ids.is_empty());
        assert!(state.vehicles.is_empty());
        assert!(state.addons.is_empty());
        assert_eq!(state.request_status, RequestStatus::Idle);
        assert!(!state.confirmation_visible);
    }
}
