//! Booking state machine.
//!
//! The engine owns the single [`BookingState`] aggregate and mutates it
//! through a closed set of intents. Every transition is synchronous and
//! total: a rejected intent returns an error and leaves the state
//! untouched. Fetch completions re-enter as ordinary intents, so no
//! locking is needed; there is only one state owner.

use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::date;
use crate::model::{Addon, AddonId, Intent, Vehicle, VehicleId};
use crate::summary::{self, Summary};

mod state;
pub use state::{BookingState, RequestStatus};

mod error;
pub use error::{BookingError, DateError};

/// The booking engine.
///
/// Holds the current booking state and the clock used for past-date
/// validation.
pub struct Booking {
    state: BookingState,
    clock: Box<dyn Clock>,
}

/// Public API
impl Booking {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            state: BookingState::default(),
            clock,
        }
    }

    /// Run the engine over a stream of intents.
    ///
    /// This is the sequential event queue: user events and fetch
    /// completions are applied one at a time, in arrival order.
    pub async fn run(&mut self, mut stream: impl Stream<Item = Intent> + Unpin) {
        while let Some(intent) = stream.next().await {
            // a rejected intent should not stop the engine
            let _ = self.apply(intent);
        }
    }

    /// Read-only snapshot of the current state.
    pub fn state(&self) -> &BookingState {
        &self.state
    }

    /// Price breakdown for the current booking, present iff the booking
    /// is valid.
    pub fn summary(&self) -> Option<Summary> {
        summary::summarize(&self.state)
    }

    /// Whether a confirmable booking currently exists.
    pub fn is_valid(&self) -> bool {
        self.summary().is_some()
    }

    /// Apply a single intent on top of the current state.
    pub fn apply(&mut self, intent: Intent) -> Result<(), BookingError> {
        let name = intent.name();
        let result = self.transition(intent);
        match &result {
            Ok(()) => info!(intent = name, "intent applied"),
            Err(e) => info!(intent = name, reason = %e, "intent rejected"),
        }
        result
    }
}

/// Private API
impl Booking {
    fn transition(&mut self, intent: Intent) -> Result<(), BookingError> {
        match intent {
            Intent::SelectVehicle(vehicle) => self.select_vehicle(vehicle),
            Intent::SetPickupDate(raw) => self.set_pickup_date(&raw)?,
            Intent::SetDropoffDate(raw) => self.set_dropoff_date(&raw)?,
            Intent::ToggleAddon(id) => self.toggle_addon(id)?,
            Intent::RequestVehicles => {
                self.state.request_status = RequestStatus::Loading;
            }
            Intent::VehiclesLoaded(vehicles) => {
                self.state.request_status = RequestStatus::Idle;
                self.state.vehicles = vehicles;
            }
            Intent::VehiclesFailed(error) => {
                self.state.request_status = RequestStatus::Error(error);
            }
            Intent::AddonsLoaded { vehicle, addons } => self.addons_loaded(vehicle, addons),
            Intent::AddonsFailed { vehicle, error } => {
                if self.is_selected(vehicle) {
                    if !self.state.vehicles.is_empty() {
                        warn!(vehicle, key = error.display_key(), "continuing without add-ons");
                    }
                    self.state.addons.clear();
                    self.state.selected_addon_ids.clear();
                } else {
                    debug!(vehicle, "dropping add-on failure for unselected vehicle");
                }
            }
            Intent::ShowConfirmation => {
                if !self.is_valid() {
                    return Err(BookingError::IncompleteBooking);
                }
                self.state.confirmation_visible = true;
            }
            Intent::HideConfirmation => {
                // dismissing the overlay ends the booking cycle
                self.state = BookingState::default();
            }
        }
        Ok(())
    }

    fn is_selected(&self, vehicle: VehicleId) -> bool {
        self.state
            .selected_vehicle
            .as_ref()
            .is_some_and(|v| v.id == vehicle)
    }

    /// Selecting a different vehicle clears the date range; any selection
    /// clears the add-on list and the choices over it, atomically.
    fn select_vehicle(&mut self, vehicle: Vehicle) {
        if self
            .state
            .selected_vehicle
            .as_ref()
            .is_some_and(|prev| prev.id != vehicle.id)
        {
            self.state.pickup_date = None;
            self.state.dropoff_date = None;
        }
        self.state.selected_vehicle = Some(vehicle);
        self.state.selected_addon_ids.clear();
        self.state.addons.clear();
    }

    /// Commit a pickup date. Malformed or past input is rejected, never
    /// stored. Moving pickup onto or past the current dropoff silently
    /// clears dropoff.
    fn set_pickup_date(&mut self, raw: &str) -> Result<(), DateError> {
        if raw.is_empty() {
            self.state.pickup_date = None;
            return Ok(());
        }

        let pickup = date::parse(raw).ok_or(DateError::InvalidPickup)?;
        if pickup < self.clock.today() {
            return Err(DateError::InvalidPickup);
        }

        self.state.pickup_date = Some(pickup);
        if self.state.dropoff_date.is_some_and(|dropoff| dropoff <= pickup) {
            self.state.dropoff_date = None;
        }
        Ok(())
    }

    /// Commit a dropoff date. Must be a real future date strictly after
    /// pickup when pickup is set.
    fn set_dropoff_date(&mut self, raw: &str) -> Result<(), DateError> {
        if raw.is_empty() {
            self.state.dropoff_date = None;
            return Ok(());
        }

        let dropoff = date::parse(raw).ok_or(DateError::InvalidDropoff)?;
        if dropoff < self.clock.today() {
            return Err(DateError::PastDate);
        }
        if self.state.pickup_date.is_some_and(|pickup| dropoff <= pickup) {
            return Err(DateError::InvalidDropoff);
        }

        self.state.dropoff_date = Some(dropoff);
        Ok(())
    }

    /// Toggling an id not offered for the selected vehicle is a
    /// programmer error; reject it without touching the selection.
    fn toggle_addon(&mut self, id: AddonId) -> Result<(), BookingError> {
        if !self.state.addons.iter().any(|addon| addon.id == id) {
            return Err(BookingError::UnknownAddon(id));
        }
        if !self.state.selected_addon_ids.remove(&id) {
            self.state.selected_addon_ids.insert(id);
        }
        Ok(())
    }

    /// Results are tagged with the vehicle they were fetched for; a tag
    /// that no longer matches the selection means the user moved on and
    /// the result is discarded.
    fn addons_loaded(&mut self, vehicle: VehicleId, addons: Vec<Addon>) {
        if !self.is_selected(vehicle) {
            debug!(vehicle, "discarding stale add-on result");
            return;
        }
        self.state
            .selected_addon_ids
            .retain(|id| addons.iter().any(|addon| addon.id == *id));
        self.state.addons = addons;
    }
}

impl Default for Booking {
    fn default() -> Self {
        Self::new()
    }
}
