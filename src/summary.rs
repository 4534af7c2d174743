//! Derived price summary.
//!
//! A pure projection over [`BookingState`]: no side effects, no hidden
//! state. The summary exists exactly when the booking is confirmable.

use crate::Amount;
use crate::engine::BookingState;
use crate::model::{Addon, Vehicle};

/// GST rate in basis points (18%).
pub const GST_RATE_BPS: i64 = 1_800;

/// Price breakdown for a valid booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub vehicle: Vehicle,
    /// Whole calendar days between pickup and dropoff, at least 1.
    pub days: i64,
    /// Chosen add-ons, in catalog order.
    pub selected_addons: Vec<Addon>,
    pub base_cost: Amount,
    pub addons_cost: Amount,
    pub subtotal: Amount,
    pub gst: Amount,
    pub total: Amount,
}

/// Compute the summary, or `None` unless a vehicle is selected and a
/// strictly ordered date range is present.
pub fn summarize(state: &BookingState) -> Option<Summary> {
    let vehicle = state.selected_vehicle.clone()?;
    let pickup = state.pickup_date?;
    let dropoff = state.dropoff_date?;
    if dropoff <= pickup {
        return None;
    }

    let days = dropoff.signed_duration_since(pickup).num_days();
    let selected_addons: Vec<Addon> = state
        .addons
        .iter()
        .filter(|addon| state.selected_addon_ids.contains(&addon.id))
        .cloned()
        .collect();

    let base_cost = vehicle.cost_per_day * days;
    let addons_cost = selected_addons
        .iter()
        .map(|addon| addon.cost_per_day * days)
        .sum();
    let subtotal = base_cost + addons_cost;
    let gst = subtotal.percent_bps(GST_RATE_BPS);

    Some(Summary {
        vehicle,
        days,
        selected_addons,
        base_cost,
        addons_cost,
        subtotal,
        gst,
        total: subtotal + gst,
    })
}
