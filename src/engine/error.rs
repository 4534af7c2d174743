//! Error types for booking transitions.

use thiserror::Error;

use crate::model::AddonId;

/// Top-level error returned by [`Booking::apply`](super::Booking::apply).
///
/// Every variant is recoverable: a rejected intent leaves the state
/// exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error(transparent)]
    Date(#[from] DateError),

    #[error("add-on {0} is not available for the selected vehicle")]
    UnknownAddon(AddonId),

    #[error("booking is not complete")]
    IncompleteBooking,
}

/// Date input rejected at commit time.
///
/// Each variant maps to a stable display key so the presentation layer
/// can localize at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("pickup date is malformed or in the past")]
    InvalidPickup,

    #[error("dropoff date is malformed or not after pickup")]
    InvalidDropoff,

    #[error("date is in the past")]
    PastDate,
}

impl DateError {
    pub fn display_key(self) -> &'static str {
        match self {
            DateError::InvalidPickup => "validation.invalidPickupDate",
            DateError::InvalidDropoff => "validation.invalidDropoffDate",
            DateError::PastDate => "validation.pastDate",
        }
    }
}
