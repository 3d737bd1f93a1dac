//! Traffic-engineering capacity estimates for a single lane.
//!
//! Both quantities are pure functions of `(length, speed)`:
//!
//! ```text
//! headway        = (VEHICLE_LENGTH + MIN_GAP) / (speed / 3) + REACTION_TIME
//! flow_capacity  = floor(3600 / headway)                       veh/h
//! queue_capacity = floor(length / (VEHICLE_LENGTH + MIN_GAP))  vehicles
//! ```

/// Vehicle length in metres.
pub const VEHICLE_LENGTH: f64 = 5.0;

/// Standstill gap between queued vehicles in metres.
pub const MIN_GAP: f64 = 2.5;

/// Driver reaction time (tau) in seconds.
pub const REACTION_TIME: f64 = 1.0;

/// Length and speed of one lane; the inputs of the capacity formulas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LaneCapacity {
    /// Lane length in metres.
    pub length: f64,
    /// Speed limit in m/s.
    pub speed: f64,
}

impl LaneCapacity {
    #[inline]
    pub fn new(length: f64, speed: f64) -> Self {
        Self { length, speed }
    }

    /// Gross time headway between consecutive vehicles, in seconds.
    #[inline]
    pub fn headway_secs(&self) -> f64 {
        (VEHICLE_LENGTH + MIN_GAP) / (self.speed / 3.0) + REACTION_TIME
    }

    /// Vehicles per hour the lane can discharge.
    pub fn flow_capacity(&self) -> u32 {
        (3600.0 / self.headway_secs()) as u32
    }

    /// Vehicles that fit on the lane when stopped bumper to bumper.
    pub fn queue_capacity(&self) -> u32 {
        (self.length / (VEHICLE_LENGTH + MIN_GAP)) as u32
    }
}
