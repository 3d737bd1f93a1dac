//! Realization parameters.

/// Tunables applied while realizing lanes and traffic-light programs.
///
/// Loaded from the optional `realization` section of `config.yml`; every
/// missing field falls back to [`Default`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RealizeConfig {
    /// Duration in seconds of every go and yield phase.  Default: 30.
    pub phase_duration: f64,

    /// Speed limit of road lanes in m/s.  Default: 13.
    pub lane_speed: f64,

    /// Speed limit of junction-internal lanes in m/s.  Default: 5.
    pub internal_lane_speed: f64,

    /// Nominal length of junction-internal lanes in metres.  Default: 5.
    pub internal_lane_length: f64,
}

impl Default for RealizeConfig {
    fn default() -> Self {
        Self {
            phase_duration:       30.0,
            lane_speed:           13.0,
            internal_lane_speed:  5.0,
            internal_lane_length: 5.0,
        }
    }
}
