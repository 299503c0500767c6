//! Configuration constants and settings for remnant tracking.

/// Floating-point comparison epsilon (cm and m² alike).
pub const EPS: f64 = 0.0001;

/// Square centimeters per square meter.
pub const CM2_PER_M2: f64 = 10_000.0;

/// Remaining area (m²) below which a slab counts as used up.
pub const EXHAUSTION_THRESHOLD_M2: f64 = 0.05;

/// Decimal places kept for the area consumed by a cut.
pub const AREA_DECIMALS: u32 = 4;

/// Default location of the JSON store used by the CLI.
pub const DEFAULT_STORE_FILE: &str = "remnant-store.json";

/// Tenant used when none is given.
pub const DEFAULT_TENANT: &str = "default";

/// Tracker configuration.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Area (m²) under which a committed remnant is terminal.
    pub exhaustion_threshold_m2: f64,
    /// Decimal places for `area_used` on cut records.
    pub area_decimals: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            exhaustion_threshold_m2: EXHAUSTION_THRESHOLD_M2,
            area_decimals: AREA_DECIMALS,
        }
    }
}

impl TrackerConfig {
    /// Create a configuration with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the exhaustion threshold.
    pub fn with_exhaustion_threshold(mut self, threshold_m2: f64) -> Self {
        self.exhaustion_threshold_m2 = threshold_m2;
        self
    }

    /// Check whether an area (m²) is below the exhaustion threshold.
    pub fn is_exhausted_area(&self, area_m2: f64) -> bool {
        area_m2 < self.exhaustion_threshold_m2
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if a float is approximately zero.
    #[inline]
    pub fn approx_zero(a: f64) -> bool {
        a.abs() < EPS
    }

    /// Check if a is in range [min, max] with epsilon tolerance.
    #[inline]
    pub fn in_range(a: f64, min: f64, max: f64) -> bool {
        a >= min - EPS && a <= max + EPS
    }

    /// Round to a fixed number of decimal places.
    #[inline]
    pub fn round_to(value: f64, decimals: u32) -> f64 {
        let factor = 10f64.powi(decimals as i32);
        (value * factor).round() / factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.exhaustion_threshold_m2, 0.05);
        assert_eq!(config.area_decimals, 4);
    }

    #[test]
    fn test_is_exhausted_area() {
        let config = TrackerConfig::new();
        assert!(config.is_exhausted_area(0.03));
        assert!(!config.is_exhausted_area(0.08));
        assert!(!config.is_exhausted_area(0.05));
    }

    #[test]
    fn test_custom_threshold() {
        let config = TrackerConfig::new().with_exhaustion_threshold(0.1);
        assert!(config.is_exhausted_area(0.08));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(float_cmp::round_to(1.234_56, 4), 1.2346);
        assert_eq!(float_cmp::round_to(-0.000_04, 4), -0.0);
        assert_eq!(float_cmp::round_to(2.5, 0), 3.0);
    }

    #[test]
    fn test_approx() {
        assert!(float_cmp::approx_eq(1.0, 1.000_01));
        assert!(!float_cmp::approx_eq(1.0, 1.001));
        assert!(float_cmp::approx_zero(0.000_01));
    }
}
