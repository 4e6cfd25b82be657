//! # Units and Numeric Helpers
//!
//! Siteline works in SI units throughout; field names carry the unit suffix
//! rather than wrapping every value in a newtype, so JSON stays plain numbers:
//!
//! - Length: metres (`_m`), kilometres (`_km`)
//! - Area: square metres (`_m2`)
//! - Force: kilonewtons (`_kn`)
//! - Pressure: kilonewtons per square metre (`_kn_m2`)
//! - Speed: metres per second (`_ms`)
//! - Rainfall: millimetres per year (`_mm`)
//! - Angles: degrees clockwise from north ([`Degrees`])
//!
//! Reported values are rounded to a fixed number of decimals the same way at
//! every stage, see [`round_to`].
//!
//! ## Example
//!
//! ```rust
//! use site_core::units::{round_to, Degrees};
//!
//! assert_eq!(round_to(1.3500000000000001, 2), 1.35);
//!
//! let a = Degrees(350.0);
//! assert_eq!(a.separation(Degrees(10.0)), 20.0);
//! ```

use serde::{Deserialize, Serialize};

/// Round `value` to `places` decimal digits (half away from zero).
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

// ============================================================================
// Angles
// ============================================================================

/// Compass bearing in degrees, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    /// Bearing wrapped into `[0, 360)`.
    pub fn normalized(self) -> Degrees {
        Degrees(self.0.rem_euclid(360.0))
    }

    /// Bearing rotated clockwise by `delta` degrees, wrapped into `[0, 360)`.
    pub fn rotated(self, delta: f64) -> Degrees {
        Degrees(self.0 + delta).normalized()
    }

    /// Smallest angle between two bearings, in `[0, 180]`.
    pub fn separation(self, other: Degrees) -> f64 {
        let diff = (self.normalized().0 - other.normalized().0).abs();
        diff.min(360.0 - diff)
    }
}

impl From<f64> for Degrees {
    fn from(value: f64) -> Self {
        Degrees(value)
    }
}

impl std::fmt::Display for Degrees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.0)
    }
}
