//! # Subject Facts
//!
//! The plain structured inputs every analyzer consumes: site survey facts,
//! building facts and (optionally) prevailing wind facts for one building
//! subject. The core never fetches these itself; an input provider hands them
//! over already assembled.
//!
//! Facts are validated once at the pipeline boundary with `validate()`. The
//! analyzers assume validated input and never fail.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "site": {
//!     "soil_type": "SANDY",
//!     "seismic_zone": "ZONE_III",
//!     "flood_risk": "MEDIUM",
//!     "elevation_m": 12.0,
//!     "water_table_depth_m": 6.0,
//!     "slope_deg": 2.0,
//!     "nearby_water_body": false
//!   },
//!   "building": {
//!     "building_use": "RESIDENTIAL",
//!     "total_floors": 4,
//!     "floor_height_m": 3.0,
//!     "total_height_m": 12.0,
//!     "built_up_area_m2": 400.0,
//!     "orientation": "NORTH",
//!     "structural_system": "RCC"
//!   },
//!   "wind": {
//!     "direction_deg": 225.0,
//!     "average_speed_ms": 33.0,
//!     "peak_gust_ms": 44.0,
//!     "terrain": "CATEGORY_2"
//!   }
//! }
//! ```

pub mod classifications;

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, AnalysisResult};

pub use classifications::{
    BuildingUse, FloodRisk, Orientation, SeismicZone, SoilType, StructuralSystem, TerrainCategory,
};

/// Maximum number of floors accepted
pub const MAX_FLOORS: u32 = 200;

/// Accepted range for the typical floor-to-floor height, in metres
pub const FLOOR_HEIGHT_RANGE_M: (f64, f64) = (2.5, 6.0);

/// Geographic position of the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// Site survey facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteFacts {
    pub soil_type: SoilType,
    pub seismic_zone: SeismicZone,
    pub flood_risk: FloodRisk,

    /// Elevation above mean sea level
    pub elevation_m: f64,

    /// Depth from grade to the water table
    pub water_table_depth_m: f64,

    /// Ground slope in degrees (0-90)
    pub slope_deg: f64,

    /// Whether a river, lake or sea lies near the plot
    pub nearby_water_body: bool,

    /// Distance to that water body; only meaningful when `nearby_water_body` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_body_distance_m: Option<f64>,

    /// Average annual rainfall
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rainfall_mm: Option<f64>,

    /// Distance to the coastline, when the site is coastal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_coast_km: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_area_m2: Option<f64>,
}

impl SiteFacts {
    /// Validate survey facts.
    pub fn validate(&self) -> AnalysisResult<()> {
        require_finite("elevation_m", self.elevation_m)?;
        require_range("slope_deg", self.slope_deg, 0.0, 90.0, "Slope must be between 0 and 90 degrees")?;
        require_positive("water_table_depth_m", self.water_table_depth_m, "Water table depth must be positive")?;

        if let Some(distance) = self.water_body_distance_m {
            if !self.nearby_water_body {
                return Err(AnalysisError::invalid_input(
                    "water_body_distance_m",
                    distance.to_string(),
                    "Water body distance given but nearby_water_body is false",
                ));
            }
            require_positive("water_body_distance_m", distance, "Water body distance must be positive")?;
        }
        if let Some(rainfall) = self.average_rainfall_mm {
            require_positive("average_rainfall_mm", rainfall, "Average rainfall must be positive")?;
        }
        if let Some(coast) = self.distance_from_coast_km {
            require_range("distance_from_coast_km", coast, 0.0, f64::MAX, "Coast distance cannot be negative")?;
        }
        if let Some(location) = self.location {
            require_range("latitude", location.latitude, -90.0, 90.0, "Latitude must be between -90 and 90")?;
            require_range("longitude", location.longitude, -180.0, 180.0, "Longitude must be between -180 and 180")?;
        }
        if let Some(area) = self.plot_area_m2 {
            require_positive("plot_area_m2", area, "Plot area must be positive")?;
        }
        Ok(())
    }
}

/// Proposed building design facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingFacts {
    pub building_use: BuildingUse,

    /// Number of storeys above grade (1-200)
    pub total_floors: u32,

    /// Typical floor-to-floor height (2.5-6.0 m)
    pub floor_height_m: f64,

    pub total_height_m: f64,

    /// Built-up area per floor
    pub built_up_area_m2: f64,

    /// Facing direction, also used as the entrance direction
    pub orientation: Orientation,

    pub structural_system: StructuralSystem,

    /// Measured storey heights from ground up, when the design has them.
    ///
    /// Without these every storey is assumed to be `total_height_m / total_floors`
    /// and soft-story detection cannot fire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_heights_m: Option<Vec<f64>>,
}

impl BuildingFacts {
    /// Validate building facts.
    pub fn validate(&self) -> AnalysisResult<()> {
        validate_floor_count(self.total_floors)?;
        let (min_floor, max_floor) = FLOOR_HEIGHT_RANGE_M;
        require_range(
            "floor_height_m",
            self.floor_height_m,
            min_floor,
            max_floor,
            "Floor height must be between 2.5 and 6.0 m",
        )?;
        require_positive("total_height_m", self.total_height_m, "Total height must be positive")?;
        require_positive("built_up_area_m2", self.built_up_area_m2, "Built-up area must be positive")?;

        if let Some(heights) = &self.floor_heights_m {
            validate_floor_heights(heights, self.total_floors)?;
        }
        Ok(())
    }

    /// Plan width assuming a square footprint
    pub fn footprint_width_m(&self) -> f64 {
        self.built_up_area_m2.sqrt()
    }
}

/// Prevailing wind facts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindFacts {
    /// Prevailing direction the wind blows from (0-360)
    pub direction_deg: f64,
    pub average_speed_ms: f64,
    pub peak_gust_ms: f64,
    pub terrain: TerrainCategory,
}

impl WindFacts {
    /// Validate wind facts.
    pub fn validate(&self) -> AnalysisResult<()> {
        require_range("direction_deg", self.direction_deg, 0.0, 360.0, "Wind direction must be between 0 and 360")?;
        require_positive("average_speed_ms", self.average_speed_ms, "Average wind speed must be positive")?;
        require_positive("peak_gust_ms", self.peak_gust_ms, "Peak gust speed must be positive")?;
        Ok(())
    }
}

/// Everything known about one building subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectFacts {
    pub site: SiteFacts,
    pub building: BuildingFacts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<WindFacts>,
}

impl SubjectFacts {
    /// Validate all facts, stopping at the first violation.
    pub fn validate(&self) -> AnalysisResult<()> {
        self.site.validate()?;
        self.building.validate()?;
        if let Some(wind) = &self.wind {
            wind.validate()?;
        }
        Ok(())
    }
}

/// Floor count within 1..=MAX_FLOORS.
pub(crate) fn validate_floor_count(total_floors: u32) -> AnalysisResult<()> {
    if total_floors == 0 || total_floors > MAX_FLOORS {
        return Err(AnalysisError::invalid_input(
            "total_floors",
            total_floors.to_string(),
            format!("Floor count must be between 1 and {}", MAX_FLOORS),
        ));
    }
    Ok(())
}

/// One positive storey height per floor.
pub(crate) fn validate_floor_heights(heights: &[f64], total_floors: u32) -> AnalysisResult<()> {
    if heights.len() != total_floors as usize {
        return Err(AnalysisError::invalid_input(
            "floor_heights_m",
            heights.len().to_string(),
            format!("Expected one height per floor ({} floors)", total_floors),
        ));
    }
    for height in heights {
        require_positive("floor_heights_m", *height, "Storey heights must be positive")?;
    }
    Ok(())
}

fn require_finite(field: &str, value: f64) -> AnalysisResult<()> {
    if !value.is_finite() {
        return Err(AnalysisError::invalid_input(field, value.to_string(), "Value must be a finite number"));
    }
    Ok(())
}

fn require_positive(field: &str, value: f64, reason: &str) -> AnalysisResult<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(AnalysisError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

fn require_range(field: &str, value: f64, min: f64, max: f64, reason: &str) -> AnalysisResult<()> {
    require_finite(field, value)?;
    if value < min || value > max {
        return Err(AnalysisError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn site() -> SiteFacts {
        SiteFacts {
            soil_type: SoilType::Sandy,
            seismic_zone: SeismicZone::ZoneIII,
            flood_risk: FloodRisk::Medium,
            elevation_m: 12.0,
            water_table_depth_m: 6.0,
            slope_deg: 2.0,
            nearby_water_body: false,
            water_body_distance_m: None,
            average_rainfall_mm: None,
            distance_from_coast_km: None,
            location: None,
            plot_area_m2: None,
        }
    }

    pub fn building() -> BuildingFacts {
        BuildingFacts {
            building_use: BuildingUse::Residential,
            total_floors: 4,
            floor_height_m: 3.0,
            total_height_m: 12.0,
            built_up_area_m2: 400.0,
            orientation: Orientation::North,
            structural_system: StructuralSystem::Rcc,
            floor_heights_m: None,
        }
    }

    pub fn wind() -> WindFacts {
        WindFacts {
            direction_deg: 225.0,
            average_speed_ms: 33.0,
            peak_gust_ms: 44.0,
            terrain: TerrainCategory::Urban,
        }
    }

    pub fn subject() -> SubjectFacts {
        SubjectFacts {
            site: site(),
            building: building(),
            wind: Some(wind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures;
    use super::*;

    #[test]
    fn test_valid_fixture() {
        assert!(fixtures::subject().validate().is_ok());
    }

    #[test]
    fn test_zero_area_rejected() {
        let mut facts = fixtures::subject();
        facts.building.built_up_area_m2 = 0.0;
        let err = facts.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(matches!(err, AnalysisError::InvalidInput { ref field, .. } if field == "built_up_area_m2"));
    }

    #[test]
    fn test_floor_count_bounds() {
        let mut building = fixtures::building();
        building.total_floors = 0;
        assert!(building.validate().is_err());
        building.total_floors = 201;
        assert!(building.validate().is_err());
        building.total_floors = 200;
        assert!(building.validate().is_ok());
    }

    #[test]
    fn test_floor_height_bounds() {
        let mut building = fixtures::building();
        building.floor_height_m = 2.4;
        assert!(building.validate().is_err());
        building.floor_height_m = 6.0;
        assert!(building.validate().is_ok());
    }

    #[test]
    fn test_floor_heights_must_match_floor_count() {
        let mut building = fixtures::building();
        building.floor_heights_m = Some(vec![3.0, 3.0]);
        assert!(building.validate().is_err());
        building.floor_heights_m = Some(vec![]);
        assert!(building.validate().is_err());
        building.floor_heights_m = Some(vec![3.0, 3.0, -1.0, 3.0]);
        assert!(building.validate().is_err());
        building.floor_heights_m = Some(vec![4.5, 2.5, 2.5, 2.5]);
        assert!(building.validate().is_ok());
    }

    #[test]
    fn test_water_distance_requires_flag() {
        let mut site = fixtures::site();
        site.water_body_distance_m = Some(50.0);
        assert!(site.validate().is_err());
        site.nearby_water_body = true;
        assert!(site.validate().is_ok());
    }

    #[test]
    fn test_wind_direction_range() {
        let mut wind = fixtures::wind();
        wind.direction_deg = 361.0;
        assert!(wind.validate().is_err());
        wind.direction_deg = 0.0;
        assert!(wind.validate().is_ok());
    }

    #[test]
    fn test_nan_rejected() {
        let mut site = fixtures::site();
        site.elevation_m = f64::NAN;
        assert!(site.validate().is_err());
    }

    #[test]
    fn test_optional_fields_default_when_absent() {
        let json = r#"{
            "soil_type": "CLAY",
            "seismic_zone": "ZONE_II",
            "flood_risk": "LOW",
            "elevation_m": 5.0,
            "water_table_depth_m": 4.0,
            "slope_deg": 0.0,
            "nearby_water_body": false
        }"#;
        let site: SiteFacts = serde_json::from_str(json).unwrap();
        assert_eq!(site.average_rainfall_mm, None);
        assert_eq!(site.location, None);
        assert!(site.validate().is_ok());
    }

    #[test]
    fn test_footprint_width() {
        let building = fixtures::building();
        assert_eq!(building.footprint_width_m(), 20.0);
    }

}
