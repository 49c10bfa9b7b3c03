//! Environmental snapshot - immutable readings for one location and time.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{LocationId, Timestamp, ValidationError};

/// UV index above which photosensitizing actives are excluded by day.
pub const UV_CRITICAL: f64 = 3.0;
/// Relative humidity (%) below which the air counts as dry.
pub const HUMIDITY_LOW: f64 = 45.0;
/// Relative humidity (%) above which the air counts as humid.
pub const HUMIDITY_HIGH: f64 = 70.0;
/// PM2.5 concentration (µg/m³) above which the air counts as polluted.
pub const PM25_POLLUTED: f64 = 25.0;

/// WHO UV index bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

/// Humidity bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HumidityLevel {
    VeryDry,
    Dry,
    Normal,
    Humid,
}

/// Air quality bands based on PM2.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollutionLevel {
    Excellent,
    Good,
    Moderate,
    Poor,
    VeryPoor,
    Unknown,
}

/// Environmental readings used by one decision.
///
/// Fields are private; a snapshot can only be built through [`EnvironmentalSnapshot::new`]
/// (or deserialized through it), so every instance satisfies the range checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotData", into = "SnapshotData")]
pub struct EnvironmentalSnapshot {
    location_id: LocationId,
    captured_at: Timestamp,
    uv_index: f64,
    humidity_pct: f64,
    pm25: Option<f64>,
    temperature_c: f64,
}

/// Serialized shape of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotData {
    location_id: LocationId,
    captured_at: Timestamp,
    uv_index: f64,
    humidity_pct: f64,
    #[serde(default)]
    pm25: Option<f64>,
    temperature_c: f64,
}

impl EnvironmentalSnapshot {
    /// Creates a snapshot, validating every reading.
    ///
    /// # Errors
    ///
    /// - non-finite values
    /// - `uv_index < 0`, `pm25 < 0`
    /// - `humidity_pct` outside [0, 100]
    pub fn new(
        location_id: LocationId,
        captured_at: Timestamp,
        uv_index: f64,
        humidity_pct: f64,
        pm25: Option<f64>,
        temperature_c: f64,
    ) -> Result<Self, ValidationError> {
        check_finite("uv_index", uv_index)?;
        check_finite("humidity_pct", humidity_pct)?;
        check_finite("temperature_c", temperature_c)?;
        if uv_index < 0.0 {
            return Err(ValidationError::out_of_range("uv_index", 0.0, f64::INFINITY, uv_index));
        }
        if !(0.0..=100.0).contains(&humidity_pct) {
            return Err(ValidationError::out_of_range("humidity_pct", 0.0, 100.0, humidity_pct));
        }
        if let Some(pm) = pm25 {
            check_finite("pm25", pm)?;
            if pm < 0.0 {
                return Err(ValidationError::out_of_range("pm25", 0.0, f64::INFINITY, pm));
            }
        }

        Ok(Self {
            location_id,
            captured_at,
            uv_index,
            humidity_pct,
            pm25,
            temperature_c,
        })
    }

    pub fn location_id(&self) -> &LocationId {
        &self.location_id
    }

    pub fn captured_at(&self) -> Timestamp {
        self.captured_at
    }

    pub fn uv_index(&self) -> f64 {
        self.uv_index
    }

    pub fn humidity_pct(&self) -> f64 {
        self.humidity_pct
    }

    pub fn pm25(&self) -> Option<f64> {
        self.pm25
    }

    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    /// UV strong enough to exclude photosensitizing actives by day.
    pub fn is_uv_critical(&self) -> bool {
        self.uv_index > UV_CRITICAL
    }

    pub fn is_dry(&self) -> bool {
        self.humidity_pct < HUMIDITY_LOW
    }

    pub fn is_humid(&self) -> bool {
        self.humidity_pct > HUMIDITY_HIGH
    }

    /// A missing PM2.5 reading never counts as polluted.
    pub fn is_polluted(&self) -> bool {
        self.pm25.is_some_and(|pm| pm > PM25_POLLUTED)
    }

    pub fn uv_level(&self) -> UvLevel {
        match self.uv_index {
            uv if uv < 3.0 => UvLevel::Low,
            uv if uv < 6.0 => UvLevel::Moderate,
            uv if uv < 8.0 => UvLevel::High,
            uv if uv < 11.0 => UvLevel::VeryHigh,
            _ => UvLevel::Extreme,
        }
    }

    pub fn humidity_level(&self) -> HumidityLevel {
        match self.humidity_pct {
            h if h < 30.0 => HumidityLevel::VeryDry,
            h if h < 50.0 => HumidityLevel::Dry,
            h if h < 70.0 => HumidityLevel::Normal,
            _ => HumidityLevel::Humid,
        }
    }

    pub fn pollution_level(&self) -> PollutionLevel {
        match self.pm25 {
            None => PollutionLevel::Unknown,
            Some(pm) if pm < 10.0 => PollutionLevel::Excellent,
            Some(pm) if pm < 25.0 => PollutionLevel::Good,
            Some(pm) if pm < 50.0 => PollutionLevel::Moderate,
            Some(pm) if pm < 75.0 => PollutionLevel::Poor,
            Some(_) => PollutionLevel::VeryPoor,
        }
    }
}

fn check_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::invalid_format(field, "must be a finite number"))
    }
}

impl TryFrom<SnapshotData> for EnvironmentalSnapshot {
    type Error = ValidationError;

    fn try_from(data: SnapshotData) -> Result<Self, Self::Error> {
        Self::new(
            data.location_id,
            data.captured_at,
            data.uv_index,
            data.humidity_pct,
            data.pm25,
            data.temperature_c,
        )
    }
}

impl From<EnvironmentalSnapshot> for SnapshotData {
    fn from(s: EnvironmentalSnapshot) -> Self {
        Self {
            location_id: s.location_id,
            captured_at: s.captured_at,
            uv_index: s.uv_index,
            humidity_pct: s.humidity_pct,
            pm25: s.pm25,
            temperature_c: s.temperature_c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(uv: f64, humidity: f64, pm25: Option<f64>) -> Result<EnvironmentalSnapshot, ValidationError> {
        EnvironmentalSnapshot::new(
            LocationId::new("paris-france").unwrap(),
            Timestamp::now(),
            uv,
            humidity,
            pm25,
            18.5,
        )
    }

    #[test]
    fn valid_readings_are_accepted() {
        let s = snapshot(5.0, 30.0, Some(10.0)).unwrap();
        assert_eq!(s.uv_index(), 5.0);
        assert_eq!(s.humidity_pct(), 30.0);
        assert_eq!(s.pm25(), Some(10.0));
    }

    #[test]
    fn negative_uv_is_rejected() {
        assert!(snapshot(-0.1, 50.0, None).is_err());
    }

    #[test]
    fn humidity_outside_percent_range_is_rejected() {
        assert!(snapshot(1.0, 100.5, None).is_err());
        assert!(snapshot(1.0, -1.0, None).is_err());
        assert!(snapshot(1.0, 100.0, None).is_ok());
    }

    #[test]
    fn negative_or_nan_pm25_is_rejected() {
        assert!(snapshot(1.0, 50.0, Some(-3.0)).is_err());
        assert!(snapshot(1.0, 50.0, Some(f64::NAN)).is_err());
    }

    #[test]
    fn thresholds_are_strict() {
        let at = snapshot(UV_CRITICAL, HUMIDITY_LOW, Some(PM25_POLLUTED)).unwrap();
        assert!(!at.is_uv_critical());
        assert!(!at.is_dry());
        assert!(!at.is_polluted());

        let humid_edge = snapshot(0.0, HUMIDITY_HIGH, None).unwrap();
        assert!(!humid_edge.is_humid());
    }

    #[test]
    fn missing_pm25_is_never_polluted() {
        let s = snapshot(1.0, 50.0, None).unwrap();
        assert!(!s.is_polluted());
        assert_eq!(s.pollution_level(), PollutionLevel::Unknown);
    }

    #[test]
    fn level_bands_follow_who_scale() {
        assert_eq!(snapshot(2.9, 50.0, None).unwrap().uv_level(), UvLevel::Low);
        assert_eq!(snapshot(6.0, 50.0, None).unwrap().uv_level(), UvLevel::High);
        assert_eq!(snapshot(11.0, 50.0, None).unwrap().uv_level(), UvLevel::Extreme);
        assert_eq!(snapshot(0.0, 29.0, None).unwrap().humidity_level(), HumidityLevel::VeryDry);
        assert_eq!(snapshot(0.0, 80.0, Some(60.0)).unwrap().pollution_level(), PollutionLevel::Poor);
    }

    #[test]
    fn deserialization_revalidates() {
        let s = snapshot(4.0, 55.0, Some(12.0)).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let back: EnvironmentalSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);

        let bad = json.replace("55.0", "155.0");
        assert!(serde_json::from_str::<EnvironmentalSnapshot>(&bad).is_err());
    }
}
