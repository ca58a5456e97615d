//! Plain records exchanged with the plantation backend.
//!
//! These mirror the JSON the REST API serves (`GET /plantations`, `GET /plannings`):
//! camelCase keys, `_id` identifiers, and ISO-8601 date strings. Dates are accepted either
//! as bare `YYYY-MM-DD` or as full RFC 3339 timestamps and are always written back as
//! `YYYY-MM-DD`.

use crate::errors::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Land area given to every plantation at creation time.
pub const DEFAULT_LAND_AREA: f64 = 1.0;

const fn default_land_area() -> f64 {
    DEFAULT_LAND_AREA
}

/// A cultivation project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plantation {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name of the project
    pub project_name: String,
    /// Crop grown on the plantation (coconut, mango, rambutan, pineapple, tea)
    #[serde(alias = "type")]
    pub crop_type: String,
    /// Cultivated area
    #[serde(default = "default_land_area")]
    pub land_area: f64,
    /// Planting date
    #[serde(with = "iso_date")]
    pub start_date: NaiveDate,
    /// Harvest date as last stored by the backend. Dashboards re-derive it instead of trusting it.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "iso_date::option")]
    pub harvest_date: Option<NaiveDate>,
    /// Where the plantation is
    pub location: String,
    /// Staff assigned to the project
    pub employees: u32,
    /// Soft completion flag
    #[serde(default)]
    pub completed: bool,
    /// Set only once the project is completed
    #[serde(default, skip_serializing_if = "Option::is_none", with = "iso_date::option")]
    pub completed_date: Option<NaiveDate>,
}

/// Soil, fertilizer, and pest-control plan attached to a single plantation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planning {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Identifier of the owning plantation
    pub project_id: String,
    /// Soil measurements; absent when the plan was saved without them
    #[serde(default)]
    pub soil_data: Option<SoilData>,
    /// Fertilizer applications in entry order
    #[serde(default)]
    pub fertilizer_schedules: Vec<FertilizerSchedule>,
    /// Pest-control treatments in entry order
    #[serde(default)]
    pub pest_controls: Vec<PestControl>,
    /// When the plan was first saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Soil measurements feeding the quality rating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilData {
    /// pH level, expected between 4.0 and 10.0
    #[serde(default)]
    pub ph_level: Option<f64>,
    /// Soil texture
    #[serde(default)]
    pub texture: Option<Texture>,
    /// Nutrient level
    #[serde(default)]
    pub nutrients: Option<NutrientLevel>,
    /// Stored rating. Always overwritten from the three inputs when saved.
    #[serde(default, deserialize_with = "lenient_quality")]
    pub quality: Option<SoilQuality>,
}

/// One fertilizer application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FertilizerSchedule {
    /// Sub-record identifier, when the backend assigned one
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Fertilizer name (e.g. "NPK 15-15-15")
    #[serde(rename = "type", default)]
    pub fertilizer_type: String,
    /// Application date
    #[serde(default, skip_serializing_if = "Option::is_none", with = "iso_date::option")]
    pub date: Option<NaiveDate>,
    /// Amount applied
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Application method (e.g. "Broadcast")
    #[serde(default)]
    pub method: String,
    /// Whether this entry shows up as a reminder
    #[serde(default)]
    pub reminder: bool,
}

/// One pest-control treatment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PestControl {
    /// Sub-record identifier, when the backend assigned one
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Control method (e.g. "Spraying")
    #[serde(default)]
    pub method: String,
    /// Product used
    #[serde(default)]
    pub product: String,
    /// Treatment date
    #[serde(default, skip_serializing_if = "Option::is_none", with = "iso_date::option")]
    pub date: Option<NaiveDate>,
    /// Repeat frequency as entered (e.g. "Monthly")
    #[serde(default)]
    pub frequency: String,
    /// Whether this entry shows up as a reminder
    #[serde(default)]
    pub reminder: bool,
}

/// Soil texture. Unrecognised values are kept verbatim so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Texture {
    /// "Sandy Loam"
    SandyLoam,
    /// "Clay"
    Clay,
    /// "Silt"
    Silt,
    /// "Sand"
    Sand,
    /// Anything else the backend sent
    Other(String),
}

impl Texture {
    /// Wire representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::SandyLoam => "Sandy Loam",
            Self::Clay => "Clay",
            Self::Silt => "Silt",
            Self::Sand => "Sand",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Texture {
    fn from(raw: String) -> Self {
        [Self::SandyLoam, Self::Clay, Self::Silt, Self::Sand]
            .into_iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(raw.trim()))
            .unwrap_or(Self::Other(raw))
    }
}

impl From<Texture> for String {
    fn from(texture: Texture) -> Self {
        match texture {
            Texture::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nutrient level reported for the soil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NutrientLevel {
    /// "High"
    High,
    /// "Medium"
    Medium,
    /// "Low"
    Low,
    /// Anything else the backend sent
    Other(String),
}

impl NutrientLevel {
    /// Wire representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for NutrientLevel {
    fn from(raw: String) -> Self {
        [Self::High, Self::Medium, Self::Low]
            .into_iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(raw.trim()))
            .unwrap_or(Self::Other(raw))
    }
}

impl From<NutrientLevel> for String {
    fn from(level: NutrientLevel) -> Self {
        match level {
            NutrientLevel::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NutrientLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived soil rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilQuality {
    /// Score 7-9
    High,
    /// Score 4-6
    Medium,
    /// Score 1-3
    Low,
}

impl SoilQuality {
    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Case-insensitive parse; `None` for anything that isn't a rating.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        [Self::High, Self::Medium, Self::Low]
            .into_iter()
            .find(|quality| quality.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for SoilQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// The stored rating is advisory (it is recomputed on save), so an empty or unknown
// string from the form is read as "not rated" rather than rejecting the whole planning.
fn lenient_quality<'de, D>(deserializer: D) -> std::result::Result<Option<SoilQuality>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(SoilQuality::parse))
}

/// Parses a `GET /plantations` response body.
pub fn parse_plantations(json: &str) -> Result<Vec<Plantation>> {
    serde_json::from_str(json).map_err(Into::into)
}

/// Parses a `GET /plannings` response body.
pub fn parse_plannings(json: &str) -> Result<Vec<Planning>> {
    serde_json::from_str(json).map_err(Into::into)
}

/// Serde adapters for ISO-8601 calendar dates.
pub(crate) mod iso_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    /// Accepts `2025-01-15` or `2025-01-15T00:00:00.000Z`.
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, FORMAT).ok().or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|stamp| stamp.with_timezone(&Utc).date_naive())
        })
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid ISO-8601 date: {raw}")))
    }

    /// Optional dates are lenient: null, empty, or unparseable strings read as `None`.
    pub mod option {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer};

        #[allow(clippy::ref_option)] // signature dictated by serde's `with`
        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDate>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDate>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            Ok(raw.as_deref().and_then(super::parse))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::errors::Error;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_plantations_backend_payload() {
        let json = r#"[
            {
                "_id": "665f1c2e9b1d",
                "projectName": "North Ridge",
                "type": "Coconut",
                "landArea": 2.5,
                "startDate": "2025-01-15T00:00:00.000Z",
                "harvestDate": "2035-01-15T00:00:00.000Z",
                "location": "Kurunegala",
                "employees": 12,
                "completed": false
            },
            {
                "_id": "665f1c2e9b1e",
                "projectName": "Hill Tea",
                "cropType": "tea",
                "startDate": "2024-03-01",
                "location": "Nuwara Eliya",
                "employees": 4,
                "completed": true,
                "completedDate": "2024-12-01"
            }
        ]"#;

        let plantations = parse_plantations(json).unwrap();
        assert_eq!(plantations.len(), 2);

        let coconut = &plantations[0];
        assert_eq!(coconut.id, "665f1c2e9b1d");
        assert_eq!(coconut.crop_type, "Coconut");
        assert_eq!(coconut.land_area, 2.5);
        assert_eq!(coconut.start_date, ymd(2025, 1, 15));
        assert_eq!(coconut.harvest_date, Some(ymd(2035, 1, 15)));
        assert!(coconut.completed_date.is_none());

        let tea = &plantations[1];
        assert_eq!(tea.land_area, DEFAULT_LAND_AREA);
        assert!(tea.harvest_date.is_none());
        assert!(tea.completed);
        assert_eq!(tea.completed_date, Some(ymd(2024, 12, 1)));
    }

    #[test]
    fn test_parse_plantations_rejects_bad_start_date() {
        let json = r#"[{
            "_id": "1", "projectName": "P", "cropType": "mango",
            "startDate": "not-a-date", "location": "L", "employees": 1
        }]"#;

        let result = parse_plantations(json);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_plannings_backend_payload() {
        let json = r#"[{
            "_id": "p1",
            "projectId": "665f1c2e9b1d",
            "soilData": { "phLevel": 6.5, "texture": "Sandy Loam", "nutrients": "High", "quality": "High" },
            "fertilizerSchedules": [
                { "_id": "f1", "type": "Urea", "date": "2025-03-01T00:00:00.000Z", "quantity": 40, "method": "Broadcast", "reminder": true }
            ],
            "pestControls": [
                { "_id": "c1", "method": "Spraying", "product": "Neem oil", "date": "2025-02-15", "frequency": "Monthly", "reminder": false }
            ],
            "createdAt": "2025-01-20T08:30:00.000Z"
        }]"#;

        let plannings = parse_plannings(json).unwrap();
        let planning = &plannings[0];
        assert_eq!(planning.project_id, "665f1c2e9b1d");

        let soil = planning.soil_data.as_ref().unwrap();
        assert_eq!(soil.ph_level, Some(6.5));
        assert_eq!(soil.texture, Some(Texture::SandyLoam));
        assert_eq!(soil.nutrients, Some(NutrientLevel::High));
        assert_eq!(soil.quality, Some(SoilQuality::High));

        let fertilizer = &planning.fertilizer_schedules[0];
        assert_eq!(fertilizer.fertilizer_type, "Urea");
        assert_eq!(fertilizer.date, Some(ymd(2025, 3, 1)));
        assert_eq!(fertilizer.quantity, Some(40.0));
        assert!(fertilizer.reminder);

        assert_eq!(planning.pest_controls[0].product, "Neem oil");
        assert!(planning.created_at.is_some());
    }

    #[test]
    fn test_parse_plannings_tolerates_partial_records() {
        let json = r#"[{
            "_id": "p2",
            "projectId": "x",
            "soilData": { "phLevel": 5.0, "texture": "Loamy Peat", "quality": "" },
            "fertilizerSchedules": [ { "type": "Compost", "method": "Manual", "reminder": true, "date": "" } ]
        }]"#;

        let plannings = parse_plannings(json).unwrap();
        let planning = &plannings[0];

        let soil = planning.soil_data.as_ref().unwrap();
        assert_eq!(soil.texture, Some(Texture::Other("Loamy Peat".to_string())));
        assert!(soil.nutrients.is_none());
        assert!(soil.quality.is_none());

        assert!(planning.fertilizer_schedules[0].date.is_none());
        assert!(planning.fertilizer_schedules[0].id.is_none());
        assert!(planning.pest_controls.is_empty());
    }

    #[test]
    fn test_dates_serialize_as_plain_iso_dates() {
        let schedule = FertilizerSchedule {
            id: Some("f1".to_string()),
            fertilizer_type: "Urea".to_string(),
            date: Some(ymd(2025, 3, 1)),
            quantity: Some(40.0),
            method: "Broadcast".to_string(),
            reminder: true,
        };

        let value = serde_json::to_value(&schedule).unwrap();
        assert_eq!(value["date"], "2025-03-01");
        assert_eq!(value["type"], "Urea");
        assert_eq!(value["_id"], "f1");
    }

    #[test]
    fn test_texture_and_nutrients_match_case_insensitively() {
        assert_eq!(Texture::from("sandy loam".to_string()), Texture::SandyLoam);
        assert_eq!(Texture::from(" CLAY ".to_string()), Texture::Clay);
        assert_eq!(NutrientLevel::from("medium".to_string()), NutrientLevel::Medium);
        assert_eq!(String::from(Texture::Other("Peat".to_string())), "Peat");
        assert_eq!(SoilQuality::parse("low"), Some(SoilQuality::Low));
        assert_eq!(SoilQuality::parse("N/A"), None);
    }
}
