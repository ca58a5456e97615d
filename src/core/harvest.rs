//! Harvest date projection from crop type and planting date.

use chrono::{Months, NaiveDate};
use std::fmt;

/// Crops the planner knows growth periods for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropType {
    /// 120 months
    Coconut,
    /// 12 months
    Mango,
    /// 24 months
    Rambutan,
    /// 12 months
    Pineapple,
    /// 9 months
    Tea,
}

impl CropType {
    /// Every known crop, in form order.
    pub const ALL: [Self; 5] = [
        Self::Coconut,
        Self::Mango,
        Self::Rambutan,
        Self::Pineapple,
        Self::Tea,
    ];

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coconut => "coconut",
            Self::Mango => "mango",
            Self::Rambutan => "rambutan",
            Self::Pineapple => "pineapple",
            Self::Tea => "tea",
        }
    }

    /// Months from planting to harvest.
    #[must_use]
    pub const fn growth_months(self) -> u32 {
        match self {
            Self::Coconut => 120,
            Self::Mango | Self::Pineapple => 12,
            Self::Rambutan => 24,
            Self::Tea => 9,
        }
    }

    /// Case-insensitive lookup by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|crop| crop.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Growth period for a crop name; unknown crops grow in zero months.
#[must_use]
pub fn growth_period_months(crop_type: &str) -> u32 {
    CropType::from_name(crop_type).map_or(0, CropType::growth_months)
}

/// Planting date plus the crop's growth period in calendar months.
///
/// The day of month is kept when the target month has it and clamped to that month's
/// last day otherwise (Feb 29 + 12 months is Feb 28). Unknown crops harvest on the
/// planting date itself.
#[must_use]
pub fn project_harvest_date(crop_type: &str, start_date: NaiveDate) -> NaiveDate {
    start_date
        .checked_add_months(Months::new(growth_period_months(crop_type)))
        // only past chrono's representable range
        .unwrap_or(NaiveDate::MAX)
}
