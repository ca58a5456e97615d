//! Soil quality scoring.
//!
//! Quality is an additive score over three inputs (pH, texture, nutrients), each worth
//! one to three points, bucketed into High / Medium / Low. It is never entered by hand:
//! every read derives it again from the current inputs.

use crate::models::{NutrientLevel, SoilData, SoilQuality, Texture};

/// Points for the pH reading: 3 inside 6.0-7.0, 2 inside 5.5-7.5, otherwise 1.
///
/// Out-of-range and non-finite readings land in the 1-point bucket.
#[must_use]
pub fn ph_points(ph_level: f64) -> u8 {
    if (6.0..=7.0).contains(&ph_level) {
        3
    } else if (5.5..=7.5).contains(&ph_level) {
        2
    } else {
        1
    }
}

/// Points for the soil texture. Unset or unrecognised textures score nothing.
#[must_use]
pub const fn texture_points(texture: Option<&Texture>) -> u8 {
    match texture {
        Some(Texture::SandyLoam) => 3,
        Some(Texture::Clay | Texture::Silt) => 2,
        Some(Texture::Sand) => 1,
        Some(Texture::Other(_)) | None => 0,
    }
}

/// Points for the nutrient level. Low, unset, and unrecognised all score 1.
#[must_use]
pub const fn nutrient_points(nutrients: Option<&NutrientLevel>) -> u8 {
    match nutrients {
        Some(NutrientLevel::High) => 3,
        Some(NutrientLevel::Medium) => 2,
        Some(NutrientLevel::Low | NutrientLevel::Other(_)) | None => 1,
    }
}

/// Total score, 1 to 9.
#[must_use]
pub fn soil_score(
    ph_level: f64,
    texture: Option<&Texture>,
    nutrients: Option<&NutrientLevel>,
) -> u8 {
    ph_points(ph_level) + texture_points(texture) + nutrient_points(nutrients)
}

/// Maps a score onto a rating: 7+ is High, 4-6 Medium, below 4 Low.
#[must_use]
pub const fn quality_for_score(score: u8) -> SoilQuality {
    match score {
        7.. => SoilQuality::High,
        4..=6 => SoilQuality::Medium,
        _ => SoilQuality::Low,
    }
}

/// Rates the soil from its pH, texture, and nutrient level.
#[must_use]
pub fn compute_quality(
    ph_level: f64,
    texture: Option<&Texture>,
    nutrients: Option<&NutrientLevel>,
) -> SoilQuality {
    quality_for_score(soil_score(ph_level, texture, nutrients))
}

impl SoilData {
    /// Rating derived from the current inputs.
    ///
    /// `None` when no pH has been recorded; the stored `quality` field is ignored.
    #[must_use]
    pub fn derived_quality(&self) -> Option<SoilQuality> {
        self.ph_level
            .map(|ph| compute_quality(ph, self.texture.as_ref(), self.nutrients.as_ref()))
    }
}
