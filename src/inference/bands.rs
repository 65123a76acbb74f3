//! Process-wide table of named colour bands
//!
//! Installed once at startup with [`install_bands`] and read-only afterwards.
//! Reading before installation is an error rather than a silent default, so
//! startup order is explicit.

use super::color::ColorRange;
use super::config::{BAND_DIALOG_BORDER, BAND_DIALOG_FILL};
use super::error::{InferenceError, InferenceResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

static BANDS: OnceLock<ColorBandTable> = OnceLock::new();

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorBandTable {
    bands: BTreeMap<String, ColorRange>,
}

impl ColorBandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bands used by the bundled detectors.
    pub fn standard() -> Self {
        Self::new()
            .with_band(BAND_DIALOG_BORDER, ColorRange::from_argb(0xffc07000, 0xffffc550))
            .with_band(BAND_DIALOG_FILL, ColorRange::from_argb(0xffd0b000, 0xffffff30))
    }

    pub fn with_band(mut self, name: &str, range: ColorRange) -> Self {
        self.bands.insert(name.to_string(), range);
        self
    }

    pub fn get(&self, name: &str) -> InferenceResult<ColorRange> {
        self.bands
            .get(name)
            .copied()
            .ok_or_else(|| InferenceError::UnknownBand {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bands.keys().map(String::as_str)
    }

    pub fn validate(&self) -> InferenceResult<()> {
        for (name, range) in &self.bands {
            range.validate(name)?;
        }
        Ok(())
    }
}

/// Validate and publish the table. Only the first call succeeds.
pub fn install_bands(table: ColorBandTable) -> InferenceResult<&'static ColorBandTable> {
    table.validate()?;
    BANDS
        .set(table)
        .map_err(|_| InferenceError::BandsAlreadyInstalled)?;
    log::debug!("Installed colour band table");
    bands()
}

pub fn bands() -> InferenceResult<&'static ColorBandTable> {
    BANDS.get().ok_or(InferenceError::BandsNotInstalled)
}
