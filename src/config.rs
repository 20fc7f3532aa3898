//! Configuration loading
//!
//! Settings come from an optional TOML file:
//!
//! ```toml
//! [classifier]
//! square_threshold_pt = 5.0
//! match_tolerance_mm = 3.0
//!
//! [catalog]
//! preset = "minimal"
//!
//! # Replaces the preset when present; order is the match priority
//! [[catalog.formats]]
//! name = "Index Card"
//! width_mm = 76.0
//! height_mm = 127.0
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::catalog::{CatalogPreset, PaperCatalog, PaperFormat};
use crate::classify::{Classifier, Thresholds};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub classifier: Option<ClassifierConfig>,
    pub catalog: Option<CatalogConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    pub square_threshold_pt: Option<f64>,
    pub match_tolerance_mm: Option<f64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    pub preset: Option<CatalogPreset>,
    pub formats: Option<Vec<PaperFormat>>,
}

fn positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::Config(format!("{} must be a positive number, got {}", name, value)))
    }
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Classification thresholds, falling back to the defaults
    pub fn thresholds(&self) -> Result<Thresholds> {
        let defaults = Thresholds::default();
        let classifier = self.classifier.clone().unwrap_or_default();

        Ok(Thresholds {
            square_threshold_pt: positive(
                "square_threshold_pt",
                classifier
                    .square_threshold_pt
                    .unwrap_or(defaults.square_threshold_pt),
            )?,
            match_tolerance_mm: positive(
                "match_tolerance_mm",
                classifier
                    .match_tolerance_mm
                    .unwrap_or(defaults.match_tolerance_mm),
            )?,
        })
    }

    /// The paper catalog described by this configuration
    pub fn catalog(&self) -> Result<PaperCatalog> {
        let Some(catalog) = &self.catalog else {
            return Ok(PaperCatalog::default());
        };

        match (&catalog.formats, catalog.preset) {
            (Some(formats), preset) => {
                if preset.is_some() {
                    warn!("catalog.formats is set; ignoring catalog.preset");
                }
                PaperCatalog::new(formats.clone())
            }
            (None, Some(preset)) => Ok(PaperCatalog::preset(preset)),
            (None, None) => Ok(PaperCatalog::default()),
        }
    }

    /// Build a classifier from this configuration
    pub fn classifier(&self) -> Result<Classifier> {
        Ok(Classifier::new(self.catalog()?, self.thresholds()?))
    }

    /// Override the catalog with a built-in preset
    pub fn set_preset(&mut self, preset: CatalogPreset) {
        self.catalog = Some(CatalogConfig {
            preset: Some(preset),
            formats: None,
        });
    }

    pub fn set_match_tolerance(&mut self, tolerance_mm: f64) {
        self.classifier
            .get_or_insert_with(ClassifierConfig::default)
            .match_tolerance_mm = Some(tolerance_mm);
    }

    pub fn set_square_threshold(&mut self, threshold_pt: f64) {
        self.classifier
            .get_or_insert_with(ClassifierConfig::default)
            .square_threshold_pt = Some(threshold_pt);
    }
}

/// Load configuration from `path`; a missing file yields the defaults
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)?;
    let config = Config::from_toml(&contents)?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}
