// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use multiview_device::{BUILTIN_PROFILES, DeviceId};
use multiview_embed::DetectorConfig;
use multiview_scale::BaseScaleTable;
use multiview_zoom::ZoomConfig;

use crate::error::SessionError;

/// URL a fresh session points at.
pub const DEFAULT_URL: &str = "https://testsentry.vercel.app";

/// Everything needed to start a [`PreviewSession`](crate::PreviewSession).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PreviewConfig {
    /// Zoom limits and defaults.
    pub zoom: ZoomConfig,
    /// Base scale per layout context and device category.
    pub scale: BaseScaleTable,
    /// Embeddability detector settings.
    pub detector: DetectorConfig,
    /// Target URL submitted on start. Empty means no target yet.
    pub initial_url: String,
    /// Devices selected on start.
    pub initial_devices: Vec<DeviceId>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            zoom: ZoomConfig::DEFAULT,
            scale: BaseScaleTable::DEFAULT,
            detector: DetectorConfig::default(),
            initial_url: DEFAULT_URL.to_owned(),
            initial_devices: vec![BUILTIN_PROFILES[0].id().clone()],
        }
    }
}

impl PreviewConfig {
    /// Checks every section that feeds the layout and the detector.
    ///
    /// Zoom ranges must be ordered and positive, every base scale finite and
    /// positive, and the classification delay non-zero.
    pub fn validate(&self) -> Result<(), SessionError> {
        if !self.zoom.is_valid() {
            return Err(SessionError::InvalidConfig("zoom"));
        }
        if !self.scale.is_valid() {
            return Err(SessionError::InvalidConfig("scale"));
        }
        if self.detector.classify_delay_ms == 0 {
            return Err(SessionError::InvalidConfig("detector"));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl PreviewConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_the_first_builtin_device() {
        let config = PreviewConfig::default();
        assert_eq!(config.initial_url, "https://testsentry.vercel.app");
        assert_eq!(config.initial_devices, [DeviceId::from("iphone-14-pro")]);
        assert_eq!(config.detector.classify_delay_ms, 1500);
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(PreviewConfig::default().validate(), Ok(()));
    }

    #[test]
    fn out_of_range_sections_are_rejected() {
        let mut config = PreviewConfig::default();
        config.zoom.global.default = -2.0;
        assert_eq!(config.validate(), Err(SessionError::InvalidConfig("zoom")));

        let mut config = PreviewConfig::default();
        config.zoom.step = 0.0;
        assert_eq!(config.validate(), Err(SessionError::InvalidConfig("zoom")));

        let mut config = PreviewConfig::default();
        config.scale.grid.mobile = -0.5;
        assert_eq!(config.validate(), Err(SessionError::InvalidConfig("scale")));

        let mut config = PreviewConfig::default();
        config.scale.focused.desktop = f64::NAN;
        assert_eq!(config.validate(), Err(SessionError::InvalidConfig("scale")));

        let mut config = PreviewConfig::default();
        config.detector.classify_delay_ms = 0;
        assert_eq!(
            config.validate(),
            Err(SessionError::InvalidConfig("detector"))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn negative_scale_from_json_is_caught() {
        let config = PreviewConfig::from_json(
            r#"{ "scale": { "grid": { "mobile": -0.5, "tablet": 0.3, "desktop": 0.2 } } }"#,
        )
        .unwrap();
        assert_eq!(config.validate(), Err(SessionError::InvalidConfig("scale")));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_zoom_range_override() {
        let config = PreviewConfig::from_json(r#"{ "zoom": { "global": { "default": 2.0 } } }"#)
            .unwrap();
        assert_eq!(config.zoom.global.default, 2.0);
        assert_eq!(config.zoom.global.step_max, 3.0);
        assert_eq!(config.zoom.focus, ZoomConfig::DEFAULT.focus);
        assert_eq!(config.validate(), Ok(()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_keeps_defaults() {
        let config = PreviewConfig::from_json(
            r#"{
                "initial_url": "https://example.com",
                "initial_devices": ["iphone-se", "desktop-hd"],
                "detector": { "classify_delay_ms": 500 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.initial_url, "https://example.com");
        assert_eq!(config.initial_devices.len(), 2);
        assert_eq!(config.detector.classify_delay_ms, 500);
        assert_eq!(config.zoom, ZoomConfig::DEFAULT);
        assert_eq!(config.scale, BaseScaleTable::DEFAULT);
    }
}
