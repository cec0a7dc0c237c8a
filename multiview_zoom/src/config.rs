// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Limits and default for one zoom value.
///
/// Two ranges apply. The step range bounds the zoom-in/zoom-out buttons; the
/// wider entry range bounds typed values, which are taken as intentional.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomRange {
    /// Value on creation and after a reset.
    pub default: f64,
    /// Lowest value reachable by stepping out.
    pub step_min: f64,
    /// Highest value reachable by stepping in.
    pub step_max: f64,
    /// Lowest value a typed entry is clamped to.
    pub entry_min: f64,
    /// Highest value a typed entry is clamped to.
    pub entry_max: f64,
}

impl ZoomRange {
    /// Default range of the global zoom.
    pub const GLOBAL: Self = Self {
        default: 1.0,
        step_min: 0.25,
        step_max: 3.0,
        entry_min: 0.1,
        entry_max: 5.0,
    };

    /// Default range of the focus zoom.
    pub const FOCUS: Self = Self {
        default: 1.5,
        step_min: 0.5,
        step_max: 3.0,
        entry_min: 0.1,
        entry_max: 5.0,
    };

    /// Clamps a typed value into the entry range.
    #[must_use]
    pub fn clamp_entry(&self, value: f64) -> f64 {
        value.clamp(self.entry_min, self.entry_max)
    }

    /// Returns `true` if `0 < entry_min <= step_min <= default <= step_max <= entry_max`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let ordered = [
            self.entry_min,
            self.step_min,
            self.default,
            self.step_max,
            self.entry_max,
        ];
        ordered.iter().all(|v| v.is_finite())
            && self.entry_min > 0.0
            && ordered.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Configuration of a [`ZoomController`](crate::ZoomController).
///
/// When deserialized, each range may be given partially; missing fields keep
/// the value from [`ZoomRange::GLOBAL`] or [`ZoomRange::FOCUS`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoomConfig {
    /// Range of the global zoom.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "partial::global"))]
    pub global: ZoomRange,
    /// Range of the focus zoom.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "partial::focus"))]
    pub focus: ZoomRange,
    /// Increment of one zoom-in/zoom-out step.
    pub step: f64,
    /// Largest accepted typed percentage.
    pub max_entry_percent: f64,
}

impl ZoomConfig {
    /// The default configuration.
    pub const DEFAULT: Self = Self {
        global: ZoomRange::GLOBAL,
        focus: ZoomRange::FOCUS,
        step: 0.25,
        max_entry_percent: 500.0,
    };

    /// Returns `true` if both ranges are valid and the step and percentage
    /// limit are positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.global.is_valid()
            && self.focus.is_valid()
            && self.step.is_finite()
            && self.step > 0.0
            && self.max_entry_percent.is_finite()
            && self.max_entry_percent > 0.0
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(feature = "serde")]
mod partial {
    use serde::{Deserialize, Deserializer};

    use super::ZoomRange;

    #[derive(Deserialize)]
    struct PartialRange {
        default: Option<f64>,
        step_min: Option<f64>,
        step_max: Option<f64>,
        entry_min: Option<f64>,
        entry_max: Option<f64>,
    }

    impl PartialRange {
        fn over(self, base: ZoomRange) -> ZoomRange {
            ZoomRange {
                default: self.default.unwrap_or(base.default),
                step_min: self.step_min.unwrap_or(base.step_min),
                step_max: self.step_max.unwrap_or(base.step_max),
                entry_min: self.entry_min.unwrap_or(base.entry_min),
                entry_max: self.entry_max.unwrap_or(base.entry_max),
            }
        }
    }

    pub(super) fn global<'de, D: Deserializer<'de>>(d: D) -> Result<ZoomRange, D::Error> {
        Ok(PartialRange::deserialize(d)?.over(ZoomRange::GLOBAL))
    }

    pub(super) fn focus<'de, D: Deserializer<'de>>(d: D) -> Result<ZoomRange, D::Error> {
        Ok(PartialRange::deserialize(d)?.over(ZoomRange::FOCUS))
    }
}

/// Parses a typed zoom percentage into a zoom factor.
///
/// Surrounding whitespace and one trailing `%` are accepted. Returns `None`
/// if the value is not a finite number, is not positive, or exceeds
/// `max_percent`. The result is not clamped.
///
/// ```rust
/// use multiview_zoom::parse_zoom_percent;
///
/// assert_eq!(parse_zoom_percent(" 150% ", 500.0), Some(1.5));
/// assert_eq!(parse_zoom_percent("0", 500.0), None);
/// assert_eq!(parse_zoom_percent("abc", 500.0), None);
/// ```
#[must_use]
pub fn parse_zoom_percent(raw: &str, max_percent: f64) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    let percent: f64 = number.parse().ok()?;
    if !percent.is_finite() || percent <= 0.0 || percent > max_percent {
        return None;
    }
    Some(percent / 100.0)
}
