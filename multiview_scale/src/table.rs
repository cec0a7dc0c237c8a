// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use multiview_device::DeviceCategory;

use crate::modes::ScaleContext;

/// Base scales for one row of the table, per device category.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryScales {
    /// Scale for phones.
    pub mobile: f64,
    /// Scale for tablets.
    pub tablet: f64,
    /// Scale for laptops and desktops.
    pub desktop: f64,
}

impl CategoryScales {
    /// Returns the scale for `category`.
    #[must_use]
    pub const fn get(&self, category: DeviceCategory) -> f64 {
        match category {
            DeviceCategory::Mobile => self.mobile,
            DeviceCategory::Tablet => self.tablet,
            DeviceCategory::Desktop => self.desktop,
        }
    }

    fn all_positive(&self) -> bool {
        [self.mobile, self.tablet, self.desktop]
            .iter()
            .all(|s| s.is_finite() && *s > 0.0)
    }
}

/// Fixed lookup of base scale by [`ScaleContext`] and [`DeviceCategory`].
///
/// Larger screens get a smaller base scale so that every preview fits the
/// preview area at a zoom of `1.0`.
///
/// | context | mobile | tablet | desktop |
/// |---------|--------|--------|---------|
/// | focused | 1.0    | 0.8    | 0.6     |
/// | single  | 0.8    | 0.6    | 0.4     |
/// | grid    | 0.5    | 0.3    | 0.2     |
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseScaleTable {
    /// Row used for the focused device.
    pub focused: CategoryScales,
    /// Row used in grid view.
    pub grid: CategoryScales,
    /// Row used in single view.
    pub single: CategoryScales,
}

impl BaseScaleTable {
    /// The default table.
    pub const DEFAULT: Self = Self {
        focused: CategoryScales {
            mobile: 1.0,
            tablet: 0.8,
            desktop: 0.6,
        },
        grid: CategoryScales {
            mobile: 0.5,
            tablet: 0.3,
            desktop: 0.2,
        },
        single: CategoryScales {
            mobile: 0.8,
            tablet: 0.6,
            desktop: 0.4,
        },
    };

    /// Returns the base scale for a context and category.
    #[must_use]
    pub const fn base_scale(&self, context: ScaleContext, category: DeviceCategory) -> f64 {
        let row = match context {
            ScaleContext::Focused => &self.focused,
            ScaleContext::Grid => &self.grid,
            ScaleContext::Single => &self.single,
        };
        row.get(category)
    }

    /// Returns `true` if every entry is finite and strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.focused.all_positive() && self.grid.all_positive() && self.single.all_positive()
    }
}

impl Default for BaseScaleTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}
