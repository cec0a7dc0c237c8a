// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::borrow::Cow;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;

use kurbo::Size;

/// Stable identifier of a device profile, such as `"iphone-se"`.
///
/// Built-in ids borrow `'static` strings; ids loaded at runtime own theirs.
/// `DeviceId` borrows as `str`, so maps keyed by `DeviceId` can be queried
/// with a plain `&str`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DeviceId(Cow<'static, str>);

impl DeviceId {
    /// Creates an id from a `'static` string without allocating.
    #[must_use]
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Creates an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<Cow<'static, str>>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DeviceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for DeviceId {
    fn from(id: &'static str) -> Self {
        Self::from_static(id)
    }
}

impl From<String> for DeviceId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

/// Broad class of a simulated device.
///
/// The category selects the base scale used when laying out previews; larger
/// screens are drawn at a smaller base scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceCategory {
    /// Phones.
    Mobile,
    /// Tablets.
    Tablet,
    /// Laptops and desktop monitors.
    Desktop,
}

impl DeviceCategory {
    /// All categories, in the order a device picker lists them.
    pub const ALL: [Self; 3] = [Self::Mobile, Self::Tablet, Self::Desktop];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mobile => "Mobile",
            Self::Tablet => "Tablet",
            Self::Desktop => "Desktop",
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A malformed device entry.
///
/// Catalog constructors return this eagerly; the scaling engine returns it
/// too, for profiles built outside a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidProfile {
    /// The profile id is empty.
    #[error("device profile has an empty id")]
    EmptyId,
    /// Width or height is zero.
    #[error("device profile `{id}` has a zero dimension ({width}x{height})")]
    ZeroDimension {
        /// Offending profile.
        id: DeviceId,
        /// Logical width as declared.
        width: u32,
        /// Logical height as declared.
        height: u32,
    },
    /// Two profiles in one catalog share an id.
    #[error("device id `{0}` appears more than once")]
    DuplicateId(DeviceId),
}

/// Immutable description of a simulated screen.
///
/// Dimensions are logical (CSS) pixels in the portrait reference orientation.
/// Construction does not validate; call [`DeviceProfile::validate`] or build a
/// [`crate::DeviceCatalog`], which validates every entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceProfile {
    id: DeviceId,
    name: Cow<'static, str>,
    category: DeviceCategory,
    width: u32,
    height: u32,
}

impl DeviceProfile {
    /// Creates a profile from `'static` data without allocating.
    #[must_use]
    pub const fn from_static(
        id: &'static str,
        name: &'static str,
        category: DeviceCategory,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id: DeviceId::from_static(id),
            name: Cow::Borrowed(name),
            category,
            width,
            height,
        }
    }

    /// Creates a profile from owned or borrowed data.
    #[must_use]
    pub fn new(
        id: impl Into<DeviceId>,
        name: impl Into<Cow<'static, str>>,
        category: DeviceCategory,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            width,
            height,
        }
    }

    /// Checks that the id is non-empty and both dimensions are positive.
    pub fn validate(&self) -> Result<(), InvalidProfile> {
        if self.id.as_str().is_empty() {
            return Err(InvalidProfile::EmptyId);
        }
        if self.width == 0 || self.height == 0 {
            return Err(InvalidProfile::ZeroDimension {
                id: self.id.clone(),
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Returns the profile id.
    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the device category.
    #[must_use]
    pub fn category(&self) -> DeviceCategory {
        self.category
    }

    /// Logical width in portrait orientation.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical height in portrait orientation.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Logical size in portrait orientation.
    #[must_use]
    pub fn logical_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn device_id_borrows_as_str() {
        let mut map = BTreeMap::new();
        map.insert(DeviceId::from_static("iphone-se"), 1);
        map.insert(DeviceId::new("ipad-air".to_string()), 2);

        assert_eq!(map.get("iphone-se"), Some(&1));
        assert_eq!(map.get("ipad-air"), Some(&2));
        assert_eq!(map.get("pixel-8"), None);
    }

    #[test]
    fn static_and_owned_ids_compare_equal() {
        let a = DeviceId::from_static("desktop-hd");
        let b = DeviceId::from("desktop-hd".to_string());
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "desktop-hd");
    }

    #[test]
    fn validate_accepts_positive_dimensions() {
        let p = DeviceProfile::from_static(
            "iphone-se",
            "iPhone SE",
            DeviceCategory::Mobile,
            375,
            667,
        );
        assert_eq!(p.validate(), Ok(()));
        assert_eq!(p.logical_size(), Size::new(375.0, 667.0));
    }

    #[test]
    fn validate_rejects_zero_dimensions() {
        let p = DeviceProfile::new("flat", "Flat", DeviceCategory::Desktop, 1920, 0);
        assert_eq!(
            p.validate(),
            Err(InvalidProfile::ZeroDimension {
                id: DeviceId::from_static("flat"),
                width: 1920,
                height: 0,
            })
        );
    }

    #[test]
    fn validate_rejects_empty_id() {
        let p = DeviceProfile::new("", "Nameless", DeviceCategory::Tablet, 800, 1280);
        assert_eq!(p.validate(), Err(InvalidProfile::EmptyId));
    }

    #[test]
    fn invalid_profile_messages_name_the_device() {
        let err = InvalidProfile::ZeroDimension {
            id: DeviceId::from_static("flat"),
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "device profile `flat` has a zero dimension (0x10)");
        assert_eq!(
            InvalidProfile::DuplicateId(DeviceId::from_static("x")).to_string(),
            "device id `x` appears more than once"
        );
    }

    #[test]
    fn categories_are_listed_small_to_large() {
        assert_eq!(
            DeviceCategory::ALL.map(DeviceCategory::label),
            ["Mobile", "Tablet", "Desktop"]
        );
    }
}
