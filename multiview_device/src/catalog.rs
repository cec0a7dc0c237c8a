// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::profile::{DeviceCategory, DeviceProfile, InvalidProfile};

/// Profiles shipped with the crate, in picker order.
pub static BUILTIN_PROFILES: [DeviceProfile; 7] = [
    DeviceProfile::from_static("iphone-14-pro", "iPhone 14 Pro", DeviceCategory::Mobile, 393, 852),
    DeviceProfile::from_static("iphone-se", "iPhone SE", DeviceCategory::Mobile, 375, 667),
    DeviceProfile::from_static(
        "samsung-s23",
        "Samsung Galaxy S23",
        DeviceCategory::Mobile,
        360,
        780,
    ),
    DeviceProfile::from_static("ipad-pro", "iPad Pro", DeviceCategory::Tablet, 1024, 1366),
    DeviceProfile::from_static("ipad-air", "iPad Air", DeviceCategory::Tablet, 820, 1180),
    DeviceProfile::from_static("macbook-pro", "MacBook Pro", DeviceCategory::Desktop, 1440, 900),
    DeviceProfile::from_static("desktop-hd", "Desktop HD", DeviceCategory::Desktop, 1920, 1080),
];

/// An ordered, validated collection of device profiles.
///
/// Ids are unique and every profile has a non-empty id and positive
/// dimensions. Iteration follows declaration order, which is also the order
/// previews are laid out in.
///
/// Lookups scan a small `Vec`; catalogs hold a handful of entries.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<DeviceProfile>", into = "Vec<DeviceProfile>")
)]
pub struct DeviceCatalog {
    profiles: Vec<DeviceProfile>,
}

impl DeviceCatalog {
    /// Returns the built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            profiles: BUILTIN_PROFILES.to_vec(),
        }
    }

    /// Builds a catalog from arbitrary profiles, validating each one.
    ///
    /// Fails on the first profile with an empty id or a zero dimension, or on
    /// the first id that was already seen.
    pub fn from_profiles(
        profiles: impl IntoIterator<Item = DeviceProfile>,
    ) -> Result<Self, InvalidProfile> {
        let mut out: Vec<DeviceProfile> = Vec::new();
        for profile in profiles {
            profile.validate()?;
            if out.iter().any(|p| p.id() == profile.id()) {
                return Err(InvalidProfile::DuplicateId(profile.id().clone()));
            }
            out.push(profile);
        }
        Ok(Self { profiles: out })
    }

    /// Returns the profile with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DeviceProfile> {
        self.profiles.iter().find(|p| p.id().as_str() == id)
    }

    /// Returns `true` if a profile with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Returns the declaration index of the given id.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.id().as_str() == id)
    }

    /// Iterates over all profiles in declaration order.
    pub fn iter(&self) -> core::slice::Iter<'_, DeviceProfile> {
        self.profiles.iter()
    }

    /// Iterates over the profiles of one category, in declaration order.
    pub fn by_category(
        &self,
        category: DeviceCategory,
    ) -> impl Iterator<Item = &DeviceProfile> + '_ {
        self.profiles
            .iter()
            .filter(move |p| p.category() == category)
    }

    /// Categories with at least one profile, in picker order.
    pub fn categories(&self) -> impl Iterator<Item = DeviceCategory> + '_ {
        DeviceCategory::ALL
            .into_iter()
            .filter(|c| self.profiles.iter().any(|p| p.category() == *c))
    }

    /// Returns the number of profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` if the catalog has no profiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Returns all profiles as a slice.
    #[must_use]
    pub fn profiles(&self) -> &[DeviceProfile] {
        &self.profiles
    }
}

impl Default for DeviceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a DeviceCatalog {
    type Item = &'a DeviceProfile;
    type IntoIter = core::slice::Iter<'a, DeviceProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<DeviceProfile>> for DeviceCatalog {
    type Error = InvalidProfile;

    fn try_from(profiles: Vec<DeviceProfile>) -> Result<Self, Self::Error> {
        Self::from_profiles(profiles)
    }
}

impl From<DeviceCatalog> for Vec<DeviceProfile> {
    fn from(catalog: DeviceCatalog) -> Self {
        catalog.profiles
    }
}
