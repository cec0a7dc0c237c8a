// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multiview Device: device profiles and the device catalog.
//!
//! A [`DeviceProfile`] is an immutable description of a simulated screen: a
//! unique [`DeviceId`], a display name, a [`DeviceCategory`] and its logical
//! width/height in CSS pixels, always given in the portrait reference
//! orientation. Orientation, zoom and layout are applied later by
//! `multiview_scale`; nothing here knows about them.
//!
//! A [`DeviceCatalog`] is an ordered, validated collection of profiles. Every
//! constructor validates its entries, so a malformed entry surfaces as
//! [`InvalidProfile`] at catalog-load time rather than during rendering.
//!
//! ## Minimal example
//!
//! ```rust
//! use multiview_device::{DeviceCatalog, DeviceCategory};
//!
//! let catalog = DeviceCatalog::builtin();
//! let se = catalog.get("iphone-se").unwrap();
//! assert_eq!(se.name(), "iPhone SE");
//! assert_eq!((se.width(), se.height()), (375, 667));
//! assert_eq!(se.category(), DeviceCategory::Mobile);
//!
//! // Group the catalog the way a device picker would.
//! for category in DeviceCategory::ALL {
//!     let names: Vec<_> = catalog.by_category(category).map(|d| d.name()).collect();
//!     assert!(!names.is_empty());
//! }
//! ```
//!
//! ## Custom catalogs
//!
//! ```rust
//! use multiview_device::{DeviceCatalog, DeviceCategory, DeviceProfile, InvalidProfile};
//!
//! let broken = DeviceProfile::new("watch", "Watch", DeviceCategory::Mobile, 0, 224);
//! let err = DeviceCatalog::from_profiles([broken]).unwrap_err();
//! assert!(matches!(err, InvalidProfile::ZeroDimension { .. }));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod catalog;
mod profile;

pub use catalog::{BUILTIN_PROFILES, DeviceCatalog};
pub use profile::{DeviceCategory, DeviceId, DeviceProfile, InvalidProfile};
