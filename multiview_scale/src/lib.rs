// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multiview Scale: render geometry for simulated device viewports.
//!
//! Given a [`DeviceProfile`](multiview_device::DeviceProfile), the global
//! [`Orientation`], the [`ViewMode`], the applied zoom factor and whether the
//! device is focused, [`ScalingEngine::geometry`] produces a
//! [`RenderGeometry`]: the size of the box the preview occupies on screen and
//! the uniform scale applied to the page rendered inside it.
//!
//! The computation is pure:
//! 1. Landscape swaps the portrait width and height.
//! 2. A base scale is looked up from a [`BaseScaleTable`] by [`ScaleContext`]
//!    (focused, grid or single) and device category.
//! 3. `content_scale = base_scale * zoom`.
//! 4. The render box is the effective logical size times `content_scale`.
//!
//! Values are returned unrounded; [`RenderGeometry::pixel_size`] snaps them at
//! render time.
//!
//! Content inside the box is laid out at its native logical size and then
//! scaled by [`RenderGeometry::content_transform`] about the top-left corner,
//! so the scaled content covers the render box exactly.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use multiview_device::DeviceCatalog;
//! use multiview_scale::{Orientation, ScalingEngine, ViewMode};
//!
//! let catalog = DeviceCatalog::builtin();
//! let se = catalog.get("iphone-se").unwrap();
//!
//! let engine = ScalingEngine::default();
//! let geometry = engine
//!     .geometry(se, Orientation::Portrait, ViewMode::Grid, 1.0, false)
//!     .unwrap();
//!
//! assert_eq!(geometry.content_scale(), 0.5);
//! assert_eq!(geometry.render_size(), Size::new(187.5, 333.5));
//! assert_eq!(geometry.pixel_size(), Size::new(188.0, 334.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod geometry;
mod modes;
mod table;

pub use geometry::{RenderGeometry, ScalingEngine, compute_geometry};
pub use modes::{Orientation, ScaleContext, ViewMode};
pub use table::{BaseScaleTable, CategoryScales};
