// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Rect, Size};
use multiview_device::{DeviceProfile, InvalidProfile};

use crate::modes::{Orientation, ScaleContext, ViewMode};
use crate::table::BaseScaleTable;

/// Computed render geometry for one device preview.
///
/// All values are real numbers; nothing is rounded until
/// [`RenderGeometry::pixel_size`] is asked for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderGeometry {
    logical: Size,
    base_scale: f64,
    content_scale: f64,
    render: Size,
}

impl RenderGeometry {
    /// Orientation-adjusted logical size of the simulated screen.
    ///
    /// This is the size the embedded page is laid out at, and the size shown
    /// in a `width × height` label.
    #[must_use]
    pub fn logical_size(&self) -> Size {
        self.logical
    }

    /// Size the content is laid out at before scaling.
    ///
    /// Identical to [`RenderGeometry::logical_size`].
    #[must_use]
    pub fn native_size(&self) -> Size {
        self.logical
    }

    /// Base scale from the table, before zoom.
    #[must_use]
    pub fn base_scale(&self) -> f64 {
        self.base_scale
    }

    /// Uniform scale from native content to the render box.
    #[must_use]
    pub fn content_scale(&self) -> f64 {
        self.content_scale
    }

    /// Size of the on-screen box.
    #[must_use]
    pub fn render_size(&self) -> Size {
        self.render
    }

    /// Width of the on-screen box.
    #[must_use]
    pub fn render_width(&self) -> f64 {
        self.render.width
    }

    /// Height of the on-screen box.
    #[must_use]
    pub fn render_height(&self) -> f64 {
        self.render.height
    }

    /// The on-screen box snapped to whole pixels.
    #[must_use]
    pub fn pixel_size(&self) -> Size {
        self.render.round()
    }

    /// The on-screen box as a rectangle at the origin.
    #[must_use]
    pub fn render_rect(&self) -> Rect {
        self.render.to_rect()
    }

    /// Transform from native content space into the render box.
    ///
    /// A uniform scale about the top-left corner: the native content rect maps
    /// exactly onto [`RenderGeometry::render_rect`].
    #[must_use]
    pub fn content_transform(&self) -> Affine {
        Affine::scale(self.content_scale)
    }
}

/// Maps device profiles to render geometry using a [`BaseScaleTable`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScalingEngine {
    table: BaseScaleTable,
}

impl ScalingEngine {
    /// Creates an engine over a custom table.
    ///
    /// Every entry of `table` should be finite and positive; check it with
    /// [`BaseScaleTable::is_valid`] when it comes from outside the program.
    #[must_use]
    pub fn new(table: BaseScaleTable) -> Self {
        Self { table }
    }

    /// Returns the table in use.
    #[must_use]
    pub fn table(&self) -> &BaseScaleTable {
        &self.table
    }

    /// Computes the geometry of one preview.
    ///
    /// `zoom` is the applied zoom: the focus zoom when `focused`, the global
    /// zoom otherwise. It is expected to be positive; the zoom controller
    /// keeps it in range.
    ///
    /// Fails with [`InvalidProfile::ZeroDimension`] if either dimension of
    /// `profile` is zero.
    pub fn geometry(
        &self,
        profile: &DeviceProfile,
        orientation: Orientation,
        view_mode: ViewMode,
        zoom: f64,
        focused: bool,
    ) -> Result<RenderGeometry, InvalidProfile> {
        if profile.width() == 0 || profile.height() == 0 {
            return Err(InvalidProfile::ZeroDimension {
                id: profile.id().clone(),
                width: profile.width(),
                height: profile.height(),
            });
        }
        debug_assert!(zoom > 0.0, "zoom must be positive, got {zoom}");

        let logical = orientation.apply(profile.logical_size());
        let context = ScaleContext::resolve(view_mode, focused);
        let base_scale = self.table.base_scale(context, profile.category());
        let content_scale = base_scale * zoom;
        let render = Size::new(logical.width * content_scale, logical.height * content_scale);

        Ok(RenderGeometry {
            logical,
            base_scale,
            content_scale,
            render,
        })
    }
}

/// Computes the geometry of one preview with the default [`BaseScaleTable`].
///
/// See [`ScalingEngine::geometry`].
pub fn compute_geometry(
    profile: &DeviceProfile,
    orientation: Orientation,
    view_mode: ViewMode,
    zoom: f64,
    focused: bool,
) -> Result<RenderGeometry, InvalidProfile> {
    ScalingEngine::default().geometry(profile, orientation, view_mode, zoom, focused)
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};
    use multiview_device::{BUILTIN_PROFILES, DeviceCategory, DeviceProfile, InvalidProfile};

    use super::{ScalingEngine, compute_geometry};
    use crate::{BaseScaleTable, Orientation, ViewMode};

    fn profile(id: &str) -> &'static DeviceProfile {
        BUILTIN_PROFILES
            .iter()
            .find(|p| p.id().as_str() == id)
            .unwrap()
    }

    #[test]
    fn iphone_se_in_grid_at_unit_zoom() {
        let g = compute_geometry(
            profile("iphone-se"),
            Orientation::Portrait,
            ViewMode::Grid,
            1.0,
            false,
        )
        .unwrap();
        assert_eq!(g.base_scale(), 0.5);
        assert_eq!(g.content_scale(), 0.5);
        assert_eq!(g.render_width(), 187.5);
        assert_eq!(g.render_height(), 333.5);
        assert_eq!(g.logical_size(), Size::new(375.0, 667.0));
    }

    #[test]
    fn landscape_swaps_before_scaling() {
        let g = compute_geometry(
            profile("macbook-pro"),
            Orientation::Landscape,
            ViewMode::Single,
            1.0,
            false,
        )
        .unwrap();
        assert_eq!(g.logical_size(), Size::new(900.0, 1440.0));
        assert_eq!(g.content_scale(), 0.4);
        assert!((g.render_width() - 360.0).abs() < 1e-9);
        assert!((g.render_height() - 576.0).abs() < 1e-9);
    }

    #[test]
    fn focused_uses_focused_row_and_given_zoom() {
        let g = compute_geometry(
            profile("ipad-air"),
            Orientation::Portrait,
            ViewMode::Grid,
            1.5,
            true,
        )
        .unwrap();
        assert_eq!(g.base_scale(), 0.8);
        assert!((g.content_scale() - 1.2).abs() < 1e-12);
        assert!((g.render_width() - 984.0).abs() < 1e-9);
        assert!((g.render_height() - 1416.0).abs() < 1e-9);
    }

    #[test]
    fn zero_dimension_profile_is_rejected() {
        let broken = DeviceProfile::new("broken", "Broken", DeviceCategory::Tablet, 800, 0);
        let err = compute_geometry(&broken, Orientation::Portrait, ViewMode::Grid, 1.0, false)
            .unwrap_err();
        assert!(matches!(err, InvalidProfile::ZeroDimension { height: 0, .. }));
    }

    #[test]
    fn content_transform_maps_native_box_onto_render_box() {
        let g = compute_geometry(
            profile("desktop-hd"),
            Orientation::Portrait,
            ViewMode::Grid,
            0.75,
            false,
        )
        .unwrap();
        let native = g.native_size().to_rect();
        let mapped = g.content_transform().transform_rect_bbox(native);
        let render = g.render_rect();
        assert_eq!(mapped.origin(), Point::ORIGIN);
        assert!((mapped.width() - render.width()).abs() < 1e-9);
        assert!((mapped.height() - render.height()).abs() < 1e-9);
    }

    #[test]
    fn pixel_size_rounds_half_away_from_zero() {
        let g = compute_geometry(
            profile("iphone-se"),
            Orientation::Landscape,
            ViewMode::Grid,
            1.0,
            false,
        )
        .unwrap();
        assert_eq!(g.render_size(), Size::new(333.5, 187.5));
        assert_eq!(g.pixel_size(), Size::new(334.0, 188.0));
    }

    #[test]
    fn custom_table_is_honoured() {
        let mut table = BaseScaleTable::DEFAULT;
        table.grid.mobile = 0.25;
        let engine = ScalingEngine::new(table);
        let g = engine
            .geometry(profile("iphone-se"), Orientation::Portrait, ViewMode::Grid, 2.0, false)
            .unwrap();
        assert_eq!(g.content_scale(), 0.5);
        assert_eq!(engine.table().grid.mobile, 0.25);
    }
}
