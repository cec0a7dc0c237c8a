// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

use multiview_scale::Orientation;
use tracing::debug;

use crate::config::{ZoomConfig, ZoomRange, parse_zoom_percent};

/// Which zoom value a transition acts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZoomTarget {
    /// The grid/single-view zoom.
    Global,
    /// The focused device's zoom.
    Focus,
}

/// Zoom, focus and orientation state of a preview session.
///
/// States are `Unfocused` and `Focused(id)`. The global zoom is only ever
/// written while unfocused and the focus zoom only while focused, so leaving
/// focus restores the previous global zoom exactly.
///
/// Every transition bumps [`ZoomController::revision`] when it changes
/// something, so callers can cheaply detect whether geometry needs to be
/// recomputed.
#[derive(Clone, Debug)]
pub struct ZoomController<K> {
    config: ZoomConfig,
    focused: Option<K>,
    global_zoom: f64,
    focus_zoom: f64,
    orientation: Orientation,
    revision: u64,
}

impl<K: Clone + PartialEq + Debug> Default for ZoomController<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + PartialEq + Debug> ZoomController<K> {
    /// Creates an unfocused, portrait controller with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ZoomConfig::DEFAULT)
    }

    /// Creates an unfocused, portrait controller.
    ///
    /// `config` is used as given; check it with [`ZoomConfig::is_valid`]
    /// first when it comes from outside the program.
    #[must_use]
    pub fn with_config(config: ZoomConfig) -> Self {
        Self {
            config,
            focused: None,
            global_zoom: config.global.default,
            focus_zoom: config.focus.default,
            orientation: Orientation::Portrait,
            revision: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Returns the focused device, if any.
    #[must_use]
    pub fn focused(&self) -> Option<&K> {
        self.focused.as_ref()
    }

    /// Returns `true` while a device is focused.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused.is_some()
    }

    /// Returns `true` if `id` is the focused device.
    #[must_use]
    pub fn is_focused_on(&self, id: &K) -> bool {
        self.focused.as_ref() == Some(id)
    }

    /// Current global zoom.
    #[must_use]
    pub fn global_zoom(&self) -> f64 {
        self.global_zoom
    }

    /// Current focus zoom.
    #[must_use]
    pub fn focus_zoom(&self) -> f64 {
        self.focus_zoom
    }

    /// Which zoom value is live.
    #[must_use]
    pub fn active_target(&self) -> ZoomTarget {
        if self.focused.is_some() {
            ZoomTarget::Focus
        } else {
            ZoomTarget::Global
        }
    }

    /// Value of the live zoom.
    #[must_use]
    pub fn active_zoom(&self) -> f64 {
        match self.active_target() {
            ZoomTarget::Global => self.global_zoom,
            ZoomTarget::Focus => self.focus_zoom,
        }
    }

    /// Live zoom as a whole percentage, for display.
    #[must_use]
    pub fn active_zoom_percent(&self) -> f64 {
        (self.active_zoom() * 100.0).round()
    }

    /// Zoom to apply to a preview: the focus zoom for the focused device, the
    /// global zoom otherwise.
    #[must_use]
    pub fn applied_zoom(&self, focused: bool) -> f64 {
        if focused {
            self.focus_zoom
        } else {
            self.global_zoom
        }
    }

    /// Current orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Monotonic change counter.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if [`ZoomController::zoom_in`] would change the live zoom.
    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.active_zoom() < self.active_range().step_max
    }

    /// Returns `true` if [`ZoomController::zoom_out`] would change the live zoom.
    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.active_zoom() > self.active_range().step_min
    }

    /// Focuses `id`.
    ///
    /// The focus zoom resets to its default regardless of its previous value
    /// or of the global zoom. Focusing while another device is focused moves
    /// focus to `id`.
    pub fn focus(&mut self, id: K) {
        debug!(device = ?id, previous = ?self.focused, "focus");
        self.focused = Some(id);
        self.focus_zoom = self.config.focus.default;
        self.bump();
    }

    /// Leaves focus, returning the previously focused device.
    ///
    /// The global zoom is untouched; it was never written while focused.
    pub fn unfocus(&mut self) -> Option<K> {
        let previous = self.focused.take()?;
        debug!(device = ?previous, global_zoom = self.global_zoom, "unfocus");
        self.bump();
        Some(previous)
    }

    /// Steps the live zoom up by one increment, up to the step maximum.
    ///
    /// Returns `false` without changing anything when already at or above the
    /// step maximum.
    pub fn zoom_in(&mut self) -> bool {
        if !self.can_zoom_in() {
            return false;
        }
        let range = self.active_range();
        let next = (self.active_zoom() + self.config.step).min(range.step_max);
        self.write_active(next, "zoom in")
    }

    /// Steps the live zoom down by one increment, down to the step minimum.
    ///
    /// Returns `false` without changing anything when already at or below the
    /// step minimum.
    pub fn zoom_out(&mut self) -> bool {
        if !self.can_zoom_out() {
            return false;
        }
        let range = self.active_range();
        let next = (self.active_zoom() - self.config.step).max(range.step_min);
        self.write_active(next, "zoom out")
    }

    /// Sets the live zoom from a typed percentage.
    ///
    /// The input is rejected, leaving all state unchanged, unless it parses
    /// to a finite number in `(0, max_entry_percent]`. Accepted values are
    /// clamped to the entry range of the live zoom. Returns whether the input
    /// was accepted.
    pub fn set_zoom_percent(&mut self, raw: &str) -> bool {
        let Some(value) = parse_zoom_percent(raw, self.config.max_entry_percent) else {
            debug!(input = raw, "rejected zoom percentage");
            return false;
        };
        let clamped = self.active_range().clamp_entry(value);
        self.write_active(clamped, "set zoom percent");
        true
    }

    /// Resets the live zoom to its default.
    ///
    /// Returns `true` if the zoom changed.
    pub fn reset_zoom(&mut self) -> bool {
        let default = self.active_range().default;
        self.write_active(default, "reset zoom")
    }

    /// Toggles the orientation of every device, returning the new orientation.
    ///
    /// Zoom and focus are unaffected.
    pub fn rotate(&mut self) -> Orientation {
        self.orientation = self.orientation.toggled();
        debug!(orientation = ?self.orientation, "rotate");
        self.bump();
        self.orientation
    }

    fn active_range(&self) -> ZoomRange {
        match self.active_target() {
            ZoomTarget::Global => self.config.global,
            ZoomTarget::Focus => self.config.focus,
        }
    }

    fn write_active(&mut self, value: f64, reason: &'static str) -> bool {
        let target = self.active_target();
        let slot = match target {
            ZoomTarget::Global => &mut self.global_zoom,
            ZoomTarget::Focus => &mut self.focus_zoom,
        };
        if *slot == value {
            return false;
        }
        let previous = *slot;
        *slot = value;
        debug!(?target, previous, zoom = value, reason, "zoom changed");
        self.bump();
        true
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
