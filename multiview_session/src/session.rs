// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use multiview_device::{DeviceCatalog, DeviceId, DeviceProfile};
use multiview_embed::{Classification, DetectionState, EmbedDetector, FrameInspector, TargetUrl};
use multiview_scale::{Orientation, RenderGeometry, ScalingEngine, ViewMode};
use multiview_zoom::ZoomController;
use tracing::{debug, info};

use crate::config::PreviewConfig;
use crate::error::SessionError;
use crate::frame::{DeviceFrame, FrameContent};

/// The mutable state behind a multi-device preview.
///
/// A session owns the catalog, the device selection, the
/// [`ZoomController`] and the [`EmbedDetector`], and routes every user
/// action through a named method. The selection is kept in catalog order and
/// every selected device is tracked by the detector; deselecting a device
/// drops its detection state and, if it was focused, leaves focus.
#[derive(Clone, Debug)]
pub struct PreviewSession {
    catalog: DeviceCatalog,
    engine: ScalingEngine,
    zoom: ZoomController<DeviceId>,
    view_mode: ViewMode,
    url_text: String,
    selection: Vec<DeviceId>,
    detector: EmbedDetector<DeviceId>,
}

impl PreviewSession {
    /// Starts a session over `catalog`.
    ///
    /// Selects `config.initial_devices` and submits `config.initial_url`
    /// unless it is empty. Fails if a configuration section is out of range,
    /// an initial device is not in the catalog, or the initial URL is
    /// invalid.
    pub fn new(catalog: DeviceCatalog, config: PreviewConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let PreviewConfig {
            zoom,
            scale,
            detector,
            initial_url,
            initial_devices,
        } = config;
        let mut session = Self {
            catalog,
            engine: ScalingEngine::new(scale),
            zoom: ZoomController::with_config(zoom),
            view_mode: ViewMode::default(),
            url_text: String::new(),
            selection: Vec::new(),
            detector: EmbedDetector::new(detector),
        };
        for id in &initial_devices {
            if !session.is_selected(id.as_str()) {
                session.toggle_device(id.as_str())?;
            }
        }
        if !initial_url.trim().is_empty() {
            session.submit_url(&initial_url)?;
        }
        Ok(session)
    }

    /// Starts a session over the built-in catalog with the default
    /// configuration.
    pub fn builtin() -> Result<Self, SessionError> {
        Self::new(DeviceCatalog::builtin(), PreviewConfig::default())
    }

    /// The device catalog.
    #[must_use]
    pub fn catalog(&self) -> &DeviceCatalog {
        &self.catalog
    }

    /// The scaling engine.
    #[must_use]
    pub fn engine(&self) -> &ScalingEngine {
        &self.engine
    }

    /// Zoom, focus and orientation state.
    #[must_use]
    pub fn zoom(&self) -> &ZoomController<DeviceId> {
        &self.zoom
    }

    /// Embeddability detector.
    #[must_use]
    pub fn detector(&self) -> &EmbedDetector<DeviceId> {
        &self.detector
    }

    /// Last submitted URL text, valid or not.
    #[must_use]
    pub fn url_text(&self) -> &str {
        &self.url_text
    }

    /// The parsed target, if the last submission was valid.
    #[must_use]
    pub fn target(&self) -> Option<&TargetUrl> {
        self.detector.target()
    }

    /// Current view mode.
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Current orientation of every device.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.zoom.orientation()
    }

    /// Selected devices in catalog order.
    #[must_use]
    pub fn selection(&self) -> &[DeviceId] {
        &self.selection
    }

    /// Returns `true` if `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.iter().any(|s| s.as_str() == id)
    }

    /// The focused device, if any.
    #[must_use]
    pub fn focused(&self) -> Option<&DeviceId> {
        self.zoom.focused()
    }

    /// Detection state of a selected device.
    #[must_use]
    pub fn detection_state(&self, id: &str) -> Option<DetectionState> {
        let id = self.selection.iter().find(|s| s.as_str() == id)?;
        self.detector.state(id)
    }

    /// Points every frame at `raw`.
    ///
    /// The text is remembered even when it is rejected. Every pending
    /// classification is cancelled and every device returns to `Idle` in
    /// both cases.
    pub fn submit_url(&mut self, raw: &str) -> Result<&TargetUrl, SessionError> {
        raw.clone_into(&mut self.url_text);
        match self.detector.set_target(raw) {
            Ok(target) => {
                info!(url = %target, devices = self.selection.len(), "url submitted");
                Ok(target)
            }
            Err(err) => {
                info!(input = raw, error = %err, "url rejected");
                Err(err.into())
            }
        }
    }

    /// Submits the current URL text again, restarting every frame.
    pub fn resubmit(&mut self) -> Result<&TargetUrl, SessionError> {
        let raw = core::mem::take(&mut self.url_text);
        self.submit_url(&raw)
    }

    /// Flips the selection of `id`, returning whether it is now selected.
    ///
    /// A newly selected device starts `Idle`. A deselected one loses its
    /// detection state and pending timer, and leaves focus if focused.
    pub fn toggle_device(&mut self, id: &str) -> Result<bool, SessionError> {
        let id = self.known(id)?.clone();
        if let Some(index) = self.selection.iter().position(|s| *s == id) {
            self.selection.remove(index);
            self.detector.untrack(&id);
            if self.zoom.is_focused_on(&id) {
                self.zoom.unfocus();
            }
            debug!(device = %id, "device deselected");
            return Ok(false);
        }
        self.detector.track(id.clone());
        debug!(device = %id, "device selected");
        self.selection.push(id);
        self.sort_selection();
        Ok(true)
    }

    /// Selects every device of the catalog.
    pub fn select_all(&mut self) {
        for profile in self.catalog.iter() {
            self.detector.track(profile.id().clone());
        }
        self.selection = self.catalog.iter().map(|p| p.id().clone()).collect();
        debug!(devices = self.selection.len(), "all devices selected");
    }

    /// Deselects every device, leaving focus.
    pub fn clear_devices(&mut self) {
        for id in self.selection.drain(..) {
            self.detector.untrack(&id);
        }
        self.zoom.unfocus();
        debug!("selection cleared");
    }

    /// Switches between grid and single view. Returns `true` if it changed.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        if self.view_mode == mode {
            return false;
        }
        debug!(from = ?self.view_mode, to = ?mode, "view mode changed");
        self.view_mode = mode;
        true
    }

    /// Focuses a selected device.
    ///
    /// The focus zoom resets to its default.
    pub fn focus(&mut self, id: &str) -> Result<(), SessionError> {
        let id = self.known(id)?.clone();
        if !self.selection.contains(&id) {
            return Err(SessionError::NotSelected(id));
        }
        self.zoom.focus(id);
        Ok(())
    }

    /// Leaves focus, returning the device that was focused.
    pub fn unfocus(&mut self) -> Option<DeviceId> {
        self.zoom.unfocus()
    }

    /// Steps the active zoom up. Returns `true` if it changed.
    pub fn zoom_in(&mut self) -> bool {
        self.zoom.zoom_in()
    }

    /// Steps the active zoom down. Returns `true` if it changed.
    pub fn zoom_out(&mut self) -> bool {
        self.zoom.zoom_out()
    }

    /// Sets the active zoom from a typed percentage. Returns `false` if the
    /// input was rejected.
    pub fn set_zoom_percent(&mut self, raw: &str) -> bool {
        self.zoom.set_zoom_percent(raw)
    }

    /// Resets the active zoom to its default. Returns `true` if it changed.
    pub fn reset_zoom(&mut self) -> bool {
        self.zoom.reset_zoom()
    }

    /// Toggles the orientation of every device.
    pub fn rotate(&mut self) -> Orientation {
        self.zoom.rotate()
    }

    /// Active zoom as a whole percentage.
    #[must_use]
    pub fn active_zoom_percent(&self) -> f64 {
        self.zoom.active_zoom_percent()
    }

    /// Whether the zoom-in button is enabled.
    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.zoom.can_zoom_in()
    }

    /// Whether the zoom-out button is enabled.
    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.zoom.can_zoom_out()
    }

    /// Geometry of any catalog device under the current session state.
    pub fn geometry(&self, id: &str) -> Result<RenderGeometry, SessionError> {
        let profile = self
            .catalog
            .get(id)
            .ok_or_else(|| SessionError::UnknownDevice(DeviceId::new(id.to_owned())))?;
        self.layout(profile)
    }

    /// Plans the visible previews.
    ///
    /// While a device is focused only that device is returned; otherwise
    /// every selected device, in catalog order.
    pub fn frames(&self) -> Result<Vec<DeviceFrame<'_>>, SessionError> {
        let has_target = self.detector.target().is_some();
        self.catalog
            .iter()
            .filter(|p| match self.zoom.focused() {
                Some(focused) => p.id() == focused,
                None => self.selection.contains(p.id()),
            })
            .map(|profile| {
                let state = self.detector.state(profile.id()).unwrap_or_default();
                Ok(DeviceFrame {
                    profile,
                    geometry: self.layout(profile)?,
                    focused: self.zoom.is_focused_on(profile.id()),
                    state,
                    content: FrameContent::resolve(has_target, state),
                })
            })
            .collect()
    }

    /// Forwards a frame `load` signal. Returns whether it was accepted.
    pub fn on_load(&mut self, id: &str, now: u64) -> bool {
        let Some(id) = self.selected(id) else {
            return false;
        };
        self.detector.on_load(&id, now)
    }

    /// Forwards a frame `error` signal. Returns whether it was accepted.
    pub fn on_error(&mut self, id: &str) -> bool {
        let Some(id) = self.selected(id) else {
            return false;
        };
        self.detector.on_error(&id)
    }

    /// Returns one selected device to `Idle` so its frame can be reloaded.
    pub fn retry(&mut self, id: &str) -> Result<(), SessionError> {
        let id = self.known(id)?.clone();
        if !self.detector.retry(&id) {
            return Err(SessionError::NotSelected(id));
        }
        Ok(())
    }

    /// Earliest time at which [`PreviewSession::advance`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.detector.next_deadline()
    }

    /// Fires every classification timer due at `now`.
    pub fn advance<I>(&mut self, now: u64, inspector: &I) -> Vec<Classification<DeviceId>>
    where
        I: FrameInspector<DeviceId> + ?Sized,
    {
        self.detector.advance(now, inspector)
    }

    fn layout(&self, profile: &DeviceProfile) -> Result<RenderGeometry, SessionError> {
        let focused = self.zoom.is_focused_on(profile.id());
        let geometry = self.engine.geometry(
            profile,
            self.zoom.orientation(),
            self.view_mode,
            self.zoom.applied_zoom(focused),
            focused,
        )?;
        Ok(geometry)
    }

    fn known(&self, id: &str) -> Result<&DeviceId, SessionError> {
        self.catalog
            .get(id)
            .map(DeviceProfile::id)
            .ok_or_else(|| SessionError::UnknownDevice(DeviceId::new(id.to_owned())))
    }

    fn selected(&self, id: &str) -> Option<DeviceId> {
        self.selection.iter().find(|s| s.as_str() == id).cloned()
    }

    fn sort_selection(&mut self) {
        let catalog = &self.catalog;
        self.selection
            .sort_by_key(|id| catalog.position(id.as_str()).unwrap_or(usize::MAX));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiview_embed::{ContentAccess, FrameLocation, FrameProbe};

    fn session() -> PreviewSession {
        PreviewSession::builtin().unwrap()
    }

    #[test]
    fn starts_with_first_device_and_default_url() {
        let s = session();
        assert_eq!(s.selection(), [DeviceId::from("iphone-14-pro")]);
        assert_eq!(s.url_text(), "https://testsentry.vercel.app");
        assert!(s.target().is_some());
        assert_eq!(s.detection_state("iphone-14-pro"), Some(DetectionState::Idle));
    }

    #[test]
    fn selection_follows_catalog_order() {
        let mut s = session();
        s.toggle_device("desktop-hd").unwrap();
        s.toggle_device("iphone-se").unwrap();
        let ids: Vec<_> = s.selection().iter().map(DeviceId::as_str).collect();
        assert_eq!(ids, ["iphone-14-pro", "iphone-se", "desktop-hd"]);
    }

    #[test]
    fn unknown_devices_are_errors() {
        let mut s = session();
        assert_eq!(
            s.toggle_device("nokia-3310"),
            Err(SessionError::UnknownDevice(DeviceId::from("nokia-3310")))
        );
        assert!(matches!(
            s.focus("nokia-3310"),
            Err(SessionError::UnknownDevice(_))
        ));
        assert!(s.geometry("nokia-3310").is_err());
    }

    #[test]
    fn focus_requires_selection() {
        let mut s = session();
        assert_eq!(
            s.focus("ipad-pro"),
            Err(SessionError::NotSelected(DeviceId::from("ipad-pro")))
        );
        s.toggle_device("ipad-pro").unwrap();
        s.focus("ipad-pro").unwrap();
        assert_eq!(s.focused().map(DeviceId::as_str), Some("ipad-pro"));
    }

    #[test]
    fn deselecting_focused_device_leaves_focus() {
        let mut s = session();
        s.focus("iphone-14-pro").unwrap();
        assert!(!s.toggle_device("iphone-14-pro").unwrap());
        assert!(s.focused().is_none());
        assert_eq!(s.detection_state("iphone-14-pro"), None);
    }

    #[test]
    fn clear_devices_untracks_everything() {
        let mut s = session();
        s.select_all();
        s.on_load("ipad-air", 0);
        s.focus("ipad-air").unwrap();
        s.clear_devices();
        assert!(s.selection().is_empty());
        assert!(s.focused().is_none());
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn signals_for_unselected_devices_are_ignored() {
        let mut s = session();
        assert!(!s.on_load("ipad-air", 0));
        assert!(!s.on_error("ipad-air"));
        assert_eq!(
            s.retry("ipad-air"),
            Err(SessionError::NotSelected(DeviceId::from("ipad-air")))
        );
    }

    #[test]
    fn rejected_url_keeps_text_and_prompts() {
        let mut s = session();
        s.on_load("iphone-14-pro", 0);
        assert!(matches!(
            s.submit_url("ftp://example.com"),
            Err(SessionError::InvalidUrl(_))
        ));
        assert_eq!(s.url_text(), "ftp://example.com");
        assert_eq!(s.next_deadline(), None);
        let frames = s.frames().unwrap();
        assert_eq!(frames[0].content, FrameContent::EnterUrl);
    }

    #[test]
    fn resubmit_restarts_detection() {
        let mut s = session();
        s.on_load("iphone-14-pro", 0);
        s.advance(1500, &|_: &DeviceId| {
            FrameProbe::new(
                FrameLocation::Readable("about:blank".to_owned()),
                ContentAccess::Accessible,
            )
        });
        assert_eq!(
            s.detection_state("iphone-14-pro"),
            Some(DetectionState::Blocked)
        );
        s.resubmit().unwrap();
        assert_eq!(s.url_text(), "https://testsentry.vercel.app");
        assert_eq!(s.detection_state("iphone-14-pro"), Some(DetectionState::Idle));
    }

    #[test]
    fn view_mode_changes_report_once() {
        let mut s = session();
        assert!(!s.set_view_mode(ViewMode::Grid));
        assert!(s.set_view_mode(ViewMode::Single));
        assert_eq!(s.view_mode(), ViewMode::Single);
    }
}
