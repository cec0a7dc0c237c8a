// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use multiview_device::DeviceProfile;
use multiview_embed::DetectionState;
use multiview_scale::RenderGeometry;

/// What a preview frame should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameContent {
    /// No valid target; prompt for a URL instead of loading anything.
    EnterUrl,
    /// Load the target, or keep showing it.
    Live,
    /// The target refused to be embedded.
    Blocked,
    /// The frame failed to load.
    LoadFailed,
}

impl FrameContent {
    /// Derives the content from target availability and detection state.
    #[must_use]
    pub const fn resolve(has_target: bool, state: DetectionState) -> Self {
        if !has_target {
            return Self::EnterUrl;
        }
        match state {
            DetectionState::Blocked => Self::Blocked,
            DetectionState::LoadError => Self::LoadFailed,
            DetectionState::Idle
            | DetectionState::AwaitingClassification
            | DetectionState::Rendered => Self::Live,
        }
    }
}

/// One visible preview, as planned by [`PreviewSession::frames`](crate::PreviewSession::frames).
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceFrame<'a> {
    /// The simulated device.
    pub profile: &'a DeviceProfile,
    /// Where and how large to draw it.
    pub geometry: RenderGeometry,
    /// Whether this is the focused device.
    pub focused: bool,
    /// Embeddability state of its frame.
    pub state: DetectionState,
    /// What to show.
    pub content: FrameContent,
}

impl DeviceFrame<'_> {
    /// Dimension label in the current orientation, like `667 × 375`.
    #[must_use]
    pub fn dimension_label(&self) -> String {
        let size = self.geometry.logical_size();
        format!("{} × {}", size.width, size.height)
    }
}
