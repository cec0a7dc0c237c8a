// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multiview Session: one URL, many simulated devices.
//!
//! [`PreviewSession`] is the explicit state object behind a multi-device
//! preview. It wires together:
//! - a [`DeviceCatalog`](multiview_device::DeviceCatalog) and the selection
//!   drawn from it;
//! - the [`ScalingEngine`](multiview_scale::ScalingEngine) that turns a
//!   profile and the current mode into render geometry;
//! - the [`ZoomController`](multiview_zoom::ZoomController) for zoom, focus
//!   and orientation;
//! - the [`EmbedDetector`](multiview_embed::EmbedDetector) that classifies
//!   each selected device's frame.
//!
//! Hosts feed it user actions and frame signals, call
//! [`PreviewSession::advance`] when [`PreviewSession::next_deadline`] passes,
//! and draw whatever [`PreviewSession::frames`] returns.
//!
//! ## Minimal example
//!
//! ```rust
//! use multiview_device::DeviceId;
//! use multiview_embed::{DetectionState, FrameProbe};
//! use multiview_session::{FrameContent, PreviewSession};
//!
//! let mut session = PreviewSession::builtin().unwrap();
//! session.toggle_device("iphone-se").unwrap();
//! session.submit_url("https://example.com").unwrap();
//!
//! session.on_load("iphone-se", 0);
//! session.advance(1_500, &|_: &DeviceId| FrameProbe::cross_origin());
//!
//! session.focus("iphone-se").unwrap();
//! let frames = session.frames().unwrap();
//! assert_eq!(frames.len(), 1);
//! assert_eq!(frames[0].state, DetectionState::Rendered);
//! assert_eq!(frames[0].content, FrameContent::Live);
//! // iPhone SE, focused mobile: base 1.0 at the default focus zoom of 1.5.
//! assert_eq!(frames[0].geometry.content_scale(), 1.5);
//! assert_eq!(session.active_zoom_percent(), 150.0);
//! ```

mod config;
mod error;
mod frame;
mod session;

pub use config::{DEFAULT_URL, PreviewConfig};
pub use error::SessionError;
pub use frame::{DeviceFrame, FrameContent};
pub use session::PreviewSession;
