// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multiview Zoom: the zoom/focus controller for multi-device previews.
//!
//! A preview session has two independent zoom values:
//! - the **global** zoom, applied to every device in the grid or single view;
//! - the **focus** zoom, applied only to the one focused device.
//!
//! Exactly one of them is *active* at any time, decided by whether a device is
//! focused. [`ZoomController`] owns both values together with the global
//! [`Orientation`](multiview_scale::Orientation) and routes every mutation
//! through a named transition:
//!
//! | transition | effect |
//! |------------|--------|
//! | [`focus`](ZoomController::focus) | focus a device; the focus zoom resets to its default |
//! | [`unfocus`](ZoomController::unfocus) | leave focus; the global zoom is exactly as it was |
//! | [`zoom_in`](ZoomController::zoom_in) / [`zoom_out`](ZoomController::zoom_out) | step the active zoom within its step range |
//! | [`set_zoom_percent`](ZoomController::set_zoom_percent) | typed percentage, looser bounds |
//! | [`reset_zoom`](ZoomController::reset_zoom) | active zoom back to its default |
//! | [`rotate`](ZoomController::rotate) | toggle orientation; zoom untouched |
//!
//! Limits and defaults live in [`ZoomConfig`].
//!
//! ## Minimal example
//!
//! ```rust
//! use multiview_zoom::ZoomController;
//!
//! let mut zoom = ZoomController::<&str>::new();
//! zoom.zoom_in();
//! assert_eq!(zoom.active_zoom(), 1.25);
//!
//! zoom.focus("iphone-se");
//! assert_eq!(zoom.active_zoom(), 1.5);
//! zoom.zoom_out();
//! assert_eq!(zoom.active_zoom(), 1.25);
//!
//! // Typed values outside (0, 500] are rejected without a state change.
//! assert!(!zoom.set_zoom_percent("9999"));
//! assert!(zoom.set_zoom_percent("220%"));
//! assert_eq!(zoom.active_zoom_percent(), 220.0);
//!
//! zoom.unfocus();
//! assert_eq!(zoom.active_zoom(), 1.25);
//! ```

mod config;
mod controller;

pub use config::{ZoomConfig, ZoomRange, parse_zoom_percent};
pub use controller::{ZoomController, ZoomTarget};
