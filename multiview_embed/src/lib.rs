// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multiview Embed: decide whether a framed page actually rendered.
//!
//! A host page that frames a foreign site cannot ask whether the site refused
//! to be embedded (`X-Frame-Options`, CSP `frame-ancestors`). All it observes
//! is a `load` or `error` signal from the frame, plus best-effort
//! introspection of where the frame ended up. This crate turns those signals
//! into a per-device [`DetectionState`]:
//!
//! ```text
//! Idle ──load──▶ AwaitingClassification ──timer──▶ Rendered | Blocked
//!   │                     │
//!   └──────error──────────┴──────────────────────▶ LoadError
//! ```
//!
//! - A `load` starts a single-shot timer for that device, replacing any timer
//!   still pending for it.
//! - When the timer fires, the frame is probed through a [`FrameInspector`]
//!   and [`classify`] applies the heuristic: a frame parked on a placeholder
//!   location (`about:blank`, empty, or the host page itself) or with no
//!   reachable content at all is [`Blocked`](DetectionState::Blocked); a
//!   cross-origin frame is an ordinary successful embed and counts as
//!   [`Rendered`](DetectionState::Rendered).
//! - Changing the target URL cancels every timer and returns every device to
//!   [`Idle`](DetectionState::Idle). A URL that fails [`TargetUrl::parse`]
//!   leaves every device idle and nothing is loaded.
//!
//! Blocking is inferred from navigation anomalies only, so a blocked site can
//! still classify as rendered, and a slow page that has not navigated within
//! the delay can classify as blocked.
//!
//! Time is passed in explicitly as milliseconds, so the detector runs equally
//! well against a wall clock or a `multiview_timing::ManualClock`.
//!
//! ## Minimal example
//!
//! ```rust
//! use multiview_embed::{
//!     ContentAccess, DetectionState, DetectorConfig, EmbedDetector, FrameLocation, FrameProbe,
//! };
//!
//! let mut detector = EmbedDetector::new(DetectorConfig::default());
//! detector.track("iphone-se");
//! detector.track("ipad-air");
//! detector.set_target("https://example.com").unwrap();
//!
//! detector.on_load(&"iphone-se", 0);
//! detector.on_load(&"ipad-air", 0);
//!
//! // The site refused the frame, so one device was left on about:blank; the
//! // other navigated cross-origin as expected.
//! let inspector = |device: &&str| match *device {
//!     "iphone-se" => FrameProbe::new(FrameLocation::Readable("about:blank".into()), ContentAccess::Accessible),
//!     _ => FrameProbe::new(FrameLocation::Denied, ContentAccess::CrossOrigin),
//! };
//!
//! assert!(detector.advance(1_499, &inspector).is_empty());
//! let verdicts = detector.advance(1_500, &inspector);
//! assert_eq!(verdicts.len(), 2);
//! assert_eq!(detector.state(&"iphone-se"), Some(DetectionState::Blocked));
//! assert_eq!(detector.state(&"ipad-air"), Some(DetectionState::Rendered));
//! ```

mod detector;
mod probe;
mod state;
mod target;

pub use detector::{Classification, DetectorConfig, EmbedDetector};
pub use probe::{
    BLANK_LOCATION, ClassificationRule, ContentAccess, FrameInspector, FrameLocation, FrameProbe,
    classify,
};
pub use state::DetectionState;
pub use target::{InvalidUrl, TargetUrl};
