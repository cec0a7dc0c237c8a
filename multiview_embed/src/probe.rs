// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use url::Url;

use crate::state::DetectionState;

/// Location a frame falls back to when navigation is refused.
pub const BLANK_LOCATION: &str = "about:blank";

/// What the host could read of a frame's current location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameLocation {
    /// The location was readable; this is its text.
    Readable(String),
    /// Reading the location was denied, as for any cross-origin frame.
    Denied,
}

/// How far the host could reach into a frame's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentAccess {
    /// Document and window are both reachable and readable.
    Accessible,
    /// Handles exist but reading them is denied by the same-origin policy.
    CrossOrigin,
    /// Neither a document nor a window handle is reachable at all.
    Unreachable,
}

/// Best-effort introspection of one frame, taken when its timer fires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameProbe {
    /// Current navigated location.
    pub location: FrameLocation,
    /// Reachability of the frame's content.
    pub access: ContentAccess,
}

impl FrameProbe {
    /// Bundles a location and an access level.
    #[must_use]
    pub fn new(location: FrameLocation, access: ContentAccess) -> Self {
        Self { location, access }
    }

    /// The probe of an ordinary, successfully embedded foreign site.
    #[must_use]
    pub fn cross_origin() -> Self {
        Self::new(FrameLocation::Denied, ContentAccess::CrossOrigin)
    }
}

/// Source of [`FrameProbe`]s, implemented by the host.
///
/// Any `Fn(&K) -> FrameProbe` closure is an inspector.
pub trait FrameInspector<K: ?Sized> {
    /// Probes the frame of `device`.
    fn probe(&self, device: &K) -> FrameProbe;
}

impl<K: ?Sized, F> FrameInspector<K> for F
where
    F: Fn(&K) -> FrameProbe,
{
    fn probe(&self, device: &K) -> FrameProbe {
        self(device)
    }
}

/// Which heuristic check decided a classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassificationRule {
    /// The frame sits on `about:blank`, an empty location, or the host page.
    PlaceholderLocation,
    /// No document or window is reachable.
    Unreachable,
    /// Content access is denied by the same-origin policy, as expected for a
    /// foreign site.
    CrossOrigin,
    /// Nothing suspicious was observed.
    Accessible,
}

impl ClassificationRule {
    /// The state this rule classifies a frame as.
    #[must_use]
    pub const fn verdict(self) -> DetectionState {
        match self {
            Self::PlaceholderLocation | Self::Unreachable => DetectionState::Blocked,
            Self::CrossOrigin | Self::Accessible => DetectionState::Rendered,
        }
    }
}

/// Applies the embeddability heuristic to a probe.
///
/// Checks run in order and the first match wins:
/// 1. placeholder location (blank, empty, or `host_url`) → blocked;
/// 2. no reachable content → blocked;
/// 3. cross-origin content → rendered;
/// 4. otherwise → rendered.
#[must_use]
pub fn classify(probe: &FrameProbe, host_url: Option<&str>) -> ClassificationRule {
    if let FrameLocation::Readable(location) = &probe.location
        && is_placeholder(location, host_url)
    {
        return ClassificationRule::PlaceholderLocation;
    }
    match probe.access {
        ContentAccess::Unreachable => ClassificationRule::Unreachable,
        ContentAccess::CrossOrigin => ClassificationRule::CrossOrigin,
        ContentAccess::Accessible => ClassificationRule::Accessible,
    }
}

fn is_placeholder(location: &str, host_url: Option<&str>) -> bool {
    let location = location.trim();
    if location.is_empty() || location.eq_ignore_ascii_case(BLANK_LOCATION) {
        return true;
    }
    let Some(host) = host_url.map(str::trim).filter(|h| !h.is_empty()) else {
        return false;
    };
    if location == host {
        return true;
    }
    // Compare normalized forms so `https://app.test` matches `https://app.test/`.
    match (Url::parse(location), Url::parse(host)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readable(location: &str, access: ContentAccess) -> FrameProbe {
        FrameProbe::new(FrameLocation::Readable(location.to_owned()), access)
    }

    #[test]
    fn blank_and_empty_locations_are_blocked() {
        for loc in ["about:blank", "ABOUT:BLANK", "", "   "] {
            assert_eq!(
                classify(&readable(loc, ContentAccess::Accessible), None),
                ClassificationRule::PlaceholderLocation,
                "{loc:?}"
            );
        }
    }

    #[test]
    fn host_page_location_is_blocked() {
        let host = Some("https://preview.test");
        assert_eq!(
            classify(&readable("https://preview.test/", ContentAccess::Accessible), host),
            ClassificationRule::PlaceholderLocation
        );
        assert_eq!(
            classify(&readable("https://preview.test/other", ContentAccess::Accessible), host),
            ClassificationRule::Accessible
        );
    }

    #[test]
    fn placeholder_check_runs_before_access_check() {
        assert_eq!(
            classify(&readable("about:blank", ContentAccess::CrossOrigin), None),
            ClassificationRule::PlaceholderLocation
        );
    }

    #[test]
    fn unreachable_content_is_blocked() {
        let probe = FrameProbe::new(FrameLocation::Denied, ContentAccess::Unreachable);
        let rule = classify(&probe, None);
        assert_eq!(rule, ClassificationRule::Unreachable);
        assert_eq!(rule.verdict(), DetectionState::Blocked);
    }

    #[test]
    fn cross_origin_is_rendered() {
        let rule = classify(&FrameProbe::cross_origin(), Some("https://preview.test"));
        assert_eq!(rule, ClassificationRule::CrossOrigin);
        assert_eq!(rule.verdict(), DetectionState::Rendered);
    }

    #[test]
    fn readable_same_origin_page_is_rendered() {
        let rule = classify(
            &readable("https://preview.test/embedded", ContentAccess::Accessible),
            Some("https://preview.test/"),
        );
        assert_eq!(rule.verdict(), DetectionState::Rendered);
    }

    #[test]
    fn closures_are_inspectors() {
        let inspector = |id: &u32| {
            if *id == 0 {
                FrameProbe::cross_origin()
            } else {
                FrameProbe::new(FrameLocation::Denied, ContentAccess::Unreachable)
            }
        };
        assert_eq!(inspector.probe(&0).access, ContentAccess::CrossOrigin);
        assert_eq!(inspector.probe(&1).access, ContentAccess::Unreachable);
    }
}
