// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use multiview_timing::TimerQueue;
use tracing::{debug, info, warn};

use crate::probe::{ClassificationRule, FrameInspector, classify};
use crate::state::DetectionState;
use crate::target::{InvalidUrl, TargetUrl};

/// Configuration of an [`EmbedDetector`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectorConfig {
    /// Delay between a frame's `load` and its classification.
    pub classify_delay_ms: u64,
    /// URL of the page hosting the frames. A frame that ends up here was
    /// refused by the target.
    pub host_url: Option<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            classify_delay_ms: 1500,
            host_url: None,
        }
    }
}

/// A frame classification produced by [`EmbedDetector::advance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification<K> {
    /// Device whose frame was classified.
    pub device: K,
    /// The new state, either `Rendered` or `Blocked`.
    pub state: DetectionState,
    /// Heuristic check that decided it.
    pub rule: ClassificationRule,
}

/// Per-device embeddability state machine.
///
/// Devices are registered with [`EmbedDetector::track`]; signals for devices
/// that are not tracked, and any signal while no valid target is set, are
/// ignored. Each device's state changes only in response to its own signals
/// and timer, and to target changes, which reset every device.
#[derive(Clone, Debug)]
pub struct EmbedDetector<K> {
    config: DetectorConfig,
    target: Option<TargetUrl>,
    states: HashMap<K, DetectionState>,
    timers: TimerQueue<K>,
}

impl<K: Clone + Eq + Hash + Debug> Default for EmbedDetector<K> {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl<K: Clone + Eq + Hash + Debug> EmbedDetector<K> {
    /// Creates a detector with no target and no tracked devices.
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            target: None,
            states: HashMap::new(),
            timers: TimerQueue::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Returns the current target, if a valid one is set.
    #[must_use]
    pub fn target(&self) -> Option<&TargetUrl> {
        self.target.as_ref()
    }

    /// Points every frame at a new target.
    ///
    /// All pending timers are cancelled and every tracked device returns to
    /// `Idle` before the input is parsed, even when it turns out invalid. On
    /// error no target is set, so loads are not expected and are ignored.
    pub fn set_target(&mut self, raw: &str) -> Result<&TargetUrl, InvalidUrl> {
        self.reset_all();
        match TargetUrl::parse(raw) {
            Ok(target) => {
                info!(url = %target, devices = self.states.len(), "target set");
                let target = self.target.insert(target);
                Ok(&*target)
            }
            Err(err) => {
                self.target = None;
                info!(input = raw, error = %err, "target rejected");
                Err(err)
            }
        }
    }

    /// Removes the target and resets every device.
    pub fn clear_target(&mut self) {
        self.reset_all();
        self.target = None;
    }

    /// Starts tracking `device` as `Idle`.
    ///
    /// Returns `false` if it was already tracked; its state is kept.
    pub fn track(&mut self, device: K) -> bool {
        if self.states.contains_key(&device) {
            return false;
        }
        self.states.insert(device, DetectionState::Idle);
        true
    }

    /// Stops tracking `device`, cancelling its timer.
    ///
    /// Returns its last state.
    pub fn untrack(&mut self, device: &K) -> Option<DetectionState> {
        self.timers.cancel(device);
        self.states.remove(device)
    }

    /// Returns `true` if `device` is tracked.
    #[must_use]
    pub fn is_tracked(&self, device: &K) -> bool {
        self.states.contains_key(device)
    }

    /// Returns the state of `device`, or `None` if it is not tracked.
    #[must_use]
    pub fn state(&self, device: &K) -> Option<DetectionState> {
        self.states.get(device).copied()
    }

    /// Iterates over tracked devices and their states, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = (&K, DetectionState)> + '_ {
        self.states.iter().map(|(k, s)| (k, *s))
    }

    /// Number of classification timers pending.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Earliest time at which [`EmbedDetector::advance`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Handles a successful `load` signal from `device`'s frame at `now`.
    ///
    /// The device enters `AwaitingClassification` and a classification timer
    /// is started, replacing any timer still pending for it. A device in
    /// `LoadError` stays there until it is retried. Returns whether the
    /// signal was accepted.
    pub fn on_load(&mut self, device: &K, now: u64) -> bool {
        let Some(state) = self.accepting(device, "load") else {
            return false;
        };
        if state == DetectionState::LoadError {
            debug!(device = ?device, "load ignored after load error");
            return false;
        }
        if let Some(stale) = self.timers.cancel(device) {
            debug!(device = ?device, timer = stale.get(), "replaced pending classification");
        }
        let deadline = now.saturating_add(self.config.classify_delay_ms);
        self.timers.schedule(device.clone(), deadline);
        self.set_state(device, DetectionState::AwaitingClassification);
        debug!(device = ?device, deadline, "awaiting classification");
        true
    }

    /// Handles an `error` signal from `device`'s frame.
    ///
    /// The device moves to `LoadError` and any pending timer is cancelled.
    /// Returns whether the signal was accepted.
    pub fn on_error(&mut self, device: &K) -> bool {
        if self.accepting(device, "error").is_none() {
            return false;
        }
        self.timers.cancel(device);
        self.set_state(device, DetectionState::LoadError);
        info!(device = ?device, "frame failed to load");
        true
    }

    /// Returns `device` to `Idle`, cancelling its timer.
    ///
    /// Used when a single frame is reloaded or retried by hand. Returns
    /// `false` if the device is not tracked.
    pub fn retry(&mut self, device: &K) -> bool {
        if !self.states.contains_key(device) {
            return false;
        }
        self.timers.cancel(device);
        self.set_state(device, DetectionState::Idle);
        debug!(device = ?device, "reset to idle");
        true
    }

    /// Cancels every timer and returns every tracked device to `Idle`.
    pub fn reset_all(&mut self) {
        let cancelled = self.timers.cancel_all();
        for state in self.states.values_mut() {
            *state = DetectionState::Idle;
        }
        if cancelled > 0 {
            debug!(cancelled, "cancelled pending classifications");
        }
    }

    /// Fires every timer due at `now` and classifies the affected frames.
    ///
    /// Classifications are returned in deadline order.
    pub fn advance<I>(&mut self, now: u64, inspector: &I) -> Vec<Classification<K>>
    where
        I: FrameInspector<K> + ?Sized,
    {
        let host_url = self.config.host_url.as_deref();
        let mut out = Vec::new();
        for expired in self.timers.pop_expired(now) {
            let device = expired.key;
            let Some(state) = self.states.get_mut(&device) else {
                continue;
            };
            if *state != DetectionState::AwaitingClassification {
                continue;
            }
            let probe = inspector.probe(&device);
            let rule = classify(&probe, host_url);
            let verdict = rule.verdict();
            *state = verdict;
            info!(device = ?device, state = %verdict, ?rule, "frame classified");
            out.push(Classification {
                device,
                state: verdict,
                rule,
            });
        }
        out
    }

    fn accepting(&self, device: &K, signal: &'static str) -> Option<DetectionState> {
        if self.target.is_none() {
            warn!(device = ?device, signal, "signal ignored: no valid target");
            return None;
        }
        let state = self.states.get(device).copied();
        if state.is_none() {
            warn!(device = ?device, signal, "signal ignored: device not tracked");
        }
        state
    }

    fn set_state(&mut self, device: &K, state: DetectionState) {
        if let Some(slot) = self.states.get_mut(device) {
            *slot = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ContentAccess, FrameLocation, FrameProbe};

    fn blank(_: &&str) -> FrameProbe {
        FrameProbe::new(
            FrameLocation::Readable("about:blank".to_owned()),
            ContentAccess::Accessible,
        )
    }

    fn foreign(_: &&str) -> FrameProbe {
        FrameProbe::cross_origin()
    }

    fn detector(devices: &[&'static str]) -> EmbedDetector<&'static str> {
        let mut d = EmbedDetector::default();
        for device in devices {
            d.track(*device);
        }
        d.set_target("https://example.com").unwrap();
        d
    }

    #[test]
    fn tracked_devices_start_idle() {
        let d = detector(&["a", "b"]);
        assert_eq!(d.state(&"a"), Some(DetectionState::Idle));
        assert_eq!(d.state(&"z"), None);
        assert_eq!(d.pending_timers(), 0);
    }

    #[test]
    fn load_then_timer_classifies() {
        let mut d = detector(&["a"]);
        assert!(d.on_load(&"a", 100));
        assert_eq!(d.state(&"a"), Some(DetectionState::AwaitingClassification));
        assert_eq!(d.next_deadline(), Some(1600));

        assert!(d.advance(1599, &foreign).is_empty());
        let out = d.advance(1600, &foreign);
        assert_eq!(
            out,
            [Classification {
                device: "a",
                state: DetectionState::Rendered,
                rule: ClassificationRule::CrossOrigin,
            }]
        );
        assert_eq!(d.pending_timers(), 0);
    }

    #[test]
    fn new_load_replaces_pending_timer() {
        let mut d = detector(&["a"]);
        d.on_load(&"a", 0);
        d.on_load(&"a", 1000);
        assert_eq!(d.pending_timers(), 1);

        // The first load's deadline passes without a classification.
        assert!(d.advance(1500, &blank).is_empty());
        assert_eq!(d.state(&"a"), Some(DetectionState::AwaitingClassification));

        let out = d.advance(2500, &foreign);
        assert_eq!(out.len(), 1);
        assert_eq!(d.state(&"a"), Some(DetectionState::Rendered));
    }

    #[test]
    fn error_is_terminal_until_retry() {
        let mut d = detector(&["a"]);
        d.on_load(&"a", 0);
        assert!(d.on_error(&"a"));
        assert_eq!(d.pending_timers(), 0);
        assert!(!d.on_load(&"a", 10));
        assert_eq!(d.state(&"a"), Some(DetectionState::LoadError));

        assert!(d.retry(&"a"));
        assert_eq!(d.state(&"a"), Some(DetectionState::Idle));
        assert!(d.on_load(&"a", 20));
    }

    #[test]
    fn devices_do_not_affect_each_other() {
        let mut d = detector(&["a", "b"]);
        d.on_load(&"a", 0);
        d.on_error(&"b");
        let out = d.advance(5000, &blank);
        assert_eq!(out.len(), 1);
        assert_eq!(d.state(&"a"), Some(DetectionState::Blocked));
        assert_eq!(d.state(&"b"), Some(DetectionState::LoadError));
    }

    #[test]
    fn target_change_cancels_everything() {
        let mut d = detector(&["a", "b"]);
        d.on_load(&"a", 0);
        d.on_load(&"b", 0);
        d.set_target("https://other.example").unwrap();

        assert_eq!(d.pending_timers(), 0);
        assert!(d.advance(10_000, &blank).is_empty());
        assert_eq!(d.state(&"a"), Some(DetectionState::Idle));
        assert_eq!(d.state(&"b"), Some(DetectionState::Idle));
    }

    #[test]
    fn invalid_target_resets_and_ignores_signals() {
        let mut d = detector(&["a"]);
        d.on_load(&"a", 0);
        assert!(d.set_target("notaurl").is_err());
        assert!(d.target().is_none());
        assert_eq!(d.state(&"a"), Some(DetectionState::Idle));
        assert_eq!(d.pending_timers(), 0);

        assert!(!d.on_load(&"a", 0));
        assert!(!d.on_error(&"a"));
        assert_eq!(d.state(&"a"), Some(DetectionState::Idle));
    }

    #[test]
    fn untracked_devices_are_ignored() {
        let mut d = detector(&["a"]);
        assert!(!d.on_load(&"ghost", 0));
        assert!(!d.on_error(&"ghost"));
        assert!(!d.retry(&"ghost"));
        assert_eq!(d.pending_timers(), 0);
    }

    #[test]
    fn untrack_cancels_timer() {
        let mut d = detector(&["a"]);
        d.on_load(&"a", 0);
        assert_eq!(d.untrack(&"a"), Some(DetectionState::AwaitingClassification));
        assert_eq!(d.pending_timers(), 0);
        assert!(d.advance(10_000, &blank).is_empty());
    }

    #[test]
    fn reload_after_classification_reclassifies() {
        let mut d = detector(&["a"]);
        d.on_load(&"a", 0);
        d.advance(1500, &foreign);
        assert_eq!(d.state(&"a"), Some(DetectionState::Rendered));

        d.on_load(&"a", 2000);
        d.advance(3500, &blank);
        assert_eq!(d.state(&"a"), Some(DetectionState::Blocked));
    }

    #[test]
    fn host_url_from_config_counts_as_placeholder() {
        let mut d = EmbedDetector::new(DetectorConfig {
            classify_delay_ms: 10,
            host_url: Some("https://preview.test/".to_owned()),
        });
        d.track("a");
        d.set_target("https://example.com").unwrap();
        d.on_load(&"a", 0);
        let out = d.advance(10, &|_: &&str| {
            FrameProbe::new(
                FrameLocation::Readable("https://preview.test".to_owned()),
                ContentAccess::Accessible,
            )
        });
        assert_eq!(out[0].rule, ClassificationRule::PlaceholderLocation);
        assert_eq!(out[0].state, DetectionState::Blocked);
    }
}
