// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Embeddability of one device's frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectionState {
    /// No valid target, or nothing loaded yet.
    #[default]
    Idle,
    /// The frame reported `load`; the heuristic check is pending.
    AwaitingClassification,
    /// The frame shows the target.
    Rendered,
    /// The target refused to be framed.
    Blocked,
    /// The frame reported a load failure.
    LoadError,
}

impl DetectionState {
    /// Returns `true` for `Rendered`, `Blocked` and `LoadError`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rendered | Self::Blocked | Self::LoadError)
    }

    /// Short label for a status badge.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingClassification => "loading",
            Self::Rendered => "rendered",
            Self::Blocked => "blocked",
            Self::LoadError => "load error",
        }
    }
}

impl fmt::Display for DetectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
