// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// Orientation applied to every previewed device at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Profiles are shown with their declared width and height.
    #[default]
    Portrait,
    /// Width and height are swapped.
    Landscape,
}

impl Orientation {
    /// Returns the other orientation.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Portrait => Self::Landscape,
            Self::Landscape => Self::Portrait,
        }
    }

    /// Returns `true` for [`Orientation::Landscape`].
    #[must_use]
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::Landscape)
    }

    /// Maps a portrait reference size into this orientation.
    #[must_use]
    pub fn apply(self, portrait: Size) -> Size {
        match self {
            Self::Portrait => portrait,
            Self::Landscape => Size::new(portrait.height, portrait.width),
        }
    }
}

/// Layout of the unfocused preview area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewMode {
    /// Many small previews side by side.
    #[default]
    Grid,
    /// Larger previews stacked in a single column.
    Single,
}

/// Which row of the base-scale table applies to a preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleContext {
    /// The device is focused; the view mode is irrelevant.
    Focused,
    /// Unfocused, grid layout.
    Grid,
    /// Unfocused, single-column layout.
    Single,
}

impl ScaleContext {
    /// Resolves the context for a preview.
    ///
    /// Focus wins over the view mode.
    #[must_use]
    pub const fn resolve(view_mode: ViewMode, focused: bool) -> Self {
        if focused {
            return Self::Focused;
        }
        match view_mode {
            ViewMode::Grid => Self::Grid,
            ViewMode::Single => Self::Single,
        }
    }
}
