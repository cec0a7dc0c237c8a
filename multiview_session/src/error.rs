// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use multiview_device::{DeviceId, InvalidProfile};
use multiview_embed::InvalidUrl;

/// Errors raised by [`PreviewSession`](crate::PreviewSession) operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The id names no device of the session's catalog.
    #[error("unknown device `{0}`")]
    UnknownDevice(DeviceId),
    /// The device exists but is not part of the current selection.
    #[error("device `{0}` is not selected")]
    NotSelected(DeviceId),
    /// A configuration section is out of range, so previews could not be
    /// laid out with a positive scale.
    #[error("invalid {0} configuration")]
    InvalidConfig(&'static str),
    /// The submitted target URL was rejected.
    #[error(transparent)]
    InvalidUrl(#[from] InvalidUrl),
    /// A profile could not be laid out.
    #[error(transparent)]
    InvalidProfile(#[from] InvalidProfile),
}
