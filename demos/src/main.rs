// Copyright 2025 the Multiview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless multiview driver.
//!
//! Runs one preview session against a virtual clock and a scripted browser,
//! then prints the frame plan. Set `RUST_LOG=debug` to watch every
//! transition.
//!
//! ```text
//! cargo run -p multiview_demos -- --device iphone-se --device ipad-air \
//!     --refuse iphone-se --rotate --zoom 150
//! ```

use std::process::ExitCode;

use clap::Parser;
use multiview_device::DeviceId;
use multiview_embed::{ContentAccess, FrameLocation, FrameProbe};
use multiview_scale::ViewMode;
use multiview_session::{DEFAULT_URL, PreviewSession, SessionError};
use multiview_timing::{Clock, ManualClock};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "multiview_headless", about = "Preview one URL on several simulated devices")]
struct Args {
    /// Target URL.
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,
    /// Device to preview; repeat for more. Defaults to every built-in device.
    #[arg(long = "device")]
    devices: Vec<String>,
    /// Device whose frame the site refuses (it stays on about:blank).
    #[arg(long = "refuse")]
    refused: Vec<String>,
    /// Device whose frame fails to load.
    #[arg(long = "fail")]
    failed: Vec<String>,
    /// Use the single-device view instead of the grid.
    #[arg(long)]
    single: bool,
    /// Show every device in landscape.
    #[arg(long)]
    rotate: bool,
    /// Zoom percentage to type in.
    #[arg(long)]
    zoom: Option<String>,
    /// Device to focus after classification.
    #[arg(long)]
    focus: Option<String>,
}

/// Scripted browser: refused frames sit on `about:blank`, everything else
/// navigates cross-origin.
#[derive(Debug)]
struct ScriptedBrowser {
    refused: Vec<String>,
}

impl ScriptedBrowser {
    fn probe(&self, device: &DeviceId) -> FrameProbe {
        if self.refused.iter().any(|r| r == device.as_str()) {
            FrameProbe::new(
                FrameLocation::Readable("about:blank".to_owned()),
                ContentAccess::Accessible,
            )
        } else {
            FrameProbe::cross_origin()
        }
    }
}

/// Replaces the selection with `ids`, or every device when empty.
///
/// Repeated ids select once.
fn select_devices(session: &mut PreviewSession, ids: &[String]) -> Result<(), SessionError> {
    if ids.is_empty() {
        session.select_all();
        return Ok(());
    }
    session.clear_devices();
    for id in ids {
        if !session.is_selected(id) {
            session.toggle_device(id)?;
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<(), SessionError> {
    let mut session = PreviewSession::builtin()?;
    select_devices(&mut session, &args.devices)?;
    if args.single {
        session.set_view_mode(ViewMode::Single);
    }
    if args.rotate {
        session.rotate();
    }
    if let Some(raw) = &args.zoom
        && !session.set_zoom_percent(raw)
    {
        warn!(input = raw.as_str(), "zoom percentage ignored");
    }
    session.submit_url(&args.url)?;

    let clock = ManualClock::new();
    let selection: Vec<DeviceId> = session.selection().to_vec();
    for (i, id) in selection.iter().enumerate() {
        // Stagger the frames a little, as a real browser would.
        clock.set(i as u64 * 120);
        if args.failed.iter().any(|f| f == id.as_str()) {
            session.on_error(id.as_str());
        } else {
            session.on_load(id.as_str(), clock.now_millis());
        }
    }

    let browser = ScriptedBrowser {
        refused: args.refused,
    };
    while let Some(deadline) = session.next_deadline() {
        clock.set(deadline);
        for verdict in session.advance(clock.now_millis(), &|id: &DeviceId| browser.probe(id)) {
            info!(
                at = clock.now_millis(),
                device = %verdict.device,
                state = %verdict.state,
                "classified"
            );
        }
    }

    if let Some(id) = &args.focus {
        session.focus(id)?;
    }

    println!(
        "{} at {}% ({:?}, {:?})",
        session.url_text(),
        session.active_zoom_percent(),
        session.view_mode(),
        session.orientation()
    );
    for frame in session.frames()? {
        let px = frame.geometry.pixel_size();
        println!(
            "{:<20} {:>11}  {:>5} x {:<5} scale {:<6.3} {:<24} {:?}{}",
            frame.profile.name(),
            frame.dimension_label(),
            px.width,
            px.height,
            frame.geometry.content_scale(),
            frame.state,
            frame.content,
            if frame.focused { "  [focused]" } else { "" }
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("preview failed: {err}");
            ExitCode::FAILURE
        }
    }
}
