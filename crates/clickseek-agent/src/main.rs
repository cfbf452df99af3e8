//! ClickSeek agent entry point.
//!
//! Wires the native capture and pointer backends into a [`ScanSession`],
//! starts scanning for the template image given on the command line, and
//! prints every status update until Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load template image           -- image::open
//!  └─ ScanSession::start()          -- dedicated scan thread
//!  └─ event consumption loop        -- prints StatusUpdate lines
//!       └─ Ctrl-C -> session.stop() -- cooperative, may lag one cycle
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clickseek_agent::application::scan_loop::ScanSession;
use clickseek_agent::infrastructure::{
    pointer::EnigoPointerDriver, screen_capture::XcapScreenCapturer,
};
use clickseek_core::ScanEvent;

/// Scan all monitors for a template image and click it when found.
#[derive(Parser, Debug)]
#[command(name = "clickseek", version, about)]
struct Args {
    /// Path to the template image (PNG, JPEG, BMP, ...).
    template: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging. Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let template = image::open(&args.template)
        .with_context(|| format!("failed to load template image {:?}", args.template))?
        .to_rgba8();
    info!(
        "loaded template {:?} ({}x{})",
        args.template,
        template.width(),
        template.height()
    );

    let capturer = Arc::new(XcapScreenCapturer::new());
    let pointer = Arc::new(EnigoPointerDriver::new().context("failed to open pointer backend")?);
    let session = Arc::new(ScanSession::new(capturer, pointer));

    let mut events = session
        .start(template)
        .context("failed to start scan session")?;
    info!("scan session {} running. Press Ctrl-C to stop.", session.id());

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    let session_clone = Arc::clone(&session);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            session_clone.stop();
        }
    });

    // ── Event consumption loop ────────────────────────────────────────────────
    while let Some(event) = events.recv().await {
        match event {
            ScanEvent::Status(status) => info!("{status}"),
            ScanEvent::Finished => break,
        }
    }

    info!("scan session finished");
    Ok(())
}
