//! rdesk session window — entry point.
//!
//! ```text
//! rdesk-gui                      Open a window with defaults
//! rdesk-gui --config <path>     Use custom config TOML
//! rdesk-gui --address <host>    Override the session address
//! rdesk-gui --view-only         Open a View session
//! rdesk-gui --gen-config        Write default config to --config and exit
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rdesk_core::{EncodingMask, FeatureMask, SessionEvent, SessionType, Size};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use rdesk_gui::autoscroll::SCROLL_PERIOD;
use rdesk_gui::clipboard::SystemClipboard;
use rdesk_gui::config::GuiConfig;
use rdesk_gui::controller::{DesktopWindow, Ports};
use rdesk_gui::input::{dispatch, translate_event};
use rdesk_gui::panel::OverlayPanel;
use rdesk_gui::viewport::{FrameCanvas, ScrollHandle, ScrollModel};
use rdesk_gui::window::{DialogNegotiator, NativeWindow, WindowEvent};

/// How often the Win32 message queue is drained.
const PUMP_PERIOD: Duration = Duration::from_millis(4);

/// How often the local clipboard is checked for changes.
const CLIPBOARD_POLL_PERIOD: Duration = Duration::from_millis(100);

// ── CLI ──────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rdesk-gui", about = "rdesk remote desktop session window")]
struct Cli {
    /// Path to configuration TOML file.
    #[arg(short, long, default_value = "rdesk-gui.toml")]
    config: PathBuf,

    /// Remote address (overrides config). Example: 192.168.1.100:8050
    #[arg(short, long)]
    address: Option<String>,

    /// Open a View session instead of Manage.
    #[arg(long)]
    view_only: bool,

    /// Write the default configuration to the --config path and exit.
    #[arg(long)]
    gen_config: bool,
}

fn init_tracing(config: &GuiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    if config.logging.file.is_empty() {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        let file = std::fs::File::create(&config.logging.file)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    }
    Ok(())
}

// ── Main ─────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.gen_config {
        GuiConfig::write_default(&cli.config)?;
        println!("wrote default config to {}", cli.config.display());
        return Ok(());
    }

    let mut config = GuiConfig::load(&cli.config);
    if let Some(addr) = cli.address {
        config.session.address = addr;
    }
    if cli.view_only {
        config.session.session_type = SessionType::View;
    }
    config.validate()?;

    init_tracing(&config)?;
    info!("rdesk-gui v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Outbound stream ──────────────────────────────────────

    let (events_tx, mut events_rx) = mpsc::unbounded_channel::<SessionEvent>();
    let drain = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            match event.to_bytes() {
                Ok(bytes) => debug!(kind = event.kind(), len = bytes.len(), "outbound event"),
                Err(e) => warn!(kind = event.kind(), "failed to encode event: {e}"),
            }
        }
    });

    // ── 2. Window and collaborators ─────────────────────────────

    let descriptor = config.descriptor();
    let native = NativeWindow::create(
        &descriptor.window_title(),
        config.initial_frame(),
        config.min_window(),
    )?;

    let model = ScrollModel::new(native.client_size(), config.initial_frame()).into_shared();
    let ports = Ports {
        canvas: Box::new(FrameCanvas::new(model.clone())),
        scroll_area: Box::new(ScrollHandle(model.clone())),
        geometry: Box::new(native.handle()),
        panel: Box::new(OverlayPanel::new(config.display.panel_width)),
        negotiator: Box::new(DialogNegotiator::new(&native)),
        clipboard: Box::new(SystemClipboard::new()),
    };
    let mut window = DesktopWindow::new(descriptor, config.session.profile, ports, events_tx);

    // No transport is attached: announce a host that supports everything.
    window.set_supported_encodings(EncodingMask::all());
    if config.session.session_type == SessionType::Manage {
        window.set_supported_features(FeatureMask::all());
    }

    if config.display.fullscreen {
        window.set_fullscreen(true);
    } else {
        window.autosize();
    }
    window.on_resize(native.client_size());

    // ── 3. Event loop ───────────────────────────────────────────

    let mut scroll_timer = tokio::time::interval(SCROLL_PERIOD);
    scroll_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut pump = tokio::time::interval(PUMP_PERIOD);
    let mut clipboard_timer = tokio::time::interval(CLIPBOARD_POLL_PERIOD);
    clipboard_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    'running: loop {
        tokio::select! {
            _ = scroll_timer.tick(), if window.is_scrolling() => {
                window.on_scroll_tick();
            }

            _ = pump.tick() => {
                for event in native.poll_events() {
                    if let WindowEvent::Resize(w, h) = event {
                        model.borrow_mut().set_viewport_size(Size::new(w, h));
                    }
                    let layout = model.borrow().layout();
                    let Some(action) = translate_event(&event, &config.input, &layout) else {
                        continue;
                    };
                    if !dispatch(&mut window, action) {
                        break 'running;
                    }
                }
            }

            _ = clipboard_timer.tick(), if window.clipboard_active() => {
                window.poll_local_clipboard();
            }
        }
    }

    // ── 4. Shutdown ─────────────────────────────────────────────

    info!("shutting down");
    drop(window);
    if let Err(e) = drain.await {
        warn!("outbound task failed: {e}");
    }
    drop(native);

    Ok(())
}
