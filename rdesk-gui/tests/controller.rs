//! Integration tests — the session window controller driven through fake
//! collaborators and the real scroll model: auto-scroll, window fit,
//! negotiation, clipboard gating, interception and shutdown.

use std::cell::RefCell;
use std::rc::Rc;

use rdesk_core::{
    ButtonMask, ClipboardEvent, CursorShape, EncodingMask, FeatureMask, KeyAction, KeyEvent,
    KeyModifiers, KeySequence, Point, PointerEvent, Rect, SessionConfig, SessionDescriptor,
    SessionEvent, SessionType, Size, VideoEncoding, vk,
};
use rdesk_gui::autoscroll::{Axis, ScrollDelta};
use rdesk_gui::controller::{DesktopWindow, Ports};
use rdesk_gui::fit::{Placement, WindowMode};
use rdesk_gui::interceptor::{EventSource, InputEvent, WheelInput};
use rdesk_gui::panel::PanelIntent;
use rdesk_gui::ports::{Canvas, ClipboardBridge, GeometryPort, Negotiator, Panel};
use rdesk_gui::viewport::{ScrollHandle, ScrollModel};
use tokio::sync::mpsc::{self, UnboundedReceiver};

// ── Fakes ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Geo {
    Fullscreen,
    Maximized,
    Windowed(Rect),
}

/// Everything the fakes observed, plus scripted dialog answers.
struct Probe {
    area: Rect,
    geometry: Vec<Geo>,
    panel_origin: Option<Point>,
    panel_refreshes: u32,
    /// `None` cancels the dialog; `Some(None)` accepts unchanged.
    dialog_answer: Option<Option<SessionConfig>>,
    dialog_calls: Vec<(SessionConfig, EncodingMask, FeatureMask)>,
    warnings: Vec<VideoEncoding>,
    clipboard_toggles: Vec<bool>,
    clipboard_applied: Vec<ClipboardEvent>,
    clipboard_pending: Option<ClipboardEvent>,
    cursor: Option<CursorShape>,
    draws: u32,
}

impl Default for Probe {
    fn default() -> Self {
        Self {
            area: Rect::new(0, 0, 1920, 1080),
            geometry: Vec::new(),
            panel_origin: None,
            panel_refreshes: 0,
            dialog_answer: Some(None),
            dialog_calls: Vec::new(),
            warnings: Vec::new(),
            clipboard_toggles: Vec::new(),
            clipboard_applied: Vec::new(),
            clipboard_pending: None,
            cursor: None,
            draws: 0,
        }
    }
}

type Shared = Rc<RefCell<Probe>>;

struct FakeCanvas {
    model: Rc<RefCell<ScrollModel>>,
    probe: Shared,
}

impl Canvas for FakeCanvas {
    fn frame_size(&self) -> Size {
        self.model.borrow().frame_size()
    }
    fn resize_frame(&mut self, size: Size) {
        self.model.borrow_mut().set_frame_size(size);
    }
    fn set_cursor(&mut self, cursor: &CursorShape) {
        self.probe.borrow_mut().cursor = Some(cursor.clone());
    }
    fn draw(&mut self) {
        self.probe.borrow_mut().draws += 1;
    }
}

struct FakeGeometry(Shared);

impl GeometryPort for FakeGeometry {
    fn available_area(&self) -> Rect {
        self.0.borrow().area
    }
    fn decoration(&self) -> Size {
        Size::default()
    }
    fn normal_rect(&self) -> Rect {
        Rect::new(100, 100, 1024, 768)
    }
    fn enter_fullscreen(&mut self) {
        self.0.borrow_mut().geometry.push(Geo::Fullscreen);
    }
    fn enter_maximized(&mut self) {
        self.0.borrow_mut().geometry.push(Geo::Maximized);
    }
    fn enter_windowed(&mut self, rect: Rect) {
        self.0.borrow_mut().geometry.push(Geo::Windowed(rect));
    }
}

struct FakePanel(Shared);

impl Panel for FakePanel {
    fn width(&self) -> i32 {
        400
    }
    fn move_to(&mut self, origin: Point) {
        self.0.borrow_mut().panel_origin = Some(origin);
    }
    fn refresh(&mut self) {
        self.0.borrow_mut().panel_refreshes += 1;
    }
}

struct FakeDialog(Shared);

impl Negotiator for FakeDialog {
    fn warn_unsupported_encoding(&mut self, encoding: VideoEncoding, _supported: EncodingMask) {
        self.0.borrow_mut().warnings.push(encoding);
    }
    fn negotiate(
        &mut self,
        config: &SessionConfig,
        encodings: EncodingMask,
        features: FeatureMask,
    ) -> Option<SessionConfig> {
        let mut probe = self.0.borrow_mut();
        probe.dialog_calls.push((*config, encodings, features));
        probe.dialog_answer.map(|edit| edit.unwrap_or(*config))
    }
}

struct FakeClipboard(Shared);

impl ClipboardBridge for FakeClipboard {
    fn set_enabled(&mut self, enabled: bool) {
        self.0.borrow_mut().clipboard_toggles.push(enabled);
    }
    fn apply(&mut self, event: &ClipboardEvent) {
        self.0.borrow_mut().clipboard_applied.push(event.clone());
    }
    fn poll(&mut self) -> Option<ClipboardEvent> {
        self.0.borrow_mut().clipboard_pending.take()
    }
}

// ── Harness ──────────────────────────────────────────────────────

/// 1000×800 viewport with 20px scrollbars.
const VIEWPORT: Size = Size::new(1000, 800);
const FULL_HD: Size = Size::new(1920, 1080);

struct Harness {
    window: DesktopWindow,
    probe: Shared,
    model: Rc<RefCell<ScrollModel>>,
    rx: UnboundedReceiver<SessionEvent>,
}

impl Harness {
    fn new(session_type: SessionType, frame: Size) -> Self {
        Self::with_config(session_type, frame, SessionConfig::default())
    }

    fn with_config(session_type: SessionType, frame: Size, config: SessionConfig) -> Self {
        let probe: Shared = Rc::new(RefCell::new(Probe::default()));
        let model = ScrollModel::with_thickness(VIEWPORT, frame, 20).into_shared();
        let (tx, rx) = mpsc::unbounded_channel();
        let ports = Ports {
            canvas: Box::new(FakeCanvas {
                model: model.clone(),
                probe: probe.clone(),
            }),
            scroll_area: Box::new(ScrollHandle(model.clone())),
            geometry: Box::new(FakeGeometry(probe.clone())),
            panel: Box::new(FakePanel(probe.clone())),
            negotiator: Box::new(FakeDialog(probe.clone())),
            clipboard: Box::new(FakeClipboard(probe.clone())),
        };
        let descriptor = SessionDescriptor::new(session_type, "", "10.0.0.7:8050");
        Self {
            window: DesktopWindow::new(descriptor, config, ports, tx),
            probe,
            model,
            rx,
        }
    }

    fn drain(&mut self) -> Vec<SessionEvent> {
        let mut out = Vec::new();
        while let Ok(ev) = self.rx.try_recv() {
            out.push(ev);
        }
        out
    }

    /// Pointer at viewport coordinates `(x, y)`.
    fn point_at(&mut self, x: i32, y: i32) {
        let canvas = self.model.borrow().layout().to_canvas(Point::new(x, y));
        self.window.on_pointer_event(canvas, ButtonMask::empty());
    }

    fn h_pos(&self) -> i32 {
        self.model.borrow().layout().horizontal.position
    }

    fn v_pos(&self) -> i32 {
        self.model.borrow().layout().vertical.position
    }
}

// ── Title ────────────────────────────────────────────────────────

#[test]
fn title_falls_back_to_address() {
    let h = Harness::new(SessionType::Manage, FULL_HD);
    assert_eq!(h.window.title(), "10.0.0.7:8050 - Remote Desktop Manage");
    let h = Harness::new(SessionType::View, FULL_HD);
    assert_eq!(h.window.title(), "10.0.0.7:8050 - Remote Desktop View");
}

// ── Auto-scroll ──────────────────────────────────────────────────

#[test]
fn pointer_near_right_edge_scrolls_right() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    // Client area is 980×780.
    h.point_at(960, 400);
    assert!(h.window.is_scrolling());
    assert_eq!(h.window.scroll_delta(), ScrollDelta { dx: 10, dy: 0 });

    h.window.on_scroll_tick();
    h.window.on_scroll_tick();
    assert_eq!(h.h_pos(), 20);
    assert_eq!(h.v_pos(), 0);
}

#[test]
fn pointer_near_top_left_scrolls_back() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.model.borrow_mut().set_position(Axis::Horizontal, 200);
    h.model.borrow_mut().set_position(Axis::Vertical, 200);
    h.point_at(10, 10);
    assert_eq!(h.window.scroll_delta(), ScrollDelta { dx: -10, dy: -10 });
    h.window.on_scroll_tick();
    assert_eq!((h.h_pos(), h.v_pos()), (190, 190));
}

#[test]
fn centre_of_viewport_stops_scrolling() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.point_at(970, 770);
    assert!(h.window.is_scrolling());

    h.point_at(490, 390);
    assert!(!h.window.is_scrolling());
    assert_eq!(h.window.scroll_delta(), ScrollDelta::default());

    h.window.on_scroll_tick();
    assert_eq!(h.h_pos(), 0);
}

#[test]
fn tick_clamps_at_maximum() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    // 1920 - 980.
    h.model.borrow_mut().set_position(Axis::Horizontal, 935);
    h.point_at(975, 400);
    h.window.on_scroll_tick();
    assert_eq!(h.h_pos(), 940);
    h.window.on_scroll_tick();
    assert_eq!(h.h_pos(), 940);
    assert!(h.window.is_scrolling());
}

#[test]
fn frame_that_fits_never_scrolls() {
    let mut h = Harness::new(SessionType::Manage, Size::new(800, 600));
    for (x, y) in [(0, 0), (999, 799), (5, 400), (500, 795)] {
        h.point_at(x, y);
        assert!(!h.window.is_scrolling(), "scrolling at ({x}, {y})");
    }
}

#[test]
fn timer_runs_iff_step_nonzero() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    for (x, y) in [(960, 10), (500, 400), (20, 500), (20, 500), (600, 300), (700, 770)] {
        h.point_at(x, y);
        assert_eq!(h.window.is_scrolling(), !h.window.scroll_delta().is_zero());
    }
}

#[test]
fn every_pointer_event_is_forwarded() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.window.on_pointer_event(Point::new(960, 10), ButtonMask::LEFT);
    h.window.on_pointer_event(Point::new(500, 400), ButtonMask::empty());
    assert_eq!(
        h.drain(),
        vec![
            SessionEvent::Pointer(PointerEvent::new(Point::new(960, 10), ButtonMask::LEFT)),
            SessionEvent::Pointer(PointerEvent::new(Point::new(500, 400), ButtonMask::empty())),
        ]
    );
}

// ── Window fit ───────────────────────────────────────────────────

#[test]
fn full_hd_frame_on_short_work_area_maximizes() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.probe.borrow_mut().area = Rect::new(0, 0, 1920, 1040);
    assert_eq!(h.window.autosize(), Some(Placement::Maximized));
    assert_eq!(h.window.mode(), WindowMode::Maximized);
}

#[test]
fn small_frame_is_centred_on_work_area() {
    let mut h = Harness::new(SessionType::Manage, Size::new(800, 600));
    let placed = h.window.autosize();
    assert_eq!(
        placed,
        Some(Placement::Windowed(Rect::new(
            (1920 - 800) / 2,
            (1080 - 600) / 2,
            800,
            600
        )))
    );
    // Idempotent with unchanged geometry.
    assert_eq!(h.window.autosize(), placed);
    let geo = h.probe.borrow().geometry.clone();
    assert_eq!(geo.len(), 2);
    assert_eq!(geo[0], geo[1]);
}

#[test]
fn frame_resize_autosizes_only_when_windowed_and_changed() {
    let mut h = Harness::new(SessionType::Manage, Size::new(800, 600));

    h.window.resize_desktop_frame(Size::new(1024, 768));
    assert_eq!(
        h.probe.borrow().geometry,
        vec![Geo::Windowed(Rect::new(448, 156, 1024, 768))]
    );

    // Same size again: nothing.
    h.window.resize_desktop_frame(Size::new(1024, 768));
    assert_eq!(h.probe.borrow().geometry.len(), 1);

    // Maximized is sticky.
    h.window.on_window_state_changed(WindowMode::Maximized);
    h.window.resize_desktop_frame(Size::new(1280, 720));
    assert_eq!(h.probe.borrow().geometry.len(), 1);
    assert_eq!(h.model.borrow().frame_size(), Size::new(1280, 720));
    assert_eq!(h.window.mode(), WindowMode::Maximized);
}

#[test]
fn fullscreen_round_trip_restores_prior_mode() {
    for prior in [WindowMode::Windowed, WindowMode::Maximized] {
        let mut h = Harness::new(SessionType::Manage, FULL_HD);
        h.window.on_window_state_changed(prior);

        h.window.on_panel_intent(PanelIntent::Fullscreen(true));
        assert_eq!(h.window.mode(), WindowMode::Fullscreen);
        // Frame changes do not resize a fullscreen window.
        h.window.resize_desktop_frame(Size::new(800, 600));

        h.window.on_panel_intent(PanelIntent::Fullscreen(false));
        assert_eq!(h.window.mode(), prior);

        let expected_last = match prior {
            WindowMode::Maximized => Geo::Maximized,
            _ => Geo::Windowed(Rect::new(100, 100, 1024, 768)),
        };
        let geo = h.probe.borrow().geometry.clone();
        assert_eq!(geo, vec![Geo::Fullscreen, expected_last]);
    }
}

#[test]
fn panel_autosize_leaves_fullscreen() {
    let mut h = Harness::new(SessionType::Manage, Size::new(800, 600));
    h.window.set_fullscreen(true);
    h.window.on_panel_intent(PanelIntent::Autosize);
    assert_eq!(h.window.mode(), WindowMode::Windowed);
    assert_eq!(
        h.probe.borrow().geometry.last(),
        Some(&Geo::Windowed(Rect::new(560, 240, 800, 600)))
    );
}

#[test]
fn panel_follows_window_width() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.window.on_resize(Size::new(1280, 720));
    assert_eq!(h.probe.borrow().panel_origin, Some(Point::new(440, 0)));
    h.window.on_resize(Size::new(800, 600));
    assert_eq!(h.probe.borrow().panel_origin, Some(Point::new(200, 0)));
}

#[test]
fn frame_updates_refresh_the_panel() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.window.draw_desktop_frame();
    h.window.on_frame_updated();
    h.window.on_frame_updated();
    let probe = h.probe.borrow();
    assert_eq!(probe.draws, 1);
    assert_eq!(probe.panel_refreshes, 2);
}

#[test]
fn cursor_goes_to_the_canvas() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    let shape = CursorShape {
        size: Size::new(1, 1),
        hotspot: Point::new(0, 0),
        data: vec![0, 0, 0, 255],
    };
    h.window.inject_cursor(&shape);
    assert_eq!(h.probe.borrow().cursor, Some(shape));
}

// ── Negotiation ──────────────────────────────────────────────────

#[test]
fn unsupported_encoding_warns_then_negotiates() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.window.set_supported_encodings(EncodingMask::ZLIB);
    h.window.set_supported_features(FeatureMask::CLIPBOARD);

    assert!(!h.window.capabilities().supports_encoding(VideoEncoding::Vp8));

    let mut config = SessionConfig::default();
    assert_eq!(config.video_encoding, VideoEncoding::Vp8);
    assert!(h.window.require_config_change(&mut config));

    let probe = h.probe.borrow();
    assert_eq!(probe.warnings, vec![VideoEncoding::Vp8]);
    assert_eq!(
        probe.dialog_calls,
        vec![(
            SessionConfig::default(),
            EncodingMask::ZLIB,
            FeatureMask::CLIPBOARD
        )]
    );
    // Accepted unchanged, unsupported value included.
    assert_eq!(config.video_encoding, VideoEncoding::Vp8);
}

#[test]
fn supported_encoding_skips_warning() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.window.set_supported_encodings(EncodingMask::VP8 | EncodingMask::VP9);
    let mut config = SessionConfig::default();
    assert!(h.window.require_config_change(&mut config));
    assert!(h.probe.borrow().warnings.is_empty());
}

#[test]
fn cancel_leaves_everything_untouched() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.window.set_supported_features(FeatureMask::CLIPBOARD);
    h.probe.borrow_mut().dialog_answer = None;

    let mut config = SessionConfig::default();
    let before_toggles = h.probe.borrow().clipboard_toggles.clone();
    assert!(!h.window.require_config_change(&mut config));
    assert_eq!(config, SessionConfig::default());
    assert_eq!(h.window.config(), &SessionConfig::default());
    assert_eq!(h.probe.borrow().clipboard_toggles, before_toggles);

    h.window.change_settings();
    assert!(h.drain().is_empty());
}

#[test]
fn accepted_settings_are_published() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    let edited = SessionConfig {
        video_encoding: VideoEncoding::Vp9,
        features: FeatureMask::CURSOR_SHAPE,
    };
    h.probe.borrow_mut().dialog_answer = Some(Some(edited));

    h.window.on_panel_intent(PanelIntent::OpenSettings);
    assert_eq!(h.window.config(), &edited);
    assert_eq!(h.drain(), vec![SessionEvent::Config(edited)]);
}

// ── Clipboard gate ───────────────────────────────────────────────

#[test]
fn clipboard_follows_host_and_local_flags() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    assert!(!h.window.clipboard_active());

    h.window.set_supported_features(FeatureMask::CLIPBOARD | FeatureMask::CURSOR_SHAPE);
    assert!(h.window.clipboard_active());

    // Local policy drops clipboard.
    h.probe.borrow_mut().dialog_answer = Some(Some(SessionConfig {
        video_encoding: VideoEncoding::Vp8,
        features: FeatureMask::CURSOR_SHAPE,
    }));
    h.window.change_settings();
    assert!(!h.window.clipboard_active());

    // Local policy restores it, host withdraws it, host offers it again.
    h.probe.borrow_mut().dialog_answer = Some(Some(SessionConfig::default()));
    h.window.change_settings();
    assert!(h.window.clipboard_active());
    h.window.set_supported_features(FeatureMask::CURSOR_SHAPE);
    assert!(!h.window.clipboard_active());
    h.window.set_supported_features(FeatureMask::CLIPBOARD);
    assert!(h.window.clipboard_active());

    assert_eq!(
        h.probe.borrow().clipboard_toggles,
        vec![true, false, true, false, true]
    );
}

#[test]
fn local_profile_without_clipboard_keeps_gate_shut() {
    let profile = SessionConfig {
        video_encoding: VideoEncoding::Vp9,
        features: FeatureMask::CURSOR_SHAPE,
    };
    let mut h = Harness::with_config(SessionType::Manage, FULL_HD, profile);
    h.window.set_supported_features(FeatureMask::all());
    assert!(!h.window.clipboard_active());
    assert!(h.probe.borrow().clipboard_toggles.is_empty());
}

#[test]
fn clipboard_relays_both_ways_while_active() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    let remote = ClipboardEvent::text("from host");
    let local = ClipboardEvent::text("from here");

    h.window.inject_clipboard(&remote);
    h.window.on_local_clipboard(local.clone());
    assert!(h.probe.borrow().clipboard_applied.is_empty());
    assert!(h.drain().is_empty());

    h.window.set_supported_features(FeatureMask::CLIPBOARD);
    h.window.inject_clipboard(&remote);
    h.window.on_local_clipboard(local.clone());
    h.probe.borrow_mut().clipboard_pending = Some(ClipboardEvent::text("polled"));
    h.window.poll_local_clipboard();

    assert_eq!(h.probe.borrow().clipboard_applied, vec![remote]);
    assert_eq!(
        h.drain(),
        vec![
            SessionEvent::Clipboard(local),
            SessionEvent::Clipboard(ClipboardEvent::text("polled")),
        ]
    );
}

#[test]
#[should_panic(expected = "view-only")]
fn view_session_rejects_feature_update() {
    let mut h = Harness::new(SessionType::View, FULL_HD);
    h.window.set_supported_features(FeatureMask::CLIPBOARD);
}

#[test]
fn view_session_negotiates_without_clipboard() {
    let mut h = Harness::new(SessionType::View, FULL_HD);
    h.window.set_supported_encodings(EncodingMask::all());
    let mut config = SessionConfig::default();
    assert!(h.window.require_config_change(&mut config));
    assert!(!h.window.clipboard_active());
    assert!(h.probe.borrow().clipboard_toggles.is_empty());
}

// ── Interception ─────────────────────────────────────────────────

#[test]
fn tab_on_canvas_is_forwarded() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    let press = KeyEvent::press(vk::TAB, 0x0F, KeyModifiers::empty());
    let release = KeyEvent::release(vk::TAB, 0x0F, KeyModifiers::empty());
    assert!(h.window.intercept(EventSource::Canvas, &InputEvent::Key(press)));
    assert!(h.window.intercept(EventSource::Canvas, &InputEvent::Key(release)));

    let letter = KeyEvent::press(0x41, 0x1E, KeyModifiers::empty());
    assert!(!h.window.intercept(EventSource::Canvas, &InputEvent::Key(letter)));

    assert_eq!(
        h.drain(),
        vec![SessionEvent::Key(press), SessionEvent::Key(release)]
    );
}

#[test]
fn viewport_wheel_is_forwarded_in_frame_coordinates() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.model.borrow_mut().set_position(Axis::Horizontal, 300);
    h.model.borrow_mut().set_position(Axis::Vertical, 50);

    let wheel = InputEvent::Wheel(WheelInput {
        position: Point::new(10, 20),
        buttons: ButtonMask::RIGHT,
        delta: 120,
    });
    assert!(h.window.intercept(EventSource::Viewport, &wheel));
    // The container did not scroll.
    assert_eq!((h.h_pos(), h.v_pos()), (300, 50));
    assert_eq!(
        h.drain(),
        vec![SessionEvent::Pointer(PointerEvent::new(
            Point::new(310, 70),
            ButtonMask::RIGHT | ButtonMask::WHEEL_UP
        ))]
    );
}

#[test]
fn key_sequence_expands_in_order() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.window
        .on_panel_intent(PanelIntent::KeySequence(KeySequence::ctrl_alt_del()));
    let keys: Vec<(u16, KeyAction)> = h
        .drain()
        .into_iter()
        .map(|ev| match ev {
            SessionEvent::Key(k) => (k.virtual_key, k.action),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        keys,
        vec![
            (vk::CONTROL, KeyAction::Press),
            (vk::MENU, KeyAction::Press),
            (vk::DELETE, KeyAction::Press),
            (vk::DELETE, KeyAction::Release),
            (vk::MENU, KeyAction::Release),
            (vk::CONTROL, KeyAction::Release),
        ]
    );
}

// ── Close ────────────────────────────────────────────────────────

#[test]
fn close_stops_scrolling_and_notifies_once() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.window.set_supported_features(FeatureMask::CLIPBOARD);
    h.point_at(970, 400);
    assert!(h.window.is_scrolling());
    h.drain();

    h.window.close();
    h.window.close();
    assert!(!h.window.is_scrolling());
    assert!(!h.window.clipboard_active());
    assert_eq!(h.probe.borrow().clipboard_toggles, vec![true, false]);
    assert_eq!(h.drain(), vec![SessionEvent::WindowClosed]);
}

#[test]
fn closed_window_ignores_later_updates_and_input() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.window.close();
    h.drain();

    h.window.set_supported_features(FeatureMask::CLIPBOARD);
    assert!(!h.window.clipboard_active());
    assert!(h.probe.borrow().clipboard_toggles.is_empty());

    h.point_at(970, 400);
    assert!(!h.window.is_scrolling());

    h.window.on_key_event(KeyEvent::press(0x41, 0x1E, KeyModifiers::empty()));
    h.window.on_panel_intent(PanelIntent::OpenSettings);
    h.window.set_fullscreen(true);
    assert_eq!(h.window.autosize_window(), None);

    assert!(h.drain().is_empty());
    assert!(h.probe.borrow().dialog_calls.is_empty());
    assert!(h.probe.borrow().geometry.is_empty());
}

#[test]
fn dropped_transport_does_not_break_the_window() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.rx.close();
    h.window.on_pointer_event(Point::new(1, 1), ButtonMask::LEFT);
    h.window.close();
    assert!(h.window.is_closed());
}

#[tokio::test]
async fn outbound_events_arrive_in_order() {
    let mut h = Harness::new(SessionType::Manage, FULL_HD);
    h.window.on_key_event(KeyEvent::press(0x41, 0x1E, KeyModifiers::empty()));
    h.window.close();

    let first = h.rx.recv().await.unwrap();
    let second = h.rx.recv().await.unwrap();
    assert!(matches!(first, SessionEvent::Key(_)));
    assert_eq!(second, SessionEvent::WindowClosed);
    let bytes = tokio_test::assert_ok!(second.to_bytes());
    assert_eq!(SessionEvent::from_bytes(&bytes).unwrap(), second);
}
