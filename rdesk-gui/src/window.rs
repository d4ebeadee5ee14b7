//! Win32 host window and message loop.
//!
//! Creates the native top-level window the session is shown in. The
//! window produces [`WindowEvent`]s for the main loop, and its
//! [`WindowHandle`] implements [`GeometryPort`](crate::ports::GeometryPort)
//! so the fit state machine can move it between windowed, maximized and
//! fullscreen. [`DialogNegotiator`] is the settings dialog stand-in.

use rdesk_core::{ButtonMask, KeyModifiers};

use crate::fit::WindowMode;

/// Events produced by the window message loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    /// Window close requested (Alt-F4/X button).
    Close,
    /// Client area resized.
    Resize(i32, i32),
    /// Pointer moved or a button changed (client coordinates).
    Pointer { x: i32, y: i32, buttons: ButtonMask },
    /// Wheel notch (client coordinates); positive away from the user.
    Wheel {
        x: i32,
        y: i32,
        buttons: ButtonMask,
        delta: i32,
    },
    /// Key down/up.
    Key {
        virtual_key: u16,
        scan_code: u16,
        pressed: bool,
        modifiers: KeyModifiers,
    },
    /// The window manager changed the window state.
    StateChanged(WindowMode),
}

#[cfg(target_os = "windows")]
mod platform {
    use std::sync::mpsc;

    use rdesk_core::{
        ButtonMask, EncodingMask, FeatureMask, KeyModifiers, Rect, RdeskError, SessionConfig,
        Size, VideoEncoding,
    };
    use tracing::{debug, warn};
    use windows::Win32::Foundation::*;
    use windows::Win32::Graphics::Gdi::{
        GetMonitorInfoW, MONITOR_DEFAULTTONEAREST, MONITORINFO, MonitorFromWindow, ScreenToClient,
    };
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::Input::KeyboardAndMouse::{GetKeyState, VK_CONTROL, VK_LWIN, VK_MENU, VK_SHIFT};
    use windows::Win32::UI::WindowsAndMessaging::*;
    use windows::core::PCWSTR;

    use super::WindowEvent;
    use crate::fit::WindowMode;
    use crate::ports::{GeometryPort, Negotiator};

    const NORMAL_STYLE: WINDOW_STYLE = WINDOW_STYLE(WS_OVERLAPPEDWINDOW.0 | WS_VISIBLE.0);
    const FULLSCREEN_STYLE: WINDOW_STYLE = WINDOW_STYLE(WS_POPUP.0 | WS_VISIBLE.0);

    // wParam key-state bits of pointer messages, and WM_SIZE request types.
    const MK_LBUTTON: u32 = 0x0001;
    const MK_RBUTTON: u32 = 0x0002;
    const MK_MBUTTON: u32 = 0x0010;
    const SIZE_RESTORED: u32 = 0;
    const SIZE_MAXIMIZED: u32 = 2;

    /// Per-window state behind GWLP_USERDATA.
    struct WindowState {
        tx: mpsc::Sender<WindowEvent>,
        /// Minimum outer size for WM_GETMINMAXINFO.
        min_track: POINT,
    }

    fn loword(v: isize) -> i32 {
        (v & 0xFFFF) as i16 as i32
    }

    fn hiword(v: isize) -> i32 {
        ((v >> 16) & 0xFFFF) as i16 as i32
    }

    fn buttons_from(wparam: WPARAM) -> ButtonMask {
        let keys = wparam.0 as u32;
        let mut mask = ButtonMask::empty();
        if keys & MK_LBUTTON != 0 {
            mask |= ButtonMask::LEFT;
        }
        if keys & MK_MBUTTON != 0 {
            mask |= ButtonMask::MIDDLE;
        }
        if keys & MK_RBUTTON != 0 {
            mask |= ButtonMask::RIGHT;
        }
        mask
    }

    fn modifiers_now() -> KeyModifiers {
        let down = |vk: u16| unsafe { GetKeyState(vk as i32) } < 0;
        let mut mods = KeyModifiers::empty();
        mods.set(KeyModifiers::SHIFT, down(VK_SHIFT.0));
        mods.set(KeyModifiers::CTRL, down(VK_CONTROL.0));
        mods.set(KeyModifiers::ALT, down(VK_MENU.0));
        mods.set(KeyModifiers::META, down(VK_LWIN.0));
        mods
    }

    fn is_popup(hwnd: HWND) -> bool {
        let style = unsafe { GetWindowLongPtrW(hwnd, GWL_STYLE) } as u32;
        style & WS_POPUP.0 != 0
    }

    unsafe extern "system" fn wndproc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        let state_ptr = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *const WindowState;

        if state_ptr.is_null() {
            return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
        }

        let state = unsafe { &*state_ptr };
        let tx = &state.tx;

        match msg {
            WM_CLOSE => {
                let _ = tx.send(WindowEvent::Close);
                LRESULT(0)
            }
            WM_GETMINMAXINFO => {
                let info = lparam.0 as *mut MINMAXINFO;
                if !info.is_null() {
                    unsafe { (*info).ptMinTrackSize = state.min_track };
                }
                LRESULT(0)
            }
            WM_SIZE => {
                let mode = match wparam.0 as u32 {
                    SIZE_MAXIMIZED => Some(WindowMode::Maximized),
                    SIZE_RESTORED if is_popup(hwnd) => Some(WindowMode::Fullscreen),
                    SIZE_RESTORED => Some(WindowMode::Windowed),
                    _ => None,
                };
                if let Some(mode) = mode {
                    let _ = tx.send(WindowEvent::StateChanged(mode));
                }
                let _ = tx.send(WindowEvent::Resize(loword(lparam.0), hiword(lparam.0)));
                LRESULT(0)
            }
            WM_MOUSEMOVE | WM_LBUTTONDOWN | WM_LBUTTONUP | WM_RBUTTONDOWN | WM_RBUTTONUP
            | WM_MBUTTONDOWN | WM_MBUTTONUP => {
                let _ = tx.send(WindowEvent::Pointer {
                    x: loword(lparam.0),
                    y: hiword(lparam.0),
                    buttons: buttons_from(wparam),
                });
                LRESULT(0)
            }
            WM_MOUSEWHEEL => {
                // Wheel coordinates are screen-relative.
                let mut pt = POINT {
                    x: loword(lparam.0),
                    y: hiword(lparam.0),
                };
                let _ = unsafe { ScreenToClient(hwnd, &mut pt) };
                let _ = tx.send(WindowEvent::Wheel {
                    x: pt.x,
                    y: pt.y,
                    buttons: buttons_from(WPARAM(wparam.0 & 0xFFFF)),
                    delta: hiword(wparam.0 as isize),
                });
                LRESULT(0)
            }
            WM_KEYDOWN | WM_SYSKEYDOWN | WM_KEYUP | WM_SYSKEYUP => {
                let _ = tx.send(WindowEvent::Key {
                    virtual_key: (wparam.0 & 0xFFFF) as u16,
                    scan_code: ((lparam.0 >> 16) & 0xFF) as u16,
                    pressed: msg == WM_KEYDOWN || msg == WM_SYSKEYDOWN,
                    modifiers: modifiers_now(),
                });
                LRESULT(0)
            }
            WM_DESTROY => {
                unsafe { PostQuitMessage(0) };
                LRESULT(0)
            }
            _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
        }
    }

    /// Outer size of a normal window whose client area is `client`.
    fn outer_for(client: Size) -> Result<Size, RdeskError> {
        let mut rc = RECT {
            left: 0,
            top: 0,
            right: client.width,
            bottom: client.height,
        };
        unsafe { AdjustWindowRectEx(&mut rc, WS_OVERLAPPEDWINDOW, FALSE, WINDOW_EX_STYLE(0)) }
            .map_err(|e| RdeskError::Window(format!("AdjustWindowRectEx: {e}")))?;
        Ok(Size::new(rc.right - rc.left, rc.bottom - rc.top))
    }

    /// Handle to the native window.
    pub struct NativeWindow {
        hwnd: HWND,
        event_rx: mpsc::Receiver<WindowEvent>,
    }

    impl NativeWindow {
        /// Create a new top-level window with a `client` sized client area.
        pub fn create(title: &str, client: Size, min_client: Size) -> Result<Self, RdeskError> {
            let (event_tx, event_rx) = mpsc::channel();

            let hinstance = unsafe { GetModuleHandleW(None) }
                .map_err(|e| RdeskError::Window(format!("GetModuleHandle: {e}")))?;

            let class_name_wide: Vec<u16> = "RdeskSessionWindow\0".encode_utf16().collect();

            let wc = WNDCLASSW {
                lpfnWndProc: Some(wndproc),
                hInstance: hinstance.into(),
                lpszClassName: PCWSTR(class_name_wide.as_ptr()),
                hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
                ..Default::default()
            };

            let atom = unsafe { RegisterClassW(&wc) };
            if atom == 0 {
                return Err(RdeskError::Window("RegisterClassW failed".into()));
            }

            let title_wide: Vec<u16> = title.encode_utf16().chain(std::iter::once(0)).collect();
            let outer = outer_for(client)?;
            let min_outer = outer_for(min_client)?;

            let hwnd = unsafe {
                CreateWindowExW(
                    WINDOW_EX_STYLE(0),
                    PCWSTR(class_name_wide.as_ptr()),
                    PCWSTR(title_wide.as_ptr()),
                    NORMAL_STYLE,
                    CW_USEDEFAULT,
                    CW_USEDEFAULT,
                    outer.width,
                    outer.height,
                    None,
                    None,
                    hinstance,
                    None,
                )
            }
            .map_err(|e| RdeskError::Window(format!("CreateWindowExW failed: {e}")))?;

            if hwnd.is_invalid() {
                return Err(RdeskError::Window("CreateWindowExW returned invalid HWND".into()));
            }

            let state = Box::new(WindowState {
                tx: event_tx,
                min_track: POINT {
                    x: min_outer.width,
                    y: min_outer.height,
                },
            });
            unsafe {
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, Box::into_raw(state) as isize);
            }

            Ok(Self { hwnd, event_rx })
        }

        /// Pump windows messages (non-blocking). Returns collected events.
        pub fn poll_events(&self) -> Vec<WindowEvent> {
            unsafe {
                let mut msg = MSG::default();
                while PeekMessageW(&mut msg, self.hwnd, 0, 0, PM_REMOVE).as_bool() {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
            }
            self.event_rx.try_iter().collect()
        }

        /// Geometry port for the fit state machine.
        pub fn handle(&self) -> WindowHandle {
            WindowHandle { hwnd: self.hwnd }
        }

        pub fn client_size(&self) -> Size {
            let mut rc = RECT::default();
            let _ = unsafe { GetClientRect(self.hwnd, &mut rc) };
            Size::new(rc.right - rc.left, rc.bottom - rc.top)
        }
    }

    impl Drop for NativeWindow {
        fn drop(&mut self) {
            unsafe {
                let ptr = GetWindowLongPtrW(self.hwnd, GWLP_USERDATA) as *mut WindowState;
                if !ptr.is_null() {
                    SetWindowLongPtrW(self.hwnd, GWLP_USERDATA, 0);
                    drop(Box::from_raw(ptr));
                }
                let _ = DestroyWindow(self.hwnd);
            }
        }
    }

    // ── GeometryPort ─────────────────────────────────────────────

    /// Window-manager operations on a [`NativeWindow`].
    #[derive(Clone, Copy)]
    pub struct WindowHandle {
        hwnd: HWND,
    }

    impl WindowHandle {
        fn monitor_info(&self) -> MONITORINFO {
            let mut info = MONITORINFO {
                cbSize: std::mem::size_of::<MONITORINFO>() as u32,
                ..Default::default()
            };
            unsafe {
                let monitor = MonitorFromWindow(self.hwnd, MONITOR_DEFAULTTONEAREST);
                let _ = GetMonitorInfoW(monitor, &mut info);
            }
            info
        }

        fn set_style(&self, style: WINDOW_STYLE) {
            unsafe { SetWindowLongPtrW(self.hwnd, GWL_STYLE, style.0 as isize) };
        }

        fn place(&self, x: i32, y: i32, size: Size) {
            let result = unsafe {
                SetWindowPos(
                    self.hwnd,
                    HWND_TOP,
                    x,
                    y,
                    size.width,
                    size.height,
                    SWP_NOZORDER | SWP_FRAMECHANGED | SWP_SHOWWINDOW,
                )
            };
            if let Err(e) = result {
                warn!("SetWindowPos failed: {e}");
            }
        }
    }

    impl GeometryPort for WindowHandle {
        fn available_area(&self) -> Rect {
            let rc = self.monitor_info().rcWork;
            Rect::new(rc.left, rc.top, rc.right - rc.left, rc.bottom - rc.top)
        }

        fn decoration(&self) -> Size {
            outer_for(Size::default()).unwrap_or_default()
        }

        fn normal_rect(&self) -> Rect {
            let mut wp = WINDOWPLACEMENT {
                length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
                ..Default::default()
            };
            let _ = unsafe { GetWindowPlacement(self.hwnd, &mut wp) };
            let rc = wp.rcNormalPosition;
            let deco = self.decoration();
            Rect::new(
                rc.left,
                rc.top,
                rc.right - rc.left - deco.width,
                rc.bottom - rc.top - deco.height,
            )
        }

        fn enter_fullscreen(&mut self) {
            let rc = self.monitor_info().rcMonitor;
            self.set_style(FULLSCREEN_STYLE);
            if unsafe { IsZoomed(self.hwnd) }.as_bool() {
                let _ = unsafe { ShowWindow(self.hwnd, SW_RESTORE) };
            }
            self.place(
                rc.left,
                rc.top,
                Size::new(rc.right - rc.left, rc.bottom - rc.top),
            );
            debug!("native window fullscreen");
        }

        fn enter_maximized(&mut self) {
            self.set_style(NORMAL_STYLE);
            let _ = unsafe { ShowWindow(self.hwnd, SW_MAXIMIZE) };
            debug!("native window maximized");
        }

        fn enter_windowed(&mut self, rect: Rect) {
            self.set_style(NORMAL_STYLE);
            if unsafe { IsZoomed(self.hwnd) }.as_bool() {
                let _ = unsafe { ShowWindow(self.hwnd, SW_RESTORE) };
            }
            let outer = rect.size().grow(self.decoration());
            self.place(rect.x, rect.y, outer);
            debug!(?rect, "native window placed");
        }
    }

    // ── Negotiator ───────────────────────────────────────────────

    /// Settings dialog stand-in: shows the unsupported-encoding warning in
    /// a message box and accepts the configuration unchanged.
    pub struct DialogNegotiator {
        owner: HWND,
    }

    impl DialogNegotiator {
        pub fn new(window: &NativeWindow) -> Self {
            Self { owner: window.hwnd }
        }
    }

    impl Negotiator for DialogNegotiator {
        fn warn_unsupported_encoding(&mut self, encoding: VideoEncoding, _supported: EncodingMask) {
            let text: Vec<u16> = format!(
                "The current video encoding ({encoding}) is not supported by the remote side. \
                 Please check your connection settings."
            )
            .encode_utf16()
            .chain(std::iter::once(0))
            .collect();
            let caption: Vec<u16> = "Warning\0".encode_utf16().collect();
            unsafe {
                MessageBoxW(
                    self.owner,
                    PCWSTR(text.as_ptr()),
                    PCWSTR(caption.as_ptr()),
                    MB_OK | MB_ICONWARNING,
                );
            }
        }

        fn negotiate(
            &mut self,
            config: &SessionConfig,
            _encodings: EncodingMask,
            _features: FeatureMask,
        ) -> Option<SessionConfig> {
            Some(*config)
        }
    }
}

#[cfg(target_os = "windows")]
pub use platform::*;

// ── Non-Windows stub ─────────────────────────────────────────────

#[cfg(not(target_os = "windows"))]
pub mod stub {
    use rdesk_core::{EncodingMask, FeatureMask, RdeskError, Rect, SessionConfig, Size, VideoEncoding};

    use super::WindowEvent;
    use crate::ports::{GeometryPort, Negotiator};

    pub struct NativeWindow;

    impl NativeWindow {
        pub fn create(_title: &str, _client: Size, _min_client: Size) -> Result<Self, RdeskError> {
            Err(RdeskError::Window(
                "window creation is only supported on Windows".into(),
            ))
        }

        pub fn poll_events(&self) -> Vec<WindowEvent> {
            Vec::new()
        }

        pub fn handle(&self) -> WindowHandle {
            WindowHandle
        }

        pub fn client_size(&self) -> Size {
            Size::default()
        }
    }

    #[derive(Clone, Copy)]
    pub struct WindowHandle;

    impl GeometryPort for WindowHandle {
        fn available_area(&self) -> Rect {
            Rect::default()
        }

        fn decoration(&self) -> Size {
            Size::default()
        }

        fn normal_rect(&self) -> Rect {
            Rect::default()
        }

        fn enter_fullscreen(&mut self) {}

        fn enter_maximized(&mut self) {}

        fn enter_windowed(&mut self, _rect: Rect) {}
    }

    pub struct DialogNegotiator;

    impl DialogNegotiator {
        pub fn new(_window: &NativeWindow) -> Self {
            Self
        }
    }

    impl Negotiator for DialogNegotiator {
        fn warn_unsupported_encoding(&mut self, _encoding: VideoEncoding, _supported: EncodingMask) {}

        fn negotiate(
            &mut self,
            config: &SessionConfig,
            _encodings: EncodingMask,
            _features: FeatureMask,
        ) -> Option<SessionConfig> {
            Some(*config)
        }
    }
}

#[cfg(not(target_os = "windows"))]
pub use stub::*;
