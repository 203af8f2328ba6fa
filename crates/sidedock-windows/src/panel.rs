//! The docked panel window.
//!
//! One `Panel` lives in a thread-local on the pump thread. The window
//! procedure borrows it for each message it cares about; a message that
//! arrives while the panel is already borrowed (the shell sends some
//! synchronously from inside `SHAppBarMessage`) is posted again and
//! handled once the current operation returns.

use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::sync::Once;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use sidedock_core::actions::{self, ContentHost, PanelControl};
use sidedock_core::appbar::{FIRST_REGISTRATION_SETTLE, RegisterOutcome};
use sidedock_core::config::{Settings, SettingsStore, hotkeys};
use sidedock_core::debounce::{Debouncer, Fired};
use sidedock_core::device::DeviceWatcher;
use sidedock_core::foreground::ForegroundWatcher;
use sidedock_core::hotkey::HotkeyManager;
use sidedock_core::message::{
    self, Deferred, PanelMessage, SETTLE_TIMER_ID, WM_DEFERRED, WM_PREVIEW_OFFSET,
};
use sidedock_core::{
    AppBarRegistrar, DockResult, Monitor, StyleController, WindowResult, compute_layout, log_debug,
    log_error, log_info, log_warn,
};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::CreateSolidBrush;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, FindWindowW, KillTimer, LWA_ALPHA, PostMessageW,
    PostQuitMessage, RegisterClassW, SetLayeredWindowAttributes, SetTimer, WM_DESTROY,
    WM_DEVICECHANGE, WM_WINDOWPOSCHANGING, WNDCLASSW, WS_EX_LAYERED, WS_EX_TOOLWINDOW, WS_POPUP,
};
use windows::core::{PCWSTR, w};

use crate::device::DeviceHook;
use crate::foreground::ForegroundHook;
use crate::hotkey::Win32HotkeyRegistrar;
use crate::monitor::enumerate_monitors;
use crate::shell::Win32Shell;
use crate::window::{self, PanelWindow};

/// Quiet period while the offset sliders are being dragged.
pub const OFFSET_PREVIEW_DEBOUNCE: Duration = Duration::from_millis(500);

/// Panel opacity for the layered window.
const PANEL_ALPHA: u8 = 230;

/// Background colour, as `0x00BBGGRR`.
const PANEL_BACKGROUND: u32 = 0x0020_2020;

thread_local! {
    static PANEL: RefCell<Option<Panel>> = const { RefCell::new(None) };
    // Copied out of the registrar so the window procedure can recognise
    // shell callbacks without borrowing the panel.
    static APPBAR_CALLBACK: Cell<Option<u32>> = const { Cell::new(None) };
}

static REGISTER_CLASS: Once = Once::new();

fn ensure_class_registered() {
    REGISTER_CLASS.call_once(|| {
        // SAFETY: GetModuleHandleW(None) returns this executable's module;
        // CreateSolidBrush hands the brush to the class for its lifetime.
        unsafe {
            let instance = GetModuleHandleW(None).unwrap_or_default();
            let wc = WNDCLASSW {
                lpfnWndProc: Some(panel_wnd_proc),
                hInstance: instance.into(),
                hbrBackground: CreateSolidBrush(COLORREF(PANEL_BACKGROUND)),
                lpszClassName: w!("SidedockPanel"),
                ..Default::default()
            };
            RegisterClassW(&wc);
        }
    });
}

/// Sink for a debounce site: queue the fire, then wake the pump thread.
fn deferred_sink(
    tx: Sender<Fired<Deferred>>,
    hwnd: HWND,
) -> impl Fn(Fired<Deferred>) + Send + Sync + 'static {
    // HWND is not Send; carry the raw value across the timer thread.
    let target = hwnd.0 as usize;
    move |fired| {
        if tx.send(fired).is_err() {
            return;
        }
        // SAFETY: PostMessageW only queues the message; it fails harmlessly
        // if the panel window is already gone.
        unsafe {
            let _ = PostMessageW(
                Some(HWND(target as *mut c_void)),
                WM_DEFERRED,
                WPARAM(0),
                LPARAM(0),
            );
        }
    }
}

/// Sends an offset preview to the running panel, as the settings UI does
/// while its sliders move.
pub fn post_offset_preview(x: i32, y: i32) -> WindowResult<()> {
    // SAFETY: FindWindowW only reads the class name; PostMessageW queues
    // the message on whichever thread owns the panel.
    unsafe {
        let hwnd = FindWindowW(w!("SidedockPanel"), PCWSTR::null())?;
        PostMessageW(
            Some(hwnd),
            WM_PREVIEW_OFFSET,
            WPARAM(x as isize as usize),
            LPARAM(y as isize),
        )?;
    }
    Ok(())
}

/// Logs a failed best-effort OS call.
fn warn_on_err(what: &str, result: WindowResult<()>) {
    if let Err(e) = result {
        log_warn!("{what} failed: {e}");
    }
}

/// The docked panel and every component it owns.
pub struct Panel {
    window: PanelWindow,
    settings: Settings,
    store: Box<dyn SettingsStore>,
    content: Box<dyn ContentHost>,
    ready: bool,
    visible: bool,
    /// Last successful enumeration, used when a refresh fails.
    monitors: Vec<Monitor>,
    style: StyleController<PanelWindow>,
    appbar: AppBarRegistrar<Win32Shell>,
    hotkeys: HotkeyManager<Win32HotkeyRegistrar>,
    foreground: ForegroundWatcher<ForegroundHook>,
    devices: DeviceWatcher<DeviceHook>,
    offset: Debouncer<Deferred>,
    deferred: Receiver<Fired<Deferred>>,
    enumerate: fn() -> WindowResult<Vec<Monitor>>,
}

impl Panel {
    /// Creates the panel window, binds `settings` and shows it.
    ///
    /// `content` builds whatever renders inside the window once the
    /// window exists. Fails without showing anything when no monitor can
    /// host the panel.
    pub fn create(
        settings: Settings,
        store: Box<dyn SettingsStore>,
        content: impl FnOnce(PanelWindow) -> Box<dyn ContentHost>,
    ) -> WindowResult<HWND> {
        Self::create_with(settings, store, content, enumerate_monitors)
    }

    fn create_with(
        settings: Settings,
        store: Box<dyn SettingsStore>,
        content: impl FnOnce(PanelWindow) -> Box<dyn ContentHost>,
        enumerate: fn() -> WindowResult<Vec<Monitor>>,
    ) -> WindowResult<HWND> {
        ensure_class_registered();

        // SAFETY: the class is registered above. The window starts hidden
        // and off-screen; the first bind moves it into place.
        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_LAYERED | WS_EX_TOOLWINDOW,
                w!("SidedockPanel"),
                w!("Sidedock"),
                WS_POPUP,
                0,
                0,
                0,
                0,
                None,
                None,
                None,
                None,
            )?
        };

        // A layered window draws nothing until its attributes are set.
        // SAFETY: hwnd was just created by this thread.
        unsafe { SetLayeredWindowAttributes(hwnd, COLORREF(0), PANEL_ALPHA, LWA_ALPHA)? };

        let window = PanelWindow::new(hwnd);
        let (tx, rx) = mpsc::channel();
        let panel = Panel {
            window,
            settings,
            store,
            content: content(window),
            ready: false,
            visible: false,
            monitors: Vec::new(),
            style: StyleController::new(window),
            appbar: AppBarRegistrar::new(Win32Shell::new(hwnd), deferred_sink(tx.clone(), hwnd)),
            hotkeys: HotkeyManager::new(Win32HotkeyRegistrar::new(hwnd)),
            foreground: ForegroundWatcher::new(ForegroundHook::new(hwnd)),
            devices: DeviceWatcher::new(DeviceHook::new(hwnd), deferred_sink(tx.clone(), hwnd)),
            offset: Debouncer::new(OFFSET_PREVIEW_DEBOUNCE, deferred_sink(tx, hwnd)),
            deferred: rx,
            enumerate,
        };

        PANEL.with(|cell| *cell.borrow_mut() = Some(panel));
        let mut started = Ok(());
        with_panel(|panel| started = panel.initialize());
        if let Err(e) = started {
            log_error!("Cannot start panel: {e}");
            release();
            // SAFETY: the window was created above and never shown.
            unsafe {
                let _ = DestroyWindow(hwnd);
            }
            return Err(e.into());
        }

        log_info!("Panel created (hwnd=0x{:X})", hwnd.0 as usize);
        Ok(hwnd)
    }

    /// Live preview of the offset sliders. Only the last value of a drag
    /// is persisted.
    fn preview_offset(&mut self, x: i32, y: i32) {
        self.offset.schedule(Deferred::OffsetChanged { x, y });
    }

    /// First bind. There is no earlier geometry to fall back on, so a
    /// layout failure here is returned instead of logged.
    fn initialize(&mut self) -> DockResult<()> {
        window::lock_moves();
        warn_on_err("Device notification", self.devices.start());
        warn_on_err("Excluding from Aero Peek", self.window.exclude_from_peek());

        self.visible = true;
        self.bind_settings(true)?;
        self.window.show();
        self.content.resume();
        self.ready = true;

        if self.settings.behavior.initially_hidden {
            self.hide();
        }
        Ok(())
    }

    /// Applies every setting, in order: position, z-order, click-through,
    /// alt-tab visibility, hotkeys. Stops at the first step when the
    /// panel cannot be laid out.
    fn bind_settings(&mut self, enable_hotkeys: bool) -> DockResult<()> {
        if self.visible {
            self.place()?;
        }

        let behavior = self.settings.behavior.clone();
        if behavior.always_top {
            warn_on_err("Setting topmost", self.style.set_topmost(false));
            self.foreground.stop();
        } else {
            warn_on_err("Clearing topmost", self.style.clear_topmost(false));
            warn_on_err("Foreground hook", self.foreground.start());
        }
        warn_on_err(
            "Click-through",
            self.style.set_click_through(behavior.click_through),
        );
        warn_on_err(
            "Alt-tab visibility",
            self.style.set_alt_tab_visible(behavior.show_in_alt_tab),
        );

        self.hotkeys.initialize(
            &hotkeys::resolve_all(&self.settings.hotkeys),
            enable_hotkeys,
        );
        Ok(())
    }

    /// Computes the layout and docks the window there.
    ///
    /// The slot is held even when `use_appbar` is off: the layout then
    /// reserves nothing, but the shell still reports full-screen apps.
    fn place(&mut self) -> DockResult<()> {
        self.refresh_monitors();
        let prior = self.appbar.reservation();
        let layout = compute_layout(&self.monitors, &self.settings, prior.as_ref())?;

        match self.appbar.dock(&layout) {
            Ok(RegisterOutcome::First) => {
                APPBAR_CALLBACK.with(|c| c.set(self.appbar.callback_message()));
                self.arm_settle_timer();
            }
            Ok(RegisterOutcome::Repositioned) => {}
            Err(e) => {
                log_error!("Docking failed, placing without reservation: {e}");
                warn_on_err(
                    "Moving panel",
                    window::move_unlocked(self.window.hwnd(), layout.window_bounds()),
                );
            }
        }
        Ok(())
    }

    /// Places the panel, keeping its last geometry when that fails.
    fn place_or_keep(&mut self) {
        if let Err(e) = self.place() {
            log_error!("Cannot lay out panel, keeping last position: {e}");
        }
    }

    fn refresh_monitors(&mut self) {
        match (self.enumerate)() {
            Ok(monitors) => self.monitors = monitors,
            Err(e) => log_warn!(
                "Monitor enumeration failed, keeping {} known monitor(s): {e}",
                self.monitors.len()
            ),
        }
    }

    fn arm_settle_timer(&mut self) {
        // SAFETY: a one-shot timer on our own window; killed when it fires.
        let id = unsafe {
            SetTimer(
                Some(self.window.hwnd()),
                SETTLE_TIMER_ID,
                FIRST_REGISTRATION_SETTLE.as_millis() as u32,
                None,
            )
        };
        if id == 0 {
            log_warn!("Settle timer failed, listening for shell notifications now");
            self.appbar.start_listening();
        }
    }

    fn kill_settle_timer(&self) {
        // SAFETY: killing a timer that is not set is harmless.
        unsafe {
            let _ = KillTimer(Some(self.window.hwnd()), SETTLE_TIMER_ID);
        }
    }

    fn handle(&mut self, msg: PanelMessage) {
        match msg {
            PanelMessage::AppBar(notification) => {
                log_debug!("App-bar notification {notification:?}");
                warn_on_err(
                    "App-bar notification",
                    self.appbar.handle_notification(notification, &mut self.style),
                );
            }
            PanelMessage::Hotkey { slot } => {
                if let Some(action) = self.hotkeys.dispatch(slot) {
                    log_info!("Hotkey {action:?}");
                    actions::execute(action, self);
                }
            }
            PanelMessage::Device(event) => {
                self.devices.on_event(event);
            }
            PanelMessage::DisplayChanged => {
                log_info!("Display configuration changed");
                self.refresh_monitors();
                self.appbar.schedule_reposition();
            }
            PanelMessage::Deferred => self.drain_deferred(),
            PanelMessage::Foreground { hwnd } => {
                if !self.ready {
                    return;
                }
                let class = window::class_name(HWND(hwnd as *mut c_void));
                if let Err(e) = self.foreground.on_foreground(&class, &mut self.style) {
                    log_warn!("Foreground z-order change failed: {e}");
                }
            }
            PanelMessage::SettleTimer => {
                self.kill_settle_timer();
                self.appbar.start_listening();
                log_debug!("App-bar settled, listening for shell notifications");
            }
            PanelMessage::PreviewOffset { x, y } => self.preview_offset(x, y),
            PanelMessage::Shutdown => self.close(),
            PanelMessage::PositionChanging | PanelMessage::Other => {}
        }
    }

    /// Applies every fired debounce whose site still considers it live.
    fn drain_deferred(&mut self) {
        while let Ok(fired) = self.deferred.try_recv() {
            let kind = *fired.payload();
            let live = match kind {
                Deferred::ShellPositionChanged => self
                    .appbar
                    .accept_reposition(fired)
                    .then_some(Deferred::ShellPositionChanged),
                Deferred::DeviceChanged => {
                    self.devices.accept(fired).then_some(Deferred::DeviceChanged)
                }
                Deferred::OffsetChanged { .. } => self.offset.settle(fired),
            };
            if let Some(deferred) = live {
                actions::apply_deferred(deferred, self);
            }
        }
    }
}

impl PanelControl for Panel {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn show(&mut self) {
        if self.visible {
            return;
        }
        self.visible = true;
        self.place_or_keep();
        self.window.show();
        self.content.resume();
    }

    fn hide(&mut self) {
        self.window.hide();
        self.visible = false;
        if let Err(e) = self.appbar.unregister() {
            log_warn!("Releasing app-bar failed: {e}");
        }
        self.content.pause();
    }

    fn reload(&mut self) {
        self.ready = false;
        match self.store.load() {
            Ok(Some(settings)) => self.settings = settings,
            Ok(None) => {}
            Err(e) => log_warn!("Keeping current settings: {e}"),
        }
        // Shortcuts stay silent until the new settings are fully applied.
        if let Err(e) = self.bind_settings(false) {
            log_error!("Cannot lay out panel, keeping last position: {e}");
        }
        self.content.reload();
        self.hotkeys.enable();
        self.ready = true;
        log_info!("Panel reloaded");
    }

    fn reload_content(&mut self) {
        self.content.reload();
    }

    fn close(&mut self) {
        if !self.ready && !self.visible {
            return;
        }
        self.ready = false;
        self.visible = false;
        self.offset.cancel();
        self.kill_settle_timer();
        self.content.pause();
        if let Err(e) = self.appbar.unregister() {
            log_warn!("Releasing app-bar failed: {e}");
        }
        self.devices.stop();
        self.foreground.stop();
        self.hotkeys.dispose();
        log_info!("Panel closing");

        // SAFETY: destroys our own window; WM_DESTROY ends the pump.
        unsafe {
            if let Err(e) = DestroyWindow(self.window.hwnd()) {
                log_error!("DestroyWindow failed: {e}");
                PostQuitMessage(0);
            }
        }
    }

    fn reposition(&mut self) {
        if self.visible {
            self.place_or_keep();
        }
    }

    fn monitor_count(&self) -> usize {
        self.monitors.len()
    }

    fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.store.save(&self.settings) {
            log_warn!("Saving settings failed: {e}");
        }
    }
}

/// Runs `f` against the thread's panel, if there is one and it is free.
/// Returns `false` when the panel is already borrowed.
fn with_panel(f: impl FnOnce(&mut Panel)) -> bool {
    PANEL.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => {
            if let Some(panel) = slot.as_mut() {
                f(panel);
            }
            true
        }
        Err(_) => false,
    })
}

/// Drops the thread's panel, releasing anything still held.
pub fn release() {
    let panel = PANEL.with(|cell| cell.borrow_mut().take());
    drop(panel);
    APPBAR_CALLBACK.with(|c| c.set(None));
}

unsafe extern "system" fn panel_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_WINDOWPOSCHANGING => {
            // SAFETY: lparam is this message's WINDOWPOS.
            unsafe { window::filter_position_changing(lparam) };
            return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
        }
        WM_DESTROY => {
            // SAFETY: ends this thread's message pump.
            unsafe { PostQuitMessage(0) };
            return LRESULT(0);
        }
        _ => {}
    }

    let callback = APPBAR_CALLBACK.with(Cell::get);
    let decoded = message::decode(msg, wparam.0, lparam.0, callback);
    if matches!(decoded, PanelMessage::Other | PanelMessage::PositionChanging) {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    }

    if !with_panel(|panel| panel.handle(decoded)) {
        log_debug!("Panel busy, re-posting message 0x{msg:04X}");
        // SAFETY: PostMessageW only queues the message for later.
        unsafe {
            let _ = PostMessageW(Some(hwnd), msg, wparam, lparam);
        }
    }

    // Granting device queries keeps WM_DEVICECHANGE from vetoing removal.
    if msg == WM_DEVICECHANGE {
        LRESULT(1)
    } else {
        LRESULT(0)
    }
}

/// Content host that repaints the window. Widgets are outside this crate.
pub struct RepaintContent {
    window: PanelWindow,
    paused: bool,
}

impl RepaintContent {
    pub fn new(window: PanelWindow) -> Self {
        Self {
            window,
            paused: false,
        }
    }
}

impl ContentHost for RepaintContent {
    fn reload(&mut self) {
        log_debug!("Content reload");
        if !self.paused {
            self.window.invalidate();
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
        self.window.invalidate();
    }
}
