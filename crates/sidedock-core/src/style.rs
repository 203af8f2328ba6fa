//! Extended-style toggles and z-order pinning for the panel window.
//!
//! [`StyleController`] caches the three flags it manages and only talks to
//! the OS when a request differs from the cache. `set_bottom` is the
//! exception: it always reaches the OS, since full-screen handling and
//! the foreground watcher use it to override whatever the cache says.

use crate::WindowResult;

/// `WS_EX_TOPMOST`
pub const EX_TOPMOST: u32 = 0x0000_0008;
/// `WS_EX_TRANSPARENT`
pub const EX_TRANSPARENT: u32 = 0x0000_0020;
/// `WS_EX_TOOLWINDOW`
pub const EX_TOOLWINDOW: u32 = 0x0000_0080;

/// Cached style state of the panel window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStyleFlags {
    pub topmost: bool,
    pub click_through: bool,
    pub alt_tab_visible: bool,
}

impl WindowStyleFlags {
    /// Reads the flags out of raw extended-style bits.
    pub fn from_ex_style(ex_style: u32) -> Self {
        Self {
            topmost: ex_style & EX_TOPMOST != 0,
            click_through: ex_style & EX_TRANSPARENT != 0,
            alt_tab_visible: ex_style & EX_TOOLWINDOW == 0,
        }
    }
}

/// Where to put the window in the z-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    Topmost,
    NotTopmost,
    Bottom,
}

/// Raw style and z-order access for one window.
pub trait StyleBackend {
    fn ex_style(&self) -> u32;
    fn set_ex_style(&mut self, ex_style: u32) -> WindowResult<()>;
    /// Moves the window in the z-order without moving or resizing it.
    fn set_z_order(&mut self, order: ZOrder, activate: bool) -> WindowResult<()>;
}

/// Cached toggles over a [`StyleBackend`].
pub struct StyleController<B: StyleBackend> {
    backend: B,
    flags: WindowStyleFlags,
}

impl<B: StyleBackend> StyleController<B> {
    pub fn new(backend: B) -> Self {
        let flags = WindowStyleFlags::from_ex_style(backend.ex_style());
        Self { backend, flags }
    }

    pub fn flags(&self) -> WindowStyleFlags {
        self.flags
    }

    pub fn is_topmost(&self) -> bool {
        self.flags.topmost
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn set_topmost(&mut self, activate: bool) -> WindowResult<()> {
        if self.flags.topmost {
            return Ok(());
        }
        self.backend.set_z_order(ZOrder::Topmost, activate)?;
        self.flags.topmost = true;
        Ok(())
    }

    pub fn clear_topmost(&mut self, activate: bool) -> WindowResult<()> {
        if !self.flags.topmost {
            return Ok(());
        }
        self.backend.set_z_order(ZOrder::NotTopmost, activate)?;
        self.flags.topmost = false;
        Ok(())
    }

    /// Sends the window to the bottom of the z-order, unconditionally.
    pub fn set_bottom(&mut self, activate: bool) -> WindowResult<()> {
        self.backend.set_z_order(ZOrder::Bottom, activate)?;
        self.flags.topmost = false;
        Ok(())
    }

    pub fn set_click_through(&mut self, enabled: bool) -> WindowResult<()> {
        if self.flags.click_through == enabled {
            return Ok(());
        }
        self.update_bits(EX_TRANSPARENT, enabled)?;
        self.flags.click_through = enabled;
        Ok(())
    }

    pub fn set_alt_tab_visible(&mut self, visible: bool) -> WindowResult<()> {
        if self.flags.alt_tab_visible == visible {
            return Ok(());
        }
        // Tool windows are what the switcher leaves out.
        self.update_bits(EX_TOOLWINDOW, !visible)?;
        self.flags.alt_tab_visible = visible;
        Ok(())
    }

    fn update_bits(&mut self, bits: u32, set: bool) -> WindowResult<()> {
        let current = self.backend.ex_style();
        let next = if set { current | bits } else { current & !bits };
        self.backend.set_ex_style(next)
    }
}
