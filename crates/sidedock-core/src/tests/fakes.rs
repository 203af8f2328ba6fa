//! In-memory stand-ins for the OS seams.

use std::sync::mpsc::{self, Receiver};

use crate::appbar::AppBarShell;
use crate::debounce::Fired;
use crate::hook::GlobalHook;
use crate::message::Deferred;
use crate::style::{EX_TOPMOST, StyleBackend, ZOrder};
use crate::{DockEdge, Rect, WindowResult};

pub(crate) const CALLBACK_MESSAGE: u32 = 0xC0DE;

/// A sink that forwards fired actions into a channel.
pub(crate) fn deferred_channel() -> (
    impl Fn(Fired<Deferred>) + Send + Sync + 'static,
    Receiver<Fired<Deferred>>,
) {
    let (tx, rx) = mpsc::channel();
    let sink = move |fired| {
        let _ = tx.send(fired);
    };
    (sink, rx)
}

#[derive(Debug, Default)]
pub(crate) struct FakeWindow {
    pub ex_style: u32,
    pub style_writes: usize,
    pub z_orders: Vec<ZOrder>,
}

impl StyleBackend for FakeWindow {
    fn ex_style(&self) -> u32 {
        self.ex_style
    }

    fn set_ex_style(&mut self, ex_style: u32) -> WindowResult<()> {
        self.style_writes += 1;
        self.ex_style = ex_style;
        Ok(())
    }

    fn set_z_order(&mut self, order: ZOrder, _: bool) -> WindowResult<()> {
        self.z_orders.push(order);
        match order {
            ZOrder::Topmost => self.ex_style |= EX_TOPMOST,
            ZOrder::NotTopmost | ZOrder::Bottom => self.ex_style &= !EX_TOPMOST,
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeHook {
    pub installs: usize,
    pub uninstalls: usize,
    pub fail_install: bool,
}

impl GlobalHook for FakeHook {
    fn install(&mut self) -> WindowResult<()> {
        if self.fail_install {
            return Err("hook refused".into());
        }
        self.installs += 1;
        Ok(())
    }

    fn uninstall(&mut self) {
        self.uninstalls += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCall {
    RegisterMessage,
    Create(u32),
    Query(DockEdge, Rect),
    Set(DockEdge, Rect),
    Remove,
    Move(Rect),
}

/// Records every shell call. `taskbar_right` simulates another app-bar
/// on the right that the shell keeps the panel clear of.
#[derive(Debug, Default)]
pub(crate) struct FakeShell {
    pub calls: Vec<ShellCall>,
    pub fail_create: bool,
    pub taskbar_right: Option<i32>,
}

impl FakeShell {
    pub fn count(&self, pred: impl Fn(&ShellCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl AppBarShell for FakeShell {
    fn register_callback_message(&mut self) -> WindowResult<u32> {
        self.calls.push(ShellCall::RegisterMessage);
        Ok(CALLBACK_MESSAGE)
    }

    fn create(&mut self, callback_message: u32) -> WindowResult<()> {
        self.calls.push(ShellCall::Create(callback_message));
        if self.fail_create {
            return Err("ABM_NEW failed".into());
        }
        Ok(())
    }

    fn query_position(&mut self, edge: DockEdge, proposed: Rect) -> WindowResult<Rect> {
        self.calls.push(ShellCall::Query(edge, proposed));
        let Some(width) = self.taskbar_right else {
            return Ok(proposed);
        };
        let shift = width.min(proposed.width());
        Ok(Rect::new(
            proposed.left - shift,
            proposed.top,
            proposed.right - shift,
            proposed.bottom,
        ))
    }

    fn set_position(&mut self, edge: DockEdge, proposed: Rect) -> WindowResult<Rect> {
        self.calls.push(ShellCall::Set(edge, proposed));
        Ok(proposed)
    }

    fn remove(&mut self) -> WindowResult<()> {
        self.calls.push(ShellCall::Remove);
        Ok(())
    }

    fn move_window(&mut self, bounds: Rect) -> WindowResult<()> {
        self.calls.push(ShellCall::Move(bounds));
        Ok(())
    }
}
