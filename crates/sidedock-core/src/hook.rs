use crate::WindowResult;

/// A process-wide OS subscription (event hook, device notification).
pub trait GlobalHook {
    fn install(&mut self) -> WindowResult<()>;
    fn uninstall(&mut self);
}

/// Idempotent start/stop over a [`GlobalHook`].
///
/// Installing twice or removing twice is a no-op; the hook is removed
/// when the subscription is dropped.
pub struct Subscription<H: GlobalHook> {
    hook: H,
    active: bool,
}

impl<H: GlobalHook> Subscription<H> {
    pub fn new(hook: H) -> Self {
        Self {
            hook,
            active: false,
        }
    }

    pub fn start(&mut self) -> WindowResult<()> {
        if self.active {
            return Ok(());
        }
        self.hook.install()?;
        self.active = true;
        Ok(())
    }

    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.hook.uninstall();
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }
}

impl<H: GlobalHook> Drop for Subscription<H> {
    fn drop(&mut self) {
        self.stop();
    }
}
