use std::cell::Cell;

/// `SWP_NOMOVE` in a `WINDOWPOS.flags` field.
pub const SWP_NOMOVE: u32 = 0x0002;

/// Blocks moves that the panel did not ask for.
///
/// While locked, [`filter`](Self::filter) adds `SWP_NOMOVE` to every
/// `WM_WINDOWPOSCHANGING`, so dragging or shell nudges keep the size
/// change but drop the move. Programmatic moves go through
/// [`allow_during`](Self::allow_during).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveLock {
    locked: bool,
}

impl MoveLock {
    pub const fn new() -> Self {
        Self { locked: false }
    }

    /// Locks. Safe to call when already locked.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Unlocks. Safe to call when already unlocked.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(self) -> bool {
        self.locked
    }

    /// Rewrites `WINDOWPOS.flags` for a pending position change.
    pub fn filter(self, flags: u32) -> u32 {
        if self.locked { flags | SWP_NOMOVE } else { flags }
    }

    /// Runs `f` with the lock in `cell` released, then restores it.
    ///
    /// Takes the cell rather than `&mut self` because the window procedure
    /// reads the lock again while `f` is still inside `SetWindowPos`.
    pub fn allow_during<T>(cell: &Cell<MoveLock>, f: impl FnOnce() -> T) -> T {
        let previous = cell.replace(MoveLock::new());
        let result = f();
        cell.set(previous);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWP_NOSIZE: u32 = 0x0001;

    #[test]
    fn unlocked_passes_flags_through() {
        // Arrange
        let lock = MoveLock::new();

        // Assert
        assert_eq!(lock.filter(SWP_NOSIZE), SWP_NOSIZE);
    }

    #[test]
    fn locked_strips_move_keeps_size() {
        // Arrange
        let mut lock = MoveLock::new();

        // Act
        lock.lock();

        // Assert
        assert_eq!(lock.filter(0), SWP_NOMOVE);
        assert_eq!(lock.filter(SWP_NOSIZE), SWP_NOSIZE | SWP_NOMOVE);
    }

    #[test]
    fn lock_and_unlock_are_idempotent() {
        // Arrange
        let mut lock = MoveLock::new();

        // Act
        lock.lock();
        lock.lock();
        lock.unlock();

        // Assert
        assert!(!lock.is_locked());

        // Act
        lock.unlock();

        // Assert
        assert!(!lock.is_locked());
    }

    #[test]
    fn allow_during_restores_previous_state() {
        // Arrange
        let mut lock = MoveLock::new();
        lock.lock();
        let cell = Cell::new(lock);

        // Act
        let seen_inside = MoveLock::allow_during(&cell, || cell.get().is_locked());

        // Assert
        assert!(!seen_inside);
        assert!(cell.get().is_locked());
    }

    #[test]
    fn allow_during_keeps_unlocked_state() {
        // Arrange
        let cell = Cell::new(MoveLock::new());

        // Act
        let inner = MoveLock::allow_during(&cell, || 42);

        // Assert
        assert_eq!(inner, 42);
        assert!(!cell.get().is_locked());
    }
}
