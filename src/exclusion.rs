//! Debug-only mutual exclusion checker.
//!
//! Companion to a critical section that is supposed to be exclusive across
//! threads, such as a table resize. In debug builds, a second `enter` while
//! a guard is outstanding panics. In release builds, this compiles to a
//! zero-cost no-op.

#[cfg(debug_assertions)]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(not(debug_assertions))]
use core::marker::PhantomData;

/// Per-instance exclusivity tracker. Embed this in structs and guard the
/// exclusive section with `let _g = self.exclusion.enter();`.
#[derive(Debug, Default)]
pub struct DebugExclusion {
    #[cfg(debug_assertions)]
    active: AtomicBool,
}

impl DebugExclusion {
    /// Create a new exclusivity tracker. Const so it can be a field default.
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: AtomicBool::new(false),
        }
    }

    /// Enter the guarded section. In debug builds, panics if any thread is
    /// already inside.
    #[inline]
    pub fn enter(&self) -> ExclusionGuard<'_> {
        #[cfg(debug_assertions)]
        {
            let was_active = self.active.swap(true, Ordering::AcqRel);
            assert!(
                !was_active,
                "exclusion violated: concurrent entry into an exclusive section"
            );
            return ExclusionGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            return ExclusionGuard { _z: PhantomData };
        }
    }
}

/// RAII guard returned by `DebugExclusion::enter`.
pub struct ExclusionGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugExclusion,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl<'a> Drop for ExclusionGuard<'a> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::DebugExclusion;

    #[test]
    fn enter_and_exit_is_ok() {
        let x = DebugExclusion::new();
        let _g = x.enter();
    }

    #[test]
    fn sequential_reentry_after_drop_is_ok() {
        let x = DebugExclusion::new();
        drop(x.enter());
        let _g = x.enter();
    }

    #[cfg(debug_assertions)]
    #[test]
    fn overlap_panics_in_debug() {
        let x = DebugExclusion::new();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _g1 = x.enter();
            // A second entry while the first guard lives should panic
            let _g2 = x.enter();
            let _ = _g2; // silence unused
        }));
        assert!(res.is_err(), "expected overlapping enter to panic in debug builds");
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn overlap_noop_in_release() {
        let x = DebugExclusion::new();
        let _g1 = x.enter();
        let _g2 = x.enter();
        let (_g1, _g2) = (_g1, _g2);
    }
}
