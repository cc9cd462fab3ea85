use std::sync::atomic::{AtomicBool, Ordering};

/// Re-entry gate for user-triggered submissions.
///
/// Tapping "submit" while a previous submission is still in flight must not
/// issue a second request. [`begin`](Self::begin) hands out at most one
/// [`SubmitPermit`] at a time; the slot frees when the permit drops, whether
/// the request succeeded or failed, so the user can always re-trigger the
/// action afterwards.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    in_flight: AtomicBool,
}

impl SubmitGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to start a submission. Returns `None` while one is in flight.
    #[must_use]
    pub fn begin(&self) -> Option<SubmitPermit<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitPermit { guard: self })
    }

    /// Whether a submission is currently in flight.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Proof that the submission slot is held; frees the slot on drop.
#[derive(Debug)]
pub struct SubmitPermit<'a> {
    guard: &'a SubmitGuard,
}

impl Drop for SubmitPermit<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_refused_while_held() {
        let guard = SubmitGuard::new();

        let permit = guard.begin().expect("first submit starts");
        assert!(guard.is_in_flight());
        assert!(guard.begin().is_none());

        drop(permit);
        assert!(!guard.is_in_flight());
        assert!(guard.begin().is_some());
    }

    #[test]
    fn slot_frees_even_when_the_submit_failed() {
        let guard = SubmitGuard::new();
        {
            let _permit = guard.begin().expect("starts");
            // request errors here; the permit still drops
        }
        assert!(guard.begin().is_some());
    }
}
