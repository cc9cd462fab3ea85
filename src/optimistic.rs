//! Optimistic updates with an explicit rollback path.
//!
//! Like-toggles, scraps and cart additions flip local state before the server
//! confirms. The sequence is always: capture a snapshot, apply the local
//! change, issue the request, and restore the snapshot if the server refuses.

use std::future::Future;

/// Pre-change snapshot of a piece of screen state.
#[derive(Debug, Clone)]
pub struct Snapshot<T: Clone> {
    saved: T,
}

impl<T: Clone> Snapshot<T> {
    /// Captures the state as it is before the optimistic change.
    #[must_use]
    pub fn capture(value: &T) -> Self {
        Self {
            saved: value.clone(),
        }
    }

    /// Puts the captured state back, discarding the optimistic change.
    pub fn restore(self, slot: &mut T) {
        *slot = self.saved;
    }
}

/// Runs the full optimistic sequence: mutate locally, await the request, roll
/// back on failure. The error is returned unchanged so the caller can still
/// surface it.
///
/// # Errors
///
/// Propagates the request's error after restoring the snapshot.
pub async fn apply<T, E, F>(
    state: &mut T,
    change: impl FnOnce(&mut T),
    request: F,
) -> Result<(), E>
where
    T: Clone,
    F: Future<Output = Result<(), E>>,
{
    let snapshot = Snapshot::capture(state);
    change(state);
    match request.await {
        Ok(()) => Ok(()),
        Err(err) => {
            snapshot.restore(state);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn success_keeps_the_local_change() {
        let mut like_count = 3_u32;
        let result: Result<(), ()> =
            apply(&mut like_count, |n| *n += 1, async { Ok(()) }).await;
        assert!(result.is_ok());
        assert_eq!(like_count, 4);
    }

    #[tokio::test]
    async fn failure_restores_the_snapshot() {
        let mut like_count = 3_u32;
        let result = apply(&mut like_count, |n| *n += 1, async { Err("rejected") }).await;
        assert_eq!(result, Err("rejected"));
        assert_eq!(like_count, 3);
    }

    #[tokio::test]
    async fn snapshot_roundtrips_compound_state() {
        let mut items = vec!["a", "b", "c"];
        let snapshot = Snapshot::capture(&items);
        items.retain(|i| *i != "b");
        assert_eq!(items.len(), 2);
        snapshot.restore(&mut items);
        assert_eq!(items, vec!["a", "b", "c"]);
    }
}
