//! Store + persistence + notifier, wired the way a front end drives them.
//!
//! A mutation runs first; its effects are dispatched and the snapshot is
//! written afterwards. Neither of those can fail the mutation: failures are
//! logged and reported back in an [`ApplyReport`].

use serde::Serialize;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::effects::Effect;
use crate::notify::{dispatch, DispatchReport, Notifier};
use crate::storage::Persistence;
use crate::snapshot::Snapshot;
use crate::store::{HabitStore, Transition};

/// What happened to a mutation's side effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub dispatch: DispatchReport,
    pub saved: bool,
}

pub struct HabitSession<P: Persistence, N: Notifier, C: Clock> {
    store: HabitStore<C>,
    persistence: P,
    notifier: N,
}

impl<P: Persistence, N: Notifier, C: Clock> HabitSession<P, N, C> {
    /// Load the stored snapshot, or start empty if there is none or it
    /// cannot be read.
    ///
    /// An unreadable snapshot is quarantined first so later saves cannot
    /// overwrite it. Badges that the loaded data already qualifies for are
    /// awarded immediately and announced through `notifier`.
    pub fn open(mut persistence: P, mut notifier: N, clock: C) -> Self {
        let loaded = match persistence.load() {
            Ok(Some(snapshot)) => Some(snapshot),
            Ok(None) => {
                info!("no stored snapshot, starting empty");
                None
            }
            Err(e) => {
                warn!(error = %e, "failed to load snapshot, starting empty");
                match persistence.quarantine(clock.now()) {
                    Ok(Some(backup)) => info!(backup = %backup.display(), "kept unreadable snapshot"),
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "failed to move unreadable snapshot aside"),
                }
                None
            }
        };

        let mut store = HabitStore::with_clock(Snapshot::default(), clock);
        if let Some(snapshot) = loaded {
            let transition = store.replace(snapshot);
            dispatch(&transition.effects, &mut notifier);
        }

        let mut session = Self {
            store,
            persistence,
            notifier,
        };
        if !session.store.awarded().is_empty() {
            session.persist();
        }
        session
    }

    pub fn store(&self) -> &HabitStore<C> {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Run one mutation, then dispatch its effects and save.
    pub fn apply<T>(
        &mut self,
        mutation: impl FnOnce(&mut HabitStore<C>) -> Transition<T>,
    ) -> (T, ApplyReport) {
        let transition = mutation(&mut self.store);
        let report = self.finish(&transition);
        (transition.value, report)
    }

    /// Like [`apply`](Self::apply) for mutations that can reject their input.
    ///
    /// A rejected mutation has not touched the store, so nothing is
    /// dispatched or saved.
    pub fn try_apply<T, E>(
        &mut self,
        mutation: impl FnOnce(&mut HabitStore<C>) -> Result<Transition<T>, E>,
    ) -> Result<(T, ApplyReport), E> {
        let transition = mutation(&mut self.store)?;
        let report = self.finish(&transition);
        Ok((transition.value, report))
    }

    /// Run a mutation that produces no effects (dark mode, clear) and save.
    pub fn apply_plain<T>(&mut self, mutation: impl FnOnce(&mut HabitStore<C>) -> T) -> (T, bool) {
        let value = mutation(&mut self.store);
        (value, self.persist())
    }

    /// Send a notification that is not tied to a mutation.
    pub fn announce(&mut self, effects: &[Effect]) -> DispatchReport {
        dispatch(effects, &mut self.notifier)
    }

    fn finish<T>(&mut self, transition: &Transition<T>) -> ApplyReport {
        let dispatch = dispatch(&transition.effects, &mut self.notifier);
        let saved = self.persist();
        ApplyReport { dispatch, saved }
    }

    fn persist(&mut self) -> bool {
        match self.persistence.save(self.store.snapshot()) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to save snapshot");
                false
            }
        }
    }
}
