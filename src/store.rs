//! The timer store: owns the collection and writes it through after every change

use crate::{
    clock::Clock,
    error::CountdownError,
    persistence::{SnapshotAdapter, Slot},
    timers::{NewTimer, Timer, TimerId, TimerUpdate, Timers},
};
use tracing::{debug, info, warn};

/// What happened to a mutation that was not rejected
#[derive(Debug)]
#[must_use]
pub enum Commit {
    /// The id was unknown or there was nothing to do, nothing was written
    Unchanged,
    /// Applied in memory and persisted
    Saved,
    /// Applied in memory, but the snapshot could not be written
    Unsaved(CountdownError),
}

impl Commit {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    pub fn warning(&self) -> Option<&CountdownError> {
        match self {
            Self::Unsaved(error) => Some(error),
            _ => None,
        }
    }
}

/// Single owner of all timers, there is no shared or global instance.
pub struct TimerStore<S, C> {
    timers: Timers,
    adapter: SnapshotAdapter<S>,
    clock: C,
}

impl<S: Slot, C: Clock> TimerStore<S, C> {
    /// Loads whatever snapshot the adapter has, or starts empty
    pub fn open(adapter: SnapshotAdapter<S>, clock: C) -> Self {
        let timers = Timers::new(adapter.load());
        info!("Opened timer store with {} timers", timers.len());

        Self {
            timers,
            adapter,
            clock,
        }
    }

    pub fn timers(&self) -> &[Timer] {
        self.timers.as_slice()
    }

    pub fn get(&self, id: &TimerId) -> Option<&Timer> {
        self.timers.get(id)
    }

    pub fn running(&self) -> Vec<TimerId> {
        self.timers.running_ids()
    }

    /// Resolves a full id or unique id prefix
    pub fn resolve(&self, prefix: &str) -> Result<Option<TimerId>, CountdownError> {
        Ok(self
            .timers
            .find_by_prefix(prefix)?
            .map(|timer| timer.id.clone()))
    }

    fn commit(&self, changed: bool) -> Commit {
        if !changed {
            return Commit::Unchanged;
        }

        match self.adapter.save(self.timers.as_slice()) {
            Ok(()) => Commit::Saved,
            Err(error) => {
                warn!("Change kept in memory but not saved: {error}");
                Commit::Unsaved(error)
            }
        }
    }

    pub fn add(&mut self, input: NewTimer) -> Result<(TimerId, Commit), CountdownError> {
        let mut id = TimerId::generate();
        while self.timers.get(&id).is_some() {
            id = TimerId::generate();
        }

        let now = self.clock.now_millis();
        let timer = self.timers.add(input, id.clone(), now)?;
        debug!("Added timer {} ({}s)", timer.title, timer.duration);

        Ok((id, self.commit(true)))
    }

    pub fn delete(&mut self, id: &TimerId) -> Commit {
        let changed = self.timers.delete(id);
        self.commit(changed)
    }

    pub fn toggle(&mut self, id: &TimerId) -> Commit {
        let changed = self.timers.toggle(id);
        self.commit(changed)
    }

    pub fn tick(&mut self, id: &TimerId) -> Commit {
        let changed = self.timers.tick(id);
        self.commit(changed)
    }

    pub fn restart(&mut self, id: &TimerId) -> Commit {
        let changed = self.timers.restart(id);
        self.commit(changed)
    }

    pub fn edit(&mut self, id: &TimerId, updates: TimerUpdate) -> Result<Commit, CountdownError> {
        let changed = self.timers.edit(id, updates)?;
        Ok(self.commit(changed))
    }
}
