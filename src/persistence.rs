use crate::{error::CountdownError, timers::Timer};
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fs, io,
    path::PathBuf,
};
use tracing::{debug, instrument, warn};

pub const DEFAULT_SLOT: &str = "timers";

/// A durable key-value medium holding one text value per key
pub trait Slot {
    fn read(&self, key: &str) -> Result<Option<String>, CountdownError>;
    fn write(&self, key: &str, value: &str) -> Result<(), CountdownError>;
}

/// Stores each key as `<root>/<key>.ron`
#[derive(Debug, Clone)]
pub struct FileSlots {
    root: PathBuf,
}

impl FileSlots {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.ron"))
    }
}

impl Slot for FileSlots {
    fn read(&self, key: &str) -> Result<Option<String>, CountdownError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CountdownError> {
        if !self.root.is_dir() {
            fs::create_dir_all(&self.root)?;
        }
        fs::write(self.path(key), value)?;

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySlots {
    values: RefCell<HashMap<String, String>>,
    read_only: Cell<bool>,
}

impl MemorySlots {
    pub fn with_value(key: &str, value: &str) -> Self {
        let slots = Self::default();
        slots
            .values
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        slots
    }

    /// Makes every following write fail, like a full disk would
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl Slot for MemorySlots {
    fn read(&self, key: &str) -> Result<Option<String>, CountdownError> {
        Ok(self.value(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CountdownError> {
        if self.read_only.get() {
            return Err(io::Error::new(io::ErrorKind::Other, "storage quota exceeded").into());
        }
        self.values
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}

impl<S: Slot + ?Sized> Slot for &S {
    fn read(&self, key: &str) -> Result<Option<String>, CountdownError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CountdownError> {
        (**self).write(key, value)
    }
}

/// Reads and writes the whole timer collection under one slot key
#[derive(Debug)]
pub struct SnapshotAdapter<S> {
    slots: S,
    key: String,
}

impl<S: Slot> SnapshotAdapter<S> {
    pub fn new(slots: S) -> Self {
        Self::with_key(slots, DEFAULT_SLOT)
    }

    pub fn with_key(slots: S, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }

    /// Never fails: an absent, unreadable or corrupt slot reads as no timers
    #[instrument(level = "trace", skip(self), fields(key = %self.key))]
    pub fn load(&self) -> Vec<Timer> {
        let raw = match self.slots.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored timers, starting empty");
                return Vec::new();
            }
            Err(error) => {
                warn!("Could not read stored timers, starting empty: {error}");
                return Vec::new();
            }
        };

        let mut timers: Vec<Timer> = match ron::from_str(&raw) {
            Ok(timers) => timers,
            Err(error) => {
                warn!("Stored timers are corrupt, starting empty: {error}");
                return Vec::new();
            }
        };

        for timer in timers.iter_mut() {
            if timer.repair() {
                warn!("Repaired inconsistent stored timer {}", timer.id);
            }
        }
        debug!("Loaded {} timers", timers.len());

        timers
    }

    #[instrument(level = "trace", skip(self, timers), fields(key = %self.key))]
    pub fn save(&self, timers: &[Timer]) -> Result<(), CountdownError> {
        let value = ron::to_string(timers)?;
        self.slots.write(&self.key, &value)?;
        debug!("Saved {} timers", timers.len());

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::timers::TimerId;

    fn sample() -> Vec<Timer> {
        vec![
            Timer {
                id: TimerId::from("1"),
                title: "Tea".into(),
                description: String::new(),
                duration: 300,
                remaining_time: 120,
                is_running: true,
                created_at: 1_700_000_000_000,
            },
            Timer {
                id: TimerId::from("2"),
                title: "Laundry".into(),
                description: "whites, \"delicate\"".into(),
                duration: 3600,
                remaining_time: 3600,
                is_running: false,
                created_at: 1_700_000_000_500,
            },
        ]
    }

    #[test]
    fn test_round_trip() {
        let adapter = SnapshotAdapter::new(MemorySlots::default());
        adapter.save(&sample()).unwrap();

        assert_eq!(adapter.load(), sample());
    }

    #[test]
    fn test_uses_camel_case_fields() {
        let adapter = SnapshotAdapter::new(MemorySlots::default());
        adapter.save(&sample()).unwrap();
        let raw = adapter.slots().value(DEFAULT_SLOT).unwrap();

        assert!(raw.contains("remainingTime"));
        assert!(raw.contains("isRunning"));
        assert!(raw.contains("createdAt"));
    }

    #[test]
    fn test_missing_slot_loads_empty() {
        let adapter = SnapshotAdapter::new(MemorySlots::default());
        assert!(adapter.load().is_empty());
    }

    #[test]
    fn test_malformed_slot_loads_empty() {
        let adapter = SnapshotAdapter::new(MemorySlots::with_value(DEFAULT_SLOT, "[(id: 4"));
        assert!(adapter.load().is_empty());

        let adapter = SnapshotAdapter::new(MemorySlots::with_value(DEFAULT_SLOT, "\"not a list\""));
        assert!(adapter.load().is_empty());
    }

    #[test]
    fn test_save_replaces_previous_value() {
        let adapter = SnapshotAdapter::new(MemorySlots::default());
        adapter.save(&sample()).unwrap();
        adapter.save(&sample()[1..]).unwrap();

        assert_eq!(adapter.load(), sample()[1..].to_vec());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let adapter = SnapshotAdapter::new(MemorySlots::default());
        adapter.slots().set_read_only(true);

        assert!(matches!(
            adapter.save(&sample()),
            Err(CountdownError::Io(_))
        ));
    }

    #[test]
    fn test_file_slots_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested");
        let adapter = SnapshotAdapter::with_key(FileSlots::new(&root), "mine");

        assert!(adapter.load().is_empty());
        adapter.save(&sample()).unwrap();

        assert!(root.join("mine.ron").is_file());
        assert_eq!(adapter.load(), sample());
    }

    #[test]
    fn test_file_slots_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let slots = FileSlots::new(dir.path());
        fs::write(slots.path(DEFAULT_SLOT), "garbage {").unwrap();

        assert!(SnapshotAdapter::new(slots).load().is_empty());
    }
}
