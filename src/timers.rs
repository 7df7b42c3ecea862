use crate::error::CountdownError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_TITLE_LEN: usize = 50;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TimerId(pub String);

impl TimerId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first eight characters, enough to tell timers apart in listings
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimerId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub id: TimerId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Full length in seconds
    pub duration: u64,
    pub remaining_time: u64,
    pub is_running: bool,
    /// Milliseconds since the unix epoch
    pub created_at: i64,
}

impl Timer {
    pub fn is_expired(&self) -> bool {
        self.remaining_time == 0
    }

    /// Brings a record read from storage back within its invariants
    pub(crate) fn repair(&mut self) -> bool {
        let mut repaired = false;
        if self.remaining_time > self.duration {
            self.remaining_time = self.duration;
            repaired = true;
        }
        if self.is_running && self.remaining_time == 0 {
            self.is_running = false;
            repaired = true;
        }
        repaired
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewTimer {
    pub title: String,
    pub description: String,
    pub duration: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TimerUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<u64>,
}

fn clean_title(title: &str) -> Result<String, CountdownError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CountdownError::InvalidInput("title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CountdownError::InvalidInput(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title.to_owned())
}

fn check_duration(duration: u64) -> Result<u64, CountdownError> {
    if duration == 0 {
        Err(CountdownError::InvalidInput("duration must be positive".into()))
    } else {
        Ok(duration)
    }
}

/// The ordered timer collection and its state transitions.
///
/// Every mutation returns whether the collection changed; none of them touch storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timers(Vec<Timer>);

impl Timers {
    pub fn new(timers: Vec<Timer>) -> Self {
        Self(timers)
    }

    pub fn as_slice(&self) -> &[Timer] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &TimerId) -> Option<&Timer> {
        self.0.iter().find(|timer| &timer.id == id)
    }

    fn get_mut(&mut self, id: &TimerId) -> Option<&mut Timer> {
        self.0.iter_mut().find(|timer| &timer.id == id)
    }

    pub fn running_ids(&self) -> Vec<TimerId> {
        self.0
            .iter()
            .filter(|timer| timer.is_running)
            .map(|timer| timer.id.clone())
            .collect()
    }

    /// Finds the single timer whose id starts with `prefix`
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Option<&Timer>, CountdownError> {
        if let Some(timer) = self.0.iter().find(|timer| timer.id.as_str() == prefix) {
            return Ok(Some(timer));
        }

        let mut matches = self
            .0
            .iter()
            .filter(|timer| timer.id.as_str().starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(_), Some(_)) => Err(CountdownError::AmbiguousId(prefix.to_owned())),
            (found, _) => Ok(found),
        }
    }

    pub fn add(&mut self, input: NewTimer, id: TimerId, now: i64) -> Result<&Timer, CountdownError> {
        let title = clean_title(&input.title)?;
        let duration = check_duration(input.duration)?;
        if self.get(&id).is_some() {
            return Err(CountdownError::InvalidInput(format!("id {id} is already taken")));
        }

        self.0.push(Timer {
            id,
            title,
            description: input.description.trim().to_owned(),
            duration,
            remaining_time: duration,
            is_running: false,
            created_at: now,
        });

        Ok(&self.0[self.0.len() - 1])
    }

    pub fn delete(&mut self, id: &TimerId) -> bool {
        let before = self.0.len();
        self.0.retain(|timer| &timer.id != id);
        self.0.len() != before
    }

    /// Expired timers stay paused until restarted
    pub fn toggle(&mut self, id: &TimerId) -> bool {
        match self.get_mut(id) {
            Some(timer) if !timer.is_expired() => {
                timer.is_running = !timer.is_running;
                true
            }
            _ => false,
        }
    }

    pub fn tick(&mut self, id: &TimerId) -> bool {
        match self.get_mut(id) {
            Some(timer) if timer.is_running => {
                timer.remaining_time = timer.remaining_time.saturating_sub(1);
                timer.is_running = timer.remaining_time > 0;
                true
            }
            _ => false,
        }
    }

    pub fn restart(&mut self, id: &TimerId) -> bool {
        let Some(timer) = self.get_mut(id) else {
            return false;
        };

        timer.remaining_time = timer.duration;
        timer.is_running = false;
        true
    }

    /// Editing always pauses; a new duration also resets the countdown
    pub fn edit(&mut self, id: &TimerId, updates: TimerUpdate) -> Result<bool, CountdownError> {
        let title = updates.title.as_deref().map(clean_title).transpose()?;
        let duration = updates.duration.map(check_duration).transpose()?;

        let Some(timer) = self.get_mut(id) else {
            return Ok(false);
        };

        if let Some(title) = title {
            timer.title = title;
        }
        if let Some(description) = updates.description {
            timer.description = description.trim().to_owned();
        }
        if let Some(duration) = duration {
            timer.duration = duration;
            timer.remaining_time = duration;
        }
        timer.is_running = false;

        Ok(true)
    }
}
