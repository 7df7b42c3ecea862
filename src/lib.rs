use directories::ProjectDirs;

pub mod args;
pub mod clock;
pub mod config;
pub mod error;
pub mod persistence;
pub mod store;
pub mod ticker;
pub mod time;
pub mod timers;

pub fn dirs() -> Result<ProjectDirs, error::CountdownError> {
    ProjectDirs::from("de", "maxicarlos", "countdown").ok_or(error::CountdownError::NoProjectDirs)
}
