use crate::{clock::Clock, persistence::Slot, store::TimerStore, timers::Timer};
use std::{future::Future, time::Duration};
use tokio::time;
use tracing::{debug, instrument};

/// Every tick takes exactly one second off a timer
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// No timer is running any more
    Idle,
    Shutdown,
}

/// Ticks every running timer once per `period` until none is left running
/// or `shutdown` resolves. `on_tick` sees each timer right after its tick.
#[instrument(level = "debug", skip_all, fields(period = ?period))]
pub async fn run<S, C, F>(
    store: &mut TimerStore<S, C>,
    period: Duration,
    shutdown: impl Future<Output = ()>,
    mut on_tick: F,
) -> Stop
where
    S: Slot,
    C: Clock,
    F: FnMut(&Timer),
{
    tokio::pin!(shutdown);

    let mut interval = time::interval(period);
    // The first tick completes immediately
    interval.tick().await;

    loop {
        let running = store.running();
        if running.is_empty() {
            debug!("Nothing left running");
            return Stop::Idle;
        }

        tokio::select! {
            _ = interval.tick() => {
                for id in running {
                    // Write failures are already logged by the store
                    let _ = store.tick(&id);
                    if let Some(timer) = store.get(&id) {
                        on_tick(timer);
                    }
                }
            }
            _ = &mut shutdown => {
                debug!("Ticker shut down");
                return Stop::Shutdown;
            }
        }
    }
}
