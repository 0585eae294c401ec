//! Background driver that polls a room's deadlines.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::tournament::room::TournamentRoom;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Tick the room every 100 ms until the tournament is over. All game
/// logic still runs under the room's own lock; the task only supplies
/// the clock.
pub fn spawn(room: Arc<Mutex<TournamentRoom>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        loop {
            ticker.tick().await;
            let mut room = room.lock().await;
            room.check_timers(Instant::now());
            if room.is_over() {
                tracing::debug!("Room {} is over, runner exiting", room.id);
                break;
            }
        }
    })
}
