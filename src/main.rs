//! Demo binary: runs one sit & go with three scripted players that
//! check or call every prompt, printing the event stream as JSON.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use poker_sng::config::Config;
use poker_sng::game::seat::{ActionMessage, ActionWord};
use poker_sng::notify::{BroadcastNotifier, Event, Target};
use poker_sng::player::Player;
use poker_sng::tournament::{runner, TournamentRoom};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let notifier = Arc::new(BroadcastNotifier::new());

    let mut log_rx = notifier.subscribe();
    tokio::spawn(async move {
        while let Ok(envelope) = log_rx.recv().await {
            if let Ok(json) = serde_json::to_string(&envelope) {
                println!("{}", json);
            }
        }
    });

    let mut room = TournamentRoom::new(config, notifier.clone());
    for name in ["alice", "bob", "carol"] {
        let player = Arc::new(Player::new(name, 1000));
        room.register(player)?;
    }
    room.start(Instant::now())?;

    let room = Arc::new(Mutex::new(room));
    let driver = runner::spawn(room.clone());

    // Scripted players: answer every prompt with the cheapest action.
    let mut action_rx = notifier.subscribe();
    let responder_room = room.clone();
    tokio::spawn(async move {
        while let Ok(envelope) = action_rx.recv().await {
            let (name, prompt) = match (&envelope.target, &envelope.event) {
                (Target::Player { name }, Event::ExpectedAction(prompt)) => {
                    (name.clone(), prompt.clone())
                }
                _ => continue,
            };

            // Spread the answers out a little so the log is readable
            tokio::time::sleep(Duration::from_millis(200)).await;

            let msg = if prompt.actions.check {
                ActionMessage::simple(ActionWord::Check)
            } else if prompt.actions.call {
                ActionMessage::simple(ActionWord::Call)
            } else {
                ActionMessage::simple(ActionWord::Fold)
            };

            let mut room = responder_room.lock().await;
            if let Err(err) = room.handle_action(&name, &msg, Instant::now()) {
                tracing::warn!("{}: action rejected: {}", name, err);
            }
        }
    });

    driver.await?;

    let room = room.lock().await;
    for (rank, player) in &room.leaderboard {
        tracing::info!(
            "#{} {} (balance {})",
            rank,
            player.name,
            player.balance()
        );
    }
    Ok(())
}
