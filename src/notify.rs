//! Outbound notifications.
//!
//! The engine never talks to sockets directly: it emits `Event`s
//! through a `Notifier`, addressed either to the whole room (with an
//! optional exclusion) or to a single player. The default
//! implementation fans envelopes out over a tokio broadcast channel;
//! tests swap in a recording implementation.

use crate::game::constants::BROADCAST_CHANNEL_CAPACITY;
use crate::game::deck::Card;
use crate::game::table::{ActedInfo, ActionPrompt, PotAward, TableSnapshot};
use crate::player::Player;
use crate::tournament::TournamentState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tokio::sync::broadcast;

/// Everything a client can be told, tagged for the wire as
/// `{"event": "...", "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum Event {
    /// Registration roster or room state changed
    RoomChanged {
        state: TournamentState,
        players: Vec<String>,
        seats_taken: usize,
        is_full: bool,
    },
    /// The tournament left the registration phase
    TournamentStart {
        players: Vec<String>,
        prize_pool: i64,
        big_blind: i64,
        starting_stack: i64,
    },
    /// A new hand begins; full public table state
    NewRound(TableSnapshot),
    /// A street was dealt (or the preflop lap begins)
    NewStreet(TableSnapshot),
    /// No further betting is possible; hands revealed for the run-out
    AllIn {
        hands: BTreeMap<usize, Option<Vec<Card>>>,
    },
    /// The hand is settled; winners per pot plus the shown hands
    RoundEnd {
        winners: Vec<PotAward>,
        hands: BTreeMap<usize, Option<Vec<Card>>>,
    },
    /// Private: your hole cards (None when sitting out the hand)
    DealCards { hand: Option<Vec<Card>> },
    /// Community cards on the board so far
    PublicCards { board: Vec<Card> },
    /// Private: you are on turn, answer from this action set
    ExpectedAction(ActionPrompt),
    /// Room-wide: this seat is on turn
    WaitingPlayerMove { seat: usize },
    /// Room-wide: what the actor did
    PlayerActed(ActedInfo),
    /// Private acknowledgement of the actor's own move
    ActionCompleted(ActedInfo),
    /// Final standings, rank 1 first
    Leaderboard { standings: Vec<Standing> },
    Err { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub prize: i64,
}

/// Addressing for one outbound event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Target {
    /// Everyone in the room, except the named player if set
    Room { exclude: Option<String> },
    /// A single player, by name
    Player { name: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub room_id: String,
    pub target: Target,
    pub event: Event,
}

pub trait Notifier: Send + Sync {
    fn notify_room(&self, room_id: &str, event: Event, exclude: Option<&str>);
    fn notify_player(&self, player: &Player, room_id: &str, event: Event);
}

/// Fans envelopes out to however many subscribers are listening.
/// Sending never blocks; with no subscribers the envelope is dropped.
pub struct BroadcastNotifier {
    sender: broadcast::Sender<Envelope>,
}

impl BroadcastNotifier {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Envelope> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for BroadcastNotifier {
    fn notify_room(&self, room_id: &str, event: Event, exclude: Option<&str>) {
        let _ = self.sender.send(Envelope {
            room_id: room_id.to_string(),
            target: Target::Room {
                exclude: exclude.map(str::to_string),
            },
            event,
        });
    }

    fn notify_player(&self, player: &Player, room_id: &str, event: Event) {
        let _ = self.sender.send(Envelope {
            room_id: room_id.to_string(),
            target: Target::Player {
                name: player.name.clone(),
            },
            event,
        });
    }
}

/// Test double that records every envelope in order.
#[derive(Default)]
pub struct RecordingNotifier {
    envelopes: Mutex<Vec<Envelope>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn envelopes(&self) -> Vec<Envelope> {
        self.envelopes.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Drain the recorded envelopes, returning them.
    pub fn take(&self) -> Vec<Envelope> {
        self.envelopes
            .lock()
            .map(|mut e| std::mem::take(&mut *e))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_room(&self, room_id: &str, event: Event, exclude: Option<&str>) {
        if let Ok(mut envelopes) = self.envelopes.lock() {
            envelopes.push(Envelope {
                room_id: room_id.to_string(),
                target: Target::Room {
                    exclude: exclude.map(str::to_string),
                },
                event,
            });
        }
    }

    fn notify_player(&self, player: &Player, room_id: &str, event: Event) {
        if let Ok(mut envelopes) = self.envelopes.lock() {
            envelopes.push(Envelope {
                room_id: room_id.to_string(),
                target: Target::Player {
                    name: player.name.clone(),
                },
                event,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_shape() {
        let event = Event::WaitingPlayerMove { seat: 3 };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"waiting-player-move","data":{"seat":3}}"#);
    }

    #[test]
    fn test_recording_notifier_keeps_order_and_targets() {
        let notifier = RecordingNotifier::new();
        let player = Player::new("alice", 0);

        notifier.notify_room("r1", Event::WaitingPlayerMove { seat: 0 }, Some("alice"));
        notifier.notify_player(&player, "r1", Event::DealCards { hand: None });

        let envelopes = notifier.take();
        assert_eq!(envelopes.len(), 2);
        assert!(matches!(
            &envelopes[0].target,
            Target::Room { exclude: Some(name) } if name == "alice"
        ));
        assert!(matches!(
            &envelopes[1].target,
            Target::Player { name } if name == "alice"
        ));
        assert!(notifier.take().is_empty());
    }

    #[test]
    fn test_broadcast_notifier_reaches_subscribers() {
        let notifier = BroadcastNotifier::new();
        let mut rx = notifier.subscribe();

        notifier.notify_room("r1", Event::PublicCards { board: vec![] }, None);

        let envelope = rx.try_recv().unwrap();
        assert_eq!(envelope.room_id, "r1");
        assert!(matches!(envelope.event, Event::PublicCards { .. }));
    }
}
