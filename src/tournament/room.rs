//! Tournament lifecycle around a single table: registration, the hand
//! loop with its timers, blind escalation, eliminations and payout.
//!
//! The room is a synchronous state machine meant to live behind a
//! `tokio::sync::Mutex`. It is suspended at exactly three kinds of
//! points (awaiting a player action, the all-in reveal pause, the
//! inter-hand delay); each suspension carries a token and an absolute
//! deadline. A valid player action invalidates the token before the
//! engine resumes, so a timeout racing the action can fire at most one
//! of the two paths.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::time::Instant;
use uuid::Uuid;

use crate::config::Config;
use crate::game::constants::MIN_PLAYERS_TO_START;
use crate::game::error::{GameError, GameResult};
use crate::game::seat::ActionMessage;
use crate::game::table::{Table, TableSnapshot, TableStatus};
use crate::notify::{Event, Notifier, Standing};
use crate::player::Player;
use crate::tournament::prizes::PrizeStructure;
use crate::tournament::TournamentState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspensionKind {
    /// Waiting for this seat to act
    Action { seat: usize },
    /// All-in reveal pause before the next street
    Reveal,
    /// Delay before the next hand is dealt
    NextHand,
}

/// Where the engine is parked and until when. The token is bumped on
/// every suspend and on every cancellation; `check_timers` only fires
/// the suspension it actually observed.
#[derive(Debug, Clone, Copy)]
pub struct Suspension {
    pub token: u64,
    pub kind: SuspensionKind,
    pub deadline: Instant,
}

pub struct TournamentRoom {
    pub id: String,
    config: Config,
    notifier: Arc<dyn Notifier>,
    pub state: TournamentState,
    /// Registry by player name
    players: HashMap<String, Arc<Player>>,
    /// Registration order; defines seat order at start
    seating: Vec<Arc<Player>>,
    pub seats_taken: usize,
    pub prize_pool: i64,
    /// Current blind level, 1-based
    pub level: usize,
    big_blind: i64,
    /// Final standings: rank 1 is the champion
    pub leaderboard: BTreeMap<usize, Arc<Player>>,
    /// Blind escalation decided by the level clock, applied at the
    /// next hand boundary
    pending_level: bool,
    /// Sit-out changes applied at the next hand boundary
    pending_seat_out: HashMap<String, bool>,
    pause_requested: bool,
    pub table: Table,
    suspension: Option<Suspension>,
    next_token: u64,
    level_deadline: Option<Instant>,
}

impl TournamentRoom {
    pub fn new(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        let id = Uuid::new_v4().to_string();
        let table = Table::new(id.clone());
        Self {
            id,
            config,
            notifier,
            state: TournamentState::Wait,
            players: HashMap::new(),
            seating: Vec::new(),
            seats_taken: 0,
            prize_pool: 0,
            level: 0,
            big_blind: 0,
            leaderboard: BTreeMap::new(),
            pending_level: false,
            pending_seat_out: HashMap::new(),
            pause_requested: false,
            table,
            suspension: None,
            next_token: 0,
            level_deadline: None,
        }
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.config.num_seats
    }

    pub fn is_over(&self) -> bool {
        matches!(
            self.state,
            TournamentState::Finished | TournamentState::Canceled
        )
    }

    pub fn suspension(&self) -> Option<&Suspension> {
        self.suspension.as_ref()
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot::capture(&self.table)
    }

    /// Buy a player in. The buy-in is charged before any room state
    /// changes; a failed charge leaves the room untouched.
    pub fn register(&mut self, player: Arc<Player>) -> GameResult<()> {
        if self.state != TournamentState::Wait {
            return Err(GameError::RegistrationClosed);
        }
        if self.is_full() {
            return Err(GameError::TableFull);
        }
        if self.players.contains_key(&player.name) {
            return Err(GameError::AlreadyRegistered);
        }
        if !player.change_balance(-self.config.buy_in) {
            return Err(GameError::InsufficientBalance {
                required: self.config.buy_in,
            });
        }

        tracing::info!("{} registered for room {}", player.name, self.id);
        self.players.insert(player.name.clone(), player.clone());
        self.seating.push(player);
        self.seats_taken += 1;
        self.broadcast_room_changed();
        Ok(())
    }

    /// Refund a registrant who leaves before the start.
    pub fn unregister(&mut self, name: &str) -> GameResult<()> {
        if self.state != TournamentState::Wait {
            return Err(GameError::RegistrationClosed);
        }
        let player = self.players.remove(name).ok_or(GameError::NotRegistered)?;
        self.seating.retain(|p| !Arc::ptr_eq(p, &player));
        self.seats_taken -= 1;
        player.change_balance(self.config.buy_in);

        tracing::info!("{} unregistered from room {}", name, self.id);
        self.broadcast_room_changed();
        Ok(())
    }

    /// Leave the registration phase. With fewer than two registrants
    /// the tournament is canceled instead and everyone is refunded.
    pub fn start(&mut self, now: Instant) -> GameResult<()> {
        if self.state != TournamentState::Wait {
            return Err(GameError::NotWaiting);
        }

        if self.seats_taken < MIN_PLAYERS_TO_START {
            tracing::warn!(
                "Room {} started with {} registrants, canceling",
                self.id,
                self.seats_taken
            );
            self.state = TournamentState::Canceled;
            self.settle();
            self.broadcast_room_changed();
            return Ok(());
        }

        self.prize_pool = self.config.buy_in * self.seats_taken as i64;
        self.state = TournamentState::Run;
        for player in &self.seating {
            self.table.add_seat(player.clone(), self.config.starting_stack);
        }
        self.table.button = 0;
        self.level = 1;
        self.big_blind = self.config.structure.first();
        self.level_deadline = Some(now + self.config.level_time);

        tracing::info!(
            "Room {} started: {} players, prize pool {}",
            self.id,
            self.seats_taken,
            self.prize_pool
        );
        self.notifier.notify_room(
            &self.id,
            Event::TournamentStart {
                players: self.seating.iter().map(|p| p.name.clone()).collect(),
                prize_pool: self.prize_pool,
                big_blind: self.big_blind,
                starting_stack: self.config.starting_stack,
            },
            None,
        );

        self.run_hand(now);
        Ok(())
    }

    /// A player's answer to an expected-action prompt.
    ///
    /// Only a valid action from the seat on turn cancels the running
    /// action timeout; every rejection leaves the suspension (and the
    /// timer racing it) untouched.
    pub fn handle_action(
        &mut self,
        name: &str,
        msg: &ActionMessage,
        now: Instant,
    ) -> GameResult<()> {
        if self.state != TournamentState::Run {
            return Err(GameError::NotRunning);
        }
        let suspension = self.suspension.ok_or(GameError::NoActionPending)?;
        let seat = match suspension.kind {
            SuspensionKind::Action { seat } => seat,
            _ => return Err(GameError::NoActionPending),
        };

        let player = self
            .players
            .get(name)
            .cloned()
            .ok_or(GameError::NotRegistered)?;
        if !Arc::ptr_eq(&player, &self.table.seats[seat].player) {
            self.notifier.notify_player(
                &player,
                &self.id,
                Event::Err {
                    message: GameError::NotYourTurn.to_string(),
                },
            );
            return Err(GameError::NotYourTurn);
        }

        self.table.validate_action(msg)?;

        // The action stands: invalidate the pending timeout before
        // touching any table state.
        self.next_token += 1;
        self.suspension = None;

        self.table.apply_action(msg);
        let info = self.table.acted_info(msg.word, msg.bet);
        self.notifier
            .notify_player(&player, &self.id, Event::ActionCompleted(info.clone()));
        self.notifier
            .notify_room(&self.id, Event::PlayerActed(info), Some(name));

        let notifier = self.notifier.clone();
        let status = self.table.advance_after_action(notifier.as_ref());
        self.apply_status(status, now);
        Ok(())
    }

    /// Fire whatever deadlines have passed. Driven by the background
    /// ticker in production and called directly with synthetic instants
    /// in tests.
    pub fn check_timers(&mut self, now: Instant) {
        if self.state != TournamentState::Run {
            return;
        }

        if let Some(deadline) = self.level_deadline {
            if now >= deadline {
                self.pending_level = true;
                self.level_deadline = Some(now + self.config.level_time);
                tracing::debug!("Room {}: blind escalation queued", self.id);
            }
        }

        let suspension = match self.suspension {
            Some(s) if now >= s.deadline => s,
            _ => return,
        };
        self.next_token += 1;
        self.suspension = None;

        let notifier = self.notifier.clone();
        match suspension.kind {
            SuspensionKind::Action { seat } => {
                let word = self.table.apply_timeout_default();
                tracing::info!(
                    "Room {}: seat {} timed out, defaulted to {}",
                    self.id,
                    seat,
                    word
                );
                let info = self.table.acted_info(word, None);
                let player = self.table.seats[seat].player.clone();
                self.notifier
                    .notify_player(&player, &self.id, Event::ActionCompleted(info.clone()));
                self.notifier
                    .notify_room(&self.id, Event::PlayerActed(info), Some(&player.name));

                let status = self.table.advance_after_action(notifier.as_ref());
                self.apply_status(status, now);
            }
            SuspensionKind::Reveal => {
                let status = self.table.resume_after_reveal(notifier.as_ref());
                self.apply_status(status, now);
            }
            SuspensionKind::NextHand => self.run_hand(now),
        }
    }

    /// Queue a sit-out change; it takes effect at the next hand
    /// boundary, never mid-hand.
    pub fn sit_out(&mut self, name: &str, flag: bool) -> GameResult<()> {
        if self.state != TournamentState::Run && self.state != TournamentState::Pause {
            return Err(GameError::NotRunning);
        }
        if !self.players.contains_key(name) {
            return Err(GameError::NotRegistered);
        }
        self.pending_seat_out.insert(name.to_string(), flag);
        Ok(())
    }

    /// Pause the hand loop. Takes effect immediately between hands,
    /// otherwise once the current hand settles.
    pub fn pause(&mut self) -> GameResult<()> {
        if self.state != TournamentState::Run {
            return Err(GameError::NotRunning);
        }
        match self.suspension {
            Some(Suspension {
                kind: SuspensionKind::NextHand,
                ..
            }) => {
                self.next_token += 1;
                self.suspension = None;
                self.enter_pause();
            }
            _ => self.pause_requested = true,
        }
        Ok(())
    }

    pub fn resume(&mut self, now: Instant) -> GameResult<()> {
        if self.state != TournamentState::Pause {
            return Err(GameError::NotRunning);
        }
        self.apply_pending_seat_out();
        if self.active_seats() < MIN_PLAYERS_TO_START {
            // Still cannot seat a hand; stay paused
            tracing::debug!("Room {}: resume ignored, not enough active seats", self.id);
            return Ok(());
        }
        self.state = TournamentState::Run;
        self.level_deadline = Some(now + self.config.level_time);
        self.suspend(
            SuspensionKind::NextHand,
            now + self.config.next_hand_delay,
        );
        self.broadcast_room_changed();
        Ok(())
    }

    fn apply_pending_seat_out(&mut self) {
        for seat in &mut self.table.seats {
            if let Some(&flag) = self.pending_seat_out.get(&seat.player.name) {
                seat.seat_out = flag;
            }
        }
        self.pending_seat_out.clear();
    }

    /// Seats that will contest the next hand
    fn active_seats(&self) -> usize {
        self.table.seats.iter().filter(|s| !s.seat_out).count()
    }

    fn enter_pause(&mut self) {
        self.pause_requested = false;
        self.state = TournamentState::Pause;
        self.level_deadline = None;
        tracing::info!("Room {} paused", self.id);
        self.broadcast_room_changed();
    }

    fn run_hand(&mut self, now: Instant) {
        let notifier = self.notifier.clone();
        let status = self.table.start_hand(notifier.as_ref(), self.big_blind);
        self.apply_status(status, now);
    }

    fn apply_status(&mut self, status: TableStatus, now: Instant) {
        match status {
            TableStatus::AwaitingAction { seat } => self.suspend(
                SuspensionKind::Action { seat },
                now + self.config.action_timeout,
            ),
            TableStatus::RevealPause => {
                self.suspend(SuspensionKind::Reveal, now + self.config.reveal_delay)
            }
            TableStatus::HandComplete(_) => self.hand_boundary(now),
        }
    }

    fn suspend(&mut self, kind: SuspensionKind, deadline: Instant) {
        self.next_token += 1;
        self.suspension = Some(Suspension {
            token: self.next_token,
            kind,
            deadline,
        });
    }

    /// Between hands: apply deferred changes, rotate the button, remove
    /// busted seats, then either schedule the next hand or finish.
    fn hand_boundary(&mut self, now: Instant) {
        if self.pending_level {
            self.pending_level = false;
            self.level += 1;
            // Past the end of the ladder the blind stays where it is
            if let Some(blind) = self.config.structure.big_blind(self.level) {
                self.big_blind = blind;
                tracing::info!(
                    "Room {}: level {} begins, big blind {}",
                    self.id,
                    self.level,
                    blind
                );
            }
        }

        self.apply_pending_seat_out();

        if self.table.seats.is_empty() {
            return;
        }
        self.table.button = (self.table.button + 1) % self.table.seats.len();

        // Busted seats leave now. Ranks count down from the current
        // field size; the button pointer shifts left once per removed
        // seat that sat before it.
        let mut i = 0;
        while i < self.table.seats.len() {
            if self.table.seats[i].stack == 0 {
                let seat = self.table.seats.remove(i);
                tracing::info!(
                    "Room {}: {} eliminated in position {}",
                    self.id,
                    seat.player.name,
                    self.seats_taken
                );
                self.leaderboard.insert(self.seats_taken, seat.player);
                self.seats_taken -= 1;
                if self.table.button > i {
                    self.table.button -= 1;
                }
            } else {
                i += 1;
            }
        }
        if !self.table.seats.is_empty() {
            self.table.button %= self.table.seats.len();
        }

        if self.seats_taken > 1 {
            if self.pause_requested {
                self.enter_pause();
            } else if self.active_seats() < MIN_PLAYERS_TO_START {
                // A hand cannot seat two contenders; wait for a sit-in
                // instead of dealing empty hands on a timer
                tracing::info!(
                    "Room {}: only {} active seats, pausing",
                    self.id,
                    self.active_seats()
                );
                self.enter_pause();
            } else {
                self.suspend(
                    SuspensionKind::NextHand,
                    now + self.config.next_hand_delay,
                );
            }
            return;
        }

        if let Some(seat) = self.table.seats.first() {
            tracing::info!("Room {}: {} wins the tournament", self.id, seat.player.name);
            self.leaderboard.insert(1, seat.player.clone());
        }
        self.state = TournamentState::Finished;
        self.level_deadline = None;
        self.settle();
        self.broadcast_room_changed();
    }

    /// Pay out the prize pool (or refund buy-ins on cancellation).
    fn settle(&mut self) {
        match self.state {
            TournamentState::Finished => {
                let prizes = self
                    .config
                    .prizes
                    .clone()
                    .unwrap_or_else(|| PrizeStructure::for_player_count(self.seating.len()));

                let mut standings = Vec::new();
                for (&rank, player) in &self.leaderboard {
                    let prize = prizes.prize_for_position(self.prize_pool, rank);
                    if prize > 0 {
                        player.change_balance(prize);
                    }
                    standings.push(Standing {
                        rank,
                        name: player.name.clone(),
                        prize,
                    });
                }
                self.notifier
                    .notify_room(&self.id, Event::Leaderboard { standings }, None);
            }
            TournamentState::Canceled => {
                for player in &self.seating {
                    player.change_balance(self.config.buy_in);
                }
            }
            _ => {}
        }
    }

    fn broadcast_room_changed(&self) {
        self.notifier.notify_room(
            &self.id,
            Event::RoomChanged {
                state: self.state,
                players: self.seating.iter().map(|p| p.name.clone()).collect(),
                seats_taken: self.seats_taken,
                is_full: self.is_full(),
            },
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use std::time::Duration;

    fn quick_config() -> Config {
        Config {
            buy_in: 100,
            num_seats: 9,
            starting_stack: 2000,
            action_timeout: Duration::from_millis(1000),
            reveal_delay: Duration::from_millis(100),
            next_hand_delay: Duration::from_millis(100),
            ..Config::default()
        }
    }

    fn room_with_seats(stacks: &[i64]) -> TournamentRoom {
        let mut room = TournamentRoom::new(quick_config(), Arc::new(RecordingNotifier::new()));
        room.state = TournamentState::Run;
        for (i, &stack) in stacks.iter().enumerate() {
            let player = Arc::new(Player::new(format!("p{}", i), 0));
            room.players.insert(player.name.clone(), player.clone());
            room.seating.push(player.clone());
            room.table.add_seat(player, stack);
        }
        room.seats_taken = stacks.len();
        room.prize_pool = 100 * stacks.len() as i64;
        room.level = 1;
        room.big_blind = 20;
        room
    }

    #[test]
    fn test_elimination_assigns_rank_and_shifts_button() {
        // Button on seat 2 advances to 3; seat 0 busts, so the button
        // pointer shifts back to seat 2's new index.
        let mut room = room_with_seats(&[0, 2000, 3000, 3000]);
        room.table.button = 2;

        room.hand_boundary(Instant::now());

        assert_eq!(room.table.seats.len(), 3);
        assert_eq!(room.table.button, 2);
        assert_eq!(room.seats_taken, 3);
        assert_eq!(room.leaderboard.get(&4).unwrap().name, "p0");
        assert!(matches!(
            room.suspension().unwrap().kind,
            SuspensionKind::NextHand
        ));
    }

    #[test]
    fn test_button_wraps_when_last_seat_is_removed() {
        let mut room = room_with_seats(&[2000, 2000, 0]);
        room.table.button = 1; // advances onto the busted last seat

        room.hand_boundary(Instant::now());

        assert_eq!(room.table.seats.len(), 2);
        assert_eq!(room.table.button, 0);
    }

    #[test]
    fn test_last_elimination_finishes_and_pays_the_champion() {
        let mut room = room_with_seats(&[4000, 0]);
        room.hand_boundary(Instant::now());

        assert_eq!(room.state, TournamentState::Finished);
        assert_eq!(room.leaderboard.get(&1).unwrap().name, "p0");
        assert_eq!(room.leaderboard.get(&2).unwrap().name, "p1");
        // Heads-up table: winner takes the whole pool
        assert_eq!(room.seating[0].balance(), 200);
        assert_eq!(room.seating[1].balance(), 0);
        assert!(room.suspension().is_none());
    }

    #[test]
    fn test_blind_escalation_applies_at_the_boundary_only() {
        let mut room = room_with_seats(&[2000, 2000, 2000]);
        room.level_deadline = Some(Instant::now() - Duration::from_millis(1));

        room.check_timers(Instant::now());
        assert_eq!(room.level, 1);
        assert!(room.pending_level);

        room.hand_boundary(Instant::now());
        assert_eq!(room.level, 2);
        assert_eq!(room.big_blind, 40);
        assert!(!room.pending_level);
    }

    #[test]
    fn test_sit_out_is_deferred_to_the_boundary() {
        let mut room = room_with_seats(&[2000, 2000, 2000]);
        room.sit_out("p1", true).unwrap();
        assert!(!room.table.seats[1].seat_out);

        room.hand_boundary(Instant::now());
        assert!(room.table.seats[1].seat_out);
    }

    #[test]
    fn test_mass_sit_out_pauses_instead_of_dealing_empty_hands() {
        let mut room = room_with_seats(&[2000, 2000, 2000]);
        room.sit_out("p1", true).unwrap();
        room.sit_out("p2", true).unwrap();

        room.hand_boundary(Instant::now());

        assert_eq!(room.state, TournamentState::Pause);
        assert!(room.suspension().is_none());

        // A sit-in plus resume restarts the hand loop
        room.sit_out("p1", false).unwrap();
        room.resume(Instant::now()).unwrap();
        assert_eq!(room.state, TournamentState::Run);
        assert!(!room.table.seats[1].seat_out);
        assert!(matches!(
            room.suspension().unwrap().kind,
            SuspensionKind::NextHand
        ));
    }

    #[test]
    fn test_resume_without_enough_active_seats_stays_paused() {
        let mut room = room_with_seats(&[2000, 2000]);
        room.sit_out("p0", true).unwrap();
        room.hand_boundary(Instant::now());
        assert_eq!(room.state, TournamentState::Pause);

        room.resume(Instant::now()).unwrap();

        assert_eq!(room.state, TournamentState::Pause);
        assert!(room.suspension().is_none());
    }

    #[test]
    fn test_stale_timer_does_not_fire_after_cancellation() {
        let mut room = room_with_seats(&[2000, 2000, 2000]);
        let now = Instant::now();
        room.suspend(SuspensionKind::NextHand, now + Duration::from_millis(100));
        let armed = room.suspension().unwrap().token;

        // Cancel the way a valid action does
        room.next_token += 1;
        room.suspension = None;

        room.check_timers(now + Duration::from_millis(200));
        assert!(room.suspension().is_none());
        assert!(room.next_token > armed);
    }
}
