use std::sync::atomic::{AtomicI64, Ordering};
use uuid::Uuid;

/// A player known to the room. The room keeps the owning reference;
/// seats share it for the duration of the tournament.
///
/// The balance is the only piece of mutable state and is adjusted
/// through `change_balance`, which refuses to overdraw.
#[derive(Debug)]
pub struct Player {
    pub id: String,
    pub name: String,
    balance: AtomicI64,
}

impl Player {
    pub fn new(name: impl Into<String>, balance: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            balance: AtomicI64::new(balance),
        }
    }

    /// Apply `delta` to the balance. Returns false (leaving the balance
    /// untouched) if the result would be negative.
    pub fn change_balance(&self, delta: i64) -> bool {
        let mut current = self.balance.load(Ordering::Acquire);
        loop {
            let next = current + delta;
            if next < 0 {
                return false;
            }
            match self.balance.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }

    pub fn balance(&self) -> i64 {
        self.balance.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_balance_deducts_and_refunds() {
        let player = Player::new("alice", 100);
        assert!(player.change_balance(-60));
        assert_eq!(player.balance(), 40);
        assert!(player.change_balance(60));
        assert_eq!(player.balance(), 100);
    }

    #[test]
    fn test_change_balance_rejects_overdraft() {
        let player = Player::new("bob", 50);
        assert!(!player.change_balance(-51));
        assert_eq!(player.balance(), 50);
    }
}
