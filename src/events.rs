//! Outbound notifications. Each channel keeps its own listener list and
//! calls every listener synchronously, in the order they subscribed.
//!
//! Payloads are handed out as shared borrows, so a listener can read (or
//! copy) a snapshot but never reach back into the model's collections.

use crate::coord::Coord;

pub struct Channel<T: ?Sized> {
    listeners: Vec<Box<dyn FnMut(&T)>>,
}

impl<T: ?Sized> Channel<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn emit(&mut self, payload: &T) {
        for listener in self.listeners.iter_mut() {
            listener(payload);
        }
    }
}

impl<T: ?Sized> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> std::fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Every notification the model can raise.
#[derive(Debug, Default)]
pub struct ModelEvents {
    /// New game, and every `Move`.
    pub position_changed: Channel<Coord>,
    pub bullet_fired: Channel<Coord>,
    /// Surviving player bullets after each tick's advance, in fire order.
    pub bullet_moved: Channel<[Coord]>,
    /// Index the bullet held immediately before it was removed.
    pub bullet_destroyed: Channel<usize>,
    /// The full formation, on a new game and on every new round.
    pub enemy_spawned: Channel<[Coord]>,
    pub enemy_moved: Channel<[Coord]>,
    /// Index the enemy held immediately before it was removed.
    pub enemy_killed: Channel<usize>,
    pub score_changed: Channel<u32>,
    pub game_over: Channel<()>,
    pub enemy_bullet_fired: Channel<Coord>,
    pub enemy_bullet_moved: Channel<Coord>,
    pub enemy_bullet_destroyed: Channel<()>,
    /// Round transition: every player bullet is gone.
    pub clear_player_bullets: Channel<()>,
}

impl ModelEvents {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_run_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut channel: Channel<u32> = Channel::new();
        for tag in ["a", "b", "c"] {
            let seen = Rc::clone(&seen);
            channel.subscribe(move |v: &u32| seen.borrow_mut().push(format!("{tag}{v}")));
        }
        channel.emit(&7);
        assert_eq!(*seen.borrow(), vec!["a7", "b7", "c7"]);
        assert_eq!(channel.listener_count(), 3);
    }

    #[test]
    fn slice_channel_delivers_snapshot() {
        let copy = Rc::new(RefCell::new(Vec::new()));
        let mut channel: Channel<[Coord]> = Channel::new();
        {
            let copy = Rc::clone(&copy);
            channel.subscribe(move |all: &[Coord]| *copy.borrow_mut() = all.to_vec());
        }
        let mut source = vec![Coord::up(1.0)];
        channel.emit(&source);
        source.push(Coord::down());
        assert_eq!(copy.borrow().len(), 1);
    }
}
