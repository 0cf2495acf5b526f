//! Exclusive access to shared game state.

use std::{
    ops::{Deref, DerefMut},
    sync::{Condvar, Mutex, MutexGuard, PoisonError},
};

/// Serializes every read-modify-write sequence on the wrapped state.
///
/// Callers draw a ticket on arrival and are admitted strictly in ticket
/// order. Access is released when the [`GuardedState`] returned by
/// [`acquire`] drops, which covers early returns, `?` propagation and panics
/// alike.
///
/// [`acquire`]: ConcurrencyGuard::acquire
#[derive(Debug, Default)]
pub struct ConcurrencyGuard<T> {
    queue: Mutex<Turnstile>,
    turn: Condvar,
    inner: Mutex<T>,
}

#[derive(Debug, Default)]
struct Turnstile {
    next_ticket: u64,
    now_serving: u64,
}

impl<T> ConcurrencyGuard<T> {
    /// Wraps the provided state.
    #[must_use]
    pub fn new(state: T) -> Self {
        Self {
            queue: Mutex::new(Turnstile::default()),
            turn: Condvar::new(),
            inner: Mutex::new(state),
        }
    }

    /// Blocks until every earlier caller has been served, then grants access.
    ///
    /// A holder that panicked cannot have left a half-applied move behind,
    /// since moves validate fully before their first write, so a poisoned lock
    /// is recovered instead of propagated.
    pub fn acquire(&self) -> GuardedState<'_, T> {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        let ticket = queue.next_ticket;
        queue.next_ticket = queue.next_ticket.wrapping_add(1);
        while queue.now_serving != ticket {
            queue = self
                .turn
                .wait(queue)
                .unwrap_or_else(PoisonError::into_inner);
        }
        drop(queue);

        let state = self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("recovering game state after a panicked holder");
            poisoned.into_inner()
        });
        GuardedState { owner: self, state }
    }

    /// Runs `operation` with exclusive access and releases it afterwards.
    pub fn with<R>(&self, operation: impl FnOnce(&mut T) -> R) -> R {
        let mut state = self.acquire();
        operation(&mut state)
    }

    /// Number of callers currently holding or waiting for access.
    pub fn queued(&self) -> u64 {
        let queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.next_ticket.wrapping_sub(queue.now_serving)
    }

    /// Mutable access without locking, available while nothing else can hold a reference.
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive access to the state of a [`ConcurrencyGuard`].
///
/// Dropping it admits the next caller in line.
#[derive(Debug)]
pub struct GuardedState<'a, T> {
    owner: &'a ConcurrencyGuard<T>,
    state: MutexGuard<'a, T>,
}

impl<T> Deref for GuardedState<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.state
    }
}

impl<T> DerefMut for GuardedState<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.state
    }
}

impl<T> Drop for GuardedState<'_, T> {
    fn drop(&mut self) {
        let mut queue = self
            .owner
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        queue.now_serving = queue.now_serving.wrapping_add(1);
        drop(queue);
        self.owner.turn.notify_all();
    }
}
