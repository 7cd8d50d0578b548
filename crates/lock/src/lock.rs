//! FIFO async lock.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::time;
use tracing::*;

use crate::{LockConfig, LockError};

/// Async mutual exclusion with strict FIFO grants and an optional acquisition
/// timeout.
///
/// Unlike a data mutex this doesn't protect a value, it serializes critical
/// sections, like dispatching requests over one broker connection.  Holding
/// the lock is represented by a [`LockGuard`], and dropping the guard releases
/// it, so every exit path out of the critical section releases.
pub struct Lock {
    state: Mutex<State>,
    config: LockConfig,
}

#[derive(Debug, Default)]
struct State {
    held: bool,
    waiters: VecDeque<Waiter>,
    next_ticket: u64,
}

#[derive(Debug)]
struct Waiter {
    ticket: u64,
    grant_tx: oneshot::Sender<()>,
}

impl Lock {
    /// Constructs a new free lock.
    pub fn new(config: LockConfig) -> Self {
        Self {
            state: Mutex::new(State::default()),
            config,
        }
    }

    /// Returns the config the lock was constructed with.
    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    /// Waits until this caller is the exclusive holder.
    ///
    /// Fails with [`LockError::Timeout`] if a timeout is configured and it
    /// elapses first.  Dropping the returned future before it completes
    /// gives up the caller's place in the queue.
    pub async fn acquire(&self) -> Result<LockGuard<'_>, LockError> {
        self.wait_for_grant().await?;
        Ok(LockGuard { lock: self })
    }

    /// Like [`Self::acquire`], but the guard keeps the lock alive so it can be
    /// moved into spawned tasks.
    pub async fn acquire_owned(self: Arc<Self>) -> Result<OwnedLockGuard, LockError> {
        self.wait_for_grant().await?;
        Ok(OwnedLockGuard { lock: self })
    }

    async fn wait_for_grant(&self) -> Result<(), LockError> {
        let (ticket, grant_rx) = {
            let mut state = self.state.lock();
            if !state.held {
                state.held = true;
                return Ok(());
            }

            let ticket = state.next_ticket;
            state.next_ticket += 1;

            let (grant_tx, grant_rx) = oneshot::channel();
            state.waiters.push_back(Waiter { ticket, grant_tx });
            debug!(ticket, queued = state.waiters.len(), "lock contended, queueing");
            (ticket, grant_rx)
        };

        let mut pending = PendingAcquire {
            lock: self,
            ticket,
            grant_rx,
            settled: false,
        };

        let granted = match self.config.timeout {
            Some(timeout) => time::timeout(timeout, &mut pending.grant_rx).await.ok(),
            None => Some((&mut pending.grant_rx).await),
        };

        if let Some(Ok(())) = granted {
            pending.settled = true;
            return Ok(());
        }

        pending.settle_after_timeout()
    }

    /// Hands the lock to the next live waiter, or frees it.
    fn release(&self) {
        let mut state = self.state.lock();
        hand_off(&mut state);
    }
}

impl Default for Lock {
    fn default() -> Self {
        Self::new(LockConfig::default())
    }
}

impl From<LockConfig> for Lock {
    fn from(config: LockConfig) -> Self {
        Self::new(config)
    }
}

impl fmt::Debug for Lock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lock")
            .field("timeout", &self.config.timeout)
            .field("description", &self.config.description)
            .finish_non_exhaustive()
    }
}

/// Passes ownership straight to the front waiter so the lock is never seen
/// free in between.
fn hand_off(state: &mut State) {
    if !state.held {
        warn!("released a lock that wasn't held, ignoring");
        return;
    }

    while let Some(waiter) = state.waiters.pop_front() {
        if waiter.grant_tx.send(()).is_ok() {
            debug!(ticket = waiter.ticket, "lock handed off");
            return;
        }
    }

    state.held = false;
}

/// A queued acquire.  Cleans up the queue entry if the acquiring future is
/// dropped before it settles.
///
/// Owns the receiver so it outlives the cleanup, which means a release can
/// never pop this waiter and fail to deliver the grant.
struct PendingAcquire<'a> {
    lock: &'a Lock,
    ticket: u64,
    grant_rx: oneshot::Receiver<()>,
    settled: bool,
}

impl PendingAcquire<'_> {
    /// Resolves a wait that ended without observing a grant.
    fn settle_after_timeout(&mut self) -> Result<(), LockError> {
        let mut state = self.lock.state.lock();
        self.settled = true;

        let Some(pos) = state.waiters.iter().position(|w| w.ticket == self.ticket) else {
            // Not queued any more, so a release handed it to us just as the
            // timer fired.
            return Ok(());
        };

        state.waiters.remove(pos);
        let err = LockError::Timeout {
            waiting: state.waiters.len() + usize::from(state.held),
            description: self.lock.config.description.clone(),
        };

        warn!(ticket = self.ticket, %err, "gave up waiting for lock");
        Err(err)
    }
}

impl Drop for PendingAcquire<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        let mut state = self.lock.state.lock();
        match state.waiters.iter().position(|w| w.ticket == self.ticket) {
            Some(pos) => {
                state.waiters.remove(pos);
                debug!(ticket = self.ticket, "acquire cancelled while queued");
            }
            None => {
                // We were granted the lock but nobody is going to hold it.
                debug!(ticket = self.ticket, "acquire cancelled after grant");
                hand_off(&mut state);
            }
        }
    }
}

/// Proof of holding a [`Lock`].  Releases it when dropped.
#[must_use = "dropping the guard releases the lock immediately"]
pub struct LockGuard<'a> {
    lock: &'a Lock,
}

impl LockGuard<'_> {
    /// Releases the lock, granting it to the next waiter if there is one.
    ///
    /// Same as dropping the guard, but reads better at the end of a critical
    /// section.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

impl fmt::Debug for LockGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LockGuard").field(self.lock).finish()
    }
}

/// Owned version of [`LockGuard`], from [`Lock::acquire_owned`].
#[must_use = "dropping the guard releases the lock immediately"]
pub struct OwnedLockGuard {
    lock: Arc<Lock>,
}

impl OwnedLockGuard {
    /// Releases the lock, granting it to the next waiter if there is one.
    pub fn release(self) {
        drop(self);
    }

    /// Returns the lock this guard holds.
    pub fn lock(&self) -> &Arc<Lock> {
        &self.lock
    }
}

impl Drop for OwnedLockGuard {
    fn drop(&mut self) {
        self.lock.release();
    }
}

impl fmt::Debug for OwnedLockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OwnedLockGuard").field(&self.lock).finish()
    }
}
