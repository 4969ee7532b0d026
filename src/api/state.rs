use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, MutexGuard};

use crate::ai::chat::{Chat, TurnState};
use crate::core::AppConfig;

pub struct AppState {
    // The one conversation this server hosts
    pub session: Mutex<Chat>,
    // Set only while a turn (or reset) holds the session. Readers of the
    // transcript take the lock without touching it.
    busy: AtomicBool,
    pub config: AppConfig,
}

/// Clears the busy flag on drop, including when the handler's future is
/// cancelled while still waiting on the session lock.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Exclusive access to the session for the length of one turn.
pub struct TurnGuard<'a> {
    session: MutexGuard<'a, Chat>,
    _busy: BusyGuard<'a>,
}

impl Deref for TurnGuard<'_> {
    type Target = Chat;

    fn deref(&self) -> &Chat {
        &self.session
    }
}

impl DerefMut for TurnGuard<'_> {
    fn deref_mut(&mut self) -> &mut Chat {
        &mut self.session
    }
}

impl AppState {
    pub fn new(session: Chat, config: AppConfig) -> Self {
        Self {
            session: Mutex::new(session),
            busy: AtomicBool::new(false),
            config,
        }
    }

    /// Claims the session for a turn, or `None` if a turn is already
    /// in flight. A transcript read holding the lock only delays the
    /// claim.
    pub async fn try_begin_turn(&self) -> Option<TurnGuard<'_>> {
        let busy = BusyGuard::acquire(&self.busy)?;
        let session = self.session.lock().await;
        Some(TurnGuard {
            session,
            _busy: busy,
        })
    }

    pub fn turn_state(&self) -> TurnState {
        if self.busy.load(Ordering::Acquire) {
            TurnState::Pending
        } else {
            TurnState::Idle
        }
    }
}
