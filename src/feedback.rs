//! Transient feedback: popup texts, their lifetimes and the dismissal timer.
//!
//! At most one popup is visible per chat. Showing a new one preempts the
//! pending dismissal of the old one, which is what [`Debouncer`] enforces.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

pub const PRAISE: [&str; 6] = [
    "Nice!",
    "Good job!",
    "Well done!",
    "Perfect!",
    "Great!",
    "Awesome!",
];

pub const ALREADY_FILLED: &str = "Already filled";
pub const ALREADY_PLACED: &str = "Already placed";
pub const TRY_AGAIN: &str = "❌ Wrong slot, try again";
pub const ASSEMBLY_COMPLETE: &str = "🏁 Assembly complete, well done!";

pub fn random_praise<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    // PRAISE is non-empty
    PRAISE.choose(rng).copied().unwrap_or(PRAISE[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Centre bubble after a correct placement.
    Success,
    /// Rejections such as "Already filled".
    Short,
    /// Wrong slot.
    Wrong,
}

/// How long each kind of transient stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifetimes {
    pub success: Duration,
    pub short: Duration,
    pub wrong: Duration,
    /// Slot highlight after a wrong drop.
    pub pulse: Duration,
}

impl Default for Lifetimes {
    fn default() -> Self {
        Self {
            success: Duration::from_millis(1400),
            short: Duration::from_millis(900),
            wrong: Duration::from_millis(1000),
            pulse: Duration::from_millis(400),
        }
    }
}

impl Lifetimes {
    pub fn of(&self, kind: ToastKind) -> Duration {
        match kind {
            ToastKind::Success => self.success,
            ToastKind::Short => self.short,
            ToastKind::Wrong => self.wrong,
        }
    }
}

struct Pending {
    generation: u64,
    timer: JoinHandle<()>,
}

struct Timers<K> {
    next_generation: u64,
    pending: HashMap<K, Pending>,
}

/// One dismissal timer per key. Arming a key cancels whatever was pending
/// for it; a superseded timer never runs its callback.
pub struct Debouncer<K> {
    timers: Arc<Mutex<Timers<K>>>,
}

impl<K> Clone for Debouncer<K> {
    fn clone(&self) -> Self {
        Self {
            timers: Arc::clone(&self.timers),
        }
    }
}

impl<K> Default for Debouncer<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            timers: Arc::new(Mutex::new(Timers {
                next_generation: 0,
                pending: HashMap::new(),
            })),
        }
    }

    /// Run `on_expire` after `lifetime` unless the key is re-armed or
    /// disarmed first.
    pub async fn arm<F, Fut>(&self, key: K, lifetime: Duration, on_expire: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut timers = self.timers.lock().await;
        timers.next_generation += 1;
        let generation = timers.next_generation;
        if let Some(old) = timers.pending.remove(&key) {
            old.timer.abort();
        }

        let shared = Arc::clone(&self.timers);
        let task_key = key.clone();
        // The lock is held until the entry is inserted, so the task cannot
        // look the key up before it exists.
        let timer = tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            {
                let mut timers = shared.lock().await;
                let current = timers.pending.get(&task_key).map(|p| p.generation);
                if current != Some(generation) {
                    return;
                }
                timers.pending.remove(&task_key);
            }
            on_expire().await;
        });
        timers.pending.insert(key, Pending { generation, timer });
    }

    /// Cancel the pending timer for `key`. Returns whether one was pending.
    pub async fn disarm(&self, key: &K) -> bool {
        match self.timers.lock().await.pending.remove(key) {
            Some(old) => {
                old.timer.abort();
                true
            }
            None => false,
        }
    }

    pub async fn is_armed(&self, key: &K) -> bool {
        self.timers.lock().await.pending.contains_key(key)
    }
}
