use std::{
    borrow::Borrow,
    collections::HashMap,
    future::Future,
    hash::Hash,
    sync::{Mutex, MutexGuard},
    time::Duration,
};
use tokio::task::JoinHandle;

/// A timer that has been armed and has not fired yet
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTimer<K, T> {
    pub key: K,
    pub tag: T,
    /// Timestamp in millis the timer was armed for
    pub fire_at: i64,
}

struct Slot<T> {
    generation: u64,
    tag: T,
    fire_at: i64,
    handle: JoinHandle<()>,
}

struct Timers<K, T> {
    next_generation: u64,
    slots: HashMap<K, Slot<T>>,
}

/// One-shot timers keyed by `K`, at most one pending timer per key.
///
/// Every armed timer gets a generation number. A timer that fires has to
/// `release` its slot with that generation before doing any work, so a
/// slot that has been re-armed in the meantime is left alone.
pub struct TimerRegistry<K, T> {
    timers: Mutex<Timers<K, T>>,
}

impl<K, T> TimerRegistry<K, T>
where
    K: Eq + Hash + Clone,
    T: Clone,
{
    pub fn new() -> Self {
        Self {
            timers: Mutex::new(Timers {
                next_generation: 0,
                slots: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Timers<K, T>> {
        self.timers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Arms a timer that runs the future created by `on_fire` after `delay`.
    /// A pending timer for the same key is aborted and replaced.
    ///
    /// Returns the generation of the new timer, which `on_fire` also receives.
    pub fn arm<F, Fut>(&self, key: K, tag: T, fire_at: i64, delay: Duration, on_fire: F) -> u64
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        // The lock is held until the slot is stored so that a timer with a
        // zero delay cannot release its slot before it exists.
        let mut timers = self.lock();
        let generation = timers.next_generation;
        timers.next_generation += 1;

        let fired = on_fire(generation);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fired.await;
        });

        let slot = Slot {
            generation,
            tag,
            fire_at,
            handle,
        };
        if let Some(prior) = timers.slots.insert(key, slot) {
            prior.handle.abort();
        }
        generation
    }

    /// Removes the slot of a timer that is firing. Returns `None` if the
    /// slot has been cancelled or re-armed since.
    pub fn release<Q>(&self, key: &Q, generation: u64) -> Option<T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut timers = self.lock();
        match timers.slots.get(key) {
            Some(slot) if slot.generation == generation => {
                timers.slots.remove(key).map(|slot| slot.tag)
            }
            _ => None,
        }
    }

    /// Aborts the pending timer for the key, if any
    pub fn cancel<Q>(&self, key: &Q) -> Option<T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.lock().slots.remove(key)?;
        slot.handle.abort();
        Some(slot.tag)
    }

    /// Aborts every pending timer and returns how many there were
    pub fn cancel_all(&self) -> usize {
        let slots = std::mem::take(&mut self.lock().slots);
        for slot in slots.values() {
            slot.handle.abort();
        }
        slots.len()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<PendingTimer<K, T>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let timers = self.lock();
        timers.slots.get_key_value(key).map(|(key, slot)| PendingTimer {
            key: key.clone(),
            tag: slot.tag.clone(),
            fire_at: slot.fire_at,
        })
    }

    /// All pending timers ordered by the time they fire
    pub fn pending(&self) -> Vec<PendingTimer<K, T>> {
        let timers = self.lock();
        let mut pending = timers
            .slots
            .iter()
            .map(|(key, slot)| PendingTimer {
                key: key.clone(),
                tag: slot.tag.clone(),
                fire_at: slot.fire_at,
            })
            .collect::<Vec<_>>();
        pending.sort_by_key(|timer| timer.fire_at);
        pending
    }

    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, T> Default for TimerRegistry<K, T>
where
    K: Eq + Hash + Clone,
    T: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::{BoxFuture, FutureExt};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn counting(counter: &Arc<AtomicUsize>) -> impl FnOnce(u64) -> BoxFuture<'static, ()> {
        let counter = counter.clone();
        move |_| {
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            .boxed()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_a_key_replaces_the_pending_timer() {
        let registry: TimerRegistry<&str, &str> = TimerRegistry::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = fired.clone();

        registry.arm("a", "first", 10, Duration::from_millis(10), move |_| async move {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });
        let fired_clone = fired.clone();
        registry.arm("a", "second", 20, Duration::from_millis(20), move |_| async move {
            fired_clone.fetch_add(10, Ordering::SeqCst);
        });

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").map(|t| t.tag), Some("second"));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn release_only_matches_the_current_generation() {
        let registry: TimerRegistry<&str, &str> = TimerRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let old = registry.arm("a", "old", 10, Duration::from_secs(10), counting(&counter));
        let new = registry.arm("a", "new", 10, Duration::from_secs(10), counting(&counter));

        assert_eq!(registry.release("a", old), None);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.release("a", new), Some("new"));
        assert!(registry.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timers_never_fire() {
        let registry: TimerRegistry<String, ()> = TimerRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        registry.arm("a".into(), (), 10, Duration::from_millis(10), counting(&counter));
        registry.arm("b".into(), (), 20, Duration::from_millis(20), counting(&counter));
        registry.arm("c".into(), (), 5, Duration::from_millis(5), counting(&counter));

        let pending = registry.pending();
        assert_eq!(
            pending.iter().map(|t| t.key.as_str()).collect::<Vec<_>>(),
            vec!["c", "a", "b"]
        );

        assert!(registry.cancel("a").is_some());
        assert!(registry.cancel("a").is_none());
        assert_eq!(registry.cancel_all(), 2);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
