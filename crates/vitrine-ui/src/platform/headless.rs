//! Platform services for tests and native hosts.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::LocalSpawner;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

use super::{Prompt, Spawner, Timer};

/// Virtual clock. Sleepers wake when [`ManualTimer::advance`] moves the clock
/// past their deadline.
#[derive(Default)]
pub struct ManualTimer {
    now: Cell<Duration>,
    sleepers: RefCell<Vec<(Duration, oneshot::Sender<()>)>>,
    requested: RefCell<Vec<Duration>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward and wake every sleeper whose deadline passed.
    /// Woken futures still have to be polled by their executor.
    pub fn advance(&self, by: Duration) {
        let now = self.now.get() + by;
        self.now.set(now);

        let due: Vec<_> = {
            let mut sleepers = self.sleepers.borrow_mut();
            let (due, pending): (Vec<_>, Vec<_>) =
                sleepers.drain(..).partition(|(deadline, _)| *deadline <= now);
            *sleepers = pending;
            due
        };
        for (_, tx) in due {
            let _ = tx.send(());
        }
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Durations passed to `sleep`, oldest first.
    pub fn requested(&self) -> Vec<Duration> {
        self.requested.borrow().clone()
    }

    pub fn pending(&self) -> usize {
        self.sleepers.borrow().len()
    }
}

#[async_trait(?Send)]
impl Timer for ManualTimer {
    async fn sleep(&self, duration: Duration) {
        self.requested.borrow_mut().push(duration);
        let (tx, rx) = oneshot::channel();
        self.sleepers
            .borrow_mut()
            .push((self.now.get() + duration, tx));
        let _ = rx.await;
    }
}

/// Spawns onto a `futures` `LocalPool`.
#[derive(Clone)]
pub struct PoolSpawner(LocalSpawner);

impl PoolSpawner {
    pub fn new(spawner: LocalSpawner) -> Self {
        Self(spawner)
    }
}

impl Spawner for PoolSpawner {
    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        // only fails once the pool is gone
        let _ = self.0.spawn_local(future);
    }
}

/// Prompt with canned answers. Once the script runs out it falls back to the
/// default answer.
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<bool>>,
    default: bool,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn accepting() -> Self {
        Self::with_default(true)
    }

    pub fn declining() -> Self {
        Self::with_default(false)
    }

    fn with_default(default: bool) -> Self {
        Self {
            answers: RefCell::new(VecDeque::new()),
            default,
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Queue the answer to the next question.
    pub fn answer(&self, yes: bool) {
        self.answers.borrow_mut().push_back(yes);
    }

    /// Questions asked so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answers.borrow_mut().pop_front().unwrap_or(self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::LocalPool;
    use std::rc::Rc;

    #[test]
    fn test_manual_timer_wakes_in_deadline_order() {
        let mut pool = LocalPool::new();
        let timer = Rc::new(ManualTimer::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        for ms in [300u64, 200] {
            let timer = Rc::clone(&timer);
            let log = Rc::clone(&log);
            pool.spawner()
                .spawn_local(async move {
                    timer.sleep(Duration::from_millis(ms)).await;
                    log.borrow_mut().push(ms);
                })
                .unwrap();
        }

        pool.run_until_stalled();
        assert_eq!(timer.pending(), 2);

        timer.advance(Duration::from_millis(250));
        pool.run_until_stalled();
        assert_eq!(*log.borrow(), vec![200]);

        timer.advance(Duration::from_millis(50));
        pool.run_until_stalled();
        assert_eq!(*log.borrow(), vec![200, 300]);
        let mut requested = timer.requested();
        requested.sort();
        assert_eq!(
            requested,
            vec![Duration::from_millis(200), Duration::from_millis(300)]
        );
    }

    #[test]
    fn test_pool_spawner_runs_on_pool() {
        let mut pool = LocalPool::new();
        let spawner = PoolSpawner::new(pool.spawner());
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        spawner.spawn(Box::pin(async move { flag.set(true) }));
        assert!(!ran.get());
        pool.run_until_stalled();
        assert!(ran.get());
    }

    #[test]
    fn test_scripted_prompt() {
        let prompt = ScriptedPrompt::accepting();
        prompt.answer(false);
        assert!(!prompt.confirm("first?"));
        assert!(prompt.confirm("second?"));
        assert_eq!(prompt.asked(), vec!["first?", "second?"]);
        assert!(!ScriptedPrompt::declining().confirm("?"));
    }
}
