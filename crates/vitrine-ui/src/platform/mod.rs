//! Timers, task spawning and the blocking confirmation prompt.

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;

#[cfg(target_arch = "wasm32")]
mod browser;
mod headless;

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserPrompt, BrowserSpawner, BrowserTimer};
pub use headless::{ManualTimer, PoolSpawner, ScriptedPrompt};

/// Waits without blocking the event loop.
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

/// Runs local futures to completion in the background.
pub trait Spawner {
    fn spawn(&self, future: LocalBoxFuture<'static, ()>);
}

/// Blocking yes/no question to the user.
pub trait Prompt {
    fn confirm(&self, message: &str) -> bool;
}

/// The host services a storefront runs on.
#[derive(Clone)]
pub struct Platform {
    pub timer: Rc<dyn Timer>,
    pub spawner: Rc<dyn Spawner>,
    pub prompt: Rc<dyn Prompt>,
}

impl Platform {
    pub fn new(timer: Rc<dyn Timer>, spawner: Rc<dyn Spawner>, prompt: Rc<dyn Prompt>) -> Self {
        Self {
            timer,
            spawner,
            prompt,
        }
    }

    /// `setTimeout`, `spawn_local` and `window.confirm`.
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        Self::new(
            Rc::new(BrowserTimer),
            Rc::new(BrowserSpawner),
            Rc::new(BrowserPrompt),
        )
    }
}
