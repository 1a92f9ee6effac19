use std::time::Duration;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use js_sys::{Function, Promise};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::{Prompt, Spawner, Timer};

/// `setTimeout` wrapped in a promise.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        let delay_ms = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);

        let mut executor = move |resolve: Function, _reject: Function| {
            let Some(window) = web_sys::window() else {
                let _ = resolve.call0(&JsValue::NULL);
                return;
            };

            let callback = Closure::once_into_js(move || {
                let _ = resolve.call0(&JsValue::NULL);
            });

            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms,
            );
        };

        let promise = Promise::new(&mut executor);
        let _ = JsFuture::from(promise).await;
    }
}

/// Spawns on the page's microtask queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

impl Spawner for BrowserSpawner {
    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(future);
    }
}

/// `window.confirm`. Answers "no" outside a page.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPrompt;

impl Prompt for BrowserPrompt {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}
