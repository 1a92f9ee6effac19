//! Services shared by every component of one storefront.

use std::future::Future;
use std::rc::Rc;

use vitrine_core::{EventBus, MessageConfig, SelectorConfig, StorefrontConfig};
use vitrine_data::{CartApi, Transport};
use vitrine_observability::{LogSink, StructuredLogger};

use crate::cart::InFlight;
use crate::dom::Document;
use crate::platform::Platform;
use crate::toast::NotificationPresenter;

pub(crate) struct Runtime {
    pub config: StorefrontConfig,
    pub document: Rc<dyn Document>,
    pub api: CartApi<Rc<dyn Transport>>,
    pub platform: Platform,
    pub bus: EventBus,
    pub toast: NotificationPresenter,
    pub in_flight: InFlight,
    logger: StructuredLogger,
}

impl Runtime {
    pub fn new(
        config: StorefrontConfig,
        document: Rc<dyn Document>,
        transport: Rc<dyn Transport>,
        platform: Platform,
        sink: Rc<dyn LogSink>,
    ) -> Self {
        let api = CartApi::from_config(transport, &config);
        let logger = StructuredLogger::from_config(&config.logging, sink);
        let in_flight = InFlight::new(config.mutations.exclusive);
        Self {
            config,
            document,
            api,
            platform,
            bus: EventBus::new(),
            toast: NotificationPresenter::default(),
            in_flight,
            logger,
        }
    }

    pub fn selectors(&self) -> &SelectorConfig {
        &self.config.selectors
    }

    pub fn messages(&self) -> &MessageConfig {
        &self.config.messages
    }

    /// Logger for one invocation of `component`.
    pub fn logger_for(&self, component: &str) -> StructuredLogger {
        self.logger.clone().with_component(component).for_interaction()
    }

    pub fn spawn(&self, future: impl Future<Output = ()> + 'static) {
        self.platform.spawner.spawn(Box::pin(future));
    }
}
