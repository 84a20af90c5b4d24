//! Payment widget lifecycle: wait for the modal's container, inject the provider script
//! once, and tear it down when the modal closes.

mod document;
mod host;
mod injector;

pub use document::ModalDocument;
pub use host::{InjectionTarget, WidgetHost};
pub use injector::{inject_once, InjectionGuard, PaymentError, PaymentInjector, TickOutcome};

pub(crate) use injector::lock_host;

use std::time::Duration;

use serde::Serialize;

pub const DEFAULT_SCRIPT_SRC: &str = "https://checkout.razorpay.com/v1/payment-button.js";
pub const DEFAULT_PAYMENT_BUTTON_ID: &str = "pl_QlkHtuQN0e8WZH";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Fixed parameters of the external payment button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentWidgetConfig {
    pub script_src: String,
    pub payment_button_id: String,
    pub poll_interval: Duration,
}

impl Default for PaymentWidgetConfig {
    fn default() -> Self {
        Self {
            script_src: DEFAULT_SCRIPT_SRC.to_string(),
            payment_button_id: DEFAULT_PAYMENT_BUTTON_ID.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// A `<script>` element carrying the payment button identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptNode {
    pub src: String,
    pub payment_button_id: String,
    pub is_async: bool,
}

impl ScriptNode {
    pub fn payment_button(config: &PaymentWidgetConfig) -> Self {
        Self {
            src: config.script_src.clone(),
            payment_button_id: config.payment_button_id.clone(),
            is_async: true,
        }
    }

    pub fn markup(&self) -> String {
        let async_attr = if self.is_async { " async" } else { "" };
        format!(
            r#"<script src="{}" data-payment_button_id="{}"{}></script>"#,
            self.src, self.payment_button_id, async_attr
        )
    }
}
