use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use super::host::WidgetHost;
use super::{PaymentWidgetConfig, ScriptNode};

/// What a single polling tick observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    ContainerMissing,
    AlreadyInjected,
    Injected,
}

impl TickOutcome {
    /// Whether polling can stop.
    pub fn settled(self) -> bool {
        !matches!(self, TickOutcome::ContainerMissing)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment widget polling requires a running tokio runtime")]
    RuntimeUnavailable,
}

/// One injection attempt: wait for the container, skip if a tagged script is already
/// there, otherwise append exactly one.
pub fn inject_once<H>(host: &mut H, config: &PaymentWidgetConfig) -> TickOutcome
where
    H: WidgetHost + ?Sized,
{
    let Some(target) = host.injection_target() else {
        return TickOutcome::ContainerMissing;
    };

    if host.contains_script(&config.payment_button_id) {
        return TickOutcome::AlreadyInjected;
    }

    host.append_script(target, ScriptNode::payment_button(config));
    TickOutcome::Injected
}

pub(crate) fn lock_host<H>(host: &Mutex<H>) -> MutexGuard<'_, H> {
    host.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn poll_container<H: WidgetHost>(
    host: Arc<Mutex<H>>,
    config: PaymentWidgetConfig,
    cancelled: Arc<AtomicBool>,
) {
    let period = config.poll_interval.max(Duration::from_millis(1));
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks: u32 = 0;

    loop {
        ticker.tick().await;
        ticks += 1;

        // The flag is read under the host lock so teardown and a tick never interleave.
        let outcome = {
            let mut guard = lock_host(&host);
            if cancelled.load(Ordering::Acquire) {
                None
            } else {
                Some(inject_once(&mut *guard, &config))
            }
        };

        match outcome {
            None => {
                debug!(ticks, "payment widget polling cancelled");
                return;
            }
            Some(TickOutcome::ContainerMissing) => {
                debug!(ticks, "payment container not mounted yet");
            }
            Some(outcome) => {
                info!(ticks, ?outcome, "payment widget ready");
                return;
            }
        }
    }
}

/// Scoped ownership of one modal opening. Dropping it cancels polling and clears the
/// container, whichever way the modal goes away.
pub struct InjectionGuard<H: WidgetHost> {
    host: Arc<Mutex<H>>,
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl<H: WidgetHost> InjectionGuard<H> {
    fn start(runtime: &Handle, host: Arc<Mutex<H>>, config: PaymentWidgetConfig) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let task = runtime.spawn(poll_container(host.clone(), config, cancelled.clone()));
        Self {
            host,
            cancelled,
            task,
        }
    }

    pub fn is_polling(&self) -> bool {
        !self.task.is_finished()
    }
}

impl<H: WidgetHost> Drop for InjectionGuard<H> {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        self.task.abort();
        lock_host(&self.host).reset_container();
        debug!("payment widget torn down");
    }
}

/// Follows payment modal visibility: opening starts a poll, closing drops the guard.
pub struct PaymentInjector<H: WidgetHost> {
    host: Arc<Mutex<H>>,
    config: PaymentWidgetConfig,
    active: Option<InjectionGuard<H>>,
}

impl<H: WidgetHost> PaymentInjector<H> {
    pub fn new(host: Arc<Mutex<H>>, config: PaymentWidgetConfig) -> Self {
        Self {
            host,
            config,
            active: None,
        }
    }

    pub fn host(&self) -> &Arc<Mutex<H>> {
        &self.host
    }

    pub fn config(&self) -> &PaymentWidgetConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn is_polling(&self) -> bool {
        self.active.as_ref().is_some_and(InjectionGuard::is_polling)
    }

    /// Applies the modal visibility flag; the flag is the only cancellation signal.
    pub fn sync(&mut self, visible: bool) -> Result<(), PaymentError> {
        if visible {
            self.open().map(|_| ())
        } else {
            self.close();
            Ok(())
        }
    }

    /// Starts polling unless this opening already has a guard. Returns whether a new poll
    /// was started.
    pub fn open(&mut self) -> Result<bool, PaymentError> {
        if self.active.is_some() {
            return Ok(false);
        }

        let runtime = Handle::try_current().map_err(|_| PaymentError::RuntimeUnavailable)?;
        self.active = Some(InjectionGuard::start(
            &runtime,
            self.host.clone(),
            self.config.clone(),
        ));
        debug!(
            interval_ms = self.config.poll_interval.as_millis() as u64,
            "payment widget polling started"
        );
        Ok(true)
    }

    pub fn close(&mut self) -> bool {
        self.active.take().is_some()
    }
}
