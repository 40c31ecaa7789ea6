//! Recurring list refreshes.
//!
//! One background task per list, each on its own `tokio::time::interval`.
//! The first tick fires immediately and doubles as the initial load. Ticks
//! overlap freely with each other and with user actions; the controller's
//! refresh tickets keep overlapping responses from clobbering newer data.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::storefront::{Resource, Storefront};
use crate::api::StorefrontApi;
use crate::config::PollConfig;

/// Handle to the running refresh tasks.
///
/// Dropping the handle aborts the tasks; [`Poller::shutdown`] stops them
/// cleanly.
pub struct Poller {
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl Poller {
    /// Spawn refresh tasks for products, orders, and customers.
    ///
    /// Customers without an interval are loaded once.
    #[must_use]
    pub fn spawn<A: StorefrontApi>(storefront: &Storefront<A>, config: &PollConfig) -> Self {
        let (shutdown, _) = watch::channel(false);

        let schedule = [
            (Resource::Orders, Some(config.orders)),
            (Resource::Products, Some(config.products)),
            (Resource::Customers, config.customers),
        ];

        let tasks = schedule
            .into_iter()
            .map(|(resource, period)| {
                let storefront = storefront.clone();
                let shutdown = shutdown.subscribe();
                match period {
                    Some(period) => tokio::spawn(poll(storefront, resource, period, shutdown)),
                    None => tokio::spawn(async move {
                        let _ = storefront.refresh(resource).await;
                    }),
                }
            })
            .collect();

        info!(
            orders_secs = config.orders.as_secs(),
            products_secs = config.products.as_secs(),
            customers_secs = config.customers.map(|d| d.as_secs()),
            "Poller started"
        );

        Self { shutdown, tasks }
    }

    /// Signal every task to stop and wait for them to finish.
    ///
    /// A refresh already in flight completes first.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        for task in std::mem::take(&mut self.tasks) {
            let _ = task.await;
        }
        info!("Poller stopped");
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

async fn poll<A: StorefrontApi>(
    storefront: Storefront<A>,
    resource: Resource,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Errors are logged and surfaced by the controller
                let outcome = storefront.refresh(resource).await;
                debug!(%resource, ok = outcome.is_ok(), "Scheduled refresh finished");
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}
