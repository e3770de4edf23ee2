//! Poll loop
//!
//! Fetches once at startup and then once per `pull_period`. Every cycle
//! produces exactly one [`Reading`]; failures are logged and delivered as
//! grey readings, never retried early.

use crate::config::Config;
use crate::domain::FetchError;
use crate::prometheus::MetricsClient;
use crate::reading::Reading;
use chrono::Local;
use log::{debug, error, info, warn};
use std::future::Future;

/// Why [`Poller::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The stop future resolved (display exited)
    Stopped,
    /// The reading consumer went away
    ConsumerGone,
}

pub struct Poller {
    config: Config,
    /// Built on first use; rebuilt next cycle if construction failed
    client: Option<MetricsClient>,
}

impl Poller {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config, client: None }
    }

    fn client(&mut self) -> Result<&MetricsClient, FetchError> {
        let client = match self.client.take() {
            Some(client) => client,
            None => {
                let client = MetricsClient::new(&self.config)?;
                info!("Querying {}", client.query_url());
                client
            }
        };
        Ok(self.client.insert(client))
    }

    /// Run one fetch and turn its outcome into a reading.
    pub async fn poll_once(&mut self) -> Reading {
        let outcome = match self.client() {
            Ok(client) => client.fetch_percentage().await,
            Err(e) => Err(e),
        };

        match &outcome {
            Ok(percentage) => debug!("Fetched {} = {percentage}%", self.config.metric_name),
            // Stays broken until the environment changes
            Err(e) if e.is_configuration() => error!("Error getting carbon metric: {e}"),
            Err(e) => warn!("Error getting carbon metric: {e}"),
        }

        Reading::from_outcome(outcome, Local::now())
    }

    /// Poll until `stop` resolves or `deliver` reports the consumer is gone.
    ///
    /// `deliver` returns `false` when the reading could not be handed over.
    pub async fn run<F, S>(mut self, mut deliver: F, stop: S) -> StopReason
    where
        F: FnMut(Reading) -> bool,
        S: Future<Output = ()>,
    {
        tokio::pin!(stop);
        let period = self.config.pull_period;

        loop {
            let reading = tokio::select! {
                biased;
                () = &mut stop => return StopReason::Stopped,
                reading = self.poll_once() => reading,
            };

            if !deliver(reading) {
                return StopReason::ConsumerGone;
            }

            tokio::select! {
                biased;
                () = &mut stop => return StopReason::Stopped,
                () = tokio::time::sleep(period) => {}
            }
        }
    }
}
