//! Deal Monitor Task
//!
//! Polls the deal source, filters by discount, consults the dedup cache and
//! posts what is new.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::cache::DedupCache;
use crate::config::Config;
use crate::deals::{DealSource, Notifier};
use crate::error::Result;

/// Timing and filter parameters for the monitor loop.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// Minimum discount (percent) for a deal to be posted
    pub min_discount: f64,
    /// Pause after each successful post
    pub post_delay: Duration,
    /// Pause between cycles
    pub scan_interval: Duration,
    /// Pause after a failed cycle when the source restarted cleanly
    pub retry_delay: Duration,
    /// Pause after a failed cycle when the source restart also failed
    pub restart_failure_delay: Duration,
    /// Pause before the first cycle
    pub startup_delay: Duration,
}

impl MonitorSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_discount: config.min_discount,
            post_delay: Duration::from_secs(config.post_delay),
            scan_interval: Duration::from_secs(config.scan_interval),
            retry_delay: Duration::from_secs(config.retry_delay),
            restart_failure_delay: Duration::from_secs(config.retry_delay.saturating_mul(2)),
            startup_delay: Duration::from_secs(config.startup_delay),
        }
    }
}

/// Outcome of one scan cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Records returned by the source
    pub fetched: usize,
    /// Valid records at or above the discount threshold
    pub qualifying: usize,
    /// Deals delivered and recorded in the cache
    pub posted: usize,
    /// Deals suppressed because they were already cached
    pub skipped: usize,
    /// Deals whose delivery failed; they stay eligible next cycle
    pub failed: usize,
}

/// Producer/consumer loop around the dedup cache.
#[derive(Clone)]
pub struct Monitor {
    source: Arc<dyn DealSource>,
    notifier: Arc<dyn Notifier>,
    cache: Arc<DedupCache>,
    settings: MonitorSettings,
}

impl Monitor {
    pub fn new(
        source: Arc<dyn DealSource>,
        notifier: Arc<dyn Notifier>,
        cache: Arc<DedupCache>,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            source,
            notifier,
            cache,
            settings,
        }
    }

    pub fn cache(&self) -> &Arc<DedupCache> {
        &self.cache
    }

    /// Runs a single scan cycle.
    ///
    /// An id is inserted into the cache only after its notification was
    /// delivered, so a failed post is retried on the next cycle. Returns an
    /// error only when the source itself fails.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        info!("Starting scan cycle");

        let raw = self.source.fetch_deals().await?;
        let mut report = CycleReport {
            fetched: raw.len(),
            ..CycleReport::default()
        };

        let deals: Vec<_> = raw
            .into_iter()
            .filter_map(|deal| deal.normalize())
            .filter(|deal| deal.qualifies(self.settings.min_discount))
            .collect();
        report.qualifying = deals.len();

        for deal in &deals {
            if self.cache.contains(&deal.asin) {
                debug!(asin = %deal.asin, "Skipping cached deal");
                report.skipped += 1;
                continue;
            }

            match self.notifier.post_deal(deal).await {
                Ok(()) => {
                    self.cache.insert(&deal.asin);
                    report.posted += 1;
                    info!(
                        asin = %deal.asin,
                        discount = %format!("{:.1}%", deal.discount_percent),
                        "Posted new deal"
                    );
                    tokio::time::sleep(self.settings.post_delay).await;
                }
                Err(err) => {
                    error!(asin = %deal.asin, error = %err, "Failed to post deal");
                    report.failed += 1;
                }
            }
        }

        let stats = self.cache.stats();
        info!(
            fetched = report.fetched,
            qualifying = report.qualifying,
            posted = report.posted,
            skipped = report.skipped,
            failed = report.failed,
            "Scan cycle complete"
        );
        debug!(
            cached = stats.total_entries,
            window_hours = stats.window_hours(),
            hit_rate = stats.hit_rate(),
            "Dedup cache stats"
        );

        Ok(report)
    }

    /// Runs cycles until the task is aborted.
    pub async fn run(&self) {
        tokio::time::sleep(self.settings.startup_delay).await;

        if let Err(err) = self
            .notifier
            .send_status("Deal monitor is online and scanning for deals", false)
            .await
        {
            warn!(error = %err, "Failed to send startup status");
        }

        loop {
            let wait = match self.run_cycle().await {
                Ok(_) => self.settings.scan_interval,
                Err(err) => {
                    error!(error = %err, "Scan cycle failed");
                    self.recover().await
                }
            };

            info!(seconds = wait.as_secs(), "Waiting until next scan");
            tokio::time::sleep(wait).await;
        }
    }

    // Restarts the source and picks the back-off for the next attempt.
    async fn recover(&self) -> Duration {
        info!("Attempting to restart deal source");
        match self.source.restart().await {
            Ok(()) => self.settings.retry_delay,
            Err(err) => {
                error!(error = %err, "Failed to restart deal source");
                self.settings.restart_failure_delay
            }
        }
    }
}

/// Spawns the monitor loop on the runtime.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_monitor_task(monitor: Monitor) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            interval_secs = monitor.settings.scan_interval.as_secs(),
            min_discount = monitor.settings.min_discount,
            "Starting deal monitor"
        );
        monitor.run().await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deals::Deal;
    use crate::error::MonitorError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn deal(asin: &str, discount: f64) -> Deal {
        Deal {
            asin: asin.to_string(),
            title: format!("Product {}", asin),
            current_price: 10.0,
            average_price: 20.0,
            discount_percent: discount,
            product_url: String::new(),
            image_url: String::new(),
            availability: "In Stock".to_string(),
        }
    }

    struct FixedSource(Vec<Deal>);

    #[async_trait]
    impl DealSource for FixedSource {
        async fn fetch_deals(&self) -> Result<Vec<Deal>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource {
        restarts: AtomicUsize,
    }

    #[async_trait]
    impl DealSource for FailingSource {
        async fn fetch_deals(&self) -> Result<Vec<Deal>> {
            Err(MonitorError::Source("page structure changed".to_string()))
        }

        async fn restart(&self) -> Result<()> {
            self.restarts.fetch_add(1, Ordering::SeqCst);
            Err(MonitorError::Source("browser crashed".to_string()))
        }
    }

    /// Records posted ASINs; rejects any ASIN listed in `reject`.
    #[derive(Default)]
    struct RecordingNotifier {
        posted: Mutex<Vec<String>>,
        reject: Vec<String>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn post_deal(&self, deal: &Deal) -> Result<()> {
            if self.reject.contains(&deal.asin) {
                return Err(MonitorError::Notify("rate limited".to_string()));
            }
            self.posted.lock().unwrap().push(deal.asin.clone());
            Ok(())
        }

        async fn send_status(&self, _message: &str, _is_error: bool) -> Result<()> {
            Ok(())
        }
    }

    fn quiet_settings() -> MonitorSettings {
        MonitorSettings {
            min_discount: 40.0,
            post_delay: Duration::ZERO,
            scan_interval: Duration::ZERO,
            retry_delay: Duration::ZERO,
            restart_failure_delay: Duration::ZERO,
            startup_delay: Duration::ZERO,
        }
    }

    fn monitor_with(
        deals: Vec<Deal>,
        notifier: Arc<RecordingNotifier>,
    ) -> Monitor {
        Monitor::new(
            Arc::new(FixedSource(deals)),
            notifier,
            Arc::new(DedupCache::with_window_hours(24)),
            quiet_settings(),
        )
    }

    #[test]
    fn test_settings_from_config() {
        let settings = MonitorSettings::from_config(&Config::default());
        assert_eq!(settings.scan_interval, Duration::from_secs(300));
        assert_eq!(settings.retry_delay, Duration::from_secs(30));
        assert_eq!(settings.restart_failure_delay, Duration::from_secs(60));
        assert_eq!(settings.startup_delay, Duration::from_secs(10));

        let config = Config {
            retry_delay: u64::MAX,
            ..Config::default()
        };
        let settings = MonitorSettings::from_config(&config);
        assert_eq!(settings.restart_failure_delay, Duration::from_secs(u64::MAX));
        assert!(settings.restart_failure_delay >= settings.retry_delay);
    }

    #[tokio::test]
    async fn test_cycle_posts_each_deal_once() {
        let notifier = Arc::new(RecordingNotifier::default());
        let monitor = monitor_with(vec![deal("A", 50.0), deal("B", 60.0)], notifier.clone());

        let first = monitor.run_cycle().await.unwrap();
        let second = monitor.run_cycle().await.unwrap();

        assert_eq!(first.posted, 2);
        assert_eq!(second.posted, 0);
        assert_eq!(second.skipped, 2);
        assert_eq!(*notifier.posted.lock().unwrap(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_cycle_filters_by_discount_and_validity() {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut untitled = deal("C", 90.0);
        untitled.title = String::new();
        let monitor = monitor_with(
            vec![deal("A", 39.9), deal("B", 40.0), untitled],
            notifier.clone(),
        );

        let report = monitor.run_cycle().await.unwrap();

        assert_eq!(report.fetched, 3);
        assert_eq!(report.qualifying, 1);
        assert_eq!(*notifier.posted.lock().unwrap(), vec!["B"]);
    }

    #[tokio::test]
    async fn test_failed_post_is_not_cached() {
        let notifier = Arc::new(RecordingNotifier {
            reject: vec!["A".to_string()],
            ..RecordingNotifier::default()
        });
        let monitor = monitor_with(vec![deal("A", 50.0)], notifier);

        let report = monitor.run_cycle().await.unwrap();

        assert_eq!(report.failed, 1);
        assert!(!monitor.cache().contains("A"));
    }

    #[tokio::test]
    async fn test_duplicate_in_same_batch_posted_once() {
        let notifier = Arc::new(RecordingNotifier::default());
        let monitor = monitor_with(vec![deal("A", 50.0), deal("A", 50.0)], notifier.clone());

        let report = monitor.run_cycle().await.unwrap();

        assert_eq!(report.posted, 1);
        assert_eq!(report.skipped, 1);
    }

    #[tokio::test]
    async fn test_source_failure_surfaces_and_recovers() {
        let source = Arc::new(FailingSource {
            restarts: AtomicUsize::new(0),
        });
        let monitor = Monitor::new(
            source.clone(),
            Arc::new(RecordingNotifier::default()),
            Arc::new(DedupCache::default()),
            MonitorSettings {
                restart_failure_delay: Duration::from_secs(60),
                ..quiet_settings()
            },
        );

        assert!(matches!(monitor.run_cycle().await, Err(MonitorError::Source(_))));
        assert_eq!(monitor.recover().await, Duration::from_secs(60));
        assert_eq!(source.restarts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_spawned_task_can_be_aborted() {
        let notifier = Arc::new(RecordingNotifier::default());
        let monitor = Monitor::new(
            Arc::new(FixedSource(vec![deal("A", 50.0)])),
            notifier.clone(),
            Arc::new(DedupCache::default()),
            MonitorSettings {
                scan_interval: Duration::from_secs(3600),
                ..quiet_settings()
            },
        );

        let handle = spawn_monitor_task(monitor);
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(handle.is_finished(), "Task should be finished after abort");
        assert_eq!(*notifier.posted.lock().unwrap(), vec!["A"]);
    }
}
