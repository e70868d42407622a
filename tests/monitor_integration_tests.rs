//! Integration Tests for the Monitor Loop
//!
//! Drives the monitor against a real deals file and checks what reaches the
//! notifier across cycles and window expiry.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use deal_watch::cache::{DedupCache, ManualClock};
use deal_watch::deals::{Deal, JsonFileSource, Notifier};
use deal_watch::error::Result;
use deal_watch::{Monitor, MonitorSettings};
use tempfile::NamedTempFile;

const FEED: &str = r#"[
    {"asin":"B08L5VR6C3","title":"PlayStation 5 Console","currentPrice":399.99,"averagePrice":549.99,"discountPercent":27.27},
    {"asin":"B09G9FPHY6","title":"Samsung Galaxy S23 Ultra","currentPrice":799.0,"averagePrice":1399.0},
    {"asin":"B0CHXYZ123","title":"LEGO Millennium Falcon","currentPrice":399.99,"averagePrice":849.99,"discountPercent":52.94},
    {"asin":"","title":"Broken row","currentPrice":1.0,"averagePrice":100.0}
]"#;

#[derive(Default)]
struct CollectingNotifier {
    posted: Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for CollectingNotifier {
    async fn post_deal(&self, deal: &Deal) -> Result<()> {
        self.posted.lock().unwrap().push(deal.asin.clone());
        Ok(())
    }

    async fn send_status(&self, _message: &str, _is_error: bool) -> Result<()> {
        Ok(())
    }
}

fn write_feed() -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), FEED).unwrap();
    file
}

fn settings() -> MonitorSettings {
    MonitorSettings {
        min_discount: 40.0,
        post_delay: Duration::ZERO,
        scan_interval: Duration::ZERO,
        retry_delay: Duration::ZERO,
        restart_failure_delay: Duration::ZERO,
        startup_delay: Duration::ZERO,
    }
}

#[tokio::test]
async fn test_deals_reposted_only_after_window() {
    let feed = write_feed();
    let clock = ManualClock::new(1_700_000_000_000);
    let cache = Arc::new(DedupCache::with_clock(
        Duration::from_secs(24 * 3600),
        Arc::new(clock.clone()),
    ));
    let notifier = Arc::new(CollectingNotifier::default());
    let monitor = Monitor::new(
        Arc::new(JsonFileSource::new(feed.path())),
        notifier.clone(),
        Arc::clone(&cache),
        settings(),
    );

    let first = monitor.run_cycle().await.unwrap();
    assert_eq!(first.fetched, 4);
    assert_eq!(first.qualifying, 2);
    assert_eq!(first.posted, 2);

    clock.advance(Duration::from_secs(12 * 3600));
    let second = monitor.run_cycle().await.unwrap();
    assert_eq!(second.posted, 0);
    assert_eq!(second.skipped, 2);

    clock.advance(Duration::from_secs(12 * 3600));
    let third = monitor.run_cycle().await.unwrap();
    assert_eq!(third.posted, 2);

    assert_eq!(
        *notifier.posted.lock().unwrap(),
        vec!["B09G9FPHY6", "B0CHXYZ123", "B09G9FPHY6", "B0CHXYZ123"]
    );
    assert_eq!(cache.stats().total_entries, 2);
}

#[tokio::test]
async fn test_operator_clear_allows_repost() {
    let feed = write_feed();
    let cache = Arc::new(DedupCache::default());
    let notifier = Arc::new(CollectingNotifier::default());
    let monitor = Monitor::new(
        Arc::new(JsonFileSource::new(feed.path())),
        notifier.clone(),
        Arc::clone(&cache),
        settings(),
    );

    monitor.run_cycle().await.unwrap();
    cache.clear();
    let report = monitor.run_cycle().await.unwrap();

    assert_eq!(report.posted, 2);
    assert_eq!(notifier.posted.lock().unwrap().len(), 4);
}

#[tokio::test]
async fn test_empty_feed_file_is_a_quiet_cycle() {
    let feed = NamedTempFile::new().unwrap();
    let monitor = Monitor::new(
        Arc::new(JsonFileSource::new(feed.path())),
        Arc::new(CollectingNotifier::default()),
        Arc::new(DedupCache::default()),
        settings(),
    );

    let report = monitor.run_cycle().await.unwrap();

    assert_eq!(report.fetched, 0);
    assert_eq!(report.posted, 0);
}
