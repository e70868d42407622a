//! Notifiers
//!
//! The consumer side of the monitor loop.

use async_trait::async_trait;
use tracing::{error, info};

use crate::deals::Deal;
use crate::error::Result;

// == Notifier Trait ==
/// Publishes deals and status messages to a channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publishes one deal. An `Err` means nothing was delivered.
    async fn post_deal(&self, deal: &Deal) -> Result<()>;

    /// Publishes an operational status message.
    async fn send_status(&self, message: &str, is_error: bool) -> Result<()>;
}

// == Log Notifier ==
/// Writes every notification to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn post_deal(&self, deal: &Deal) -> Result<()> {
        info!(
            asin = %deal.asin,
            title = %deal.title,
            price = deal.current_price,
            average = deal.average_price,
            discount = %format!("{:.1}%", deal.discount_percent),
            savings = deal.savings(),
            availability = %deal.availability,
            url = %deal.product_url,
            cart = %deal.cart_url(),
            keepa = %deal.keepa_url(),
            lookup = %deal.lookup_url(),
            graph = %deal.keepa_graph_url(),
            "New deal"
        );
        Ok(())
    }

    async fn send_status(&self, message: &str, is_error: bool) -> Result<()> {
        if is_error {
            error!(status = message, "Monitor status");
        } else {
            info!(status = message, "Monitor status");
        }
        Ok(())
    }
}
