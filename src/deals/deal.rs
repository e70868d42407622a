//! Deal Model
//!
//! A discounted product as reported by the price tracker, plus the links
//! derived from its ASIN.

use serde::{Deserialize, Serialize};

// == Public Constants ==
/// Titles longer than this are truncated during normalization
pub const MAX_TITLE_CHARS: usize = 200;

fn default_availability() -> String {
    "In Stock".to_string()
}

// == Deal ==
/// A product deal. `asin` is the identifier fed to the dedup cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    /// Amazon Standard Identification Number
    pub asin: String,
    /// Product title
    pub title: String,
    /// Current price in euros
    #[serde(default)]
    pub current_price: f64,
    /// Reference (average) price in euros
    #[serde(default)]
    pub average_price: f64,
    /// Discount relative to the average price, in percent
    #[serde(default)]
    pub discount_percent: f64,
    /// Product page URL
    #[serde(default)]
    pub product_url: String,
    /// Product image URL, may be empty
    #[serde(default)]
    pub image_url: String,
    /// Availability label
    #[serde(default = "default_availability")]
    pub availability: String,
}

impl Deal {
    // == Normalize ==
    /// Cleans up a raw record from the producer.
    ///
    /// Returns `None` when the record has no ASIN or no title. Otherwise the
    /// title is truncated to [`MAX_TITLE_CHARS`], a missing discount is
    /// computed from the two prices and a missing product URL is filled in.
    pub fn normalize(mut self) -> Option<Self> {
        self.asin = self.asin.trim().to_string();
        self.title = self.title.trim().to_string();
        if self.asin.is_empty() || self.title.is_empty() {
            return None;
        }

        if self.title.chars().count() > MAX_TITLE_CHARS {
            self.title = self.title.chars().take(MAX_TITLE_CHARS).collect();
        }

        if self.discount_percent == 0.0 && self.average_price > 0.0 && self.current_price > 0.0 {
            self.discount_percent =
                (self.average_price - self.current_price) / self.average_price * 100.0;
        }

        if self.product_url.is_empty() {
            self.product_url = format!("https://www.amazon.fr/dp/{}", self.asin);
        }

        Some(self)
    }

    /// Returns true if the discount reaches `min_discount` percent.
    pub fn qualifies(&self, min_discount: f64) -> bool {
        self.discount_percent >= min_discount
    }

    /// Amount saved against the average price.
    pub fn savings(&self) -> f64 {
        self.average_price - self.current_price
    }

    // == Derived Links ==
    /// One-click add-to-cart link.
    pub fn cart_url(&self) -> String {
        format!(
            "https://www.amazon.fr/gp/aws/cart/add.html?ASIN.1={}&Quantity.1=1",
            self.asin
        )
    }

    /// Keepa product page.
    pub fn keepa_url(&self) -> String {
        format!("https://keepa.com/#!product/4-{}", self.asin)
    }

    /// Price comparison search.
    pub fn lookup_url(&self) -> String {
        format!("https://www.google.com/search?q={}+price&tbm=shop", self.asin)
    }

    /// Keepa price history graph image.
    pub fn keepa_graph_url(&self) -> String {
        format!(
            "https://graph.keepa.com/pricehistory.png?asin={}&domain=4",
            self.asin
        )
    }
}
