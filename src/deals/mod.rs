//! Deals Module
//!
//! The deal record and the seams around the dedup cache: a [`DealSource`]
//! that yields deals and a [`Notifier`] that publishes them.

mod deal;
mod notifier;
mod source;

pub use deal::{Deal, MAX_TITLE_CHARS};
pub use notifier::{LogNotifier, Notifier};
pub use source::{DealSource, JsonFileSource};
