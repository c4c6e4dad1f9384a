//! QEats: location-based restaurant discovery.
//!
//! This crate is the restaurant service layer. It turns listing and search
//! requests into calls on the [`qeats_search`] aggregation core:
//!
//! - **Nearby listing**: restaurants around a point, with a serving radius
//!   chosen from the time of day
//! - **Search**: free text matched by restaurant name, attribute, item name
//!   and item attribute, merged into one list
//! - **Concurrent search**: a faster variant over fewer sources that
//!   degrades to an empty result instead of failing
//!
//! Restaurant storage and matching stay behind the
//! [`qeats_search::RestaurantFinder`] trait.

pub mod config;
pub mod error;
pub mod exchanges;
pub mod service;

pub use config::QeatsConfig;
pub use error::{QeatsError, Result};
pub use exchanges::{GetRestaurantsRequest, GetRestaurantsResponse};
pub use service::RestaurantService;
