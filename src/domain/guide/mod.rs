//! Guide aggregate
//!
//! Guide-specific state attached one-to-one to a GUIDE account: CV,
//! approval, and subscription.

pub mod model;
pub mod repository;

pub use model::{subscription_expiry, GuideProfile};
pub use repository::GuideProfileRepository;
