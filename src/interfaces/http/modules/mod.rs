pub mod admin;
pub mod auth;
pub mod catalog;
pub mod guide;
pub mod health;
pub mod metrics;
pub mod notifications;
pub mod request_id;
