//! Admin area

pub mod service;

pub use service::{AdminService, AdminStats, PendingGuide};
