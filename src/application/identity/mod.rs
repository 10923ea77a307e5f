//! Identity module: accounts, login and server-side sessions

pub mod service;

pub use service::{IdentityService, LoginOutcome, Registration};
