//! Credential and session-token primitives

pub mod password;
pub mod session_token;
