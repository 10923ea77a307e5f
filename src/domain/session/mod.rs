//! Server-side sessions and the principals they resolve to

pub mod model;
pub mod store;

pub use model::{AdminActor, GuideActor, Principal, Session, TouristActor};
pub use store::SessionStore;
