//! Database entities module

pub mod guide;
pub mod notification;
pub mod plan;
pub mod region;
pub mod tourist;
pub mod user;

pub use guide::Entity as Guide;
pub use notification::Entity as Notification;
pub use plan::Entity as Plan;
pub use region::Entity as Region;
pub use tourist::Entity as Tourist;
pub use user::Entity as User;
