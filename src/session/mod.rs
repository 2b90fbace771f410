pub mod controller;
pub mod store;

pub use controller::{SessionController, SessionHandle, SessionStatus, DEMO_PASSWORD, DEMO_USERNAME};
pub use store::SessionStore;
