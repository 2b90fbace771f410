pub mod analytics;
pub mod auth;
pub mod comments;
pub mod products;
pub mod settings;
