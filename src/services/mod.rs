pub mod analytics_service;
pub mod comment_service;
pub mod product_service;
pub mod settings_service;

pub use analytics_service::AnalyticsService;
pub use comment_service::CommentService;
pub use product_service::ProductService;
pub use settings_service::SettingsService;
