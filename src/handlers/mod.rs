pub mod root;
pub mod health;
pub mod fallback;

pub use root::root_handler;
pub use health::health_handler;
pub use fallback::{method_not_allowed_handler, not_found_handler};
