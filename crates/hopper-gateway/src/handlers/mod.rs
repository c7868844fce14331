mod health;
mod url;

pub use health::health_handler;
pub use self::url::{create_url_handler, get_stats_handler, redirect_handler};
