mod health;
mod page;
mod url;

pub use health::health_handler;
pub use page::page_handler;
pub use url::{create_url_handler, missing_key_handler, redirect_handler};
