pub mod auth;
pub mod dashboard;
pub mod data;
pub mod flash;
pub mod models;
pub mod router;
pub mod session;
pub mod state;
pub mod templates;

pub use state::AppState;
pub use templates::{escape_html, escape_script_json, render_login_register_page};
