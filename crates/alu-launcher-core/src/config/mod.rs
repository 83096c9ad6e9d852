//! Launcher configuration layer.
//!
//! Every environment variable the launcher reads goes through this module;
//! the rest of the workspace consumes the typed structs in `schema`.
//!
//! - `loader`: primary/alias/default lookup chain, `.env` loading
//! - `schema`: `LauncherConfig`, `ObservabilityConfig`
//! - `env_keys`: key constants and their aliases

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::load_dotenv_from_dir;
pub use schema::{LauncherConfig, ObservabilityConfig};
