pub mod config;
pub mod fd_limit;
pub mod logger;
pub mod topfiles_toml;

pub use config::*;
pub use fd_limit::{max_open_fds, max_workers_by_fd_limit, walker_threads};
pub use logger::setup_logging;
pub use topfiles_toml::{SettingsSection, TopfilesToml, load_topfiles_toml, parse_topfiles_toml};
