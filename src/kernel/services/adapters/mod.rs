//! Service adapters: OS specific implementations.

pub mod settings;

pub use settings::{
    ensure_log_dir, ensure_settings_file, get_log_dir, get_settings_path, load_settings,
    load_settings_from, write_default_settings,
};
