//! CLI command handlers.

pub mod forms;
pub mod info;
pub mod merge;
pub mod settings;
pub mod validate;

pub use forms::run_forms;
pub use info::run_info;
pub use merge::run_merge;
pub use settings::{SettingsEncoding, run_settings_schema, run_settings_show};
pub use validate::run_validate;
