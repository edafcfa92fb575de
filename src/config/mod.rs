//! Layered configuration.
//!
//! Tiers, lowest to highest priority:
//! 1. **Defaults** - `Config::default()`
//! 2. **Project** - `./todo-list/config.yaml`
//! 3. **User** - `~/.todo-list/config.yaml`
//! 4. **Environment** - `TODO_LIST_FORMAT`, `TODO_LIST_COUNTDOWN`
//!
//! YAML tiers are merged field by field. Command-line flags are applied on top
//! by the binary.
//!
//! ## Environment Variables
//! - `TODO_LIST_CONFIG_PATH` - Explicit config file (replaces project and user tiers)
//! - `TODO_LIST_PROJECT_DIR` - Project config dir (default: `./todo-list`)
//! - `TODO_LIST_USER_DIR` - User config dir (default: `~/.todo-list`)
//! - `TODO_LIST_FORMAT` - Output format override
//! - `TODO_LIST_COUNTDOWN` - Countdown mode override

mod loader;
mod types;

pub use loader::{ConfigLoader, ConfigPaths, ConfigTier, merge_layer};
pub use types::*;
