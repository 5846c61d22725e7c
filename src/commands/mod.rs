pub mod dir;
pub mod legend;
pub mod list;

pub use dir::execute_dir;
pub use legend::execute_legend;
pub use list::execute_list;

use crate::core::{config::Settings, store::PathStore};

/// Everything a command needs besides its own arguments
#[derive(Debug, Clone)]
pub struct CommandOptions {
    pub settings: Settings,
    pub store: PathStore,
}
