//! HTTP request handlers.

pub mod characters;
pub mod scenes;
pub mod status;

pub use characters::{create_character, delete_character, list_characters, update_character};
pub use scenes::{create_scene, list_scenes};
pub use status::{get_status, health_check, install_dependencies};
