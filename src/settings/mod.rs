//! The settings page where users change their name and profile picture.

mod page;
mod profile;
mod update;

pub use page::get_settings_page;
pub use profile::{ImageUpload, ProfileForm, initials};
pub use update::{SettingsState, update_profile_endpoint};
