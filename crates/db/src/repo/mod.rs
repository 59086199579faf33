pub mod preferences;
pub mod settings;
