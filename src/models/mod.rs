pub mod sector;
pub mod settings;
