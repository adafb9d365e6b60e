pub mod crawl_cmd;
pub mod settings_cmd;
pub mod status_cmd;
