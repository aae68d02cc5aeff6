pub mod fallback;
pub mod file_server;
