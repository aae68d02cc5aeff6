pub mod app;
pub mod db;
pub mod env;
pub mod server;
pub mod web;
