pub mod db;
pub mod draft;
pub mod server;
