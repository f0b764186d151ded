pub mod history;
pub mod models;
pub mod orchestrators;
pub mod ports;
