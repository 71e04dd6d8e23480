pub mod browser;
pub mod clients;
pub mod handlers;
pub mod middleware;
pub mod navigation;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod token_store;
pub mod views;
