pub mod analytics;
pub mod demo_feed;
pub mod gateway;
pub mod http_client;
pub mod orchestrator;
pub mod present;
pub mod provider;
pub mod state;
