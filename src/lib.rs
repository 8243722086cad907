pub mod engine;
pub mod executor;
pub mod planner;
pub mod server;
pub mod storage;
pub mod types;
pub mod utils;
