pub mod engine;
pub mod error;
pub mod reader;
pub mod transaction;
pub mod writer;
