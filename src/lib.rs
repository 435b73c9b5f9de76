pub mod config;
pub mod enrich;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod reports;
