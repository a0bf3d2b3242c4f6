mod cache;
mod config;
mod pipeline;
