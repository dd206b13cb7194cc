mod client;
mod models;

pub use client::{DiscogsClient, DiscogsClientBuilder, DEFAULT_PAGE_SIZE};
