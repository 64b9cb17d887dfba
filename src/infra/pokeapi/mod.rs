pub mod client;

pub use client::{PokeApiClient, PokeApiConfigError};
