pub mod config;
pub mod pokeapi;
