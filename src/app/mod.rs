pub mod pokemon_service;
