pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::pokemon_service::PokemonService;
pub use domain::{ExternalPokemon, Pokemon, PokemonLookup, ServiceError};
pub use infra::pokeapi::PokeApiClient;
pub use storage::{InMemoryPokemonRepository, PokemonRepository, SqlitePokemonRepository};
