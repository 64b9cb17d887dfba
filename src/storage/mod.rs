pub mod memory;
pub mod repository;
pub mod sqlite;

pub use memory::InMemoryPokemonRepository;
pub use repository::{PokemonRepository, RepositoryError};
pub use sqlite::SqlitePokemonRepository;
