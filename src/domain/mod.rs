//! Pokemon domain: records, validation, error taxonomy and the lookup contract.

pub mod errors;
pub mod lookup;
pub mod pokemon;

pub use errors::{ServiceError, ServiceResult};
pub use lookup::{ExternalPokemon, LookupError, PokemonLookup};
pub use pokemon::{
    CreatePokemon, FieldError, NewPokemon, Pokemon, PokemonChanges, PokemonPatch,
    ValidationErrors,
};
