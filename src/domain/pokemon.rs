//! Pokemon record types and the structural validator for incoming payloads.
//!
//! Payloads arrive as untyped JSON. `CreatePokemon::from_payload` and
//! `PokemonPatch::from_payload` turn them into typed values or report every
//! offending field at once.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use utoipa::ToSchema;

/// Maximum number of types a record may carry.
pub const MAX_TYPES: usize = 3;

/// A persisted pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pokemon {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "pikachu")]
    pub name: String,
    #[schema(example = json!(["electric"]))]
    pub types: Vec<String>,
    #[schema(example = 4)]
    pub height: Option<i64>,
    #[schema(example = 60)]
    pub weight: Option<i64>,
    #[schema(example = json!(["static", "lightning-rod"]))]
    pub abilities: Vec<String>,
}

/// A record ready to be inserted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPokemon {
    pub name: String,
    pub types: Vec<String>,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    pub abilities: Vec<String>,
}

/// Partial update handed to the store. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PokemonChanges {
    pub name: Option<String>,
    pub types: Option<Vec<String>>,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    pub abilities: Option<Vec<String>>,
}

impl PokemonChanges {
    /// Applies the changes on top of a stored record.
    pub fn apply_to(self, current: &Pokemon) -> Pokemon {
        Pokemon {
            id: current.id,
            name: self.name.unwrap_or_else(|| current.name.clone()),
            types: self.types.unwrap_or_else(|| current.types.clone()),
            height: self.height.or(current.height),
            weight: self.weight.or(current.weight),
            abilities: self.abilities.unwrap_or_else(|| current.abilities.clone()),
        }
    }
}

/// Validated create input.
///
/// `name` and `types` are required; the remaining fields are fallbacks used
/// only when the external source has no value for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePokemon {
    pub name: String,
    pub types: Vec<String>,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    pub abilities: Option<Vec<String>>,
}

/// Validated update input.
///
/// A field is `Some` only when its key was present in the payload. An explicit
/// empty `abilities` array is kept as `Some(vec![])` and counts as a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PokemonPatch {
    pub name: Option<String>,
    pub types: Option<Vec<String>>,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    pub abilities: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "types")]
    pub field: String,
    #[schema(example = "must contain between 1 and 3 entries")]
    pub message: String,
}

/// Every field-level failure found in one payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl CreatePokemon {
    pub fn from_payload(payload: &JsonValue) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let Some(obj) = as_object(payload, &mut errors) else {
            return Err(errors);
        };

        let name = match obj.get("name") {
            Some(v) => check_name(v, &mut errors),
            None => {
                errors.push("name", "is required");
                None
            }
        };
        let types = match obj.get("types") {
            Some(v) => check_types(v, &mut errors),
            None => {
                errors.push("types", "is required");
                None
            }
        };
        let height = obj
            .get("height")
            .and_then(|v| check_positive("height", v, &mut errors));
        let weight = obj
            .get("weight")
            .and_then(|v| check_positive("weight", v, &mut errors));
        let abilities = obj
            .get("abilities")
            .and_then(|v| check_abilities(v, &mut errors));

        match (name, types) {
            (Some(name), Some(types)) => errors.into_result(CreatePokemon {
                name,
                types,
                height,
                weight,
                abilities,
            }),
            _ => Err(errors),
        }
    }
}

impl PokemonPatch {
    pub fn from_payload(payload: &JsonValue) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let Some(obj) = as_object(payload, &mut errors) else {
            return Err(errors);
        };

        let patch = PokemonPatch {
            name: obj.get("name").and_then(|v| check_name(v, &mut errors)),
            types: obj.get("types").and_then(|v| check_types(v, &mut errors)),
            height: obj
                .get("height")
                .and_then(|v| check_positive("height", v, &mut errors)),
            weight: obj
                .get("weight")
                .and_then(|v| check_positive("weight", v, &mut errors)),
            abilities: obj
                .get("abilities")
                .and_then(|v| check_abilities(v, &mut errors)),
        };
        errors.into_result(patch)
    }
}

fn as_object<'a>(
    payload: &'a JsonValue,
    errors: &mut ValidationErrors,
) -> Option<&'a Map<String, JsonValue>> {
    let obj = payload.as_object();
    if obj.is_none() {
        errors.push("body", "must be a JSON object");
    }
    obj
}

fn check_name(v: &JsonValue, errors: &mut ValidationErrors) -> Option<String> {
    match v.as_str() {
        Some(s) if !s.trim().is_empty() => Some(s.to_string()),
        Some(_) => {
            errors.push("name", "must not be empty");
            None
        }
        None => {
            errors.push("name", "must be a string");
            None
        }
    }
}

fn check_types(v: &JsonValue, errors: &mut ValidationErrors) -> Option<Vec<String>> {
    let types = string_array("types", v, errors)?;
    if types.is_empty() || types.len() > MAX_TYPES {
        errors.push(
            "types",
            format!("must contain between 1 and {} entries", MAX_TYPES),
        );
        return None;
    }
    if types.iter().any(|t| t.is_empty()) {
        errors.push("types", "entries must not be empty");
        return None;
    }
    Some(types)
}

fn check_abilities(v: &JsonValue, errors: &mut ValidationErrors) -> Option<Vec<String>> {
    string_array("abilities", v, errors)
}

/// JSON has a single number type, so `4.0` counts as the integer 4.
fn as_integer(v: &JsonValue) -> Option<i64> {
    v.as_i64().or_else(|| {
        v.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn check_positive(field: &str, v: &JsonValue, errors: &mut ValidationErrors) -> Option<i64> {
    match as_integer(v) {
        Some(n) if n > 0 => Some(n),
        _ => {
            errors.push(field, "must be a positive integer");
            None
        }
    }
}

fn string_array(field: &str, v: &JsonValue, errors: &mut ValidationErrors) -> Option<Vec<String>> {
    let Some(items) = v.as_array() else {
        errors.push(field, "must be an array of strings");
        return None;
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(s) => out.push(s.to_string()),
            None => {
                errors.push(field, "must be an array of strings");
                return None;
            }
        }
    }
    Some(out)
}
