//! Upstream payloads
//!
//! Only the fields the gateway reads are declared; everything else in the
//! PokeAPI responses is ignored.

use serde::Deserialize;

use crate::types::{PokemonDetails, NO_DESCRIPTION};

#[derive(Debug, Deserialize)]
pub(super) struct PokemonDto {
    pub(super) id: u32,
    pub(super) name: String,
    #[serde(default)]
    pub(super) types: Vec<TypeSlotDto>,
    #[serde(default)]
    pub(super) sprites: SpritesDto,
    pub(super) species: NamedResourceDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct TypeSlotDto {
    #[serde(rename = "type")]
    pub(super) kind: NamedResourceDto,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct SpritesDto {
    pub(super) front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NamedResourceDto {
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) url: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SpeciesDto {
    #[serde(default)]
    pub(super) flavor_text_entries: Vec<FlavorTextDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FlavorTextDto {
    pub(super) flavor_text: String,
    pub(super) language: NamedResourceDto,
}

impl PokemonDto {
    /// Combine with the species payload into the public shape.
    pub(super) fn into_details(
        self,
        species: &SpeciesDto,
        language: &str,
    ) -> Result<PokemonDetails, String> {
        if self.name.is_empty() {
            return Err(format!("pokemon {} has an empty name", self.id));
        }

        let primary_type = self
            .types
            .into_iter()
            .next()
            .map(|slot| slot.kind.name)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| format!("pokemon '{}' lists no types", self.name))?;

        Ok(PokemonDetails {
            id: self.id,
            name: self.name,
            primary_type,
            sprite: self.sprites.front_default,
            description: species.description(language),
        })
    }
}

impl SpeciesDto {
    /// First flavor text in `language`, sanitized, or the fallback sentence.
    pub(super) fn description(&self, language: &str) -> String {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == language)
            .map(|entry| sanitize_flavor_text(&entry.flavor_text))
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string())
    }
}

/// Replace each newline and form feed with a single space.
fn sanitize_flavor_text(raw: &str) -> String {
    raw.chars()
        .map(|c| if matches!(c, '\n' | '\u{000C}') { ' ' } else { c })
        .collect()
}
