use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Species category reported by the extraction model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Mammal,
    Bird,
    Reptile,
    Amphibian,
    Fish,
    Insect,
    Arachnid,
    Mollusk,
    Crustacean,
    Plant,
    Fungus,
}

impl Category {
    /// All accepted wire values, in declaration order. Used to build the
    /// extraction schema so the model can only answer inside the enum.
    pub const NAMES: &'static [&'static str] = &[
        "mammal",
        "bird",
        "reptile",
        "amphibian",
        "fish",
        "insect",
        "arachnid",
        "mollusk",
        "crustacean",
        "plant",
        "fungus",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Mammal => "mammal",
            Category::Bird => "bird",
            Category::Reptile => "reptile",
            Category::Amphibian => "amphibian",
            Category::Fish => "fish",
            Category::Insect => "insect",
            Category::Arachnid => "arachnid",
            Category::Mollusk => "mollusk",
            Category::Crustacean => "crustacean",
            Category::Plant => "plant",
            Category::Fungus => "fungus",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "mammal" => Some(Category::Mammal),
            "bird" => Some(Category::Bird),
            "reptile" => Some(Category::Reptile),
            "amphibian" => Some(Category::Amphibian),
            "fish" => Some(Category::Fish),
            "insect" => Some(Category::Insect),
            "arachnid" => Some(Category::Arachnid),
            "mollusk" => Some(Category::Mollusk),
            "crustacean" => Some(Category::Crustacean),
            "plant" => Some(Category::Plant),
            "fungus" => Some(Category::Fungus),
            _ => None,
        }
    }
}

/// Habitat biome reported by the extraction model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    Forest,
    Jungle,
    Desert,
    Savanna,
    Grassland,
    Wetland,
    Mountain,
    Tundra,
    Marine,
}

impl Biome {
    pub const NAMES: &'static [&'static str] = &[
        "forest", "jungle", "desert", "savanna", "grassland", "wetland", "mountain", "tundra",
        "marine",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Biome::Forest => "forest",
            Biome::Jungle => "jungle",
            Biome::Desert => "desert",
            Biome::Savanna => "savanna",
            Biome::Grassland => "grassland",
            Biome::Wetland => "wetland",
            Biome::Mountain => "mountain",
            Biome::Tundra => "tundra",
            Biome::Marine => "marine",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "forest" => Some(Biome::Forest),
            "jungle" => Some(Biome::Jungle),
            "desert" => Some(Biome::Desert),
            "savanna" => Some(Biome::Savanna),
            "grassland" => Some(Biome::Grassland),
            "wetland" => Some(Biome::Wetland),
            "mountain" => Some(Biome::Mountain),
            "tundra" => Some(Biome::Tundra),
            "marine" => Some(Biome::Marine),
            _ => None,
        }
    }
}

/// Encounter rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub const NAMES: &'static [&'static str] = &["common", "uncommon", "rare", "legendary"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "common" => Some(Rarity::Common),
            "uncommon" => Some(Rarity::Uncommon),
            "rare" => Some(Rarity::Rare),
            "legendary" => Some(Rarity::Legendary),
            _ => None,
        }
    }
}

/// What the user captured: a photo or a free-text description.
///
/// Exactly one of the two exists by construction; the "both present" and
/// "both absent" states of the wire format are rejected at the HTTP
/// boundary before a request reaches the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanInput {
    /// Base64-encoded photo bytes plus the sniffed media type.
    Photo { base64: String, media_type: String },
    /// Free-text description of the sighted organism.
    Description(String),
}

/// One scan submission. Ephemeral; lives for the duration of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    pub input: ScanInput,
    pub latitude: f64,
    pub longitude: f64,
}

/// Naturalistic metadata extracted by the vision model.
///
/// Produced once per unique (common_name, continent) pair and immutable
/// afterwards. The fixed-size `traits` array makes "exactly four traits" a
/// deserialization-level guarantee rather than a runtime check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesMetadata {
    pub common_name: String,
    pub scientific_name: String,
    pub category: Category,
    pub biome: Biome,
    pub continent: String,
    pub traits: [String; 4],
    pub average_size: String,
    pub life_expectancy: String,
    pub professional_description: String,
    pub rarity: Rarity,
}

/// A persisted collectible card: metadata plus the two generated images.
///
/// Keyed by the derived id (see [`crate::ident::card_id`]); written once on
/// the first successful scan of a species/continent pair and never mutated,
/// only re-upserted with identical intent by racing writers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: String,
    pub metadata: SpeciesMetadata,
    pub background_png: Vec<u8>,
    pub subject_png: Vec<u8>,
    pub html_card: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names_match_as_str() {
        for (value, name) in [Category::Mammal, Category::Fungus]
            .iter()
            .zip(["mammal", "fungus"])
        {
            assert_eq!(value.as_str(), name);
            let json = serde_json::to_string(value).unwrap();
            assert_eq!(json, format!("\"{}\"", name));
        }
    }

    #[test]
    fn test_enum_name_lists_are_complete() {
        assert_eq!(Category::NAMES.len(), 11);
        assert_eq!(Biome::NAMES.len(), 9);
        assert_eq!(Rarity::NAMES.len(), 4);

        // Every published name must round-trip through serde.
        for name in Category::NAMES {
            let parsed: Category = serde_json::from_str(&format!("\"{}\"", name)).unwrap();
            assert_eq!(parsed.as_str(), *name);
            assert_eq!(Category::from_str(name), Some(parsed));
        }
        for name in Biome::NAMES {
            let parsed: Biome = serde_json::from_str(&format!("\"{}\"", name)).unwrap();
            assert_eq!(parsed.as_str(), *name);
            assert_eq!(Biome::from_str(name), Some(parsed));
        }
        for name in Rarity::NAMES {
            let parsed: Rarity = serde_json::from_str(&format!("\"{}\"", name)).unwrap();
            assert_eq!(parsed.as_str(), *name);
            assert_eq!(Rarity::from_str(name), Some(parsed));
        }
    }

    #[test]
    fn test_out_of_enum_value_is_rejected() {
        let result: Result<Biome, _> = serde_json::from_str("\"volcano\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_traits_must_be_exactly_four() {
        let result: Result<[String; 4], _> = serde_json::from_str(r#"["a", "b", "c"]"#);
        assert!(result.is_err());

        let ok: [String; 4] = serde_json::from_str(r#"["a", "b", "c", "d"]"#).unwrap();
        assert_eq!(ok.len(), 4);
    }
}
