use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;
use vitadex_core::{Biome, CardRecord, Category, Rarity, SpeciesMetadata};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sessions)]
pub struct NewSession<'a> {
    pub user_id: Uuid,
    pub token_hash: &'a str,
    pub expires_at: DateTime<Utc>,
}

/// One stored card row. Enum-valued columns are Varchar in Postgres and
/// validated on the way back out.
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::cards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Card {
    pub id: String,
    pub owner_id: Uuid,
    pub common_name: String,
    pub scientific_name: String,
    pub category: String,
    pub biome: String,
    pub continent: String,
    pub traits: serde_json::Value,
    pub average_size: String,
    pub life_expectancy: String,
    pub professional_description: String,
    pub rarity: String,
    pub background_png: Vec<u8>,
    pub subject_png: Vec<u8>,
    pub html_card: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Rehydrate the domain record. Fails only on a corrupt row (enum
    /// value or traits array that no current build would have written).
    pub fn into_record(self) -> Result<CardRecord, String> {
        let category = Category::from_str(&self.category)
            .ok_or_else(|| format!("unknown category: {}", self.category))?;
        let biome =
            Biome::from_str(&self.biome).ok_or_else(|| format!("unknown biome: {}", self.biome))?;
        let rarity = Rarity::from_str(&self.rarity)
            .ok_or_else(|| format!("unknown rarity: {}", self.rarity))?;
        let traits: [String; 4] = serde_json::from_value(self.traits)
            .map_err(|e| format!("invalid traits column: {}", e))?;

        Ok(CardRecord {
            id: self.id,
            metadata: SpeciesMetadata {
                common_name: self.common_name,
                scientific_name: self.scientific_name,
                category,
                biome,
                continent: self.continent,
                traits,
                average_size: self.average_size,
                life_expectancy: self.life_expectancy,
                professional_description: self.professional_description,
                rarity,
            },
            background_png: self.background_png,
            subject_png: self.subject_png,
            html_card: self.html_card,
            owner_id: self.owner_id,
            created_at: self.created_at,
        })
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::cards)]
pub struct NewCard<'a> {
    pub id: &'a str,
    pub owner_id: Uuid,
    pub common_name: &'a str,
    pub scientific_name: &'a str,
    pub category: &'a str,
    pub biome: &'a str,
    pub continent: &'a str,
    pub traits: serde_json::Value,
    pub average_size: &'a str,
    pub life_expectancy: &'a str,
    pub professional_description: &'a str,
    pub rarity: &'a str,
    pub background_png: &'a [u8],
    pub subject_png: &'a [u8],
    pub html_card: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

impl<'a> NewCard<'a> {
    pub fn from_record(record: &'a CardRecord) -> Self {
        let metadata = &record.metadata;
        Self {
            id: &record.id,
            owner_id: record.owner_id,
            common_name: &metadata.common_name,
            scientific_name: &metadata.scientific_name,
            category: metadata.category.as_str(),
            biome: metadata.biome.as_str(),
            continent: &metadata.continent,
            traits: serde_json::json!(metadata.traits),
            average_size: &metadata.average_size,
            life_expectancy: &metadata.life_expectancy,
            professional_description: &metadata.professional_description,
            rarity: metadata.rarity.as_str(),
            background_png: &record.background_png,
            subject_png: &record.subject_png,
            html_card: record.html_card.as_deref(),
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CardRecord {
        CardRecord {
            id: "renard-roux_Europe".to_string(),
            metadata: SpeciesMetadata {
                common_name: "Renard roux".to_string(),
                scientific_name: "Vulpes vulpes".to_string(),
                category: Category::Mammal,
                biome: Biome::Forest,
                continent: "Europe".to_string(),
                traits: [
                    "crepuscular".to_string(),
                    "omnivorous".to_string(),
                    "solitary".to_string(),
                    "territorial".to_string(),
                ],
                average_size: "45-90 cm".to_string(),
                life_expectancy: "3-5 years".to_string(),
                professional_description: "An adaptable canid.".to_string(),
                rarity: Rarity::Common,
            },
            background_png: vec![1, 2, 3],
            subject_png: vec![4, 5, 6],
            html_card: Some("<html></html>".to_string()),
            owner_id: Uuid::nil(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_round_trips_through_row_types() {
        let record = record();
        let new_card = NewCard::from_record(&record);
        assert_eq!(new_card.category, "mammal");

        let row = Card {
            id: record.id.clone(),
            owner_id: record.owner_id,
            common_name: record.metadata.common_name.clone(),
            scientific_name: record.metadata.scientific_name.clone(),
            category: new_card.category.to_string(),
            biome: new_card.biome.to_string(),
            continent: record.metadata.continent.clone(),
            traits: new_card.traits.clone(),
            average_size: record.metadata.average_size.clone(),
            life_expectancy: record.metadata.life_expectancy.clone(),
            professional_description: record.metadata.professional_description.clone(),
            rarity: new_card.rarity.to_string(),
            background_png: record.background_png.clone(),
            subject_png: record.subject_png.clone(),
            html_card: record.html_card.clone(),
            created_at: record.created_at,
        };

        let back = row.into_record().unwrap();
        assert_eq!(back.id, record.id);
        assert_eq!(back.metadata.category, Category::Mammal);
        assert_eq!(back.metadata.traits, record.metadata.traits);
    }

    #[test]
    fn test_corrupt_enum_column_is_an_error() {
        let row = Card {
            id: "x_Europe".to_string(),
            owner_id: Uuid::nil(),
            common_name: "x".to_string(),
            scientific_name: "x".to_string(),
            category: "dragon".to_string(),
            biome: "forest".to_string(),
            continent: "Europe".to_string(),
            traits: serde_json::json!(["a", "b", "c", "d"]),
            average_size: "1 m".to_string(),
            life_expectancy: "1 year".to_string(),
            professional_description: "x".to_string(),
            rarity: "common".to_string(),
            background_png: vec![],
            subject_png: vec![],
            html_card: None,
            created_at: Utc::now(),
        };
        assert!(row.into_record().is_err());
    }
}
