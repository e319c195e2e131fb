pub mod ai;
pub mod error;
pub mod extract;
pub mod ident;
pub mod prompts;
pub mod scan;
pub mod store;
pub mod style;
pub mod synth;
pub mod types;

pub use error::{AiError, ExtractError, ScanError, StoreError, SynthError};
pub use extract::{extract_species, Extraction};
pub use ident::{card_id, slugify};
pub use scan::{analyze_scan, ScanOutcome};
pub use store::{CardStore, MemoryStore};
pub use style::continent_style;
pub use synth::{generate_card_art, CardArt};
pub use types::{Biome, CardRecord, Category, Rarity, ScanInput, ScanRequest, SpeciesMetadata};
