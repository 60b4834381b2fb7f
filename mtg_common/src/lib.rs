//! Shared MTG types
//!
//! Scryfall card and set models, the async Scryfall client, color identity and
//! format legality types used by the deck tooling.

pub mod client;
pub mod color;
pub mod error;
pub mod legality;
pub mod scryfall;

pub use client::{ScryfallClient, ScryfallConfig, DEFAULT_API_URL};
pub use color::{Color, ColorIdentity};
pub use error::{Result, ScryfallError};
pub use legality::{Legalities, LegalityStatus};
pub use scryfall::{looks_like_set_code, CardFace, ScryfallCard, ScryfallSet, SetCatalog};
