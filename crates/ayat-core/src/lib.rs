pub mod carousel;
pub mod client;
pub mod config;
pub mod error;
pub mod selector;
pub mod verse;

// Re-export main types for convenience
pub use carousel::Carousel;
pub use client::EditionClient;
pub use config::{Config, EditionSource};
pub use error::EditionError;
pub use selector::{RandomSource, SeededRandom, ThreadRandom, VerseWindowSelector};
pub use verse::{AlignedVerseTriple, Editions, LanguageEdition, SelectionWindow, VerseRecord};
