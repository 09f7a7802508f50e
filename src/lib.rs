pub mod analysis;
pub mod cable;
pub mod catenary;
pub mod document;
pub mod library;
pub mod report;
pub mod span;
pub mod types;
pub mod weather;
pub mod xml;

pub use types::*;
