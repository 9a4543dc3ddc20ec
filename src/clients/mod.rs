/// Artwork download and decode
pub mod artwork;
/// Music records and the search response decoder
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// iTunes Search API client
pub mod itunes;

pub use artwork::ArtworkLoader;
pub use itunes::{ItunesClient, MusicSearch};
