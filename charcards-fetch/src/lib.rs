pub mod error;
pub mod fetcher;
pub mod record;

pub use error::FetchError;
pub use fetcher::{CharacterSource, DEFAULT_BASE_URL, Fetcher};
pub use record::{CharacterPage, CharacterRecord, PageInfo};
