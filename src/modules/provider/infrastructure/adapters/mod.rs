pub mod comicvine;
pub mod common;
pub mod jikan;
pub mod kitsu;
pub mod mangadex;
pub mod myanimelist;
pub mod registry;

pub use comicvine::ComicVineAdapter;
pub use jikan::JikanAdapter;
pub use kitsu::KitsuAdapter;
pub use mangadex::MangaDexAdapter;
pub use myanimelist::MyAnimeListAdapter;
pub use registry::AdapterRegistry;
