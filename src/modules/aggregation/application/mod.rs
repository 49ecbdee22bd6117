pub mod manga_aggregator;

pub use manga_aggregator::MangaAggregator;
