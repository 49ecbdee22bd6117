use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "manga-hub")]
#[command(about = "Query the aggregated manga catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Newest chapter releases
    Latest(LimitArgs),
    /// Most popular titles across sources
    Popular(LimitArgs),
    /// Search titles by criteria
    Search(SearchArgs),
    /// Detail record of one title
    Details(SourcedArgs),
    /// Chapters of one title
    Chapters(ChaptersArgs),
    /// Page images of one chapter
    Images(SourcedArgs),
    /// Titles tagged with a genre
    Genre(GenreArgs),
    /// Titles similar to one title
    Similar(SimilarArgs),
}

#[derive(clap::Args, Debug)]
pub struct LimitArgs {
    #[arg(long, short, default_value_t = 20)]
    pub limit: usize,
}

#[derive(clap::Args, Debug)]
pub struct SourcedArgs {
    pub id: String,
    /// Source name; unknown names use mangadex
    #[arg(long, short, default_value = "mangadex")]
    pub source: String,
}

#[derive(clap::Args, Debug)]
pub struct ChaptersArgs {
    #[command(flatten)]
    pub target: SourcedArgs,
    /// Print chapters grouped by volume
    #[arg(long)]
    pub by_volume: bool,
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    #[arg(long, short)]
    pub title: Option<String>,
    #[arg(long, short)]
    pub author: Option<String>,
    /// Repeat for several genres
    #[arg(long = "genre", short)]
    pub genres: Vec<String>,
    /// ongoing, completed, hiatus, cancelled, not_published
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, short)]
    pub year: Option<i32>,
    #[arg(long, short, default_value_t = 20)]
    pub limit: usize,
}

#[derive(clap::Args, Debug)]
pub struct GenreArgs {
    pub genre: String,
    #[arg(long, short, default_value_t = 20)]
    pub limit: usize,
}

#[derive(clap::Args, Debug)]
pub struct SimilarArgs {
    #[command(flatten)]
    pub target: SourcedArgs,
    #[arg(long, short, default_value_t = 6)]
    pub limit: usize,
}
