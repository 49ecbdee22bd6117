mod cli;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use cli::{Cli, Commands};
use manga_hub_lib::modules::aggregation::MangaAggregator;
use manga_hub_lib::modules::library::group_chapters_by_volume;
use manga_hub_lib::modules::provider::domain::{PublicationStatus, SearchCriteria};
use manga_hub_lib::shared::utils::{init_logger, Validator};
use manga_hub_lib::shared::CatalogConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let cli = Cli::parse();
    let config = CatalogConfig::from_env().context("Failed to load configuration")?;
    let aggregator =
        MangaAggregator::from_config(&config).context("Failed to initialize source adapters")?;

    match cli.command {
        Commands::Latest(args) => print_json(&aggregator.get_latest_releases(args.limit).await?),
        Commands::Popular(args) => print_json(&aggregator.get_popular_manga(args.limit).await?),
        Commands::Search(args) => {
            let mut criteria = SearchCriteria {
                title: args.title,
                author: args.author,
                genres: args.genres,
                ..Default::default()
            };
            if let Some(status) = args.status.as_deref() {
                criteria = criteria.with_status(PublicationStatus::from_canonical(status));
            }
            if let Some(year) = args.year {
                Validator::validate_year(year)?;
                criteria = criteria.with_year(year);
            }
            print_json(&aggregator.search_manga(&criteria, args.limit).await?)
        }
        Commands::Details(args) => {
            match aggregator.get_manga_details(&args.id, &args.source).await? {
                Some(detail) => print_json(&detail),
                None => anyhow::bail!("No manga found for '{}' on {}", args.id, args.source),
            }
        }
        Commands::Chapters(args) => {
            let chapters = aggregator
                .get_manga_chapters(&args.target.id, &args.target.source)
                .await?;
            if args.by_volume {
                print_json(&group_chapters_by_volume(&chapters))
            } else {
                print_json(&chapters)
            }
        }
        Commands::Images(args) => {
            print_json(&aggregator.get_chapter_images(&args.id, &args.source).await?)
        }
        Commands::Genre(args) => {
            print_json(&aggregator.get_manga_by_genre(&args.genre, args.limit).await?)
        }
        Commands::Similar(args) => print_json(
            &aggregator
                .get_similar_manga(&args.target.id, &args.target.source, args.limit)
                .await?,
        ),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
