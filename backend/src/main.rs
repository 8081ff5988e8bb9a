//! Command-line front end for the reading-list core.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use reader::domain::{
    BookUpdateService, CatalogItem, CatalogItemId, CatalogSearchService, Rating,
    ReadingListService,
};
use reader::outbound::{GoogleBooksHttpSource, InMemoryBookStore, StaticIdentityProvider};
use reader::settings::ReaderSettings;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `reader` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "reader",
    about = "Search the book catalog and track reading progress",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search the catalog by free text.
    Search {
        /// Query text.
        query: String,
    },
    /// Show one catalog volume.
    Details {
        /// Catalog volume id.
        id: String,
    },
    /// Save a volume to an in-memory list, start reading it and print the views.
    Track {
        /// Catalog volume id.
        id: String,
        /// Star rating to record, 0 to 5.
        #[arg(long, default_value_t = 0)]
        rating: u8,
        /// Notes to record.
        #[arg(long, default_value = "")]
        notes: String,
        /// Mark the book finished as well as started.
        #[arg(long)]
        finished: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = ReaderSettings::load_from_iter([OsString::from("reader")])
        .wrap_err("failed to load reader settings")?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(run(args.command, settings))
}

async fn run(command: Command, settings: ReaderSettings) -> Result<()> {
    let catalog = Arc::new(
        GoogleBooksHttpSource::new(
            settings.catalog_base_url()?,
            settings.request_timeout(),
            settings.api_key.clone(),
        )
        .wrap_err("failed to build catalog client")?,
    );
    let search = CatalogSearchService::new(catalog);

    match command {
        Command::Search { query } => {
            let items = search.search(&query).await?;
            for item in &items {
                print_item(item);
            }
        }
        Command::Details { id } => {
            let item = search.details(&CatalogItemId::new(&id)?).await?;
            print_item(&item);
            println!("description={}", item.volume.description);
        }
        Command::Track {
            id,
            rating,
            notes,
            finished,
        } => {
            let identity = settings
                .identity()?
                .ok_or_else(|| eyre!("set READER_USER_ID to track books"))?;
            let item = search.details(&CatalogItemId::new(&id)?).await?;

            let store = Arc::new(InMemoryBookStore::new());
            let list = ReadingListService::new(
                Arc::clone(&store),
                Arc::new(StaticIdentityProvider::signed_in(identity)),
            );
            let updates = BookUpdateService::new(store, Arc::new(DefaultClock));

            list.save(&item).await?;
            let mut session = list.open_for_update(&item.id).await?;
            session.set_notes(notes)?;
            session.set_rating(Rating::new(rating)?)?;
            session.start_reading()?;
            if finished {
                session.finish_reading()?;
            }
            updates.submit(&mut session).await?;

            let reading_list = list.load().await?;
            println!("{}", serde_json::to_string(&reading_list.stats())?);
        }
    }
    Ok(())
}

fn print_item(item: &CatalogItem) {
    println!(
        "{id}\t{title}\t{authors}\t{cover}",
        id = item.id,
        title = item.volume.title,
        authors = item.volume.authors.join(", "),
        cover = item.cover_url(),
    );
}
