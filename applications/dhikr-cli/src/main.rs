/// Dhikr CLI - catalog maintenance for Dhikr Player
use anyhow::Context;
use clap::{Parser, Subcommand};
use dhikr_catalog::CatalogClient;
use dhikr_cli::{output, AppConfig, CliError};
use dhikr_core::share::{qr_download_name, track_link};
use dhikr_core::{Track, TrackId};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dhikr")]
#[command(about = "Dhikr Player catalog tool", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./dhikr.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every track in the catalog
    Tracks,
    /// List playlists with their tracks
    Playlists,
    /// Show one track
    Track {
        /// Track ID
        id: String,
    },
    /// Print the share link and QR file name for a track
    Share {
        /// Track ID
        id: String,
        /// Web player origin (overrides share.base_url)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Register every audio file in a storage bucket
    Sync {
        /// Storage bucket (overrides sync.bucket)
        #[arg(short, long)]
        bucket: Option<String>,
    },
    /// Register a single uploaded file
    Ingest {
        /// Object name inside the bucket
        name: String,
        /// Storage bucket (overrides sync.bucket)
        #[arg(short, long)]
        bucket: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dhikr_cli=info,dhikr_catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    config.validate()?;
    let client = CatalogClient::new(config.catalog_config())?;
    tracing::debug!(url = client.url(), "Catalog client ready");

    match cli.command {
        Commands::Tracks => list_tracks(&client, cli.json).await?,
        Commands::Playlists => list_playlists(&client, cli.json).await?,
        Commands::Track { id } => show_track(&client, &config, &id, cli.json).await?,
        Commands::Share { id, base_url } => {
            let base_url = base_url
                .or_else(|| config.share.base_url.clone())
                .ok_or(CliError::MissingSetting {
                    key: "share.base_url",
                    env: "DHIKR_SHARE__BASE_URL",
                })?;
            share_track(&client, &base_url, &id, cli.json).await?;
        }
        Commands::Sync { bucket } => {
            let bucket = bucket.unwrap_or_else(|| config.sync.bucket.clone());
            sync_bucket(&client, &bucket, cli.json).await?;
        }
        Commands::Ingest { name, bucket } => {
            let bucket = bucket.unwrap_or_else(|| config.sync.bucket.clone());
            ingest_file(&client, &bucket, &name).await?;
        }
    }

    Ok(())
}

async fn list_tracks(client: &CatalogClient, json: bool) -> anyhow::Result<()> {
    let tracks = client.fetch_tracks().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tracks)?);
        return Ok(());
    }

    for track in &tracks {
        println!("{}", output::track_line(track));
    }
    tracing::info!("{} tracks", tracks.len());
    Ok(())
}

async fn list_playlists(client: &CatalogClient, json: bool) -> anyhow::Result<()> {
    let playlists = client.fetch_playlists().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&playlists)?);
        return Ok(());
    }

    for playlist in &playlists {
        println!("{}", output::playlist_block(playlist));
    }
    tracing::info!("{} playlists", playlists.len());
    Ok(())
}

async fn fetch_existing(client: &CatalogClient, id: &str) -> anyhow::Result<Track> {
    let track = client
        .fetch_track(&TrackId::new(id))
        .await?
        .ok_or_else(|| CliError::TrackNotFound(id.to_string()))?;
    Ok(track)
}

async fn show_track(
    client: &CatalogClient,
    config: &AppConfig,
    id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let track = fetch_existing(client, id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&track)?);
        return Ok(());
    }

    println!("{}", output::track_line(&track));
    if !track.album.is_empty() {
        println!("Album:  {}", track.album);
    }
    match track.direct_link() {
        Some(url) => println!("Audio:  {url}"),
        None => println!("Audio:  (none)"),
    }
    if let Some(base_url) = &config.share.base_url {
        println!("Share:  {}", track_link(base_url, &track.id)?);
    }
    Ok(())
}

async fn share_track(
    client: &CatalogClient,
    base_url: &str,
    id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let track = fetch_existing(client, id).await?;
    let link = track_link(base_url, &track.id)?;
    let qr_file = qr_download_name(&track.title);

    if json {
        let value = serde_json::json!({
            "id": track.id,
            "title": track.title,
            "link": link,
            "qrFile": qr_file,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{link}");
        println!("QR file: {qr_file}");
    }
    Ok(())
}

async fn sync_bucket(client: &CatalogClient, bucket: &str, json: bool) -> anyhow::Result<()> {
    tracing::info!(bucket, "Syncing storage bucket");
    let report = client
        .sync_bucket(bucket)
        .await
        .with_context(|| format!("Failed to sync bucket {bucket}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", output::sync_summary(&report));
    }
    Ok(())
}

async fn ingest_file(client: &CatalogClient, bucket: &str, name: &str) -> anyhow::Result<()> {
    use dhikr_catalog::IngestOutcome;

    match client.ingest_object(bucket, name).await? {
        IngestOutcome::Inserted(track) => {
            println!("Added {} as {} ({})", name, track.id, track.title);
        }
        IngestOutcome::SkippedNotAudio => println!("Skipped {name}: not an audio file"),
        IngestOutcome::SkippedExisting => println!("Skipped {name}: already in catalog"),
    }
    Ok(())
}
