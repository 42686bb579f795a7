mod app;
mod catalog;
mod config;
mod input;
mod lookup;
mod lyrics;
mod storage;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};

use catalog::ItunesClient;
use lookup::{LookupKey, LyricsStatus, Resolver};
use lyrics::LyricsClient;
use storage::StorageHandle;

#[derive(Debug, Parser)]
#[command(name = "verso", version, about = "Karaoke-style lyrics viewer")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Look up a song and print the merged result (headless).
    Lyrics { artist: String, title: String },
    /// Print the trending tracks list (headless).
    Top {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Print locally saved favorites (headless).
    Favorites,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let mut terminal = tui::TerminalGuard::enter().context("init terminal")?;
            let mut app = app::App::new(cfg)?;
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Lyrics { artist, title } => {
            let key = LookupKey::new(&artist, &title)
                .context("artist and title must both be non-empty")?;
            let resolver = make_resolver(&cfg);
            let out = resolver.resolve(&key).await;

            match out.status {
                LyricsStatus::Found if out.from_cache => {
                    println!("[from favorites cache]")
                }
                LyricsStatus::Found => {}
                LyricsStatus::NotFound | LyricsStatus::Error => {
                    println!("[{}]", out.lyrics)
                }
                _ => {}
            }
            if let Some(cover) = &out.cover_url {
                println!("cover:   {cover}");
            }
            if let Some(audio) = &out.audio_url {
                println!("preview: {audio}");
            }
            if out.status == LyricsStatus::Found {
                println!("{}", out.lyrics);
            }
        }
        Command::Top { limit } => {
            let catalog = ItunesClient::new();
            let hits = catalog
                .search_top_tracks(&cfg.trending.seed_term, limit)
                .await
                .context("trending search")?;
            for (i, hit) in hits.iter().enumerate() {
                println!(
                    "{:02}. {} - {}",
                    i + 1,
                    hit.track_name.as_deref().unwrap_or("Unknown"),
                    hit.artist_name.as_deref().unwrap_or("Unknown"),
                );
            }
        }
        Command::Favorites => {
            let store = StorageHandle::new(cfg.songs_db_path());
            let songs = store.list_all().await.context("list favorites")?;
            if songs.is_empty() {
                println!("No favorites saved.");
            }
            for song in songs {
                println!("{} - {}", song.title, song.artist);
            }
        }
    }

    Ok(())
}

fn make_resolver(cfg: &config::Config) -> Resolver<LyricsClient, ItunesClient> {
    Resolver::new(
        LyricsClient::from_provider(cfg.lyrics.provider),
        ItunesClient::new(),
        StorageHandle::new(cfg.songs_db_path()),
    )
}
