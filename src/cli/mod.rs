//! Command-line interface for coursedeck.
//!
//! Provides commands for syncing the catalog, browsing categories and
//! subjects, opening lessons, resuming the last session, and managing
//! local settings and the notepad.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::adapters::SheetsClient;
use crate::catalog::Catalog;
use crate::config;
use crate::domain::LessonItem;
use crate::store::{LastViewed, RowCache, Settings, Store, Theme, WatchProgress};
use crate::sync::{self, CatalogOrigin, Syncer};

/// coursedeck - Spreadsheet-backed course catalog with offline cache
#[derive(Parser, Debug)]
#[command(name = "coursedeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch fresh rows and rebuild the catalog
    Sync,

    /// Show all categories and subjects with watch progress
    Dashboard {
        /// Only show subjects/categories matching this filter
        filter: Option<String>,
    },

    /// Show a subject's lesson playlist
    Show {
        /// Subject id or display name
        subject: String,

        /// Restrict the lookup to one category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Open a lesson: mark it watched and print its links
    Open {
        /// Lesson id
        lesson_id: String,
    },

    /// Reopen the most recently viewed lesson
    Resume,

    /// Search lessons by title, subject, or category
    Search {
        /// Search query
        query: String,
    },

    /// Show or replace the notepad text
    Note {
        /// New notepad text (shows the current text if omitted)
        text: Option<String>,
    },

    /// Show or update playback settings
    Settings {
        /// Enable or disable autoplay
        #[arg(long)]
        autoplay: Option<bool>,

        /// Autoplay delay in seconds
        #[arg(long)]
        delay: Option<u64>,

        /// UI theme
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,
    },

    /// Show resolved configuration (debug)
    Config,

    /// Clear the row cache and settings
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

/// Theme choice for the CLI (maps to Theme)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(t: ThemeArg) -> Self {
        match t {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Sync => run_sync().await,
            Commands::Dashboard { filter } => show_dashboard(filter.as_deref()).await,
            Commands::Show { subject, category } => {
                show_subject(&subject, category.as_deref()).await
            }
            Commands::Open { lesson_id } => open_lesson(&lesson_id).await,
            Commands::Resume => resume_last().await,
            Commands::Search { query } => search_catalog(&query).await,
            Commands::Note { text } => note(text).await,
            Commands::Settings {
                autoplay,
                delay,
                theme,
            } => settings(autoplay, delay, theme).await,
            Commands::Config => show_config().await,
            Commands::Reset { yes } => reset(yes).await,
        }
    }
}

/// Fetch fresh rows and rebuild the catalog
async fn run_sync() -> Result<()> {
    let store = Store::open_default()?;

    eprintln!("🔄 Syncing catalog...");

    let outcome = match config::api_url()? {
        Some(url) => Syncer::new(SheetsClient::new(url), store).sync().await,
        None => {
            sync::offline_outcome(
                &store,
                "No API URL configured (set COURSEDECK_API_URL or api.url in \
                 .coursedeck/config.yaml). "
                    .to_string(),
            )
            .await
        }
    };

    if let Some(notice) = &outcome.notice {
        eprintln!("⚠️  {}", notice);
    } else {
        eprintln!("✅ Catalog updated");
    }

    let catalog = &outcome.catalog;
    let subjects: usize = catalog.categories.iter().map(|c| c.subjects.len()).sum();
    println!(
        "{} categories, {} subjects, {} lessons{}",
        catalog.categories.len(),
        subjects,
        catalog.len(),
        match outcome.origin {
            CatalogOrigin::Fresh => "",
            CatalogOrigin::Cache => " (from cache)",
            CatalogOrigin::Empty => " (no data)",
        }
    );

    Ok(())
}

/// Load the current catalog from the cache, with a hint when empty
async fn load_catalog(store: &Store) -> Result<Catalog> {
    let catalog = sync::cached_catalog(store).await;
    if catalog.is_empty() {
        println!("Catalog is empty. Run 'coursedeck sync' to fetch data.");
    }
    Ok(catalog)
}

/// Show all categories and subjects with watch progress
async fn show_dashboard(filter: Option<&str>) -> Result<()> {
    let store = Store::open_default()?;
    let catalog = load_catalog(&store).await?;
    if catalog.is_empty() {
        return Ok(());
    }

    let progress = WatchProgress::load(&store).await?;
    let filter_lower = filter.map(|f| f.to_lowercase());

    for category in &catalog.categories {
        let subjects: Vec<_> = category
            .subjects
            .iter()
            .filter(|subject| {
                filter_lower
                    .as_ref()
                    .map(|f| {
                        subject.display_name.to_lowercase().contains(f)
                            || category.name.to_lowercase().contains(f)
                    })
                    .unwrap_or(true)
            })
            .collect();

        if subjects.is_empty() {
            continue;
        }

        println!("\n{}", category.name);
        println!("{}", "-".repeat(category.name.len()));

        for subject in subjects {
            let stats = progress.subject_stats(subject);
            let live = if subject.has_live() { "  LIVE" } else { "" };
            println!(
                "  {:<12} {:<32} {}/{} done ({}%){}",
                subject.id,
                subject.display_name,
                stats.done,
                stats.total,
                stats.percent(),
                live
            );
        }
    }

    Ok(())
}

/// Show a subject's lesson playlist
async fn show_subject(subject: &str, category: Option<&str>) -> Result<()> {
    let store = Store::open_default()?;
    let catalog = load_catalog(&store).await?;
    if catalog.is_empty() {
        return Ok(());
    }

    let (cat, subj) = catalog.find_subject(subject, category).ok_or_else(|| {
        anyhow::anyhow!(
            "Subject '{}' not found. Use 'coursedeck dashboard' to list subjects",
            subject
        )
    })?;

    let progress = WatchProgress::load(&store).await?;
    let stats = progress.subject_stats(subj);

    println!("{} — {} ({})", subj.display_name, cat.name, subj.id);
    println!(
        "{}/{} done ({}%)\n",
        stats.done,
        stats.total,
        stats.percent()
    );

    for (index, item) in subj.items.iter().enumerate() {
        let marker = if progress.is_watched(&item.id) {
            "[x]"
        } else {
            "[ ]"
        };
        let live = if item.is_live { " LIVE" } else { "" };
        println!(
            "{} {:>3}. {:<45} {:<10}{} ({})",
            marker,
            index + 1,
            item.title,
            item.kind.to_string(),
            live,
            item.id
        );
    }

    Ok(())
}

/// Open a lesson by id
async fn open_lesson(lesson_id: &str) -> Result<()> {
    let store = Store::open_default()?;
    let catalog = sync::cached_catalog(&store).await;

    let item = catalog
        .get(lesson_id)
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Lesson not found: {}. Run 'coursedeck sync' to refresh the catalog",
                lesson_id
            )
        })?;

    view_lesson(&store, item).await
}

/// Reopen the most recently viewed lesson
async fn resume_last() -> Result<()> {
    let store = Store::open_default()?;

    let last = match LastViewed::load(&store).await? {
        Some(last) => last,
        None => {
            println!("Nothing viewed yet. Open a lesson with 'coursedeck open <id>'.");
            return Ok(());
        }
    };

    let catalog = sync::cached_catalog(&store).await;

    // Look the lesson up fresh; the catalog may have changed since
    match catalog.get(&last.item.id) {
        Some(item) => view_lesson(&store, item.clone()).await,
        None => {
            eprintln!(
                "⚠️  '{}' is no longer in the catalog; showing the saved snapshot",
                last.item.title
            );
            print_lesson(&last.item, &Settings::load(&store).await?);
            Ok(())
        }
    }
}

/// Mark a lesson watched, record it as last viewed, and print its links
async fn view_lesson(store: &Store, item: LessonItem) -> Result<()> {
    let mut progress = WatchProgress::load(store).await?;
    if progress.mark_watched(&item.id) {
        progress.save(store).await.context("Failed to save progress")?;
    }

    LastViewed::now(item.clone())
        .save(store)
        .await
        .context("Failed to save last-viewed snapshot")?;

    let settings = Settings::load(store).await?;
    print_lesson(&item, &settings);

    Ok(())
}

/// Print a lesson's details and links
fn print_lesson(item: &LessonItem, settings: &Settings) {
    println!("{}", item.title);
    println!(
        "{} | {} | {}",
        item.instructor, item.category, item.subject_name
    );

    let live = if item.is_live { " (live)" } else { "" };
    println!("Type: {}{}", item.kind, live);

    if let Some(url) = item.embed_url(settings.autoplay) {
        println!("Play: {}", url);
        if settings.autoplay && settings.autoplay_delay_seconds > 0 {
            println!(
                "      (autoplay delayed {}s)",
                settings.autoplay_delay_seconds
            );
        }
    }

    if let Some(slide) = &item.slide_link {
        println!("Slide: {}", slide);
    }
    if let Some(doc) = &item.document_link {
        println!("Document: {}", doc);
        println!("Download: {}", crate::catalog::media::download_form(doc));
    }
}

/// Search lessons by title, subject, or category
async fn search_catalog(query: &str) -> Result<()> {
    let store = Store::open_default()?;
    let catalog = load_catalog(&store).await?;
    if catalog.is_empty() {
        return Ok(());
    }

    let results = catalog.search(query);
    if results.is_empty() {
        println!("No results found for: {}", query);
        return Ok(());
    }

    println!("Found {} result(s) for \"{}\":\n", results.len(), query);
    println!("{:<16} {:<10} {:<45} {}", "ID", "TYPE", "TITLE", "SUBJECT");
    println!("{}", "-".repeat(90));

    for item in &results {
        let title_truncated = if item.title.len() > 42 {
            format!("{}...", &item.title[..42])
        } else {
            item.title.clone()
        };
        println!(
            "{:<16} {:<10} {:<45} {}",
            item.id,
            item.kind.to_string(),
            title_truncated,
            item.subject_name
        );
    }

    Ok(())
}

/// Show or replace the notepad text
async fn note(text: Option<String>) -> Result<()> {
    let store = Store::open_default()?;

    match text {
        Some(text) => {
            store.save_note(&text).await?;
            eprintln!("📝 Note saved");
        }
        None => {
            let current = store.load_note().await?;
            if current.is_empty() {
                println!("(empty note)");
            } else {
                println!("{}", current);
            }
        }
    }

    Ok(())
}

/// Show or update playback settings
async fn settings(
    autoplay: Option<bool>,
    delay: Option<u64>,
    theme: Option<ThemeArg>,
) -> Result<()> {
    let store = Store::open_default()?;
    let mut current = Settings::load(&store).await?;

    let changed = autoplay.is_some() || delay.is_some() || theme.is_some();

    if let Some(autoplay) = autoplay {
        current.autoplay = autoplay;
    }
    if let Some(delay) = delay {
        current.autoplay_delay_seconds = delay;
    }
    if let Some(theme) = theme {
        current.theme = theme.into();
    }

    if changed {
        current.save(&store).await?;
        eprintln!("✅ Settings saved");
    }

    println!("Autoplay: {}", if current.autoplay { "on" } else { "off" });
    println!("Autoplay delay: {}s", current.autoplay_delay_seconds);
    println!("Theme: {}", current.theme);

    Ok(())
}

/// Show the resolved configuration (for debugging)
async fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("coursedeck configuration");
    println!("{}", "=".repeat(40));
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!(
        "API URL:     {}",
        cfg.api_url.as_deref().unwrap_or("(not configured)")
    );
    println!("Home:        {}", cfg.home.display());
    println!("Row cache:   {}", cfg.home.join(RowCache::FILE).display());
    println!(
        "Progress:    {}",
        cfg.home.join(WatchProgress::FILE).display()
    );

    Ok(())
}

/// Clear the row cache and settings
async fn reset(yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("Reset clears the row cache and settings. Re-run with --yes to confirm");
    }

    let store = Store::open_default()?;
    store.remove(RowCache::FILE).await?;
    store.remove(Settings::FILE).await?;

    eprintln!("♻️  Reset complete. Watch progress and notes were kept.");
    eprintln!("   Run 'coursedeck sync' to fetch fresh data.");

    Ok(())
}
