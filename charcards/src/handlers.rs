use anyhow::{Context, Result};
use charcards_core::gallery::{GalleryProgressCallback, draw_random, load_grid};
use charcards_core::output::{OutputFormat, render_output, save_output};
use charcards_core::page::PageOptions;
use charcards_core::render::Container;
use charcards_fetch::{CharacterRecord, Fetcher};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;
use url::Url;

/// Settings shared by every subcommand, read from the parsed arguments
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub base_url: Url,
    pub timeout: Option<Duration>,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub page: PageOptions,
    pub show_progress: bool,
}

impl RunSettings {
    pub fn from_matches(args: &ArgMatches, default_title: &str) -> Result<Self> {
        let base_url = args
            .get_one::<Url>("base-url")
            .cloned()
            .context("--base-url is required")?;

        let format = args
            .get_one::<OutputFormat>("format")
            .copied()
            .unwrap_or(OutputFormat::Html);

        let title = args
            .get_one::<String>("title")
            .cloned()
            .unwrap_or_else(|| default_title.to_string());

        Ok(Self {
            base_url,
            timeout: args
                .get_one::<u64>("timeout")
                .map(|secs| Duration::from_secs(*secs)),
            output: args
                .get_one::<String>("output")
                .map(|raw| resolve_output_path(raw)),
            format,
            page: PageOptions {
                title,
                stylesheet: args.get_one::<String>("stylesheet").cloned(),
            },
            show_progress: !args.get_flag("quiet"),
        })
    }

    pub fn build_fetcher(&self) -> Result<Fetcher> {
        Fetcher::with_timeout(self.base_url.as_str(), self.timeout)
            .with_context(|| format!("Failed to set up client for {}", self.base_url))
    }
}

/// Expand a leading `~` in a user-supplied output path
pub fn resolve_output_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn start_spinner(show: bool) -> Result<Option<ProgressBar>> {
    if !show {
        return Ok(None);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(Some(spinner))
}

fn spinner_callback(spinner: &Option<ProgressBar>) -> Option<GalleryProgressCallback> {
    spinner.as_ref().map(|pb| {
        let pb = pb.clone();
        let callback: GalleryProgressCallback = Arc::new(move |msg: String| pb.set_message(msg));
        callback
    })
}

/// Render the container/records in the chosen format and write them out
fn emit(settings: &RunSettings, container: &Container, records: &[CharacterRecord]) -> Result<()> {
    let content = render_output(settings.format, container, records, &settings.page)
        .context("Failed to serialize output")?;

    match settings.output {
        Some(ref path) => {
            save_output(&content, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if settings.show_progress {
                eprintln!(
                    "{} Wrote {} card(s) as {} to {}",
                    "✓".green().bold(),
                    container.len(),
                    settings.format.as_str(),
                    path.display().to_string().bright_white()
                );
            }
        }
        None => print!("{}", content),
    }

    Ok(())
}

pub async fn handle_grid(sub_matches: &ArgMatches) -> Result<()> {
    let settings = RunSettings::from_matches(sub_matches, "Characters")?;
    run_grid(&settings).await
}

pub async fn run_grid(settings: &RunSettings) -> Result<()> {
    let fetcher = settings.build_fetcher()?;
    let spinner = start_spinner(settings.show_progress)?;

    let mut container = Container::new();
    let loaded = load_grid(&fetcher, &mut container, spinner_callback(&spinner)).await;

    if let Some(ref pb) = spinner {
        pb.finish_and_clear();
    }
    let records = loaded.with_context(|| format!("Failed to load characters from {}", fetcher.base_url()))?;

    emit(settings, &container, &records)
}

pub async fn handle_random(sub_matches: &ArgMatches) -> Result<()> {
    let settings = RunSettings::from_matches(sub_matches, "Random character")?;
    let seed = sub_matches.get_one::<u64>("seed").copied();
    run_random(&settings, seed).await
}

pub async fn run_random(settings: &RunSettings, seed: Option<u64>) -> Result<()> {
    let fetcher = settings.build_fetcher()?;
    let spinner = start_spinner(settings.show_progress)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut container = Container::new();
    let drawn = draw_random(&fetcher, &mut container, &mut rng, spinner_callback(&spinner)).await;

    if let Some(ref pb) = spinner {
        pb.finish_and_clear();
    }
    let record = drawn.with_context(|| format!("Failed to draw a character from {}", fetcher.base_url()))?;

    if settings.show_progress {
        eprintln!(
            "{} {} ({})",
            "★".yellow().bold(),
            record.name.bright_white().bold(),
            record.species
        );
    }

    emit(settings, &container, &[record])
}
