use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use marquee_config::loader::{self, ConfigLoad, ConfigSource};
use marquee_contracts::PositionController;
use marquee_core::engine::{CarouselEngine, CycleOutcome};
use marquee_core::position::CyclicPosition;
use marquee_core::providers::DoubanClient;
use marquee_core::view::{self, CarouselView};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "marquee-preview",
    about = "Run the hero carousel against a live API and print each slide"
)]
struct Cli {
    /// Config file (TOML or JSON). Defaults to the environment lookup.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the configured API base URL
    #[arg(long, env = "MARQUEE_API_BASE_URL")]
    base_url: Option<String>,
    /// Override the autoplay interval, e.g. `2s`
    #[arg(long, value_parser = humantime::parse_duration)]
    interval: Option<Duration>,
    /// Stop after this many slide changes; 0 runs until interrupted
    #[arg(long, default_value_t = 0)]
    ticks: u64,
    /// Run another cycle when aggregation fails, up to this many times
    #[arg(long, default_value_t = 0)]
    retries: u32,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,carousel=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config(cli: &Cli) -> Result<ConfigLoad> {
    let mut load = match &cli.config {
        Some(path) => ConfigLoad {
            config: loader::load_from_file(path)?,
            source: ConfigSource::File(path.clone()),
        },
        None => ConfigLoad::from_env()?,
    };

    if let Some(base_url) = &cli.base_url {
        load.config.api_base_url = base_url.clone();
    }
    if let Some(interval) = cli.interval {
        load.config.autoplay_interval = interval;
    }
    load.config.validate()?;
    Ok(load)
}

fn print_view(view: &CarouselView, index: usize) {
    match view {
        CarouselView::Placeholder { retryable } => {
            println!("[placeholder] retryable={retryable}");
        }
        CarouselView::Ready {
            slides, navigation, ..
        } => {
            let Some(slide) = slides.get(index) else {
                return;
            };
            let active = navigation
                .iter()
                .find(|entry| entry.active)
                .map(|entry| entry.label)
                .unwrap_or("-");
            println!(
                "[{}/{}] {} ({}) [{active}]\n    image: {}\n    play:  {}",
                index + 1,
                slides.len(),
                slide.title,
                slide.caption,
                slide.image_url,
                slide.play_href,
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let ConfigLoad { config, source } = load_config(&cli)?;
    info!(%source, base_url = %config.api_base_url, "configuration resolved");

    let client = Arc::new(
        DoubanClient::new(&config.api_base_url)
            .with_context(|| format!("invalid base url {}", config.api_base_url))?,
    );
    let position = Arc::new(CyclicPosition::new());
    let engine = CarouselEngine::new(
        client.clone(),
        client,
        position.clone(),
        config.engine_config(),
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let watcher = position.subscribe(Arc::new(move |index| {
        let _ = tx.send(index);
    }));

    engine.mount();
    let mut outcome = engine.reconfigure(config.categories.clone()).await;
    let mut attempts = 0;
    while let CycleOutcome::Failed { failure, .. } = &outcome {
        warn!(%failure, attempt = attempts, "carousel cycle failed");
        if attempts >= cli.retries {
            break;
        }
        attempts += 1;
        outcome = engine.retry().await;
    }
    info!(?outcome, "initial cycle finished");

    let initial = view::render(&engine.snapshot(), &config.image_proxy);
    print_view(&initial, 0);
    if initial.slide_count() < 2 {
        // Fewer than two slides means the index never changes.
        warn!(slides = initial.slide_count(), "nothing to cycle through, exiting");
        position.unsubscribe(watcher);
        engine.teardown();
        return Ok(());
    }

    let mut seen = 0u64;
    loop {
        tokio::select! {
            index = rx.recv() => {
                let Some(index) = index else { break };
                print_view(
                    &view::render(&engine.snapshot(), &config.image_proxy),
                    index,
                );
                seen += 1;
                if cli.ticks != 0 && seen >= cli.ticks {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    position.unsubscribe(watcher);
    engine.teardown();
    Ok(())
}
