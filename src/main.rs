//! greencache CLI - fetch and print normalized POI for one course.
//!
//! Usage: `greencache <course-id> [--refresh]`
//!
//! Prints a short feature summary to stderr and the normalized CoursePoi
//! JSON to stdout, so the output can be piped into other tools.

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use greencache::{ApiClient, CacheManager, Config, PoiService};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Set up logging with environment-based filter
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn usage() -> ! {
    eprintln!("Usage: greencache <course-id> [--refresh]");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut course_id = None;
    let mut force_refresh = false;
    for arg in &args {
        match arg.as_str() {
            "--refresh" => force_refresh = true,
            "--help" | "-h" => usage(),
            other if course_id.is_none() => course_id = Some(other.to_string()),
            _ => usage(),
        }
    }
    let Some(course_id) = course_id else { usage() };

    let config = Config::load()?;
    let api_key = config.api_key()?;
    let cache = CacheManager::new(config.cache_dir()?)?;
    let client = ApiClient::new(api_key)?;
    let service = PoiService::new(cache, client);

    info!(%course_id, force_refresh, "looking up course POI");
    let lookup = service.get_course_poi(&course_id, force_refresh).await?;

    if let Some(err) = &lookup.persist_error {
        eprintln!("warning: POI fetched but not cached: {}", err);
    }

    eprintln!(
        "course {}: {} holes, {} features{}{}",
        course_id,
        lookup.course.holes.len(),
        lookup.course.feature_count(),
        if lookup.refreshed { " (refreshed)" } else { " (cached)" },
        if lookup.course.has_poi_data() { "" } else { " - no POI data" },
    );

    println!("{}", serde_json::to_string_pretty(&lookup.course)?);
    Ok(())
}
