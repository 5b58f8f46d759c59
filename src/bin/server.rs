use std::{net::SocketAddr, path::PathBuf, process::exit, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use matriculas_rs::{AppState, Dataset, RegionFilterPlacement, build_router, graceful_shutdown};

/// The web server for the matriculas_rs enrollment dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the enrollment dataset, a delimited text file with a header row.
    #[arg(long)]
    data_path: PathBuf,

    /// The port to serve the dashboard from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The character separating the columns of the dataset, e.g. ';'.
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Whether the region filter is shared by every page or set per page.
    #[arg(long, value_enum, default_value_t = RegionFilterPlacement::Global)]
    region_filter: RegionFilterPlacement,

    /// The directory to serve static assets from.
    #[arg(long, default_value = "static/")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let Some(delimiter) = args.delimiter.is_ascii().then_some(args.delimiter as u8) else {
        tracing::error!(
            "The delimiter must be a single ASCII character, got {:?}",
            args.delimiter
        );
        exit(1);
    };

    let dataset = match Dataset::load(&args.data_path, delimiter) {
        Ok(dataset) => dataset,
        Err(error) => {
            tracing::error!("Could not load the dataset: {error}");
            exit(1);
        }
    };

    if dataset.is_empty() {
        tracing::warn!(
            "The dataset {} has no records, every page will be empty",
            args.data_path.display()
        );
    } else {
        tracing::info!(
            "Loaded {} enrollment records from {}",
            dataset.len(),
            args.data_path.display()
        );
    }

    let state = AppState::new(Arc::new(dataset), args.region_filter);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state, &args.static_dir));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        exit(1);
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
