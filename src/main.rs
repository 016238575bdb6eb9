use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::Local;
use clap::{Parser, Subcommand};

use route_planner::api::DynAPI;
use route_planner::config::Config;
use route_planner::error::Error;
use route_planner::external::routing_service::RoutingService;
use route_planner::page::Page;

/// Plan the fastest road route between two cities using a route-planning service
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct App {
    /// base URL of the routing service, overrides ROUTE_PLANNER_API_BASE
    #[arg(long)]
    api_base: Option<String>,

    #[command(subcommand)]
    op: Operation,
}

#[derive(Debug, Clone, Subcommand)]
enum Operation {
    /// list the cities offered by the routing service
    Cities,
    /// find the fastest route between two cities
    Route {
        /// start city identifier, e.g. colombo
        #[arg(short, long)]
        start: String,

        /// goal city identifier, e.g. kandy
        #[arg(short, long)]
        goal: String,

        /// departure time as YYYY-MM-DDTHH:MM, defaults to now
        #[arg(short, long)]
        datetime: Option<String>,

        /// write the map overlay (route line and markers) as GeoJSON
        #[arg(long)]
        geojson: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let app = App::parse();

    match run(app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(app: App) -> Result<(), Error> {
    let config = Config::resolve(app.api_base)?;

    tracing::info!("using routing service at {}", config.api_base);

    let api = Arc::new(RoutingService::new(&config)) as DynAPI;
    let mut page = Page::new(api);

    let loaded = page.populate_cities().await;

    match app.op {
        Operation::Cities => {
            if loaded.is_err() {
                println!("{}", page.view().message);
            }
            for option in page.view().start.options() {
                println!("{:<20} {}", option.label, option.value);
            }
            loaded.map(|_| ())
        }
        Operation::Route {
            start,
            goal,
            datetime,
            geojson,
        } => {
            if loaded.is_err() {
                print!("{}", page.view());
                return loaded.map(|_| ());
            }

            page.select_start(&start)?;
            page.select_goal(&goal)?;
            page.set_datetime(
                datetime.unwrap_or_else(|| Local::now().format("%Y-%m-%dT%H:%M").to_string()),
            );

            let submitted = page.submit().await;
            print!("{}", page.view());

            if let (Ok(()), Some(path)) = (&submitted, geojson) {
                let collection = page.map().to_geojson();
                fs::write(&path, geojson::GeoJson::from(collection).to_string())?;
                tracing::info!("wrote map overlay to {}", path.display());
            }

            submitted
        }
    }
}
