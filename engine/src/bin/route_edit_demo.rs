//! Run a scripted edit session against generated example routes.
//!
//! The demo seeds an in-memory board, prints the ordered Km column for
//! each route, performs a small edit (route rename, cross-route move,
//! stop rename), commits, and logs the changelog entries it produced.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use engine::BoardSettings;
use engine::domain::ordering::{RowOrdering, display_rows};
use engine::domain::points::{
    DeliveryPointDraft, DescriptionEntry, Route, RouteDraft,
};
use engine::domain::session::{EditSessionManager, PointEdit, RouteScalarField};
use engine::outbound::{InMemoryRouteRepository, RecordingChangelog};
use example_data::{ExamplePointSeed, ExampleRouteSeed, generate_example_routes};

/// `route-edit-demo` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "route-edit-demo",
    about = "Exercise the delivery-point edit session against example routes",
    version
)]
struct CliArgs {
    /// Seed for deterministic example data.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Number of routes to generate.
    #[arg(long, default_value_t = 3)]
    routes: usize,
    /// Number of delivery points per route.
    #[arg(long, default_value_t = 6)]
    points: usize,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let args = CliArgs::parse();
    Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(args))
}

async fn run(args: CliArgs) -> Result<()> {
    // CLI flags belong to this binary; settings come from env and file.
    let settings = BoardSettings::load_from_iter([OsString::from("route-edit-demo")])?;

    let seeds = generate_example_routes(args.seed, args.routes, args.points)?;
    let routes = seeds
        .into_iter()
        .map(route_from_seed)
        .collect::<Result<Vec<Route>>>()?;

    let repo = Arc::new(InMemoryRouteRepository::new(routes));
    let changelog = Arc::new(RecordingChangelog::new());
    let clock = Arc::new(DefaultClock);
    let today = clock.utc().date_naive();

    let mut manager =
        EditSessionManager::new(Arc::clone(&repo), Arc::clone(&changelog), clock);
    manager.load().await?;

    for route in manager.routes() {
        info!(route = route.name(), shift = route.shift(), "route loaded");
        for row in display_rows(route, &RowOrdering::Default, settings.depot(), today) {
            info!(
                code = row.point().code(),
                name = row.point().name(),
                km = row.km_label().unwrap_or_else(|| "-".to_owned()),
                "stop"
            );
        }
    }

    let (first_id, second_id, moved_code, edited_code) = {
        let routes = manager.routes();
        let first = routes
            .first()
            .ok_or_else(|| eyre!("no routes generated"))?;
        let second = routes
            .get(1)
            .ok_or_else(|| eyre!("need at least two routes for the demo"))?;
        let moved = first
            .delivery_points()
            .first()
            .ok_or_else(|| eyre!("first route has no points"))?;
        let edited = second
            .delivery_points()
            .first()
            .ok_or_else(|| eyre!("second route has no points"))?;
        (
            first.id(),
            second.id(),
            moved.code().to_owned(),
            edited.code().to_owned(),
        )
    };

    manager.enter_edit_mode();
    {
        let session = manager
            .session_mut()
            .ok_or_else(|| eyre!("edit session missing after enter"))?;
        session.update_route_field(first_id, RouteScalarField::Name, "Harbour loop")?;
        session.move_point(&moved_code, second_id)?;
        session.apply_point_edit(&edited_code, PointEdit::SetName("Renamed stop".to_owned()))?;
        info!(pending = session.pending_edits().len(), "cells touched");
    }

    let changes = manager.commit().await?;
    for route_changes in &changes {
        for entry in changelog.entries_for(route_changes.route_id)? {
            info!(
                route = route_changes.route_name.as_str(),
                entry = entry.as_str(),
                "changelog"
            );
        }
    }

    info!(routes = manager.routes().len(), "session committed");
    Ok(())
}

fn route_from_seed(seed: ExampleRouteSeed) -> Result<Route> {
    let delivery_points = seed
        .points
        .into_iter()
        .map(point_from_seed)
        .collect::<Result<Vec<DeliveryPointDraft>>>()?;
    Ok(Route::new(RouteDraft {
        name: seed.name,
        code: seed.code,
        shift: seed.shift,
        delivery_points,
    })?)
}

fn point_from_seed(seed: ExamplePointSeed) -> Result<DeliveryPointDraft> {
    Ok(DeliveryPointDraft {
        code: seed.code,
        name: seed.name,
        schedule: seed.schedule.as_str().parse()?,
        latitude: seed.latitude,
        longitude: seed.longitude,
        descriptions: seed
            .note
            .map(|(key, value)| DescriptionEntry { key, value })
            .into_iter()
            .collect(),
        qr_code_image_url: None,
        qr_code_destination_url: None,
    })
}
