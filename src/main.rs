use lake_mapper::{
    Coordinate, ConfigurationManager, DepthUnit, MapSession, MockLocationProvider, RecordingSurface,
    WaypointForm,
};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let manager = match std::env::args().nth(1) {
        Some(path) => match ConfigurationManager::from_file(&path) {
            Ok(manager) => manager,
            Err(e) => {
                eprintln!("failed to load configuration: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => ConfigurationManager::new(),
    };
    let config = manager.get_config().clone();

    if let Err(e) = lake_mapper::utils::init_logging(&config.log_level) {
        eprintln!("logging disabled: {}", e);
    }

    let provider = MockLocationProvider::with_fix(Coordinate::new(46.7296, -94.6859));
    let mut session = MapSession::new(&config, Coordinate::new(46.73, -94.69));
    let mut surface = RecordingSurface::new();

    println!("=== Lake Mapper Demo ===");
    println!("Current location: {}", session.location_readout(&provider));
    if let Ok(region) = session.recenter_on_user(&provider) {
        info!(lat = region.center.latitude, lon = region.center.longitude, "map centred");
    }

    // Long-press pin, then depth entry
    let mut form = session.long_press(Coordinate::new(46.7312, -94.6881));
    session.render(&mut surface);
    form.depth = match session.unit() {
        DepthUnit::Meters => "4.5".to_string(),
        DepthUnit::Feet => "15".to_string(),
    };
    if let Err(e) = session.confirm_pending(&mut form) {
        error!(error = %e, "pending waypoint rejected");
    }

    // Manual entries, one of them malformed
    for (lat, lon, depth) in [("46.7280", "-94.6840", "11.2"), ("46.7265", "-94.6902", "7.8"), ("46.72", "oops", "3")] {
        let mut form = WaypointForm::with_text(lat, lon, depth, session.unit());
        match session.add_manual(&mut form) {
            Ok(id) => info!(%id, "manual waypoint added"),
            Err(e) => println!("Rejected entry ({}, {}, {}): {}", lat, lon, depth, e),
        }
    }

    let diff = session.render(&mut surface);
    println!(
        "Rendered {} pins and {} rings ({} created)",
        surface.annotation_count(),
        surface.circle_count(),
        diff.created.len()
    );

    println!("Waypoints:");
    for row in session.rows() {
        println!("  {}", row);
    }

    println!("Heatmap at zoom 1.0:");
    for spot in session.heatmap(1.0) {
        println!(
            "  ({:.0}, {:.0}) r={:.1} rgb=({:.2}, {:.2}, {:.2})",
            spot.center.x, spot.center.y, spot.radius, spot.inner.red, spot.inner.green, spot.inner.blue
        );
    }

    let removed = session.delete_at(&[0]);
    let diff = session.render(&mut surface);
    println!(
        "Deleted {} waypoint(s); layer removed {}, kept {}",
        removed.len(),
        diff.removed.len(),
        diff.updated.len()
    );

    ExitCode::SUCCESS
}
