use std::sync::Arc;

use arrrg::CommandLine;
use arrrg_derive::CommandLine;
use serde::Serialize;

use shapeyard::calculator::{CoordinatePlane, sphere, triangle};
use shapeyard::cli_utils::{self, OutputFormat};
use shapeyard::repository::specifications;
use shapeyard::{
    Config, GeometryError, IngestReport, MetricsWarehouse, Shape, ShapeEventBus, ShapeId,
    ShapeKind, ShapeMetrics, ShapeReader, ShapeRepository, SkippedRecord, Sphere, SphereFactory,
    Triangle, TriangleFactory,
};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Options {
    #[arrrg(optional, "Configuration file (.json, .yaml, or .yml)")]
    config: String,
    #[arrrg(optional, "Directory holding the shape files (default: data)")]
    data_dir: String,
    #[arrrg(optional, "Report format: json or yaml (default: json)")]
    output: String,
    #[arrrg(flag, "Log at debug level")]
    verbose: bool,
}

const USAGE: &str = r#"Usage: shapeyard [options]

Options:
  --config <file>      Configuration file (.json, .yaml, or .yml)
  --data-dir <dir>     Directory holding the shape files (default: data)
  --output <format>    Report format: json or yaml (default: json)
  --verbose            Log at debug level"#;

#[derive(Serialize)]
struct ShapeReport {
    id: ShapeId,
    kind: ShapeKind,
    description: String,
    distance_from_origin: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<ShapeMetrics>,
}

#[derive(Serialize)]
struct Report {
    shapes: Vec<ShapeReport>,
    skipped: Vec<SkippedRecord>,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(cli_utils::log_filter(level))
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(options: &Options) -> Config {
    let mut config = if options.config.is_empty() {
        Config::default()
    } else {
        Config::load(&options.config).unwrap_or_else(|e| cli_utils::exit_with_error(&e.to_string()))
    };
    if !options.data_dir.is_empty() {
        config.data_dir = options.data_dir.clone();
    }
    if !options.output.is_empty() {
        config.output = options
            .output
            .parse::<OutputFormat>()
            .unwrap_or_else(|e| cli_utils::exit_with_usage_error(&e, USAGE));
    }
    config
}

fn named(id: &str) -> ShapeId {
    ShapeId::new(id).unwrap_or_else(|e| cli_utils::exit_with_error(&format!("bad id '{}': {}", id, e)))
}

fn demonstrate_triangle() -> Result<Triangle, GeometryError> {
    tracing::info!("=== Triangle calculations ===");
    let id = named("triangle1");
    let t = TriangleFactory.create("0 0 0\n3 0 0\n0 4 0", &id)?;
    tracing::info!("Triangle: {}", t);
    tracing::info!("Area: {}", triangle::calculate_area(&t)?);
    tracing::info!("Perimeter: {}", triangle::calculate_perimeter(&t)?);
    tracing::info!("Is right: {}", triangle::is_right_triangle(&t)?);
    tracing::info!("Is isosceles: {}", triangle::is_isosceles_triangle(&t)?);
    tracing::info!("Is equilateral: {}", triangle::is_equilateral_triangle(&t)?);
    tracing::info!("Is acute: {}", triangle::is_acute_triangle(&t)?);
    tracing::info!("Is obtuse: {}", triangle::is_obtuse_triangle(&t)?);
    tracing::info!("Triangle type: {}", triangle::triangle_type(&t)?);
    tracing::info!("Angle type: {}", triangle::angle_type(&t)?);
    tracing::info!("Points collinear: {}", triangle::are_points_collinear(&t));
    Ok(t)
}

fn demonstrate_sphere() -> Result<Sphere, GeometryError> {
    tracing::info!("=== Sphere calculations ===");
    let id = named("sphere1");
    let s = SphereFactory.create("2 3 1 5", &id)?;
    tracing::info!("Sphere: {}", s);
    tracing::info!("Surface area: {}", sphere::calculate_surface_area(&s)?);
    tracing::info!("Volume: {}", sphere::calculate_volume(&s)?);
    tracing::info!("Is valid sphere: {}", sphere::is_sphere(&s));
    tracing::info!(
        "Touches xy plane: {}",
        sphere::touches_coordinate_plane(&s, CoordinatePlane::Xy)?
    );
    tracing::info!("Touches any plane: {}", sphere::touches_any_coordinate_plane(&s)?);
    for plane in CoordinatePlane::ALL {
        tracing::info!(
            "Volume ratio {}: {}",
            plane,
            sphere::calculate_volume_ratio(&s, plane)?
        );
    }
    let planes: Vec<String> = sphere::intersection_planes(&s)?
        .iter()
        .map(ToString::to_string)
        .collect();
    tracing::info!("Intersection planes: [{}]", planes.join(", "));
    Ok(s)
}

fn ingest(reader: &ShapeReader, result: Result<IngestReport, GeometryError>) -> IngestReport {
    match result {
        Ok(report) => report,
        Err(e) => cli_utils::exit_with_error(&format!(
            "{} (data directory {})",
            e,
            reader.data_dir().display()
        )),
    }
}

fn main() {
    let (options, free) = Options::from_command_line(
        "USAGE: shapeyard [--config <file>] [--data-dir <dir>] [--output json|yaml] [--verbose]",
    );
    if !free.is_empty() {
        cli_utils::exit_with_usage_error(&format!("unexpected argument '{}'", free[0]), USAGE);
    }
    init_tracing(options.verbose);
    let config = resolve_config(&options);

    let warehouse = Arc::new(MetricsWarehouse::new());
    let bus = ShapeEventBus::new();
    warehouse.observe(&bus);
    let repository = ShapeRepository::new();

    let mut demo: Vec<Shape> = Vec::new();
    match demonstrate_triangle() {
        Ok(t) => demo.push(t.into()),
        Err(e) => tracing::error!("triangle demo failed: {}", e),
    }
    match demonstrate_sphere() {
        Ok(s) => demo.push(s.into()),
        Err(e) => tracing::error!("sphere demo failed: {}", e),
    }

    tracing::info!("=== File ingestion ===");
    let triangle_reader = ShapeReader::new(&config.data_dir).with_id_prefix(named("triangles"));
    let sphere_reader = ShapeReader::new(&config.data_dir).with_id_prefix(named("spheres"));
    let triangles = ingest(
        &triangle_reader,
        triangle_reader.read_triangles_from_file(&config.triangles_file),
    );
    let spheres = ingest(
        &sphere_reader,
        sphere_reader.read_spheres_from_file(&config.spheres_file),
    );

    let mut skipped = Vec::new();
    for report in [triangles, spheres] {
        for shape in report.shapes {
            demo.push(shape);
        }
        skipped.extend(report.skipped);
    }
    for shape in &demo {
        repository.add(shape.clone());
        bus.notify(shape);
    }
    tracing::info!(
        shapes = repository.len(),
        metrics = warehouse.len(),
        skipped = skipped.len(),
        "repository loaded"
    );

    let in_first_quadrant = repository.find_by_coordinates(specifications::in_first_quadrant);
    tracing::info!("Shapes in first quadrant: {}", in_first_quadrant.len());
    let near_origin = repository.find_by_distance_from_origin(0.0, 5.0);
    tracing::info!("Shapes within 5 of origin: {}", near_origin.len());

    let shapes = repository
        .sort_by_id()
        .into_iter()
        .map(|shape| ShapeReport {
            id: shape.id().clone(),
            kind: shape.kind(),
            description: shape.to_string(),
            distance_from_origin: shape.representative_point().distance_from_origin(),
            metrics: warehouse.get_metrics(shape.id()),
        })
        .collect();
    let report = Report { shapes, skipped };
    cli_utils::print_formatted_or_exit(&report, config.output, "metrics report");
}
