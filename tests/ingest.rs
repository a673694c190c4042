use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use shapeyard::repository::specifications;
use shapeyard::{
    GeometryError, Metric, MetricsWarehouse, PointFactory, ShapeEventBus, ShapeKind, ShapeReader,
    ShapeRepository,
};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// A scratch data directory removed on drop
pub struct DataDir {
    pub path: PathBuf,
}

impl DataDir {
    /// Create a fresh, empty data directory
    pub fn new() -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis();
        let pid = process::id();
        let n = NEXT_DIR.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!("shapeyard_test_{}_{}_{}", pid, timestamp, n));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    /// Write `content` to `name` inside the directory
    pub fn write(&self, name: &str, content: &str) {
        self.write_bytes(name, content.as_bytes());
    }

    /// Write raw `bytes` to `name` inside the directory
    pub fn write_bytes(&self, name: &str, bytes: &[u8]) {
        fs::write(self.path.join(name), bytes).unwrap();
    }

    pub fn reader(&self) -> ShapeReader {
        ShapeReader::new(&self.path)
    }
}

impl Drop for DataDir {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.path) {
            eprintln!(
                "Warning: failed to cleanup test data dir {:?}: {}",
                self.path, e
            );
        }
    }
}

/// An in-memory sink for formatted log output
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn one_good_and_one_bad_sphere() {
    let dir = DataDir::new();
    dir.write("spheres.txt", "0 0 0 5\n1 2 3 -1\n");

    let report = dir.reader().read_spheres_from_file("spheres.txt").unwrap();
    assert_eq!(report.shapes.len(), 1);
    assert_eq!(report.shapes[0].id().as_str(), "shape_1");
    assert_eq!(report.shapes[0].kind(), ShapeKind::Sphere);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 2);
    assert_eq!(report.skipped[0].text, "1 2 3 -1");
    assert_eq!(
        report.skipped[0].reason,
        "Failed to create sphere: Sphere radius must be positive"
    );
}

#[test]
fn skipped_record_is_logged_once_at_warn() {
    let dir = DataDir::new();
    dir.write("spheres.txt", "0 0 0 5\n1 2 3 -1\n");

    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let report = tracing::subscriber::with_default(subscriber, || {
        dir.reader().read_spheres_from_file("spheres.txt").unwrap()
    });
    assert_eq!(report.skipped.len(), 1);

    let output = log.contents();
    let warnings: Vec<&str> = output.lines().filter(|l| l.contains("skipping record")).collect();
    assert_eq!(warnings.len(), 1, "{}", output);
    assert!(warnings[0].contains("WARN"), "{}", warnings[0]);
    assert!(warnings[0].contains("line=2"), "{}", warnings[0]);
    assert!(warnings[0].contains("Sphere radius must be positive"), "{}", warnings[0]);
    assert!(!output.contains("INFO"), "{}", output);
}

#[test]
fn invalid_utf8_skips_only_the_affected_record() {
    let dir = DataDir::new();
    dir.write_bytes("spheres.txt", b"0 0 0 5\n1 2 \xff 3\n1 1 1 1\n");

    let report = dir.reader().read_spheres_from_file("spheres.txt").unwrap();
    let ids: Vec<&str> = report.shapes.iter().map(|s| s.id().as_str()).collect();
    assert_eq!(ids, vec!["shape_1", "shape_3"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 2);
    assert_eq!(report.skipped[0].text, "1 2 \u{fffd} 3");
}

#[test]
fn triangles_group_three_lines() {
    let dir = DataDir::new();
    dir.write(
        "triangles.txt",
        "0 0 0\n3 0 0\n0 4 0\n\n1 1\n2 2\n3 3\n  \n0 0 1\n0 2 1\n2 0 1\n",
    );

    let report = dir.reader().read_triangles_from_file("triangles.txt").unwrap();
    let ids: Vec<&str> = report.shapes.iter().map(|s| s.id().as_str()).collect();
    assert_eq!(ids, vec!["shape_1", "shape_7"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 4);
    assert_eq!(report.skipped[0].text, "1 1\n2 2\n3 3");
}

#[test]
fn missing_file_is_not_found() {
    let dir = DataDir::new();
    let err = dir.reader().read_triangles_from_file("absent.txt").unwrap_err();
    assert_eq!(err, GeometryError::FileNotFound(dir.path.join("absent.txt")));
    assert!(err.to_string().starts_with("File not found: "));
}

#[test]
fn directory_instead_of_file_is_io_error() {
    let dir = DataDir::new();
    fs::create_dir_all(dir.path.join("nested")).unwrap();
    let err = dir.reader().read_shapes_from_file("nested", &PointFactory).unwrap_err();
    assert!(matches!(err, GeometryError::Io(_)), "{:?}", err);
}

#[test]
fn ingested_shapes_flow_into_repository_and_warehouse() {
    let dir = DataDir::new();
    dir.write("spheres.txt", "1 1 1 1\n-3 4 0 2\n10 10 10\n");
    dir.write("triangles.txt", "0 0\n3 0\n0 4\n");

    let warehouse = Arc::new(MetricsWarehouse::new());
    let bus = ShapeEventBus::new();
    warehouse.observe(&bus);
    let repository = ShapeRepository::new();

    let spheres = ShapeReader::new(&dir.path)
        .with_id_prefix("spheres".parse().unwrap())
        .read_spheres_from_file("spheres.txt")
        .unwrap();
    let triangles = ShapeReader::new(&dir.path)
        .with_id_prefix("triangles".parse().unwrap())
        .read_triangles_from_file("triangles.txt")
        .unwrap();
    for shape in spheres.shapes.iter().chain(triangles.shapes.iter()) {
        repository.add(shape.clone());
        bus.notify(shape);
    }

    assert_eq!(repository.len(), 4);
    assert_eq!(warehouse.len(), 4);

    let first_quadrant = repository.find_by_coordinates(specifications::in_first_quadrant);
    let mut ids: Vec<String> = first_quadrant.iter().map(|s| s.id().to_string()).collect();
    ids.sort();
    assert_eq!(ids, vec!["spheres_shape_1", "spheres_shape_3"]);

    let with_perimeter = repository.find_by_metrics_range(Metric::Perimeter, 11.0, 13.0, &warehouse);
    assert_eq!(with_perimeter.len(), 1);
    assert_eq!(with_perimeter[0].id().as_str(), "triangles_shape_1");

    let near = repository.find_by_distance_from_origin(4.9, 5.1);
    assert_eq!(near.len(), 1);
    assert_eq!(near[0].id().as_str(), "spheres_shape_2");
}
