//! # File Ingestion
//!
//! Reads newline-delimited shape records from files under a data directory. Each line
//! is trimmed and blank lines are dropped. The remaining lines are grouped into records
//! of [`ShapeFactory::lines_per_record`] consecutive lines, so triangles take three lines
//! and spheres and points take one.
//!
//! A record that fails to parse or validate is skipped and reported; it never aborts the
//! rest of the file. Ids are assigned as `shape_<n>`, where `n` is the 1-based position of
//! the record's first line among the non-empty lines. A reader given an id prefix
//! namespaces them as `<prefix>_shape_<n>`, so several files can feed one repository.
//!
//! ```rust
//! use shapeyard::{ShapeReader, SphereFactory};
//!
//! let reader = ShapeReader::new("data");
//! let report = reader.read_shapes_from_str("0 0 0 2\n\n1 x\n", &SphereFactory);
//! assert_eq!(report.shapes.len(), 1);
//! assert_eq!(report.shapes[0].id().as_str(), "shape_1");
//! assert_eq!(report.skipped.len(), 1);
//! assert_eq!(report.skipped[0].line, 2);
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{GeometryError, Shape, ShapeFactory, ShapeId, SphereFactory, TriangleFactory};

/// A record that could not be turned into a shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    /// 1-based index of the record's first line among the non-empty lines.
    pub line: usize,
    /// The record's lines joined with newlines.
    pub text: String,
    /// Why the record was rejected.
    pub reason: String,
}

/// Outcome of reading one source.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestReport {
    /// Shapes built, in file order.
    pub shapes: Vec<Shape>,
    /// Records that were rejected, in file order.
    pub skipped: Vec<SkippedRecord>,
}

impl IngestReport {
    /// Whether every record produced a shape.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Reads shape files relative to a data directory.
#[derive(Debug, Clone)]
pub struct ShapeReader {
    data_dir: PathBuf,
    id_prefix: Option<ShapeId>,
}

impl ShapeReader {
    /// Creates a reader rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        ShapeReader {
            data_dir: data_dir.into(),
            id_prefix: None,
        }
    }

    /// Namespaces synthesized ids under `prefix`.
    pub fn with_id_prefix(mut self, prefix: ShapeId) -> Self {
        self.id_prefix = Some(prefix);
        self
    }

    fn id_for(&self, line: usize) -> ShapeId {
        let id = ShapeId::for_line(line);
        match &self.id_prefix {
            Some(prefix) => prefix.child(id.as_str()),
            None => id,
        }
    }

    /// The directory file names are resolved against.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Reads `file_name` from the data directory with `factory`.
    ///
    /// # Errors
    ///
    /// [`GeometryError::FileNotFound`] if the file does not exist, [`GeometryError::Io`]
    /// for any other read failure. Bad records are reported, not returned as errors.
    /// Invalid UTF-8 is replaced with U+FFFD, so only the affected record is skipped.
    pub fn read_shapes_from_file(
        &self,
        file_name: &str,
        factory: &dyn ShapeFactory,
    ) -> Result<IngestReport, GeometryError> {
        let path = self.data_dir.join(file_name);
        let bytes = std::fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => GeometryError::FileNotFound(path.clone()),
            _ => GeometryError::Io(format!("{}: {}", path.display(), e)),
        })?;
        let content = String::from_utf8_lossy(&bytes);
        let report = self.read_shapes_from_str(&content, factory);
        tracing::info!(
            "Read {} shapes from {}",
            report.shapes.len(),
            file_name
        );
        Ok(report)
    }

    /// Reads triangles, three lines per record.
    pub fn read_triangles_from_file(&self, file_name: &str) -> Result<IngestReport, GeometryError> {
        self.read_shapes_from_file(file_name, &TriangleFactory)
    }

    /// Reads spheres, one line per record.
    pub fn read_spheres_from_file(&self, file_name: &str) -> Result<IngestReport, GeometryError> {
        self.read_shapes_from_file(file_name, &SphereFactory)
    }

    /// Parses records from in-memory `content`.
    ///
    /// A trailing group shorter than a full record is skipped.
    pub fn read_shapes_from_str(&self, content: &str, factory: &dyn ShapeFactory) -> IngestReport {
        let lines: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let per_record = factory.lines_per_record().max(1);
        let kind = factory.kind();

        let mut report = IngestReport::default();
        for (index, record) in lines.chunks(per_record).enumerate() {
            let line = index * per_record + 1;
            let text = record.join("\n");
            if record.len() < per_record {
                let reason = format!(
                    "Incomplete {} record: expected {} lines, found {}",
                    kind,
                    per_record,
                    record.len()
                );
                tracing::warn!(line, %reason, "skipping record");
                report.skipped.push(SkippedRecord { line, text, reason });
                continue;
            }

            let id = self.id_for(line);
            match factory.create_shape(&text, &id) {
                Ok(shape) => {
                    tracing::info!(%id, "created {}", kind);
                    report.shapes.push(shape);
                }
                Err(e) => {
                    tracing::warn!(line, error = %e, "skipping record");
                    report.skipped.push(SkippedRecord {
                        line,
                        text,
                        reason: e.to_string(),
                    });
                }
            }
        }
        report
    }
}
