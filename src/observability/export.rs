//! File-backed span export with size-bounded rotation.
//!
//! Spans are appended to a JSON-lines trace file instead of being shipped
//! over the network; the UI surface has no collector to talk to. Rotation
//! keeps disk usage bounded: when the file passes the size threshold it is
//! shifted to a numbered backup and a fresh file is started.

use super::otlp;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Rotate once the active file passes this size.
const ROTATE_AT_BYTES: u64 = 8 * 1024 * 1024;

/// Numbered backups kept after rotation (`.1` newest, `.2` oldest).
const BACKUPS: u32 = 2;

/// Append-only writer that rotates by size.
///
/// The handle opens lazily on first write so construction never fails. A
/// `Mutex` guards the handle; the exporter may be driven from any thread the
/// subscriber runs on.
struct RotatingFile {
    path: PathBuf,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    const fn new(path: PathBuf) -> Self {
        Self {
            path,
            handle: Mutex::new(None),
        }
    }

    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("writer lock poisoned: {e}"),
                )
            })?;

        if self.needs_rotation() {
            *handle = None;
            self.rotate()?;
        }

        if handle.is_none() {
            *handle = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            );
        }
        let file = handle
            .as_mut()
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "trace file unavailable")
            })?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|meta| meta.len() > ROTATE_AT_BYTES)
    }

    /// Shift `file.N` → `file.N+1`, dropping the oldest, then move the
    /// active file to `.1`.
    fn rotate(&self) -> std::io::Result<()> {
        let numbered = |n: u32| {
            let mut os = self.path.as_os_str().to_owned();
            os.push(format!(".{n}"));
            PathBuf::from(os)
        };

        let _ = fs::remove_file(numbered(BACKUPS));
        for n in (1..BACKUPS).rev() {
            let from = numbered(n);
            if from.exists() {
                fs::rename(&from, numbered(n + 1))?;
            }
        }
        if self.path.exists() {
            fs::rename(&self.path, numbered(1))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Span exporter writing OTLP JSON lines through a [`RotatingFile`].
#[derive(Debug)]
struct TraceFileExporter {
    writer: RotatingFile,
    resource: Resource,
    shut_down: AtomicBool,
}

impl SpanExporter for TraceFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.shut_down.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let document = otlp::encode_batch(&self.resource, &batch);
        let result = self
            .writer
            .append_line(&document.to_string())
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.shut_down.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a tracer provider exporting to the given trace file.
pub fn file_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = TraceFileExporter {
        writer: RotatingFile::new(path),
        resource: resource.clone(),
        shut_down: AtomicBool::new(false),
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
