//! Per-document conversion with staged output, and batch processing.

use crate::config::{ConvertConfig, Mode};
use crate::document::TlxDocument;
use crate::error::{ReportError, Result};
use crate::report::{write_grid_csv, write_report};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Extension of Tilia export files.
pub const TLX_EXTENSION: &str = "tlx";

/// A document that could not be converted.
#[derive(Debug)]
pub struct DocumentFailure {
    pub source: PathBuf,
    pub error: ReportError,
}

/// Outcome of converting a folder of documents.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Written outputs, in processing order.
    pub converted: Vec<PathBuf>,
    pub failed: Vec<DocumentFailure>,
}

impl BatchSummary {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Converts TLX documents according to a [`ConvertConfig`].
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    #[must_use]
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Regular `*.tlx` files directly inside `input`, sorted by path.
    pub fn discover<P: AsRef<Path>>(input: P) -> Result<Vec<PathBuf>> {
        let mut sources = Vec::new();
        for entry in std::fs::read_dir(input)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == TLX_EXTENSION) {
                sources.push(path);
            }
        }
        sources.sort();
        Ok(sources)
    }

    /// Where the output for `source` lands inside `output_dir`.
    #[must_use]
    pub fn output_path(&self, source: &Path, output_dir: &Path) -> PathBuf {
        let stem = document_stem(source);
        match self.config.mode {
            Mode::Crunch => output_dir.join(format!("{stem}.csv")),
            Mode::Report => output_dir.join(stem),
        }
    }

    /// Convert one document file, returning the written output path.
    pub fn convert_file(&self, source: &Path, output_dir: &Path) -> Result<PathBuf> {
        let text = std::fs::read_to_string(source)?;
        let destination = self.output_path(source, output_dir);
        self.convert_str(&text, &destination)?;
        Ok(destination)
    }

    /// Convert one document held in memory into `destination`.
    ///
    /// Output is staged next to `destination` and only moved into place once
    /// every artifact has been written. A pre-existing destination is
    /// replaced.
    pub fn convert_str(&self, text: &str, destination: &Path) -> Result<()> {
        let doc = TlxDocument::parse(text)?;
        let root = doc.root();
        let parent = parent_dir(destination);
        std::fs::create_dir_all(parent)?;

        match self.config.mode {
            Mode::Crunch => {
                let staged = staging_file(parent)?;
                write_grid_csv(root, &self.config.grid, staged.path())?;
                staged.persist(destination).map_err(|e| e.error)?;
            }
            Mode::Report => {
                let staged = tempfile::Builder::new()
                    .prefix(".tilia-")
                    .tempdir_in(parent)?;
                let stem = destination
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                write_report(root, staged.path(), &stem, &self.config)?;
                replace_dir(staged.path(), destination, parent)?;
            }
        }

        Ok(())
    }

    /// Convert every document of `input` into `output`.
    ///
    /// A failing document is logged and recorded; the others still run.
    pub fn convert_dir(&self, input: &Path, output: &Path) -> Result<BatchSummary> {
        std::fs::create_dir_all(output)?;

        let mut summary = BatchSummary::default();
        for source in Self::discover(input)? {
            tracing::info!("Converting {}", source.display());
            match self.convert_file(&source, output) {
                Ok(written) => summary.converted.push(written),
                Err(error) => {
                    tracing::error!("Failed to convert {}: {error}", source.display());
                    summary.failed.push(DocumentFailure { source, error });
                }
            }
        }

        Ok(summary)
    }
}

/// Staging file created with the mode of a plainly created file.
fn staging_file(parent: &Path) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".tilia-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Masked by the process umask, like `File::create`.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    Ok(builder.tempfile_in(parent)?)
}

/// Move `staged` over `destination`.
///
/// An existing destination is first moved aside into a scratch directory
/// under `parent` and restored if the final rename fails.
fn replace_dir(staged: &Path, destination: &Path, parent: &Path) -> Result<()> {
    if !destination.exists() {
        std::fs::rename(staged, destination)?;
        return Ok(());
    }

    let scratch = tempfile::Builder::new()
        .prefix(".tilia-old-")
        .tempdir_in(parent)?;
    let previous = scratch.path().join("previous");
    std::fs::rename(destination, &previous)?;

    if let Err(e) = std::fs::rename(staged, destination) {
        std::fs::rename(&previous, destination)?;
        return Err(e.into());
    }
    // Dropping `scratch` removes the previous output.
    Ok(())
}

fn document_stem(source: &Path) -> String {
    source
        .file_stem()
        .unwrap_or(source.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
