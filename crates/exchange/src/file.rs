//! Path-based wrappers around the codecs.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use stockledger_inventory::{Catalog, Snapshot};

use crate::codec::{CatalogExporter, CatalogImporter, ImportPolicy, ImportSummary};
use crate::error::ExchangeError;

/// Export to `path` atomically.
///
/// Output goes to a temporary file in the destination directory, which is
/// renamed over `path` only once fully written. A failed export leaves any
/// previous file at `path` as it was.
pub fn export_to_path<E>(exporter: &E, snapshot: &Snapshot<'_>, path: &Path) -> Result<(), ExchangeError>
where
    E: CatalogExporter + ?Sized,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(|e| not_found_or_io(e, dir))?;
    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        exporter.export(snapshot, &mut writer)?;
        writer.flush()?;
    }
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| ExchangeError::Io(e.error))?;

    tracing::info!(path = %path.display(), "export saved");
    Ok(())
}

/// Import from the file at `path`.
pub fn import_from_path<I>(
    importer: &I,
    catalog: &mut Catalog,
    path: &Path,
    policy: ImportPolicy,
) -> Result<ImportSummary, ExchangeError>
where
    I: CatalogImporter + ?Sized,
{
    let file = File::open(path).map_err(|e| not_found_or_io(e, path))?;
    let mut reader = BufReader::new(file);

    tracing::info!(path = %path.display(), %policy, "importing");
    importer.import(catalog, &mut reader, policy)
}

fn not_found_or_io(err: io::Error, path: &Path) -> ExchangeError {
    if err.kind() == io::ErrorKind::NotFound {
        ExchangeError::ResourceNotFound(path.to_path_buf())
    } else {
        ExchangeError::Io(err)
    }
}
