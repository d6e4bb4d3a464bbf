//! Reading and writing the CSV data files
//!
//! Records live in one file (`inventory_data.csv` by default). Registered
//! categories and their examples live in a second file next to it, so that a
//! category survives even while it has no records.

pub mod row;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::lib::{
    category::CategoryRegistry,
    entry::Record,
    error::{Error, Result},
};
use row::{CategoryRow, RecordRow, CATEGORY_HEADER, RECORD_HEADER};

/// Default location of the record file
pub const RECORDS_FILE: &str = "inventory_data.csv";

/// Locations of the two data files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    records: PathBuf,
    categories: PathBuf,
}

impl Store {
    /// Store rooted at `records`, with the category file derived from it:
    /// `inventory_data.csv` goes with `inventory_data.categories.csv`
    pub fn new<P: Into<PathBuf>>(records: P) -> Self {
        let records = records.into();
        let categories = records.with_extension("categories.csv");
        Self { records, categories }
    }

    pub fn with_categories<P: Into<PathBuf>>(mut self, categories: P) -> Self {
        self.categories = categories.into();
        self
    }

    pub fn records_path(&self) -> &Path {
        &self.records
    }

    pub fn categories_path(&self) -> &Path {
        &self.categories
    }

    /// All records in file order, nothing if the file does not exist yet
    pub fn read_records(&self) -> Result<Vec<Record>> {
        let path = self.records.as_path();
        let mut records = Vec::new();
        for_each_row(path, &RECORD_HEADER, |row: RecordRow, line| {
            records.push(row.into_record(path, line)?);
            Ok(())
        })?;
        debug!(path = %path.display(), count = records.len(), "read records");
        Ok(records)
    }

    /// Registered categories, empty if the file does not exist yet
    pub fn read_categories(&self) -> Result<CategoryRegistry> {
        let path = self.categories.as_path();
        let mut registry = CategoryRegistry::new();
        for_each_row(path, &CATEGORY_HEADER, |row: CategoryRow, line| {
            let cat = crate::lib::category::Category::from(row);
            if !registry.insert(cat.name.clone(), cat.example) {
                warn!(path = %path.display(), line, name = %cat.name, "duplicate category ignored");
            }
            Ok(())
        })?;
        debug!(path = %path.display(), count = registry.len(), "read categories");
        Ok(registry)
    }

    /// Overwrite the record file with `records`
    pub fn write_records(&self, records: &[Record]) -> Result<()> {
        write_rows(&self.records, &RECORD_HEADER, records.iter().map(RecordRow::from))?;
        debug!(path = %self.records.display(), count = records.len(), "wrote records");
        Ok(())
    }

    /// Overwrite the category file with `registry`
    pub fn write_categories(&self, registry: &CategoryRegistry) -> Result<()> {
        write_rows(&self.categories, &CATEGORY_HEADER, registry.iter().map(CategoryRow::from))?;
        debug!(path = %self.categories.display(), count = registry.len(), "wrote categories");
        Ok(())
    }
}

/// Feed every row of `path` to `f` along with its line number
///
/// A missing or empty file has no rows. Columns that are not part of
/// `header` are ignored, but every column of `header` must be present.
fn for_each_row<T, F>(path: &Path, header: &[&str], mut f: F) -> Result<()>
where
    T: serde::de::DeserializeOwned,
    F: FnMut(T, u64) -> Result<()>,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no such file, starting empty");
            return Ok(());
        }
        Err(e) => return Err(Error::io(path, e)),
    };
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
    let found = rdr.headers().map_err(|e| Error::csv(path, e))?.clone();
    if found.is_empty() {
        return Ok(());
    }
    if let Some(missing) = header.iter().find(|h| !found.iter().any(|f| f == **h)) {
        debug!(path = %path.display(), missing, "header is missing a column");
        return Err(Error::Header {
            path: path.to_path_buf(),
            expected: header.join(","),
            found: found.iter().collect::<Vec<_>>().join(","),
        });
    }
    let mut raw = csv::StringRecord::new();
    while rdr.read_record(&mut raw).map_err(|e| Error::csv(path, e))? {
        let line = raw.position().map(|p| p.line()).unwrap_or_default();
        let row = raw.deserialize(Some(&found)).map_err(|e| Error::csv(path, e))?;
        f(row, line)?;
    }
    Ok(())
}

/// Truncate `path` and write `header` followed by `rows`
fn write_rows<T, I>(path: &Path, header: &[&str], rows: I) -> Result<()>
where
    T: serde::Serialize,
    I: IntoIterator<Item = T>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| Error::csv(path, e))?;
    wtr.write_record(header).map_err(|e| Error::csv(path, e))?;
    for row in rows {
        wtr.serialize(row).map_err(|e| Error::csv(path, e))?;
    }
    wtr.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}
