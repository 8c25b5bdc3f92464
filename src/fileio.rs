use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::list::{RankedList, ITEM_COUNT, PLACEHOLDER};

/// A persisted list: its name and exactly five items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRecord {
    pub name: String,
    pub items: Vec<String>,
}

impl From<&RankedList> for ListRecord {
    fn from(list: &RankedList) -> Self {
        Self {
            name: list.name().to_string(),
            items: list.items().to_vec(),
        }
    }
}

/// Persistence for the list collection. Undo history is never stored.
pub trait Store {
    /// Persist every list, in the order given
    fn save(&mut self, lists: &[RankedList]) -> io::Result<()>;

    /// Read the lists back. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> io::Result<Option<Vec<ListRecord>>>;
}

/// Stores lists as CSV rows of `name,item1,...,item5`
pub struct CsvStore {
    pub file_path: PathBuf,
    delimiter: u8,
}

impl CsvStore {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path, delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn file_name(&self) -> String {
        self.file_path.display().to_string()
    }

    /// Directory the temporary file is created in, so the final rename stays on one filesystem
    fn parent_dir(&self) -> &Path {
        match self.file_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    fn read_csv(&self) -> io::Result<Vec<ListRecord>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let record = result.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            let mut fields = record.iter();
            let Some(name) = fields.next() else {
                continue;
            };

            let mut items: Vec<String> = fields.take(ITEM_COUNT).map(|s| s.to_string()).collect();
            if items.len() < ITEM_COUNT {
                debug!(name, found = items.len(), "Padding short list record");
                items.resize(ITEM_COUNT, PLACEHOLDER.to_string());
            }

            records.push(ListRecord { name: name.to_string(), items });
        }
        Ok(records)
    }

    fn write_csv(&self, lists: &[RankedList]) -> io::Result<()> {
        let tmp = NamedTempFile::new_in(self.parent_dir())?;
        {
            let writer = BufWriter::new(tmp.as_file());
            let mut csv_writer = csv::WriterBuilder::new()
                .delimiter(self.delimiter)
                .has_headers(false)
                .from_writer(writer);

            for list in lists {
                let mut row: Vec<&str> = Vec::with_capacity(ITEM_COUNT + 1);
                row.push(list.name());
                row.extend(list.items().iter().map(String::as_str));
                csv_writer
                    .write_record(&row)
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            }

            csv_writer
                .flush()
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.file_path)?;
        Ok(())
    }
}

impl Store for CsvStore {
    fn save(&mut self, lists: &[RankedList]) -> io::Result<()> {
        self.write_csv(lists)?;
        debug!(path = %self.file_path.display(), lists = lists.len(), "Saved lists");
        Ok(())
    }

    fn load(&self) -> io::Result<Option<Vec<ListRecord>>> {
        if !self.file_path.exists() {
            info!(path = %self.file_path.display(), "No saved lists");
            return Ok(None);
        }
        self.read_csv().map(Some)
    }
}
