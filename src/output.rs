use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::OrthologError;
use crate::table::OrthologTable;

pub struct TsvOutput;

impl TsvOutput {
    /// Header row followed by one line per ortholog row, no index column.
    pub fn write<W: Write>(table: &OrthologTable, writer: W) -> Result<(), OrthologError> {
        let mut tsv = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);
        if !table.columns.is_empty() {
            tsv.write_record(&table.columns)
                .map_err(|err| OrthologError::TsvWrite(err.to_string()))?;
        }
        for row in &table.rows {
            tsv.write_record(
                table
                    .columns
                    .iter()
                    .map(|column| row.get(column).unwrap_or_default()),
            )
            .map_err(|err| OrthologError::TsvWrite(err.to_string()))?;
        }
        tsv.flush()
            .map_err(|err| OrthologError::TsvWrite(err.to_string()))
    }

    pub fn to_string(table: &OrthologTable) -> Result<String, OrthologError> {
        let mut buffer = Vec::new();
        Self::write(table, &mut buffer)?;
        String::from_utf8(buffer).map_err(|err| OrthologError::TsvWrite(err.to_string()))
    }

    pub fn write_file(table: &OrthologTable, path: &Path) -> Result<(), OrthologError> {
        let file = File::create(path)
            .map_err(|err| OrthologError::Filesystem(format!("create {}: {err}", path.display())))?;
        Self::write(table, file)
    }

    pub fn print(table: &OrthologTable) -> Result<(), OrthologError> {
        Self::write(table, io::stdout().lock())
    }
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
