use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value};

use crate::error::OrthologError;
use crate::organism;

pub const GID: &str = "GID";
pub const ORTHOLOGS_GID: &str = "ORTHOLOGS_GID";
pub const ORTHOLOGS_ORGANISM: &str = "ORTHOLOGS_ORGANISM";
pub const ORTHOLOGS_PRODUCT: &str = "ORTHOLOGS_PRODUCT";

/// Older report versions name the ortholog columns without the table prefix.
const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("ORTHOLOG", ORTHOLOGS_GID),
    ("ORGANISM", ORTHOLOGS_ORGANISM),
    ("PRODUCT", ORTHOLOGS_PRODUCT),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrthologRow {
    pub gid: String,
    pub ortholog_gid: Option<String>,
    pub ortholog_organism: Option<String>,
    pub ortholog_product: Option<String>,
    /// Report columns beyond the four above, keyed by normalized name.
    pub extra: BTreeMap<String, String>,
}

impl OrthologRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        match column {
            GID => Some(self.gid.as_str()),
            ORTHOLOGS_GID => self.ortholog_gid.as_deref(),
            ORTHOLOGS_ORGANISM => self.ortholog_organism.as_deref(),
            ORTHOLOGS_PRODUCT => self.ortholog_product.as_deref(),
            other => self.extra.get(other).map(String::as_str),
        }
    }

    fn set(&mut self, column: &str, value: String) {
        match column {
            GID => self.gid = value,
            ORTHOLOGS_GID => self.ortholog_gid = Some(value),
            ORTHOLOGS_ORGANISM => self.ortholog_organism = Some(value),
            ORTHOLOGS_PRODUCT => self.ortholog_product = Some(value),
            other => {
                self.extra.insert(other.to_string(), value);
            }
        }
    }
}

/// Ortholog report rows with the report's (normalized) column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrthologTable {
    pub columns: Vec<String>,
    pub rows: Vec<OrthologRow>,
}

impl OrthologTable {
    pub fn new(columns: Vec<String>, rows: Vec<OrthologRow>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Parse a FungiDB CSV report.
    ///
    /// Records that cannot be decoded or that carry more fields than the
    /// header are dropped; short records are padded with empty cells.
    pub fn from_csv(text: &str) -> Result<Self, OrthologError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|err| OrthologError::CsvParse(err.to_string()))?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let columns = normalize_columns(headers);

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for (line, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) if record.len() <= columns.len() => record,
                Ok(record) => {
                    tracing::debug!(
                        "skipping report line {}: expected {} fields, saw {}",
                        line + 2,
                        columns.len(),
                        record.len()
                    );
                    skipped += 1;
                    continue;
                }
                Err(err) => {
                    tracing::debug!("skipping report line {}: {err}", line + 2);
                    skipped += 1;
                    continue;
                }
            };
            let mut row = OrthologRow::default();
            for (idx, column) in columns.iter().enumerate() {
                row.set(column, record.get(idx).unwrap_or_default().to_string());
            }
            rows.push(row);
        }
        if skipped > 0 {
            tracing::warn!("skipped {skipped} malformed report lines");
        }

        Ok(Self { columns, rows })
    }

    /// Keep rows whose ortholog organism is one of `references`, matched by
    /// key or by registry display name. Tables without an organism column
    /// are returned unchanged.
    pub fn filter_to_references<S: AsRef<str>>(self, references: &[S]) -> Self {
        if !self.has_column(ORTHOLOGS_ORGANISM) {
            return self;
        }
        let mut allowed = HashSet::new();
        for key in references {
            let key = key.as_ref();
            allowed.insert(key.to_string());
            if let Some(name) = organism::display_name(key) {
                allowed.insert(name.to_string());
            }
        }
        let rows = self
            .rows
            .into_iter()
            .filter(|row| {
                let value = row.ortholog_organism.as_deref().unwrap_or_default().trim();
                allowed.contains(value)
            })
            .collect();
        Self {
            columns: self.columns,
            rows,
        }
    }

    pub fn restrict_to_genes<S: AsRef<str>>(self, gene_ids: &[S]) -> Self {
        let wanted = gene_ids
            .iter()
            .map(|id| id.as_ref())
            .collect::<HashSet<&str>>();
        let rows = self
            .rows
            .into_iter()
            .filter(|row| wanted.contains(row.gid.as_str()))
            .collect();
        Self {
            columns: self.columns,
            rows,
        }
    }

    /// Rows as JSON objects keyed by column name; absent cells are `null`.
    pub fn to_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let record = self
                    .columns
                    .iter()
                    .map(|column| {
                        let value = row
                            .get(column)
                            .map(|v| Value::String(v.to_string()))
                            .unwrap_or(Value::Null);
                        (column.clone(), value)
                    })
                    .collect::<Map<_, _>>();
                Value::Object(record)
            })
            .collect()
    }

    /// Distinct trimmed ortholog organism values, sorted.
    pub fn ortholog_organisms(&self) -> Vec<String> {
        let mut organisms = self
            .rows
            .iter()
            .filter_map(|row| row.ortholog_organism.as_deref())
            .map(|value| value.trim().to_string())
            .collect::<Vec<_>>();
        organisms.sort();
        organisms.dedup();
        organisms
    }
}

/// Uppercase, drop one trailing period, then turn periods and spaces into
/// underscores: `Gene ID.` becomes `GENE_ID`.
pub fn normalize_column_name(name: &str) -> String {
    let upper = name.to_uppercase();
    let trimmed = upper.strip_suffix('.').unwrap_or(&upper);
    trimmed.replace(['.', ' '], "_")
}

pub fn normalize_columns(headers: Vec<String>) -> Vec<String> {
    let mut columns = headers
        .iter()
        .map(|h| normalize_column_name(h))
        .collect::<Vec<_>>();

    if !columns.iter().any(|c| c == GID) {
        if let Some(first) = columns.first_mut() {
            *first = GID.to_string();
        }
    }

    for (alias, canonical) in COLUMN_ALIASES {
        if columns.iter().any(|c| c.as_str() == *canonical) {
            continue;
        }
        for column in columns.iter_mut().filter(|c| c.as_str() == *alias) {
            *column = canonical.to_string();
        }
    }
    columns
}
