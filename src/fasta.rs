use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::sync::LazyLock;

use bio::io::fasta;
use flate2::read::MultiGzDecoder;
use regex::Regex;

use crate::error::OrthologError;

static LOCUS_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[locus_tag=([^\]]+)\]").unwrap());

/// Gene identifier prefixes that pin down the organism.
const GENE_PREFIXES: &[(&str, &str)] = &[
    ("AFUB_", "AfumigatusA1163"),
    ("AFUA_", "AfumigatusAf293"),
    ("CAAL_", "CalbicansSC5314"),
    ("SPBC", "Spombe972h"),
    ("SPAC", "Spombe972h"),
];

/// Gene identifier carried by a FASTA header.
///
/// A bracketed `[locus_tag=...]` wins; otherwise the first whitespace token
/// (without a leading `>`) is used unless it starts with `|`.
pub fn parse_locus_tag(header: &str) -> Option<String> {
    if let Some(caps) = LOCUS_TAG.captures(header) {
        let tag = caps[1].trim();
        return (!tag.is_empty()).then(|| tag.to_string());
    }
    let first = header.split_whitespace().next()?.trim_start_matches('>');
    if first.is_empty() || first.starts_with('|') {
        return None;
    }
    Some(first.to_string())
}

pub fn gene_id_for_record(record: &fasta::Record) -> Option<String> {
    let header = match record.desc() {
        Some(desc) => format!("{} {}", record.id(), desc),
        None => record.id().to_string(),
    };
    parse_locus_tag(&header)
        .or_else(|| parse_locus_tag(record.id()))
        .or_else(|| Some(record.id().to_string()))
        .filter(|id| !id.is_empty())
}

/// One pass over the gene identifiers of a FASTA file, in file order.
///
/// Records without an identifier are skipped, as is any text before the
/// first `>` line. Open the file again to restart.
pub struct GeneIds {
    records: fasta::Records<BufReader<Box<dyn Read>>>,
}

impl GeneIds {
    pub fn open(path: &Path) -> Result<Self, OrthologError> {
        if !path.exists() {
            return Err(OrthologError::FastaNotFound(path.to_path_buf()));
        }
        let mut input = BufReader::new(open_input(path)?);
        skip_to_first_record(&mut input)
            .map_err(|err| OrthologError::FastaParse(err.to_string()))?;
        let reader = fasta::Reader::from_bufread(input);
        Ok(Self {
            records: reader.records(),
        })
    }
}

impl Iterator for GeneIds {
    type Item = Result<String, OrthologError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(err) => return Some(Err(OrthologError::FastaParse(err.to_string()))),
            };
            if let Some(id) = gene_id_for_record(&record) {
                return Some(Ok(id));
            }
        }
    }
}

pub fn extract_gene_ids(path: &Path) -> Result<Vec<String>, OrthologError> {
    let ids = GeneIds::open(path)?.collect::<Result<Vec<_>, _>>()?;
    tracing::debug!("extracted {} gene ids from {}", ids.len(), path.display());
    Ok(ids)
}

/// Best-effort organism key for a FASTA file.
///
/// The file name is checked first, then the identifier of the first record
/// only. Unreadable files give `None`.
pub fn infer_organism(path: &Path) -> Option<&'static str> {
    if !path.exists() {
        return None;
    }
    let stem = file_stem(path).to_uppercase();
    if stem.contains("A1163")
        && ["ASM15014", "FUMIGATUS", "AFUB"]
            .iter()
            .any(|marker| stem.contains(marker))
    {
        return Some("AfumigatusA1163");
    }
    if stem.contains("AF293") || stem.contains("AFUMIGATUS") {
        return Some("AfumigatusAf293");
    }

    let first = GeneIds::open(path).ok()?.next()?.ok()?.to_uppercase();
    GENE_PREFIXES
        .iter()
        .find(|(prefix, _)| first.starts_with(prefix))
        .map(|(_, organism)| *organism)
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

fn file_stem(path: &Path) -> String {
    let path = if is_gzip(path) {
        Path::new(path.file_stem().unwrap_or_default())
    } else {
        path
    };
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Advance `reader` to the first line starting with `>`, or to EOF.
fn skip_to_first_record<R: BufRead>(reader: &mut R) -> io::Result<()> {
    let mut line_start = true;
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() || (line_start && buf[0] == b'>') {
            return Ok(());
        }
        let (consumed, ends_line) = match buf.iter().position(|&b| b == b'\n') {
            Some(pos) => (pos + 1, true),
            None => (buf.len(), false),
        };
        reader.consume(consumed);
        line_start = ends_line;
    }
}

fn open_input(path: &Path) -> Result<Box<dyn Read>, OrthologError> {
    let file = File::open(path)
        .map_err(|err| OrthologError::Filesystem(format!("open {}: {err}", path.display())))?;
    if is_gzip(path) {
        Ok(Box::new(MultiGzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}
