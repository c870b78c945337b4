use fungidb_orthologs::table::{
    GID, ORTHOLOGS_GID, ORTHOLOGS_ORGANISM, ORTHOLOGS_PRODUCT, OrthologTable, normalize_column_name,
    normalize_columns,
};

const REPORT: &str = "\"Gene ID\",\"Ortholog\",\"Organism\",\"Product\",\"Syntenic\"\n\
\"AFUB_000010\",\"SPAC1002.01\",\"Schizosaccharomyces pombe 972h\",\"mitochondrial protein, Mrx11\",\"yes\"\n\
\"AFUB_000010\",\"C1_00010W_A\",\"Candida albicans SC5314\",\"hypothetical protein\",\"no\"\n\
\"AFUB_000020\",\"YAL001C\",\"Saccharomyces cerevisiae S288C\",\"TFIIIC subunit\",\"yes\"\n\
\"AFUB_000020\",\"AFUA_1G00100\",\"Aspergillus fumigatus Af293\",\"unknown\",\"yes\"\n\
\"AFUB_000030\",\"NCU00001\",\"NcrassaOR74A\",\"kinase\",\"no\"\n";

fn alias_headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn column_normalization() {
    assert_eq!(normalize_column_name("Gene ID."), "GENE_ID");
    assert_eq!(normalize_column_name("ortholog.organism"), "ORTHOLOG_ORGANISM");
    assert_eq!(normalize_column_name("a.b.."), "A_B_");
}

#[test]
fn alias_columns_renamed_when_canonical_absent() {
    let columns = normalize_columns(alias_headers(&["GID", "ORTHOLOG", "ORGANISM", "PRODUCT"]));
    assert_eq!(
        columns,
        vec![GID, ORTHOLOGS_GID, ORTHOLOGS_ORGANISM, ORTHOLOGS_PRODUCT]
    );
}

#[test]
fn alias_columns_kept_when_canonical_present() {
    let columns = normalize_columns(alias_headers(&[
        "GID",
        "ORTHOLOGS_GID",
        "ORTHOLOG",
        "ORGANISM",
    ]));
    assert_eq!(
        columns,
        vec![GID, ORTHOLOGS_GID, "ORTHOLOG", ORTHOLOGS_ORGANISM]
    );
}

#[test]
fn existing_gid_column_is_not_moved() {
    let columns = normalize_columns(alias_headers(&["Source ID", "gid"]));
    assert_eq!(columns, vec!["SOURCE_ID", GID]);
}

#[test]
fn parses_quoted_report() {
    let table = OrthologTable::from_csv(REPORT).unwrap();
    assert_eq!(table.len(), 5);
    assert!(table.has_column(GID));
    assert!(table.has_column(ORTHOLOGS_ORGANISM));
    let first = &table.rows[0];
    assert_eq!(first.gid, "AFUB_000010");
    assert_eq!(first.ortholog_gid.as_deref(), Some("SPAC1002.01"));
    assert_eq!(
        first.ortholog_product.as_deref(),
        Some("mitochondrial protein, Mrx11")
    );
    assert_eq!(first.get("SYNTENIC"), Some("yes"));
}

#[test]
fn skips_overlong_lines_and_pads_short_ones() {
    let text = "\"Gene ID\",\"ORTHOLOG\",\"ORGANISM\"\n\
\"g1\",\"o1\",\"Candida albicans SC5314\",\"stray\"\n\
\"g2\",\"o2\"\n\
\"g3\",\"o3\",\"Spombe972h\"\n";
    let table = OrthologTable::from_csv(text).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].gid, "g2");
    assert_eq!(table.rows[0].ortholog_organism.as_deref(), Some(""));
    assert_eq!(table.rows[1].gid, "g3");
}

#[test]
fn filter_keeps_keys_and_display_names() {
    let table = OrthologTable::from_csv(REPORT).unwrap();
    let refs = ["CalbicansSC5314", "ScerevisiaeS288C", "Spombe972h"];
    let filtered = table.clone().filter_to_references(&refs);
    assert_eq!(filtered.len(), 3);
    assert!(filtered.len() <= table.len());
    assert_eq!(filtered.columns, table.columns);
    for row in &filtered.rows {
        assert!(table.rows.contains(row));
    }
    assert_eq!(
        filtered.ortholog_organisms(),
        vec![
            "Candida albicans SC5314",
            "Saccharomyces cerevisiae S288C",
            "Schizosaccharomyces pombe 972h",
        ]
    );
}

#[test]
fn filter_matches_unknown_keys_verbatim() {
    let table = OrthologTable::from_csv(REPORT).unwrap();
    let filtered = table.filter_to_references(&["NcrassaOR74A"]);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.rows[0].gid, "AFUB_000030");
}

#[test]
fn filter_trims_organism_values() {
    let text = "GID,ORTHOLOGS_ORGANISM\ng1,\"  Spombe972h \"\ng2,Other\n";
    let table = OrthologTable::from_csv(text).unwrap();
    let filtered = table.filter_to_references(&["Spombe972h"]);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.rows[0].gid, "g1");
}

#[test]
fn filter_without_organism_column_is_noop() {
    let text = "GID,ORTHOLOGS_GID\ng1,o1\ng2,o2\n";
    let table = OrthologTable::from_csv(text).unwrap();
    let filtered = table.clone().filter_to_references(&["Spombe972h"]);
    assert_eq!(filtered, table);
}

#[test]
fn filtering_twice_is_stable() {
    let table = OrthologTable::from_csv(REPORT).unwrap();
    let refs = ["Spombe972h", "CalbicansSC5314"];
    let once = table.clone().filter_to_references(&refs);
    let twice = table.filter_to_references(&refs).filter_to_references(&refs);
    assert_eq!(once, twice);
}

#[test]
fn restrict_to_genes() {
    let table = OrthologTable::from_csv(REPORT).unwrap();
    let restricted = table.restrict_to_genes(&["AFUB_000020".to_string()]);
    assert_eq!(restricted.len(), 2);
    assert!(restricted.rows.iter().all(|row| row.gid == "AFUB_000020"));
}

#[test]
fn records_follow_column_order() {
    let table = OrthologTable::from_csv(REPORT).unwrap();
    let records = table.to_records();
    assert_eq!(records.len(), 5);
    assert_eq!(records[0][GID], "AFUB_000010");
    assert_eq!(records[0][ORTHOLOGS_ORGANISM], "Schizosaccharomyces pombe 972h");
    assert_eq!(records[0]["SYNTENIC"], "yes");
}
