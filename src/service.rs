use std::path::Path;

use serde::Serialize;

use crate::client::FungidbClient;
use crate::error::OrthologError;
use crate::fasta;
use crate::organism;
use crate::table::OrthologTable;

/// Orthologs for a genome file together with the organism key that was
/// queried (useful when it was inferred).
#[derive(Debug, Clone)]
pub struct GenomeOrthologs {
    pub organism: String,
    pub table: OrthologTable,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenomeListing {
    pub genomes: Vec<String>,
}

#[derive(Clone)]
pub struct OrthologService<C: FungidbClient> {
    client: C,
}

impl<C: FungidbClient> OrthologService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn list_genomes(&self) -> Result<GenomeListing, OrthologError> {
        Ok(GenomeListing {
            genomes: self.client.list_genomes()?,
        })
    }

    /// Orthologs for every gene of a CDS/protein FASTA.
    ///
    /// An explicit `organism` is resolved against the registry and used
    /// verbatim when unknown; without one the organism is inferred from the
    /// file. An empty gene id extraction does not restrict the result.
    pub fn get_orthologs_for_genome(
        &self,
        fasta_path: &Path,
        organism: Option<&str>,
        references: Option<&[String]>,
    ) -> Result<GenomeOrthologs, OrthologError> {
        if !fasta_path.exists() {
            return Err(OrthologError::FastaNotFound(fasta_path.to_path_buf()));
        }

        let organism = resolve_organism(fasta_path, organism)?;
        tracing::info!("querying orthologs for {organism} from {}", fasta_path.display());

        let gene_ids = fasta::extract_gene_ids(fasta_path)?;
        let gene_ids = (!gene_ids.is_empty()).then_some(gene_ids.as_slice());

        let default_refs;
        let references = match references {
            Some(refs) if !refs.is_empty() => refs,
            _ => {
                default_refs = organism::default_references();
                default_refs.as_slice()
            }
        };

        let table = self
            .client
            .get_orthologs_for_genes(&organism, gene_ids, Some(references))?;
        Ok(GenomeOrthologs { organism, table })
    }

    /// Orthologs for an organism key, no FASTA involved.
    pub fn get_orthologs_by_organism(
        &self,
        target: &str,
        references: &[String],
        gene_ids: Option<&[String]>,
    ) -> Result<OrthologTable, OrthologError> {
        self.client
            .get_orthologs_for_genes(target, gene_ids, Some(references))
    }
}

fn resolve_organism(fasta_path: &Path, organism: Option<&str>) -> Result<String, OrthologError> {
    if let Some(name) = organism.map(str::trim).filter(|name| !name.is_empty()) {
        return Ok(organism::resolve(name).unwrap_or(name).to_string());
    }
    let inferred = fasta::infer_organism(fasta_path).ok_or(OrthologError::UnresolvedOrganism)?;
    tracing::info!("inferred organism {inferred} from {}", fasta_path.display());
    Ok(inferred.to_string())
}
