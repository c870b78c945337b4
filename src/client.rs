use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::{Value, json};

use crate::config::Settings;
use crate::error::OrthologError;
use crate::genomes;
use crate::organism;
use crate::table::OrthologTable;

const ORTHOLOG_TABLE: &str = "OrthologsLite";
const WDK_WEIGHT: u32 = 10;

pub trait FungidbClient: Send + Sync {
    fn list_genomes(&self) -> Result<Vec<String>, OrthologError>;

    /// Full `OrthologsLite` table for one organism, columns normalized.
    fn fetch_ortholog_table(&self, organism: &str) -> Result<OrthologTable, OrthologError>;

    /// Orthologs of `organism` restricted to `references` (the default
    /// reference species when `None` or empty) and, when given, to the
    /// query genes in `gene_ids`.
    fn get_orthologs_for_genes(
        &self,
        organism: &str,
        gene_ids: Option<&[String]>,
        references: Option<&[String]>,
    ) -> Result<OrthologTable, OrthologError> {
        let table = self.fetch_ortholog_table(organism)?;
        let fetched = table.len();
        let table = match references {
            Some(refs) if !refs.is_empty() => table.filter_to_references(refs),
            _ => table.filter_to_references(organism::DEFAULT_REFERENCE_SPECIES),
        };
        let table = match gene_ids {
            Some(ids) => table.restrict_to_genes(ids),
            None => table,
        };
        tracing::debug!(
            "{organism}: kept {} of {fetched} ortholog rows",
            table.len()
        );
        Ok(table)
    }
}

#[derive(Clone)]
pub struct FungidbHttpClient {
    client: Client,
    settings: Settings,
}

impl FungidbHttpClient {
    pub fn new(settings: &Settings) -> Result<Self, OrthologError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("fungidb-orthologs/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| OrthologError::FungidbHttp(err.to_string()))?,
        );
        // per-request timeouts; the report and the listing differ a lot
        let client = Client::builder()
            .default_headers(headers)
            .timeout(None::<Duration>)
            .build()
            .map_err(|err| OrthologError::FungidbHttp(err.to_string()))?;
        Ok(Self {
            client,
            settings: settings.clone(),
        })
    }
}

impl FungidbClient for FungidbHttpClient {
    fn list_genomes(&self) -> Result<Vec<String>, OrthologError> {
        genomes::fetch_genome_listing(
            &self.client,
            &self.settings.downloads_url,
            self.settings.listing_timeout,
        )
    }

    fn fetch_ortholog_table(&self, organism: &str) -> Result<OrthologTable, OrthologError> {
        let body = report_request(organism::api_name(organism));
        tracing::info!("requesting {ORTHOLOG_TABLE} for {organism}");
        tracing::debug!("POST {} {body}", self.settings.report_url);

        let response = self
            .client
            .post(&self.settings.report_url)
            .timeout(self.settings.report_timeout)
            .json(&body)
            .send()
            .map_err(|err| OrthologError::FungidbHttp(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(OrthologError::UnknownOrganism {
                organism: organism.to_string(),
            });
        }
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_else(|_| "FungiDB request failed".to_string());
            return Err(OrthologError::FungidbStatus {
                status: status.as_u16(),
                message,
            });
        }

        let text = response
            .text()
            .map_err(|err| OrthologError::FungidbHttp(err.to_string()))?;
        let table = OrthologTable::from_csv(&text)?;
        tracing::info!("{organism}: {} ortholog rows", table.len());
        Ok(table)
    }
}

/// JSON body for the `GenesByTaxonGene` tabular report.
pub fn report_request(organism: &str) -> Value {
    json!({
        "searchConfig": {
            "parameters": { "organism": organism },
            "wdkWeight": WDK_WEIGHT,
        },
        "reportConfig": {
            "tables": [ORTHOLOG_TABLE],
            "includeHeader": true,
            "attachmentType": "csv",
        },
    })
}
