//! REST API over the ortholog service.
//!
//! Every handler builds its own blocking client and runs the FungiDB call on
//! actix's blocking pool; nothing is shared between requests except the
//! settings.

use std::path::{Path, PathBuf};

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::middleware::Logger;
use actix_web::web::{self, Data, Json, Query};
use actix_web::{App, HttpResponse, HttpServer, ResponseError, get, post};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::client::FungidbHttpClient;
use crate::config::Settings;
use crate::error::OrthologError;
use crate::output::TsvOutput;
use crate::service::{GenomeOrthologs, OrthologService};

pub struct ApiState {
    pub settings: Settings,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Status for `/orthologs/tsv`, which only looks at the message.
    fn by_message(err: OrthologError) -> Self {
        if !(err.is_not_found() || err.is_validation()) {
            return Self::from(err);
        }
        let detail = err.to_string();
        let status = if detail.to_lowercase().contains("not found") {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::BAD_REQUEST
        };
        Self::new(status, detail)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl From<OrthologError> for ApiError {
    fn from(err: OrthologError) -> Self {
        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else if err.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {err}");
        }
        Self::new(status, err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(json!({ "detail": self.detail }))
    }
}

#[derive(Debug, Deserialize)]
pub struct OrthologRequest {
    pub fasta_path: String,
    #[serde(default)]
    pub organism: Option<String>,
    #[serde(default)]
    pub references: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct OrthologQuery {
    pub fasta_path: Option<String>,
    pub organism: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrthologResponse {
    pub organism: String,
    pub fasta_path: String,
    pub rows: Vec<Value>,
    pub count: usize,
}

impl OrthologResponse {
    fn new(path: &Path, result: GenomeOrthologs) -> Self {
        Self {
            organism: result.organism,
            fasta_path: path.display().to_string(),
            rows: result.table.to_records(),
            count: result.table.len(),
        }
    }
}

#[get("/")]
async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "FungiDB ortholog API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /health",
            "GET /genomes",
            "POST /orthologs",
            "GET /orthologs",
            "GET /orthologs/tsv",
        ],
    }))
}

#[get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[get("/genomes")]
async fn genomes(state: Data<ApiState>) -> Result<HttpResponse, ApiError> {
    let settings = state.settings.clone();
    let listing = run_blocking(move || {
        OrthologService::new(FungidbHttpClient::new(&settings)?).list_genomes()
    })
    .await?;
    Ok(HttpResponse::Ok().json(listing))
}

#[post("/orthologs")]
async fn post_orthologs(
    state: Data<ApiState>,
    request: Json<OrthologRequest>,
) -> Result<Json<OrthologResponse>, ApiError> {
    let request = request.into_inner();
    let path = resolve_fasta_path(&request.fasta_path)?;
    let result = genome_orthologs(
        &state.settings,
        path.clone(),
        request.organism,
        request.references,
    )
    .await?;
    Ok(Json(OrthologResponse::new(&path, result)))
}

#[get("/orthologs")]
async fn get_orthologs(
    state: Data<ApiState>,
    query: Query<OrthologQuery>,
) -> Result<Json<OrthologResponse>, ApiError> {
    let query = query.into_inner();
    let path = resolve_fasta_path(&required_fasta_path(query.fasta_path)?)?;
    let result = genome_orthologs(&state.settings, path.clone(), query.organism, None).await?;
    Ok(Json(OrthologResponse::new(&path, result)))
}

#[get("/orthologs/tsv")]
async fn get_orthologs_tsv(
    state: Data<ApiState>,
    query: Query<OrthologQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let path = resolve_fasta_path(&required_fasta_path(query.fasta_path)?)?;
    let result = genome_orthologs(&state.settings, path, query.organism, None)
        .await
        .map_err(ApiError::by_message)?;
    let body = TsvOutput::to_string(&result.table)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(body))
}

fn required_fasta_path(value: Option<String>) -> Result<String, ApiError> {
    value
        .filter(|path| !path.trim().is_empty())
        .ok_or_else(|| OrthologError::InvalidRequest("Provide fasta_path".to_string()).into())
}

/// Relative paths are taken from the server's working directory.
fn resolve_fasta_path(value: &str) -> Result<PathBuf, ApiError> {
    let path = PathBuf::from(value);
    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(|err| OrthologError::Filesystem(err.to_string()))?
            .join(path)
    };
    if !path.exists() {
        return Err(OrthologError::FastaNotFound(PathBuf::from(value)).into());
    }
    Ok(path)
}

async fn genome_orthologs(
    settings: &Settings,
    path: PathBuf,
    organism: Option<String>,
    references: Option<Vec<String>>,
) -> Result<GenomeOrthologs, OrthologError> {
    let settings = settings.clone();
    run_blocking(move || {
        let service = OrthologService::new(FungidbHttpClient::new(&settings)?);
        service.get_orthologs_for_genome(&path, organism.as_deref(), references.as_deref())
    })
    .await
}

async fn run_blocking<T, F>(f: F) -> Result<T, OrthologError>
where
    F: FnOnce() -> Result<T, OrthologError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|err| OrthologError::Worker(err.to_string()))?
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(root)
        .service(health)
        .service(genomes)
        .service(post_orthologs)
        .service(get_orthologs_tsv)
        .service(get_orthologs);
}

#[actix_web::main]
pub async fn serve(settings: Settings, host: &str, port: u16) -> std::io::Result<()> {
    let state = Data::new(ApiState { settings });
    tracing::info!("listening on http://{host}:{port}");
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure)
            .wrap(Logger::default())
    })
    .bind((host, port))?
    .run()
    .await
}
