//! Local stand-in for the FungiDB downloads listing and report endpoints.

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use actix_web::rt::System;
use actix_web::web::{self, Data, Json};
use actix_web::{App, HttpResponse, HttpServer};
use serde_json::Value;

use fungidb_orthologs::config::Settings;

pub const REPORT: &str = "\"Gene ID\",\"Ortholog\",\"Organism\",\"Product\"\n\
\"AFUB_000010\",\"SPAC1002.01\",\"Schizosaccharomyces pombe 972h\",\"Mrx11, mitochondrial\"\n\
\"AFUB_000010\",\"C1_00010W_A\",\"Candida albicans SC5314\",\"hypothetical protein\"\n\
\"AFUB_000020\",\"YAL001C\",\"Saccharomyces cerevisiae S288C\",\"TFIIIC subunit\"\n\
\"AFUB_000020\",\"AFUA_1G00100\",\"Aspergillus fumigatus Af293\",\"unknown\"\n\
\"AFUB_000030\",\"SPBC1105.01\",\"Schizosaccharomyces pombe 972h\",\"kinase\"\n";

pub const LISTING: &str = r#"<html><body><pre>
<a href="/common/downloads/">Parent Directory</a>
<a href="Spombe972h/">Spombe972h/</a>
<a href="Build_number/">Build_number/</a>
<a href="AfumigatusA1163/">AfumigatusA1163/</a>
</pre></body></html>
"#;

/// Organism parameter answered with 422.
pub const UNKNOWN_ORGANISM: &str = "Bogus";
/// Organism parameter answered with 500.
pub const FAILING_ORGANISM: &str = "Broken";

type Seen = Mutex<Vec<Value>>;

pub struct FakeFungidb {
    pub base_url: String,
    seen: Data<Seen>,
}

impl FakeFungidb {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let seen: Data<Seen> = Data::new(Mutex::new(Vec::new()));
        let server_seen = seen.clone();
        thread::spawn(move || {
            System::new().block_on(async move {
                HttpServer::new(move || {
                    App::new()
                        .app_data(server_seen.clone())
                        .route("/downloads/", web::get().to(listing))
                        .route("/offline/", web::get().to(offline))
                        .route("/report", web::post().to(report))
                })
                .workers(1)
                .disable_signals()
                .listen(listener)
                .unwrap()
                .run()
                .await
            })
        });
        Self { base_url, seen }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            downloads_url: format!("{}/downloads/", self.base_url),
            report_url: format!("{}/report", self.base_url),
            listing_timeout: Duration::from_secs(10),
            report_timeout: Duration::from_secs(10),
        }
    }

    /// JSON bodies POSTed to the report endpoint, oldest first.
    pub fn report_requests(&self) -> Vec<Value> {
        self.seen.lock().unwrap().clone()
    }
}

async fn listing() -> HttpResponse {
    HttpResponse::Ok().content_type("text/html").body(LISTING)
}

async fn offline() -> HttpResponse {
    HttpResponse::ServiceUnavailable().body("maintenance")
}

async fn report(seen: Data<Seen>, body: Json<Value>) -> HttpResponse {
    let body = body.into_inner();
    let organism = body["searchConfig"]["parameters"]["organism"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    seen.lock().unwrap().push(body);
    match organism.as_str() {
        UNKNOWN_ORGANISM => HttpResponse::UnprocessableEntity().body("unknown organism"),
        FAILING_ORGANISM => HttpResponse::InternalServerError().body("database offline"),
        _ => HttpResponse::Ok().content_type("text/csv").body(REPORT),
    }
}
