//! odsview-server: upload-and-convert endpoint plus static file serving

pub mod error;
pub mod upload;

use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use odsview_core::{EmptySheetPolicy, ServerConfig};
use std::path::PathBuf;

pub use error::ServeError;

/// Path of the conversion endpoint
pub const CONVERT_PATH: &str = "/convert_ods";

/// Read-only settings shared by all requests
#[derive(Debug, Clone)]
pub struct AppState {
    pub static_dir: PathBuf,
    pub temp_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
    pub empty_sheets: EmptySheetPolicy,
}

impl From<&ServerConfig> for AppState {
    fn from(config: &ServerConfig) -> Self {
        Self {
            static_dir: config.static_dir.clone(),
            temp_dir: config.temp_dir.clone(),
            max_upload_bytes: config.max_upload_bytes,
            empty_sheets: config.empty_sheets,
        }
    }
}

/// Register the conversion route and the static file fallback
pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<AppState>) {
    let static_dir = state.static_dir.clone();
    cfg.app_data(state)
        .service(web::resource(CONVERT_PATH).route(web::post().to(convert_ods)))
        .service(
            Files::new("/", static_dir)
                .index_file("index.html")
                .show_files_listing(),
        );
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.to_ascii_lowercase().contains("multipart/form-data"))
        .unwrap_or(false)
}

/// `POST /convert_ods`: convert the uploaded `file` field into JSON tables
pub async fn convert_ods(
    req: HttpRequest,
    multipart: Multipart,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServeError> {
    if !is_multipart(&req) {
        log::warn!("Rejected upload without multipart content type");
        return Err(ServeError::NotMultipart);
    }

    let bytes = upload::read_file_field(multipart, state.max_upload_bytes)
        .await
        .inspect_err(|e| log::warn!("Rejected upload: {}", e))?;
    let size = bytes.len();

    let worker_state = state.clone();
    let tables = web::block(move || {
        upload::convert_upload(
            &bytes,
            worker_state.temp_dir.as_deref(),
            worker_state.empty_sheets,
        )
    })
    .await?
    .inspect_err(|e| log::warn!("Conversion failed: {}", e))?;

    log::info!(
        "Converted upload of {} bytes into {} sheet(s)",
        size,
        tables.len()
    );
    Ok(HttpResponse::Ok().json(tables))
}
