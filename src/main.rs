use actix_cors::Cors;
use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::http::header::ContentDisposition;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer, ResponseError, Result};
use serde::Serialize;

use qr_studio::color::parse_color;
use qr_studio::config::Config;
use qr_studio::error::RenderError;
use qr_studio::render::Renderer;
use qr_studio::request::{Caption, ModuleShape, RenderRequest};

#[derive(Serialize)]
struct ServerInfo {
    message: String,
    status: String,
    version: String,
    shapes: Vec<String>,
}

/// Multipart fields of the generation form. Numeric fields reject
/// non-numeric input at extraction time.
#[derive(Debug, MultipartForm)]
struct GenerateForm {
    data: Text<String>,
    logo: Option<Bytes>,
    shape: Option<Text<String>>,
    gradient: Option<Text<String>>,
    frame_width: Option<Text<u32>>,
    frame_color: Option<Text<String>>,
    custom_text: Option<Text<String>>,
    text_color: Option<Text<String>>,
    text_font: Option<Text<String>>,
    text_size: Option<Text<u32>>,
    bold: Option<Text<String>>,
    italic: Option<Text<String>>,
    underline: Option<Text<String>>,
}

fn flag(field: &Option<Text<String>>) -> bool {
    field
        .as_ref()
        .map(|value| value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Map the form onto a render request. The HTTP surface pins the flat
/// palette: white background, black modules.
fn build_request(form: GenerateForm) -> Result<RenderRequest, RenderError> {
    let mut request = RenderRequest::new(form.data.into_inner());

    request.logo = form
        .logo
        .map(|upload| upload.data.to_vec())
        .filter(|bytes| !bytes.is_empty());

    if let Some(shape) = &form.shape {
        request.shape = ModuleShape::parse(shape);
    }
    request.gradient = flag(&form.gradient);
    request.frame_width = form.frame_width.map(Text::into_inner).unwrap_or(0);
    request.frame_color = match &form.frame_color {
        Some(value) => parse_color(value)?,
        None => request.frame_color,
    };

    let custom_text = form
        .custom_text
        .map(Text::into_inner)
        .filter(|text| !text.is_empty());
    if let Some(text) = custom_text {
        request.caption = Some(Caption {
            text,
            color: match &form.text_color {
                Some(value) => parse_color(value)?,
                None => qr_studio::color::BLACK,
            },
            font_family: form
                .text_font
                .map(Text::into_inner)
                .unwrap_or_else(|| "Arial".to_string()),
            size: form.text_size.map(Text::into_inner).unwrap_or(20),
            bold: flag(&form.bold),
            italic: flag(&form.italic),
            underline: flag(&form.underline),
        });
    }

    Ok(request)
}

async fn index() -> Result<HttpResponse> {
    let info = ServerInfo {
        message: "QR Studio rendering API".to_string(),
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        shapes: vec!["square".to_string(), "circle".to_string()],
    };
    Ok(HttpResponse::Ok().json(info))
}

async fn generate_qrcode(
    renderer: web::Data<Renderer>,
    MultipartForm(form): MultipartForm<GenerateForm>,
) -> Result<HttpResponse> {
    let request = match build_request(form) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Rejected request: {}", e);
            return Ok(e.error_response());
        }
    };

    log::info!(
        "Rendering QR: {} byte payload, logo: {}, shape: {:?}, gradient: {}",
        request.payload.len(),
        request.logo.is_some(),
        request.shape,
        request.gradient
    );

    match renderer.render(&request) {
        Ok(png) => Ok(HttpResponse::Ok()
            .content_type("image/png")
            .insert_header(ContentDisposition::attachment("qrcode.png"))
            .body(png)),
        Err(e) => {
            log::error!("Render failed: {}", e);
            Ok(e.error_response())
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::load().expect("Failed to load config");
    let renderer = web::Data::new(Renderer::new());

    let host = config.server.host.clone();
    let port = config.server.port;

    println!("QR Studio server starting on http://{}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);
        App::new()
            .app_data(renderer.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .route("/", web::get().to(index))
            .route("/generate_qrcode", web::post().to(generate_qrcode))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
