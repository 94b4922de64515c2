use crate::config::Config;
use crate::lookup::LookupService;
use actix_web::{
    get,
    http::header::ContentType,
    middleware::{DefaultHeaders, Logger},
    web, App, HttpResponse, HttpServer,
};
use chrono::Local;
use log::{error, info};
use serde::{Deserialize, Serialize};

pub struct AppData {
    pub lookup: LookupService,
    pub year: i32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DateResponse {
    pub date: String,
    pub holidays: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize)]
struct SearchQuery {
    date: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_date).service(index).service(search);
}

fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*"))
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let data = web::Data::new(AppData {
        lookup: LookupService::new(&config),
        year: config.year,
    });
    info!("Listening on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(configure)
            .wrap(cors_headers())
            .wrap(Logger::default())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

async fn find(
    web_data: &web::Data<AppData>,
    date: String,
) -> Result<Option<Vec<String>>, String> {
    let lookup = web_data.lookup.clone();
    match web::block(move || lookup.find(&date)).await {
        Ok(Ok(found)) => Ok(found),
        Ok(Err(err)) => Err(err.to_string()),
        Err(err) => Err(err.to_string()),
    }
}

#[get("/api/date/{date}")]
async fn api_date(web_data: web::Data<AppData>, date: web::Path<String>) -> HttpResponse {
    let date = date.into_inner();
    match find(&web_data, date.clone()).await {
        Ok(Some(holidays)) => HttpResponse::Ok().json(DateResponse { date, holidays }),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Date not found".to_string(),
        }),
        Err(err) => {
            error!("Lookup of {} failed: {}", date, err);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Database error".to_string(),
            })
        }
    }
}

#[get("/")]
async fn index(web_data: web::Data<AppData>) -> HttpResponse {
    let html = format!(
        include_str!("templates/index.html"),
        title = escape_html(&format!("Календарь праздников {}", web_data.year)),
        current_date = Local::now().format("%d.%m.%Y"),
    );
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html)
}

#[get("/search")]
async fn search(web_data: web::Data<AppData>, query: web::Query<SearchQuery>) -> HttpResponse {
    let date = query.into_inner().date.unwrap_or_default();
    let holidays = match find(&web_data, date.clone()).await {
        Ok(found) => found.unwrap_or_default(),
        Err(err) => {
            error!("Search for {} failed: {}", date, err);
            let html = format!(
                include_str!("templates/error.html"),
                error = "Ошибка базы данных",
            );
            return HttpResponse::InternalServerError()
                .content_type(ContentType::html())
                .body(html);
        }
    };

    let body = if holidays.is_empty() {
        "<p>Праздников на эту дату не найдено</p>".to_string()
    } else {
        let items: String = holidays
            .iter()
            .map(|holiday| format!("<li>{}</li>", escape_html(holiday)))
            .collect();
        format!("<ol>{}</ol>", items)
    };
    let html = format!(
        include_str!("templates/result.html"),
        date = escape_html(&date),
        body = body,
    );
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
