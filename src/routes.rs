use actix_cors::Cors;
use actix_web::{delete, get, post, web, HttpResponse};
use serde_json::json;

use crate::{
    config::AllowedOrigins,
    errors::{Error, Result},
    schemas::{MonthExpensesCreate, MonthLabel, Year},
    service::ExpenseService,
};

#[post("/save")]
async fn save_month_expenses(
    service: web::Data<ExpenseService>,
    json: web::Json<MonthExpensesCreate>,
) -> Result<HttpResponse> {
    let saved = service.save_month_expenses(json.into_inner()).await?;
    Ok(HttpResponse::Ok().json(saved))
}

#[get("/year/{year}")]
async fn get_year_expenses(
    service: web::Data<ExpenseService>,
    year: web::Path<Year>,
) -> Result<HttpResponse> {
    let sheets = service.get_year_expenses(year.into_inner()).await?;
    Ok(HttpResponse::Ok().json(sheets))
}

#[get("/{year}/{month}")]
async fn get_month_expenses(
    service: web::Data<ExpenseService>,
    path: web::Path<(Year, MonthLabel)>,
) -> Result<HttpResponse> {
    let (year, month) = path.into_inner();
    match service.get_month_expenses(year, month.as_str()).await? {
        Some(sheet) => Ok(HttpResponse::Ok().json(sheet)),
        None => Err(Error::NotFound(format!(
            "No expenses found for {month} {year}"
        ))),
    }
}

#[delete("/{year}/{month}")]
async fn delete_month_expenses(
    service: web::Data<ExpenseService>,
    path: web::Path<(Year, MonthLabel)>,
) -> Result<HttpResponse> {
    let (year, month) = path.into_inner();
    if !service.delete_month_expenses(year, month.as_str()).await? {
        return Err(Error::NotFound(format!(
            "No expenses found to delete for {month} {year}"
        )));
    }
    Ok(HttpResponse::Ok()
        .json(json!({ "message": format!("Expenses for {month} {year} deleted successfully") })))
}

/// Body and path errors become 422 responses with the same `detail` shape as
/// every other error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| Error::InvalidPayload(err.to_string()).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| Error::InvalidPayload(err.to_string()).into())
}

/// Browser access policy for the API. Any method and header is allowed; only
/// the origin is restricted.
pub fn cors(origins: &AllowedOrigins) -> Cors {
    let cors = match origins {
        AllowedOrigins::Any => Cors::default().allow_any_origin(),
        AllowedOrigins::List(origins) => origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin)),
    };
    cors.allow_any_method().allow_any_header()
}

/// Mounts the expense routes under `/api/expenses`.
///
/// `/year/{year}` must be registered before `/{year}/{month}`, otherwise the
/// latter would capture it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/expenses")
            .app_data(json_config())
            .app_data(path_config())
            .service(save_month_expenses)
            .service(get_year_expenses)
            .service(get_month_expenses)
            .service(delete_month_expenses),
    );
}
