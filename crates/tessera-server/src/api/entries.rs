//! Entry CRUD and list endpoints

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};

use tessera_common::TesseraError;
use tessera_config::{model::EntryForm, service::entry};

use crate::{
    api::{ListParams, actor, tenant_id},
    error::AppError,
    model::AppState,
};

/// POST /v1/entries
#[post("")]
pub async fn create_entry(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Json<EntryForm>,
) -> Result<HttpResponse, AppError> {
    let tenant = tenant_id(&req)?;
    let created = entry::create(
        &data.db,
        &data.scope_locks,
        &tenant,
        actor(&req).as_deref(),
        body.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Created().json(created))
}

/// GET /v1/entries
#[get("")]
pub async fn search_entries(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let tenant = tenant_id(&req)?;
    let request = params.to_request()?;
    let result = entry::search(&data.db, &tenant, &request).await?;

    Ok(HttpResponse::Ok().json(result))
}

/// GET /v1/entries/{id}
#[get("/{id}")]
pub async fn get_entry(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let tenant = tenant_id(&req)?;
    let id = path.into_inner();

    match entry::find_one(&data.db, &tenant, &id).await? {
        Some(found) => Ok(HttpResponse::Ok().json(found)),
        None => Err(TesseraError::not_found("entry", id).into()),
    }
}

/// PUT /v1/entries/{id}
#[put("/{id}")]
pub async fn replace_entry(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<EntryForm>,
) -> Result<HttpResponse, AppError> {
    let tenant = tenant_id(&req)?;
    let replaced = entry::replace(
        &data.db,
        &data.scope_locks,
        &tenant,
        actor(&req).as_deref(),
        &path.into_inner(),
        body.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(replaced))
}

/// DELETE /v1/entries/{id}
#[delete("/{id}")]
pub async fn delete_entry(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let tenant = tenant_id(&req)?;
    entry::delete(&data.db, &tenant, &path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
