//! Audit trail browsing endpoint, read-only

use actix_web::{HttpRequest, HttpResponse, get, web};

use tessera_config::service::audit;

use crate::{
    api::{ListParams, tenant_id},
    error::AppError,
    model::AppState,
};

/// GET /v1/audit
///
/// Same query contract as the entry list; the trail itself is append-only
/// and this surface never mutates it.
#[get("")]
pub async fn search_audit(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, AppError> {
    let tenant = tenant_id(&req)?;
    let request = params.to_request()?;
    let result = audit::search(&data.db, &tenant, &request).await?;

    Ok(HttpResponse::Ok().json(result))
}
