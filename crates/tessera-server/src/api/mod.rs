//! V1 API routing and request plumbing

pub mod audit;
pub mod entries;
pub mod health;

use actix_web::{HttpRequest, Scope, web};
use serde::Deserialize;

use tessera_api::{FacetRequest, Predicate, SearchRequest, SortClause};
use tessera_common::{DEFAULT_PAGE_LIMIT, TENANT_HEADER, TesseraError, USER_HEADER};

use crate::error::AppError;

/// Create the V1 routes
///
/// Routes:
/// - POST   /v1/entries - Create entry
/// - GET    /v1/entries - List entries with query/sort/facets
/// - GET    /v1/entries/{id} - Get entry
/// - PUT    /v1/entries/{id} - Replace entry
/// - DELETE /v1/entries/{id} - Delete entry
/// - GET    /v1/audit - Browse the audit trail
/// - GET    /v1/health - Liveness probe
pub fn routes() -> Scope {
    web::scope("/v1")
        .service(
            web::scope("/entries")
                .service(entries::create_entry)
                .service(entries::search_entries)
                .service(entries::get_entry)
                .service(entries::replace_entry)
                .service(entries::delete_entry),
        )
        .service(web::scope("/audit").service(audit::search_audit))
        .service(web::scope("/health").service(health::health))
}

/// Tenant id from the request headers; required on every data route
pub(crate) fn tenant_id(req: &HttpRequest) -> Result<String, AppError> {
    header_value(req, TENANT_HEADER).ok_or_else(|| {
        TesseraError::invalid_param(TENANT_HEADER, "tenant header is required").into()
    })
}

/// Acting user for audit attribution, when supplied
pub(crate) fn actor(req: &HttpRequest) -> Option<String> {
    header_value(req, USER_HEADER)
}

fn header_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Query parameters shared by the entry and audit list endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Predicate tree as JSON, e.g. `{"op":"eq","field":"module","value":"CHECKOUT"}`
    pub query: Option<String>,
    /// `field`, `field:asc` or `field:desc`
    pub sort: Option<String>,
    /// Comma-separated `field` or `field:count` items
    pub facets: Option<String>,
    #[serde(default)]
    pub offset: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

impl ListParams {
    pub(crate) fn to_request(&self) -> Result<SearchRequest, TesseraError> {
        let predicate = match &self.query {
            Some(raw) => Some(serde_json::from_str::<Predicate>(raw).map_err(|e| {
                TesseraError::invalid_param("query", format!("not a valid query tree: {e}"))
            })?),
            None => None,
        };
        let sort = self.sort.as_deref().map(SortClause::parse).transpose()?;
        let facets = self
            .facets
            .as_deref()
            .map(FacetRequest::parse_list)
            .transpose()?
            .unwrap_or_default();

        Ok(SearchRequest {
            predicate,
            sort,
            offset: self.offset,
            limit: self.limit,
            facets,
        })
    }
}
