//! API routes
//!
//! Every resource group is nested under `/api` and carries its table as an
//! `Extension`, which the generic handlers read.

use axum::{
    routing::{get, put, MethodRouter},
    Extension, Router,
};
use ss_store::Table;

use crate::error::ApiError;
use crate::extractors::AppState;
use crate::handlers::{health, profiles, records};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api", api_router())
        .fallback(route_not_found)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .nest("/users", keyed_collection(Table::Users))
        .nest("/employees", keyed_collection(Table::Employees))
        .nest("/managers", keyed_collection(Table::Managers))
        .nest("/skills", child_collection(Table::Skills))
        .nest("/projects", projects_router())
        .nest("/profiles", profiles_router())
        .nest("/currentProjects", child_collection(Table::CurrentProjects))
        .nest("/caia", child_collection(Table::CaiaUtilization))
        .nest("/poc", child_collection(Table::PocUtilization))
}

fn collection_root() -> MethodRouter<AppState> {
    get(records::list_records).post(records::create_record)
}

/// `/:id` addresses a single row by its primary key
fn keyed_collection(table: Table) -> Router<AppState> {
    Router::new()
        .route("/", collection_root())
        .route(
            "/:id",
            get(records::get_record)
                .put(records::update_record)
                .delete(records::delete_record),
        )
        .layer(Extension(table))
}

/// `GET /:id` filters by the parent key, `PUT`/`DELETE /:id` address the row itself
fn child_collection(table: Table) -> Router<AppState> {
    Router::new()
        .route("/", collection_root())
        .route(
            "/:id",
            get(records::list_by_parent)
                .put(records::update_record)
                .delete(records::delete_record),
        )
        .layer(Extension(table))
}

fn projects_router() -> Router<AppState> {
    Router::new()
        .route("/", collection_root())
        .route("/employee/:employee_id", get(records::list_by_parent))
        .route(
            "/:id",
            put(records::update_record).delete(records::delete_record),
        )
        .layer(Extension(Table::Projects))
}

fn profiles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(records::list_records))
        .route(
            "/:employee_id",
            get(records::get_record)
                .put(profiles::upsert_profile)
                .delete(records::delete_record),
        )
        .layer(Extension(Table::Profiles))
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
