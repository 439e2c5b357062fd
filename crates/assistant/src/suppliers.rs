//! Supplier lookup for command dispatch.
//!
//! Email commands address suppliers by free-text name. The name is matched
//! against the supplier table as a case-insensitive substring; dispatch
//! only proceeds when exactly one supplier matches.

use integrations::SupabaseClient;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;

/// Table holding supplier contact records.
const SUPPLIER_TABLE: &str = "suppliers";

#[derive(Debug, Deserialize)]
struct SupplierRow {
    email: String,
}

/// Resolve a free-text supplier name to the single matching email address.
///
/// # Errors
///
/// [`ApiError::SupplierNotFound`] when nothing matches,
/// [`ApiError::AmbiguousSupplier`] when more than one supplier matches, and
/// [`ApiError::Upstream`] when the lookup itself fails.
pub async fn resolve_supplier_email(db: &SupabaseClient, name: &str) -> Result<String, ApiError> {
    let rows: Vec<SupplierRow> = db.select_ilike(SUPPLIER_TABLE, "email", "name", name).await?;

    let mut rows = rows.into_iter();
    match (rows.next(), rows.next()) {
        (Some(row), None) => {
            info!(supplier = %name, "Supplier resolved");
            Ok(row.email)
        }
        (None, _) => Err(ApiError::SupplierNotFound {
            name: name.to_string(),
        }),
        (Some(_), Some(_)) => Err(ApiError::AmbiguousSupplier {
            name: name.to_string(),
        }),
    }
}
