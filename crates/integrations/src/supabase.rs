//! Supabase client covering the two surfaces the assistant uses:
//! PostgREST tables (`/rest/v1`) and object storage (`/storage/v1`).
//!
//! Supabase expects the service key twice on every call, as an `apikey`
//! header and as a bearer token; both are attached here so callers never
//! think about auth.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::IntegrationError;

/// Service name used in errors and logs.
const SERVICE: &str = "supabase";

/// Client for Supabase tables and storage.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    /// Create a client for the project at `base_url` using the service key.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{path}", self.base_url)
    }

    /// Public download URL for a stored object.
    ///
    /// Built locally; Supabase serves anything under `object/public` without
    /// auth as long as the bucket is public.
    #[must_use]
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url)
    }

    /// Insert a single row into `table`.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError`] when the request fails or PostgREST
    /// answers with a non-success status.
    pub async fn insert<T: Serialize>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<(), IntegrationError> {
        debug!(table, "Inserting row");
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|source| IntegrationError::Request {
                service: SERVICE,
                source,
            })?;

        Self::require_success(response).await.map(|_| ())
    }

    /// Select `columns` from `table` where `column` contains `needle`,
    /// case-insensitively (PostgREST `ilike` with `*` wildcards).
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError`] on request failure, non-success status,
    /// or a response body that does not deserialize to rows of `T`.
    pub async fn select_ilike<T: DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
        column: &str,
        needle: &str,
    ) -> Result<Vec<T>, IntegrationError> {
        let pattern = format!("ilike.*{needle}*");
        debug!(table, column, %pattern, "Selecting rows");
        let response = self
            .client
            .get(self.table_url(table))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .query(&[("select", columns), (column, pattern.as_str())])
            .send()
            .await
            .map_err(|source| IntegrationError::Request {
                service: SERVICE,
                source,
            })?;

        let body = Self::require_success(response).await?;
        serde_json::from_str(&body).map_err(|e| IntegrationError::Protocol {
            service: SERVICE,
            reason: format!("invalid rows payload: {e}"),
        })
    }

    /// Upload raw bytes to `bucket` at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError`] when the request fails or storage
    /// answers with a non-success status.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<(), IntegrationError> {
        debug!(bucket, path, size = bytes.len(), "Uploading object");
        let mut request = self
            .client
            .post(self.object_url(bucket, path))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .body(bytes);

        if let Some(content_type) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type);
        }

        let response = request
            .send()
            .await
            .map_err(|source| IntegrationError::Request {
                service: SERVICE,
                source,
            })?;

        Self::require_success(response).await.map(|_| ())
    }

    /// Read the response body and turn non-success statuses into errors
    /// carrying that body.
    async fn require_success(response: reqwest::Response) -> Result<String, IntegrationError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| IntegrationError::Request {
                service: SERVICE,
                source,
            })?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(IntegrationError::Api {
                service: SERVICE,
                status: status.as_u16(),
                message: body,
            })
        }
    }
}
