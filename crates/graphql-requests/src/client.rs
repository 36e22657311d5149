use std::path::PathBuf;

use url::Url;

use crate::GraphqlRequest;

/// Basic-auth user every admin request authenticates as.
pub const USERNAME: &str = "admin";

/// Test installations keep the default admin password.
pub const PASSWORD: &str = "admin";

/// Shared configuration for issuing GraphQL operations against one admin
/// endpoint: where the query and mutation templates live, plus the transport
/// every [`GraphqlRequest`] reuses.
pub struct Client {
    endpoint: Url,
    query_dir: PathBuf,
    mutation_dir: PathBuf,
    http: reqwest::blocking::Client,
}

impl Client {
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed.
    pub fn new(
        endpoint: Url,
        query_dir: impl Into<PathBuf>,
        mutation_dir: impl Into<PathBuf>,
    ) -> Self {
        // Test installations serve self-signed certificates, so certificate
        // validation stays off. Never acceptable outside a test harness.
        let http = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .expect("to be able to build the http client");

        Self {
            endpoint,
            query_dir: query_dir.into(),
            mutation_dir: mutation_dir.into(),
            http,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Starts a new operation inheriting this client's configuration.
    pub fn request(&self) -> GraphqlRequest {
        GraphqlRequest::new(
            self.http.clone(),
            self.endpoint.clone(),
            self.query_dir.clone(),
            self.mutation_dir.clone(),
        )
    }
}
