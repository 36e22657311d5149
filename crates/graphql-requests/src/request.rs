use std::path::{Path, PathBuf};

use http::header;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::client::{PASSWORD, USERNAME};
use crate::GraphqlHttpResponse;

enum Template {
    Query(String),
    Mutation(String),
}

/// One GraphQL operation: a template file, its variables, and, once
/// [`send`](Self::send) has run, the captured response.
///
/// Exactly one template must be selected before sending. Selecting a second
/// template, of either kind, is a usage error and panics rather than silently
/// replacing the first selection.
#[must_use]
pub struct GraphqlRequest {
    http: reqwest::blocking::Client,
    endpoint: Url,
    query_dir: PathBuf,
    mutation_dir: PathBuf,
    template: Option<Template>,
    variables: serde_json::Map<String, Value>,
    response: Option<GraphqlHttpResponse>,
}

impl GraphqlRequest {
    pub(crate) fn new(
        http: reqwest::blocking::Client,
        endpoint: Url,
        query_dir: PathBuf,
        mutation_dir: PathBuf,
    ) -> Self {
        Self {
            http,
            endpoint,
            query_dir,
            mutation_dir,
            template: None,
            variables: serde_json::Map::new(),
            response: None,
        }
    }

    /// Selects the query template to send, by file name.
    #[track_caller]
    pub fn using_query(self, name: impl Into<String>) -> Self {
        self.select(Template::Query(name.into()))
    }

    /// Selects the mutation template to send, by file name.
    #[track_caller]
    pub fn using_mutation(self, name: impl Into<String>) -> Self {
        self.select(Template::Mutation(name.into()))
    }

    #[track_caller]
    fn select(mut self, template: Template) -> Self {
        assert!(
            self.template.is_none(),
            "a query or mutation template was already selected for this request"
        );
        self.template = Some(template);
        self
    }

    /// Adds one request variable. A later write for the same name replaces
    /// the earlier one.
    pub fn argument(mut self, name: impl Into<String>, value: impl serde::Serialize) -> Self {
        let value = serde_json::to_value(value).expect("to be able to serialize variables");
        self.variables.insert(name.into(), value);
        self
    }

    /// Adds every entry of `args` as a request variable.
    pub fn arguments<K, V>(mut self, args: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: serde::Serialize,
    {
        for (name, value) in args {
            self = self.argument(name, value);
        }
        self
    }

    /// Sends the operation and captures the response for inspection.
    ///
    /// Blocks until the round trip completes; no retries, no timeout beyond
    /// the transport's default.
    ///
    /// # Panics
    ///
    /// Panics if no template was selected, the template file cannot be read,
    /// or the HTTP round trip fails. Non-2xx responses are captured, not
    /// panicked.
    #[track_caller]
    pub fn send(mut self) -> Self {
        let document = self.document();
        let body = serde_json::to_string_pretty(&document)
            .expect("to be able to serialize the request document");
        debug!("sending request:\n{body}");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .basic_auth(USERNAME, Some(PASSWORD))
            .body(body)
            .send()
            .unwrap_or_else(|err| panic!("graphql request to {} failed: {err}", self.endpoint));

        let status = response.status();
        let headers = response.headers().clone();
        let text = response
            .text()
            .unwrap_or_else(|err| panic!("unable to read the response body: {err}"));
        debug!("replied with:\n{text}");

        self.response = Some(GraphqlHttpResponse::new(status, headers, text));
        self
    }

    #[track_caller]
    fn document(&self) -> Value {
        let query = match &self.template {
            Some(Template::Query(name)) => read_template(&self.query_dir, name),
            Some(Template::Mutation(name)) => read_template(&self.mutation_dir, name),
            None => {
                panic!("a query or mutation template must be selected before sending the request")
            }
        };

        let mut document = serde_json::Map::new();
        document.insert("query".to_owned(), query.into());
        if !self.variables.is_empty() {
            document.insert("variables".to_owned(), Value::Object(self.variables.clone()));
        }

        Value::Object(document)
    }

    /// The captured response, if [`send`](Self::send) has been called.
    pub fn response(&self) -> Option<&GraphqlHttpResponse> {
        self.response.as_ref()
    }

    /// # Panics
    ///
    /// Panics if [`send`](Self::send) has not been called.
    #[track_caller]
    pub fn into_response(self) -> GraphqlHttpResponse {
        match self.response {
            Some(response) => response,
            None => panic!("send() must be called before taking the response"),
        }
    }

    /// Whether the captured response carries a non-null top-level `errors`
    /// field. An unsent request reports `false`.
    pub fn has_errors(&self) -> bool {
        self.response().is_some_and(GraphqlHttpResponse::has_errors)
    }

    /// Extracts a value from the captured response body by path. An unsent
    /// request extracts nothing.
    pub fn extract(&self, path: &str) -> Option<&Value> {
        self.response().and_then(|response| response.extract(path))
    }
}

#[track_caller]
fn read_template(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("unable to read template {}: {err}", path.display()))
}
