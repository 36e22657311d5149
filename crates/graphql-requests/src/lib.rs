#![allow(unused_crate_dependencies, clippy::panic)]

//! Blocking GraphQL harness for a replication installation's administrative
//! API.
//!
//! Queries and mutations live as `.graphql` template files. A test picks one
//! by name, adds variables, and sends it with the fixed admin credentials:
//!
//! ```no_run
//! use graphql_requests::Client;
//!
//! let client = Client::new(
//!     "https://localhost:8993/admin/hub/graphql".parse().unwrap(),
//!     "itests/queries",
//!     "itests/mutations",
//! );
//!
//! let request = client
//!     .request()
//!     .using_query("getSites.graphql")
//!     .argument("siteId", "abc")
//!     .send();
//!
//! assert!(!request.has_errors());
//! let sites = request.extract("data.sites");
//! # let _ = sites;
//! ```
//!
//! Defects in the test itself (no template selected, an unreadable template
//! file, a dead endpoint) panic immediately so the offending test step is
//! the one that reports them. Absence, such as an unsent request, a missing
//! JSON path or no `errors` field, is reported as `None`/`false` instead.

mod client;
mod request;
mod response;

pub use client::{Client, PASSWORD, USERNAME};
pub use request::GraphqlRequest;
pub use response::GraphqlHttpResponse;
