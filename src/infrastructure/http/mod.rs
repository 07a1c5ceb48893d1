//! HTTP Adapters
//!
//! - `WildlifeApiSource`: HMAC-signed form POSTs to the telemetry API
//! - `WebDavSink`: basic-auth PUT uploads to a WebDAV file store

mod catalog_xml;
mod signing;
mod webdav;
mod wildlife;

pub use catalog_xml::{parse_catalog, CatalogParse};
pub use signing::{encode_params, hmac_hex, RequestSigner, SignedRequest};
pub use webdav::WebDavSink;
pub use wildlife::WildlifeApiSource;
