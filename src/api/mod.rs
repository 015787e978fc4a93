//! Zabbix API Client
//!
//! The harness talks to the server through three small layers:
//!
//! 1. **Protocol Layer** (`protocol`): JSON-RPC 2.0 message types
//! 2. **Transport Layer** (`transport`): HTTP POST transport
//! 3. **Client Layer** (`client`): `call`, `login`, `version`

pub mod protocol;

pub mod transport;

pub mod client;

pub mod error;

pub use client::ZabbixClient;
pub use error::ApiError;
pub use protocol::{ApiRequest, ApiResponse, RpcError};
pub use transport::{HttpTransport, Transport};
