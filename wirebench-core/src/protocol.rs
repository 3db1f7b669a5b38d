use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Request protocol variant under comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Protocol {
    /// HTTP GET returning a JSON document.
    Rest,
    /// gRPC unary call, decoded by the RPC stub.
    Grpc,
    /// gRPC unary call returning opaque bytes which the client decodes itself.
    GrpcRaw,
}

impl Protocol {
    pub const ALL: [Protocol; 3] = [Protocol::Rest, Protocol::Grpc, Protocol::GrpcRaw];

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Rest => "rest",
            Protocol::Grpc => "grpc",
            Protocol::GrpcRaw => "grpc-raw",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown protocol `{0}` (expected one of: rest, grpc, grpc-raw)")]
pub struct ParseProtocolError(String);

impl FromStr for Protocol {
    type Err = ParseProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" => Ok(Protocol::Rest),
            "grpc" => Ok(Protocol::Grpc),
            "grpc-raw" | "grpc_raw" => Ok(Protocol::GrpcRaw),
            _ => Err(ParseProtocolError(s.to_string())),
        }
    }
}
