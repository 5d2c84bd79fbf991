//! Result codes
//!
//! Typed view over the `RESULT` values a bridge reports.

use std::fmt;

/// Value of a reply's `RESULT` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Ok,
    CantReachPeer,
    DuplicatedId,
    DuplicatedDest,
    I2pError,
    InvalidKey,
    InvalidId,
    KeyNotFound,
    PeerNotFound,
    Timeout,
    /// No protocol version in the requested range is supported
    NoVersion,
    /// Anything this crate does not recognise, kept verbatim
    Other(String),
}

impl ResultCode {
    /// Parse the wire form. Matching is exact; unknown values are preserved.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "OK" => ResultCode::Ok,
            "CANT_REACH_PEER" => ResultCode::CantReachPeer,
            "DUPLICATED_ID" => ResultCode::DuplicatedId,
            "DUPLICATED_DEST" => ResultCode::DuplicatedDest,
            "I2P_ERROR" => ResultCode::I2pError,
            "INVALID_KEY" => ResultCode::InvalidKey,
            "INVALID_ID" => ResultCode::InvalidId,
            "KEY_NOT_FOUND" => ResultCode::KeyNotFound,
            "PEER_NOT_FOUND" => ResultCode::PeerNotFound,
            "TIMEOUT" => ResultCode::Timeout,
            "NOVERSION" => ResultCode::NoVersion,
            other => ResultCode::Other(other.to_string()),
        }
    }

    /// The wire form of this code
    pub fn as_str(&self) -> &str {
        match self {
            ResultCode::Ok => "OK",
            ResultCode::CantReachPeer => "CANT_REACH_PEER",
            ResultCode::DuplicatedId => "DUPLICATED_ID",
            ResultCode::DuplicatedDest => "DUPLICATED_DEST",
            ResultCode::I2pError => "I2P_ERROR",
            ResultCode::InvalidKey => "INVALID_KEY",
            ResultCode::InvalidId => "INVALID_ID",
            ResultCode::KeyNotFound => "KEY_NOT_FOUND",
            ResultCode::PeerNotFound => "PEER_NOT_FOUND",
            ResultCode::Timeout => "TIMEOUT",
            ResultCode::NoVersion => "NOVERSION",
            ResultCode::Other(value) => value.as_str(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ResultCode::Ok)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
