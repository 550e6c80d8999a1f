use bytes::Bytes;

/// Address of a service endpoint (a node or a router).
///
/// `SocketAddr` is already `Copy + Eq + Hash + Display`, which is all the
/// roster and liveness maps need; no wrapper newtype earns its keep here.
pub type ServiceAddr = std::net::SocketAddr;

/// Identifier of a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordID(pub u64);

impl From<u64> for RecordID {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for RecordID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable record payload.
///
/// # Test
///
/// ```
/// use quorumkv_core::Payload;
///
/// let a = Payload::from(&b"hello"[..]);
/// let b = Payload::from(&b"hello"[..]);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Payload(pub Bytes);

impl From<&[u8]> for Payload {
    fn from(value: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(value))
    }
}

impl From<Vec<u8>> for Payload {
    fn from(value: Vec<u8>) -> Self {
        Self(Bytes::from(value))
    }
}

impl AsRef<[u8]> for Payload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
