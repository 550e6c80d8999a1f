/// Domain error taxonomy shared by [`crate::Node`], [`crate::Router`] and
/// [`crate::Frontend`].
///
/// Errors compare by identity, not by message: the frontend's quorum
/// tallies group fan-out results by `Error` equality, so every variant here
/// must stay a plain, comparable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// Fewer than `MinRedundancy` nodes were available to satisfy a request.
    NotEnoughDaemons,
    /// Fan-out completed without any outcome reaching quorum.
    QuorumNotReached,
    /// `Put` against a key that is already present.
    RecordExists,
    /// `Get` or `Del` against a key that is absent.
    RecordNotFound,
    /// A heartbeat arrived from an address outside the configured roster.
    UnknownDaemon,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
