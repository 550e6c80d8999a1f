use std::time::Duration;

/// Minimum roster size a [`crate::Router`] will accept at construction.
pub const REPLICATION_FACTOR: usize = 3;

/// Number of matching outcomes (payload or error) that decide a quorum
/// vote in the [`crate::Frontend`].
pub const MIN_REDUNDANCY: usize = 2;

/// Backoff between failed [`crate::Frontend`] bootstrap `List` attempts.
pub const INIT_TIMEOUT: Duration = Duration::from_millis(100);
