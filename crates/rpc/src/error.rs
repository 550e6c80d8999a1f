use quorumkv_core::Error;
use tonic::{Code, Status};

/// Map a domain [`Error`] onto a gRPC status code so it survives the wire
/// and can be reconstructed on the other side by [`status_to_error`].
pub(crate) fn error_to_status(err: Error) -> Status {
    match err {
        Error::RecordExists => Status::already_exists("record exists"),
        Error::RecordNotFound => Status::not_found("record not found"),
        Error::UnknownDaemon => Status::permission_denied("unknown daemon"),
        Error::NotEnoughDaemons => Status::unavailable("not enough daemons"),
        Error::QuorumNotReached => Status::aborted("quorum not reached"),
    }
}

/// Inverse of [`error_to_status`]. Any status code outside the ones the
/// services in this crate ever emit maps to `QuorumNotReached`, since that
/// is the closest "the fan-out didn't resolve" fallback.
pub(crate) fn status_to_error(status: Status) -> Error {
    match status.code() {
        Code::AlreadyExists => Error::RecordExists,
        Code::NotFound => Error::RecordNotFound,
        Code::PermissionDenied => Error::UnknownDaemon,
        Code::Unavailable => Error::NotEnoughDaemons,
        _ => Error::QuorumNotReached,
    }
}
