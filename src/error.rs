//! Errors are `anyhow` errors. Each I/O and API boundary adds context describing what was being
//! attempted, so the chain printed with `{:#}` reads from the operation down to the cause.

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
