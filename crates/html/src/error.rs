//! Errors for the fallible edges of the crate: loading configuration.
//!
//! Scanning itself never fails; malformed markup is absorbed and reported through
//! [`ScanReport`](crate::ScanReport).

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let e = Error::from(io::Error::new(io::ErrorKind::NotFound, "scan.toml"));
        assert_eq!(format!("{e}"), "I/O error: scan.toml");
    }

    #[test]
    fn toml_error_converts() {
        let parse = toml::from_str::<toml::Table>("trace = ").map(|_| ());
        let Err(inner) = parse else {
            panic!("expected a TOML error");
        };
        let e = Error::from(inner);
        assert!(format!("{e}").starts_with("TOML parse error: "), "got: {e}");
    }
}
