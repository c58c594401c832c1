//! Bank universe management.
//!
//! Defines which institutions the pipeline tracks, keyed by FDIC
//! certificate number.

pub mod banks;

pub use banks::{Bank, BankUniverse};

/// Trait for bank universes.
pub trait Universe {
    /// Get all certificate numbers in the universe.
    fn certs(&self) -> Vec<String>;

    /// Check if a certificate number is in the universe.
    fn contains(&self, cert: &str) -> bool {
        self.certs().contains(&cert.to_string())
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.certs().len()
    }
}

impl Universe for BankUniverse {
    fn certs(&self) -> Vec<String> {
        self.certs()
    }
}
