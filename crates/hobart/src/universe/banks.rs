//! Default bank universe with FDIC certificate numbers.

use std::collections::HashMap;

/// A tracked bank, identified by FDIC certificate number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
    /// FDIC certificate number.
    pub cert: String,
    /// Full legal name as registered with the FDIC.
    pub name: String,
    /// Short display name used in output tables.
    pub short_name: String,
}

impl Bank {
    /// Create a new bank entry.
    pub fn new(
        cert: impl Into<String>,
        name: impl Into<String>,
        short_name: impl Into<String>,
    ) -> Self {
        Self {
            cert: cert.into(),
            name: name.into(),
            short_name: short_name.into(),
        }
    }
}

/// The default universe of large US commercial banks.
#[derive(Debug, Clone)]
pub struct BankUniverse {
    banks: Vec<Bank>,
    cert_index: HashMap<String, usize>,
}

impl BankUniverse {
    /// Create the universe with default constituents.
    pub fn new() -> Self {
        let banks = Self::default_constituents();
        let cert_index = banks
            .iter()
            .enumerate()
            .map(|(i, b)| (b.cert.clone(), i))
            .collect();

        Self { banks, cert_index }
    }

    /// Get all banks in the universe.
    pub fn banks(&self) -> &[Bank] {
        &self.banks
    }

    /// Get all certificate numbers.
    pub fn certs(&self) -> Vec<String> {
        self.banks.iter().map(|b| b.cert.clone()).collect()
    }

    /// Look up a bank by certificate number.
    pub fn by_cert(&self, cert: &str) -> Option<&Bank> {
        self.cert_index.get(cert).map(|&i| &self.banks[i])
    }

    /// Look up a bank by short display name.
    pub fn by_short_name(&self, short_name: &str) -> Option<&Bank> {
        self.banks.iter().find(|b| b.short_name == short_name)
    }

    /// Short display name for a certificate number, when tracked.
    pub fn display_name(&self, cert: &str) -> Option<&str> {
        self.by_cert(cert).map(|b| b.short_name.as_str())
    }

    /// The peer-group subset used for side-by-side comparison: the
    /// large diversified commercial banks, excluding the monoline
    /// card and consumer lenders.
    pub fn peers(&self) -> Vec<&Bank> {
        const PEER_NAMES: &[&str] = &[
            "Bank of America",
            "Citibank",
            "JPMorgan Chase",
            "U.S. Bank",
            "PNC Bank",
            "Truist Bank",
            "Goldman Sachs",
            "Morgan Stanley",
            "TD Bank",
            "BNY Mellon",
            "Fifth Third Bank",
            "Citizens Bank",
            "KeyBank",
            "Santander Bank",
        ];

        self.banks
            .iter()
            .filter(|b| PEER_NAMES.contains(&b.short_name.as_str()))
            .collect()
    }

    /// Default constituents: the large US commercial banks tracked by
    /// the metrics pipeline out of the box.
    fn default_constituents() -> Vec<Bank> {
        vec![
            Bank::new("32541", "Flagstar Bank, National Association", "Flagstar Bank"),
            Bank::new(
                "6560",
                "The Huntington National Bank",
                "The Huntington National Bank",
            ),
            Bank::new("12368", "Regions Bank", "Regions Bank"),
            Bank::new("3511", "Wells Fargo Bank, National Association", "Wells Fargo"),
            Bank::new("3510", "Bank of America, National Association", "Bank of America"),
            Bank::new("7213", "Citibank, National Association", "Citibank"),
            Bank::new("628", "JPMorgan Chase Bank, National Association", "JPMorgan Chase"),
            Bank::new("6548", "U.S. Bank National Association", "U.S. Bank"),
            Bank::new("6384", "PNC Bank, National Association", "PNC Bank"),
            Bank::new("9846", "Truist Bank", "Truist Bank"),
            Bank::new("33124", "Goldman Sachs Bank USA", "Goldman Sachs"),
            Bank::new("32992", "Morgan Stanley Bank, National Association", "Morgan Stanley"),
            Bank::new("18409", "TD Bank, National Association", "TD Bank"),
            Bank::new("4297", "Capital One, National Association", "Capital One"),
            Bank::new("639", "The Bank of New York Mellon", "BNY Mellon"),
            Bank::new("6672", "Fifth Third Bank, National Association", "Fifth Third Bank"),
            Bank::new("57957", "Citizens Bank, National Association", "Citizens Bank"),
            Bank::new("57803", "Ally Bank", "Ally Bank"),
            Bank::new("17534", "KeyBank National Association", "KeyBank"),
            Bank::new("5649", "Discover Bank", "Discover Bank"),
            Bank::new("27314", "Synchrony Bank", "Synchrony Bank"),
            Bank::new("29950", "Santander Bank, N.A.", "Santander Bank"),
        ]
    }
}

impl Default for BankUniverse {
    fn default() -> Self {
        Self::new()
    }
}
