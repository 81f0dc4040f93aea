//! Static Address Allow-Lists
//!
//! Fixed sets of address strings used to decide which transactions are
//! worth an alert: the tracked wallets (sender side) and the swap routers
//! (recipient side).
//!
//! Matching is exact string equality. No case folding and no 0x handling:
//! callers pass EIP-55 checksummed strings (`Address::to_checksum(None)`),
//! and the default lists are stored in that form. A lowercase copy of a
//! checksummed entry does NOT match.
//!
//! Created: 2026-10-19

use std::collections::BTreeSet;
use std::fmt;

/// Uniswap V2 Router02 on Ethereum mainnet
pub const DEFAULT_ROUTER: &str = "0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D";

/// Wallet followed by default
pub const DEFAULT_TRACKED: &str = "0xAf2358e98683265cBd3a48509123d390dDf54534";

/// Immutable set of address strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList {
    entries: BTreeSet<String>,
}

impl AddressList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma-separated list (as given on the CLI or in the env).
    /// Entries are trimmed and empty ones dropped; case is kept as written.
    pub fn parse(raw: &str) -> Self {
        Self::new(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        )
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.entries.contains(candidate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl fmt::Display for AddressList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.iter().collect::<Vec<_>>().join(", ");
        write!(f, "[{}]", joined)
    }
}

/// True if `candidate` is in `list`, compared verbatim.
pub fn is_known_address(candidate: &str, list: &AddressList) -> bool {
    list.contains(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routers() -> AddressList {
        AddressList::new([DEFAULT_ROUTER])
    }

    #[test]
    fn test_exact_match_is_known() {
        assert!(is_known_address(DEFAULT_ROUTER, &routers()));
    }

    #[test]
    fn test_absent_address_is_unknown() {
        assert!(!is_known_address(DEFAULT_TRACKED, &routers()));
        assert!(!is_known_address("", &routers()));
        assert!(!is_known_address("0x", &routers()));
    }

    #[test]
    fn test_case_differing_address_is_a_miss() {
        let lower = DEFAULT_ROUTER.to_lowercase();
        assert_ne!(lower, DEFAULT_ROUTER);
        assert!(!is_known_address(&lower, &routers()));
        assert!(!is_known_address(&DEFAULT_ROUTER.to_uppercase(), &routers()));
    }

    #[test]
    fn test_no_prefix_normalization() {
        let bare = DEFAULT_ROUTER.trim_start_matches("0x");
        assert!(!is_known_address(bare, &routers()));
    }

    #[test]
    fn test_parse_trims_and_skips_empty() {
        let list = AddressList::parse(&format!(" {} ,, {} ,", DEFAULT_ROUTER, DEFAULT_TRACKED));
        assert_eq!(list.len(), 2);
        assert!(list.contains(DEFAULT_ROUTER));
        assert!(list.contains(DEFAULT_TRACKED));
    }

    #[test]
    fn test_parse_keeps_case() {
        let list = AddressList::parse(&DEFAULT_TRACKED.to_lowercase());
        assert!(!list.contains(DEFAULT_TRACKED));
        assert!(list.contains(&DEFAULT_TRACKED.to_lowercase()));
    }

    #[test]
    fn test_empty_list_matches_nothing() {
        let list = AddressList::parse("");
        assert!(list.is_empty());
        assert!(!is_known_address(DEFAULT_ROUTER, &list));
    }

    #[test]
    fn test_default_addresses_are_checksummed() {
        use alloy::primitives::Address;
        for raw in [DEFAULT_ROUTER, DEFAULT_TRACKED] {
            let addr: Address = raw.parse().unwrap();
            assert_eq!(addr.to_checksum(None), raw);
        }
    }
}
