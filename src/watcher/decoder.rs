//! Block Watcher: Call Data Heuristic
//!
//! Purpose:
//!     Guess the token a tracked wallet bought from the raw call data of a
//!     router transaction.
//!
//! Heuristic:
//!     The input is rendered as "0x"-prefixed hex. If that string is 40
//!     characters or shorter there is no swap payload. Otherwise its last
//!     40 hex characters (the final 20 bytes) are taken as the token
//!     address. For the usual swapExactETHForTokens layout the last word
//!     of the path is the output token, which is what this picks up.
//!
//! Limitations:
//!     The function selector is NOT checked, so any call data of suitable
//!     length yields a "token" made of its trailing 20 bytes. Alerts built
//!     from non-swap calls will name a spurious address.

use alloy::primitives::hex;

/// Longest prefixed hex input still treated as "no swap payload"
pub const NO_PAYLOAD_MAX_HEX_LEN: usize = 40;

/// Hex characters in an address
const ADDRESS_HEX_LEN: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallPayload {
    /// Lowercase "0x"-prefixed guess at the acquired token
    Swap { token: String },
    OtherAction,
}

/// "0x"-prefixed lowercase hex of the call data
pub fn input_hex(input: &[u8]) -> String {
    hex::encode_prefixed(input)
}

/// Classify call data per the trailing-address heuristic.
pub fn classify_input(input: &[u8]) -> CallPayload {
    let encoded = input_hex(input);
    if encoded.len() <= NO_PAYLOAD_MAX_HEX_LEN {
        return CallPayload::OtherAction;
    }
    let tail = &encoded[encoded.len() - ADDRESS_HEX_LEN..];
    CallPayload::Swap {
        token: format!("0x{}", tail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(hex_str: &str) -> Vec<u8> {
        hex::decode(hex_str).unwrap()
    }

    #[test]
    fn test_empty_input_is_other_action() {
        assert_eq!(classify_input(&[]), CallPayload::OtherAction);
    }

    #[test]
    fn test_prefixed_length_at_threshold_is_other_action() {
        // 19 bytes -> "0x" + 38 chars = 40
        let input = vec![0xab; 19];
        assert_eq!(input_hex(&input).len(), 40);
        assert_eq!(classify_input(&input), CallPayload::OtherAction);
    }

    #[test]
    fn test_twenty_bytes_is_whole_input() {
        let input = vec![0xcd; 20];
        assert_eq!(
            classify_input(&input),
            CallPayload::Swap {
                token: format!("0x{}", "cd".repeat(20))
            }
        );
    }

    #[test]
    fn test_takes_final_twenty_bytes() {
        let input = bytes(&format!("{}{}", "a".repeat(24), "b".repeat(40)));
        assert_eq!(
            classify_input(&input),
            CallPayload::Swap {
                token: format!("0x{}", "b".repeat(40))
            }
        );
    }

    #[test]
    fn test_swap_exact_eth_for_tokens_path_tail() {
        // swapExactETHForTokens(amountOutMin, path=[WETH, PEPE], to, deadline)
        let calldata = concat!(
            "7ff36ab5",
            "0000000000000000000000000000000000000000000000000de0b6b3a7640000",
            "0000000000000000000000000000000000000000000000000000000000000080",
            "000000000000000000000000af2358e98683265cbd3a48509123d390ddf54534",
            "0000000000000000000000000000000000000000000000000000000065f00000",
            "0000000000000000000000000000000000000000000000000000000000000002",
            "000000000000000000000000c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            "0000000000000000000000006982508145454ce325ddbe47a25d4ec3d2311933",
        );
        assert_eq!(
            classify_input(&bytes(calldata)),
            CallPayload::Swap {
                token: "0x6982508145454ce325ddbe47a25d4ec3d2311933".to_string()
            }
        );
    }

    #[test]
    fn test_no_selector_check() {
        // transfer(address,uint256): trailing bytes are the amount, not a token
        let calldata = concat!(
            "a9059cbb",
            "000000000000000000000000af2358e98683265cbd3a48509123d390ddf54534",
            "0000000000000000000000000000000000000000000000000de0b6b3a7640000",
        );
        match classify_input(&bytes(calldata)) {
            CallPayload::Swap { token } => {
                assert_eq!(token, "0x0000000000000000000000000de0b6b3a7640000");
            }
            other => panic!("expected spurious Swap, got {:?}", other),
        }
    }
}
