//! Block Watcher: Type Definitions
//!
//! Purpose:
//!     Native-currency amounts with exact decimal rendering, and the alert
//!     record built for each matching transaction.
//!
//! Dependencies:
//!     - alloy (U256)
//!
//! Notes:
//!     - Amounts never pass through f64. 10^30 smallest units renders as
//!       "1000000000000", not a rounded float.

use alloy::primitives::U256;
use std::fmt;

/// Smallest units per display unit (10^18)
pub const UNIT_SCALE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

const FRACTION_DIGITS: usize = 18;

/// Native-currency value held in smallest units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NativeAmount(U256);

impl NativeAmount {
    pub fn from_smallest(raw: U256) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    /// Value truncated to whole display units
    pub fn whole_units(&self) -> U256 {
        self.0 / UNIT_SCALE
    }

    pub fn meets_whole_units(&self, min: u64) -> bool {
        self.whole_units() >= U256::from(min)
    }
}

impl fmt::Display for NativeAmount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let whole = self.0 / UNIT_SCALE;
        let frac = self.0 % UNIT_SCALE;
        if frac.is_zero() {
            return write!(f, "{}", whole);
        }
        // frac < 10^18 fits in the low limb
        let digits = format!("{:0width$}", frac.as_limbs()[0], width = FRACTION_DIGITS);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}

/// What the transaction looked like
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertKind {
    /// Call data long enough to carry a token address (lowercase 0x hex)
    Swap { token: String },
    /// No swap payload; some other interaction
    OtherAction,
}

/// Alert for one matching transaction. Rendered, sent once, dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub kind: AlertKind,
    /// Checksummed sender address
    pub sender: String,
    pub tx_hash: String,
    pub value: Option<NativeAmount>,
}

pub const OTHER_ACTION_NOTE: &str = "performed another action";

impl AlertMessage {
    pub fn swap(sender: String, tx_hash: String, token: String, value: NativeAmount) -> Self {
        Self {
            kind: AlertKind::Swap { token },
            sender,
            tx_hash,
            value: Some(value),
        }
    }

    pub fn other_action(sender: String, tx_hash: String, value: Option<NativeAmount>) -> Self {
        Self {
            kind: AlertKind::OtherAction,
            sender,
            tx_hash,
            value,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match &self.kind {
            AlertKind::Swap { token } => Some(token),
            AlertKind::OtherAction => None,
        }
    }

    /// Text body posted to the robot
    pub fn render(&self) -> String {
        let mut text = match &self.kind {
            AlertKind::Swap { token } => format!(
                "[Tx]:{}\n[Account]:{}\n[Bought]:{}\n",
                self.tx_hash, self.sender, token
            ),
            AlertKind::OtherAction => format!(
                "[Account]:{}\n[Tx]:{}\n[Note]:{}\n",
                self.sender, self.tx_hash, OTHER_ACTION_NOTE
            ),
        };
        if let Some(value) = &self.value {
            text.push_str(&format!("[Value]:{}\n", value));
        }
        text
    }
}
