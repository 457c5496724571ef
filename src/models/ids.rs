//! Typed ids for stored records
//!
//! Ids are v4 UUIDs in storage and in mapping files. On screen they are
//! shortened to a kind prefix plus the first eight hex digits, e.g.
//! `cat-1a2b3c4d`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const SHORT_LEN: usize = 8;

/// Text that is neither a UUID nor a prefixed UUID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} id '{input}'")]
pub struct IdParseError {
    pub kind: &'static str,
    pub input: String,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Prefix of the displayed short form
            pub const PREFIX: &'static str = $prefix;

            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Whether `text` is this id's displayed short form
            pub fn matches_short(&self, text: &str) -> bool {
                text.trim().eq_ignore_ascii_case(&self.to_string())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", Self::PREFIX, &self.0.to_string()[..SHORT_LEN])
            }
        }

        /// Accepts the full UUID, with or without the kind prefix
        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let bare = s.strip_prefix(Self::PREFIX).unwrap_or(s);
                Uuid::parse_str(bare).map(Self).map_err(|_| IdParseError {
                    kind: $kind,
                    input: s.to_string(),
                })
            }
        }
    };
}

define_id!(
    /// Income or expense category
    CategoryId,
    "cat-",
    "category"
);
define_id!(PayeeId, "pay-", "payee");
define_id!(
    /// One (category, year, month) budget slot
    BudgetEntryId,
    "bud-",
    "budget entry"
);
define_id!(TemplateId, "tpl-", "template");
define_id!(TransactionId, "txn-", "transaction");
