//! Identity types for menus entities
//!
//! Every persisted row is keyed by a database integer. Wrapping them in
//! distinct newtypes keeps a page id from being passed where a menu id is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Common behaviour of the strongly-typed integer identifiers.
pub trait EntityIdType: Copy + Eq + std::hash::Hash + fmt::Display {
    /// Wrap a raw database id.
    fn new(raw: i32) -> Self;

    /// The raw database id.
    fn as_i32(&self) -> i32;
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i32);

        impl EntityIdType for $name {
            fn new(raw: i32) -> Self {
                Self(raw)
            }

            fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(raw: i32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }
    };
}

define_entity_id!(
    /// Identifier of a page in the site hierarchy.
    ///
    /// `PageId::HOMEPAGE` (0) does not exist physically; the front office
    /// uses it to address the site root.
    PageId
);
define_entity_id!(
    /// Identifier of a custom menu.
    MenuId
);
define_entity_id!(
    /// Identifier of a custom menu item.
    ItemId
);

impl PageId {
    /// Sentinel page id meaning "homepage".
    pub const HOMEPAGE: PageId = PageId(0);

    /// Whether this id is the homepage sentinel.
    pub fn is_homepage(&self) -> bool {
        self.0 == 0
    }
}
