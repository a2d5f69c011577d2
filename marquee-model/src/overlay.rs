use std::fmt;
use std::str::FromStr;

use crate::{error::ModelError, title::Title};

/// The four per-user title lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OverlayList {
    Seen,
    Unseen,
    Starred,
    Favourite,
}

impl OverlayList {
    pub const ALL: [OverlayList; 4] = [
        OverlayList::Seen,
        OverlayList::Unseen,
        OverlayList::Starred,
        OverlayList::Favourite,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OverlayList::Seen => "seen",
            OverlayList::Unseen => "unseen",
            OverlayList::Starred => "starred",
            OverlayList::Favourite => "favourite",
        }
    }
}

impl fmt::Display for OverlayList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayList {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OverlayList::ALL
            .into_iter()
            .find(|list| list.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::UnknownVariant {
                kind: "overlay list",
                value: s.to_string(),
            })
    }
}

/// Per-title projection of a user's overlay.
///
/// `is_seen` and `is_unseen` may both be true: the overlay store does not
/// keep the two lists disjoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayFlags {
    #[cfg_attr(feature = "serde", serde(rename = "isSeen"))]
    pub is_seen: bool,
    #[cfg_attr(feature = "serde", serde(rename = "isUnseen"))]
    pub is_unseen: bool,
    #[cfg_attr(feature = "serde", serde(rename = "isStarred"))]
    pub is_starred: bool,
    #[cfg_attr(feature = "serde", serde(rename = "isFavourite"))]
    pub is_favourite: bool,
}

/// A title annotated with the requesting user's flags.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TitleWithOverlay {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub title: Title,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub flags: OverlayFlags,
}
