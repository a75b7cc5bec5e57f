/// Data structures shared between the classifiers and the browser bridge
use serde::{Deserialize, Serialize};

/// Information about a browser tab
///
/// The classifiers only ever read these; the browser owns their lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: i32,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
    /// `None` when the tab is not in any group.
    #[serde(default)]
    pub group_id: Option<i32>,
}

impl TabInfo {
    pub fn new(id: i32, url: String, title: String) -> TabInfo {
        TabInfo {
            id,
            url,
            title,
            fav_icon_url: None,
            group_id: None,
        }
    }
}

/// Colors accepted by the tab group API
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
    Orange,
}

impl GroupColor {
    /// Palette new groups are drawn from.
    pub const PALETTE: [GroupColor; 8] = [
        GroupColor::Grey,
        GroupColor::Blue,
        GroupColor::Red,
        GroupColor::Yellow,
        GroupColor::Green,
        GroupColor::Pink,
        GroupColor::Purple,
        GroupColor::Cyan,
    ];

    /// Pick a palette color at random, falling back to grey if no entropy is available.
    pub fn random() -> GroupColor {
        let mut buf = [0u8; 1];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => GroupColor::PALETTE[buf[0] as usize % GroupColor::PALETTE.len()],
            Err(e) => {
                log::warn!("No entropy for group color: {}", e);
                GroupColor::Grey
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupColor::Grey => "grey",
            GroupColor::Blue => "blue",
            GroupColor::Red => "red",
            GroupColor::Yellow => "yellow",
            GroupColor::Green => "green",
            GroupColor::Pink => "pink",
            GroupColor::Purple => "purple",
            GroupColor::Cyan => "cyan",
            GroupColor::Orange => "orange",
        }
    }
}

/// An existing tab group as reported by the browser
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TabGroupInfo {
    pub id: i32,
    #[serde(default)]
    pub title: String,
    pub color: GroupColor,
}
