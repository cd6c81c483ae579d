//! Static win-level table: maps the server's `winLevel` to a presentation
//! tier. Unknown levels resolve to `None`, with no special treatment and never an
//! error.

use book_events::{WinLevelData, WinLevelKind};

const WIN_LEVELS: &[(u32, WinLevelData)] = &[
    (
        1,
        WinLevelData {
            alias: "small",
            kind: WinLevelKind::Small,
            sfx: Some("sfx_winlevel_small"),
            bgm: None,
        },
    ),
    (
        2,
        WinLevelData {
            alias: "medium",
            kind: WinLevelKind::Medium,
            sfx: Some("sfx_winlevel_medium"),
            bgm: None,
        },
    ),
    (
        3,
        WinLevelData {
            alias: "big",
            kind: WinLevelKind::Big,
            sfx: Some("sfx_winlevel_big"),
            bgm: None,
        },
    ),
    (
        4,
        WinLevelData {
            alias: "mega",
            kind: WinLevelKind::Big,
            sfx: Some("sfx_winlevel_mega"),
            bgm: None,
        },
    ),
    (
        5,
        WinLevelData {
            alias: "epic",
            kind: WinLevelKind::Big,
            sfx: Some("sfx_winlevel_epic"),
            bgm: None,
        },
    ),
    (
        6,
        WinLevelData {
            alias: "max",
            kind: WinLevelKind::Max,
            sfx: Some("sfx_winlevel_max"),
            bgm: Some("bgm_bigwin"),
        },
    ),
];

pub fn win_level_data(level: u32) -> Option<WinLevelData> {
    WIN_LEVELS
        .iter()
        .find(|(key, _)| *key == level)
        .map(|(_, data)| *data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_resolve() {
        assert_eq!(win_level_data(1).unwrap().alias, "small");
        assert_eq!(win_level_data(6).unwrap().kind, WinLevelKind::Max);
    }

    #[test]
    fn unknown_level_gets_no_special_treatment() {
        assert!(win_level_data(0).is_none());
        assert!(win_level_data(99).is_none());
    }
}
