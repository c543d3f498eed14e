//! Law 3 (make it easy): the 2-minute rule progression.

use serde::{Deserialize, Serialize};

/// Difficulty tier of a habit's target behavior.
///
/// Stored as its integer level. Out-of-range stored values are clamped into
/// `0..=3` when decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(from = "i64", into = "u8")]
pub enum ResponseLevel {
    #[default]
    Gateway,
    Building,
    Growing,
    Mastered,
}

impl ResponseLevel {
    pub const MAX: ResponseLevel = ResponseLevel::Mastered;

    pub fn as_u8(self) -> u8 {
        match self {
            ResponseLevel::Gateway => 0,
            ResponseLevel::Building => 1,
            ResponseLevel::Growing => 2,
            ResponseLevel::Mastered => 3,
        }
    }

    /// The next tier up, saturating at [`ResponseLevel::Mastered`].
    pub fn next(self) -> Self {
        Self::from(i64::from(self.as_u8()) + 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            ResponseLevel::Gateway => "Gateway (2 min)",
            ResponseLevel::Building => "Building (5 min)",
            ResponseLevel::Growing => "Growing (10 min)",
            ResponseLevel::Mastered => "Mastered",
        }
    }
}

impl From<i64> for ResponseLevel {
    fn from(level: i64) -> Self {
        match level {
            i64::MIN..=0 => ResponseLevel::Gateway,
            1 => ResponseLevel::Building,
            2 => ResponseLevel::Growing,
            _ => ResponseLevel::Mastered,
        }
    }
}

impl From<ResponseLevel> for u8 {
    fn from(level: ResponseLevel) -> Self {
        level.as_u8()
    }
}

/// The four versions of a habit's behavior plus the tier currently practiced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Response {
    #[serde(default)]
    pub two_minute: String,
    #[serde(default)]
    pub five_minute: String,
    #[serde(default)]
    pub ten_minute: String,
    #[serde(default)]
    pub full: String,
    #[serde(default)]
    pub level: ResponseLevel,
}

impl Response {
    /// Text of the version at the current level, with a generic fallback
    /// when that version was left blank.
    pub fn current_version_name(&self) -> &str {
        let (text, fallback) = match self.level {
            ResponseLevel::Gateway => (&self.two_minute, "2-minute version"),
            ResponseLevel::Building => (&self.five_minute, "5-minute version"),
            ResponseLevel::Growing => (&self.ten_minute, "10-minute version"),
            ResponseLevel::Mastered => (&self.full, "Full habit"),
        };
        if text.is_empty() {
            fallback
        } else {
            text
        }
    }

    pub fn level_name(&self) -> &'static str {
        self.level.name()
    }

    pub fn progress(&self) -> f64 {
        f64::from(self.level.as_u8()) / 3.0
    }

    /// Move up one tier. Returns `false` when already mastered.
    pub fn level_up(&mut self) -> bool {
        let next = self.level.next();
        let changed = next != self.level;
        self.level = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_up_caps_at_mastered() {
        let mut response = Response::default();
        assert!(response.level_up());
        assert!(response.level_up());
        assert!(response.level_up());
        assert_eq!(response.level, ResponseLevel::Mastered);
        assert!(!response.level_up());
        assert_eq!(response.level, ResponseLevel::Mastered);
        assert_eq!(response.progress(), 1.0);
    }

    #[test]
    fn current_version_falls_back_when_blank() {
        let mut response = Response {
            two_minute: "Read one page".into(),
            ..Default::default()
        };
        assert_eq!(response.current_version_name(), "Read one page");
        response.level = ResponseLevel::Building;
        assert_eq!(response.current_version_name(), "5-minute version");
        response.level = ResponseLevel::Mastered;
        assert_eq!(response.current_version_name(), "Full habit");
    }

    #[test]
    fn stored_level_is_clamped() {
        let high: Response = serde_json::from_str(r#"{"level": 9}"#).unwrap();
        assert_eq!(high.level, ResponseLevel::Mastered);
        let low: Response = serde_json::from_str(r#"{"level": -2}"#).unwrap();
        assert_eq!(low.level, ResponseLevel::Gateway);
    }

    #[test]
    fn level_serializes_as_integer() {
        let response = Response {
            level: ResponseLevel::Growing,
            ..Default::default()
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["level"], 2);
    }
}
