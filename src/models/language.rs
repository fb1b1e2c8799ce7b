use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::models::SyncError;

/// The three document slots every room carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    Markup,
    Style,
    Script,
}

impl LanguageTag {
    /// All slots, in the order a late joiner receives them.
    pub const ALL: [LanguageTag; 3] = [LanguageTag::Markup, LanguageTag::Style, LanguageTag::Script];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::Markup => "markup",
            LanguageTag::Style => "style",
            LanguageTag::Script => "script",
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageTag {
    type Err = SyncError;

    /// Parses canonical names and the editor mode names the browser client sends.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markup" | "html" | "xml" => Ok(LanguageTag::Markup),
            "style" | "css" => Ok(LanguageTag::Style),
            "script" | "javascript" | "js" => Ok(LanguageTag::Script),
            other => Err(SyncError::UnknownLanguage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_and_editor_names() {
        assert_eq!("markup".parse::<LanguageTag>(), Ok(LanguageTag::Markup));
        assert_eq!("html".parse::<LanguageTag>(), Ok(LanguageTag::Markup));
        // CodeMirror's HTML editor runs in xml mode
        assert_eq!("xml".parse::<LanguageTag>(), Ok(LanguageTag::Markup));
        assert_eq!("css".parse::<LanguageTag>(), Ok(LanguageTag::Style));
        assert_eq!("javascript".parse::<LanguageTag>(), Ok(LanguageTag::Script));
    }

    #[test]
    fn rejects_a_fourth_slot() {
        assert_eq!(
            "python".parse::<LanguageTag>(),
            Err(SyncError::UnknownLanguage("python".to_string()))
        );
        // Tags are case sensitive on the wire.
        assert!("Script".parse::<LanguageTag>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LanguageTag::Style).unwrap(), "\"style\"");
    }
}
