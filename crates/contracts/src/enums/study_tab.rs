use serde::{Deserialize, Serialize};
use std::fmt;

/// Study material tabs under the chat input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyTab {
    #[default]
    ShortNote,
    Question,
    Reference,
}

impl StudyTab {
    /// Wire/route code of the tab
    pub fn code(&self) -> &'static str {
        match self {
            StudyTab::ShortNote => "shortnote",
            StudyTab::Question => "question",
            StudyTab::Reference => "reference",
        }
    }

    /// Human readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            StudyTab::ShortNote => "Short Note",
            StudyTab::Question => "Question",
            StudyTab::Reference => "Reference Links",
        }
    }

    /// Icon name used by the frontend icon set
    pub fn icon(&self) -> &'static str {
        match self {
            StudyTab::ShortNote => "file-text",
            StudyTab::Question => "message-square",
            StudyTab::Reference => "link",
        }
    }

    pub fn all() -> Vec<StudyTab> {
        vec![StudyTab::ShortNote, StudyTab::Question, StudyTab::Reference]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "shortnote" => Some(StudyTab::ShortNote),
            "question" => Some(StudyTab::Question),
            "reference" => Some(StudyTab::Reference),
            _ => None,
        }
    }
}

impl fmt::Display for StudyTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for tab in StudyTab::all() {
            assert_eq!(StudyTab::from_code(tab.code()), Some(tab));
        }
        assert_eq!(StudyTab::from_code("summary"), None);
    }

    #[test]
    fn test_default_is_shortnote() {
        assert_eq!(StudyTab::default(), StudyTab::ShortNote);
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(
            serde_json::to_string(&StudyTab::ShortNote).unwrap(),
            "\"shortnote\""
        );
        let tab: StudyTab = serde_json::from_str("\"reference\"").unwrap();
        assert_eq!(tab, StudyTab::Reference);
    }
}
