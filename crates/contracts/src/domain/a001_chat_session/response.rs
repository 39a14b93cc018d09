//! Typed assistant payloads and the simulated reply generator

use crate::enums::{QuestionKind, StudyTab};
use serde::{Deserialize, Serialize};

/// Sample question of one format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPrompt {
    pub kind: QuestionKind,
    pub label: String,
    pub example: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLink {
    pub title: String,
    pub description: String,
}

/// Structured part of an assistant message, one variant per study tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResponsePayload {
    ShortNote { notes: Vec<String> },
    Question { items: Vec<QuestionPrompt> },
    Reference { refs: Vec<ReferenceLink> },
}

impl ResponsePayload {
    /// Tab this payload answers (the message "response type")
    pub fn tab(&self) -> StudyTab {
        match self {
            ResponsePayload::ShortNote { .. } => StudyTab::ShortNote,
            ResponsePayload::Question { .. } => StudyTab::Question,
            ResponsePayload::Reference { .. } => StudyTab::Reference,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    pub content: String,
    pub payload: ResponsePayload,
}

/// Build the mocked assistant answer for `input` in the given tab.
///
/// Output depends only on its arguments.
pub fn generate_reply(tab: StudyTab, input: &str) -> AssistantReply {
    match tab {
        StudyTab::ShortNote => AssistantReply {
            content: format!("Here are the key short notes based on your query \"{input}\":"),
            payload: ResponsePayload::ShortNote {
                notes: vec![
                    "Key concepts and main ideas extracted from your document".to_string(),
                    "Important definitions and terminology".to_string(),
                    "Summary of critical information for quick review".to_string(),
                    format!("Specific insights related to: {input}"),
                ],
            },
        },
        StudyTab::Question => AssistantReply {
            content: format!("I've generated questions based on your query \"{input}\":"),
            payload: ResponsePayload::Question {
                items: QuestionKind::all()
                    .into_iter()
                    .map(|kind| QuestionPrompt {
                        kind,
                        label: kind.display_name().to_string(),
                        example: format!("Sample {} question about {input}", kind.sample_noun()),
                    })
                    .collect(),
            },
        },
        StudyTab::Reference => AssistantReply {
            content: format!("Here are reference links related to \"{input}\":"),
            payload: ResponsePayload::Reference {
                refs: vec![
                    ReferenceLink {
                        title: "Related Academic Papers".to_string(),
                        description: "Semantic Scholar integration".to_string(),
                    },
                    ReferenceLink {
                        title: "Auto-generated Citations".to_string(),
                        description: "APA/MLA format ready".to_string(),
                    },
                ],
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_matches_tab() {
        for tab in StudyTab::all() {
            assert_eq!(generate_reply(tab, "cells").payload.tab(), tab);
        }
    }

    #[test]
    fn test_reply_is_deterministic() {
        assert_eq!(
            generate_reply(StudyTab::Question, "photosynthesis"),
            generate_reply(StudyTab::Question, "photosynthesis")
        );
    }

    #[test]
    fn test_shortnote_mentions_input() {
        let reply = generate_reply(StudyTab::ShortNote, "mitosis");
        assert_eq!(
            reply.content,
            "Here are the key short notes based on your query \"mitosis\":"
        );
        match reply.payload {
            ResponsePayload::ShortNote { notes } => {
                assert_eq!(notes.len(), 4);
                assert_eq!(notes[3], "Specific insights related to: mitosis");
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_question_items_cover_every_kind() {
        match generate_reply(StudyTab::Question, "WWI").payload {
            ResponsePayload::Question { items } => {
                let kinds: Vec<_> = items.iter().map(|i| i.kind).collect();
                assert_eq!(kinds, QuestionKind::all());
                assert_eq!(items[2].example, "Sample multiple choice question about WWI");
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_payload_is_tagged_by_kind() {
        let payload = generate_reply(StudyTab::Reference, "x").payload;
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["kind"], "reference");
        assert_eq!(json["refs"][0]["title"], "Related Academic Papers");

        let short: ResponsePayload =
            serde_json::from_str(r#"{"kind":"shortnote","notes":["a"]}"#).unwrap();
        assert_eq!(short.tab(), StudyTab::ShortNote);
    }
}
