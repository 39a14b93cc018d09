use serde::{Deserialize, Serialize};

/// Question formats offered in the "Question" tab dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    TrueFalse,
    ShortAnswer,
    MultipleChoice,
    FillBlank,
}

impl QuestionKind {
    pub fn code(&self) -> &'static str {
        match self {
            QuestionKind::TrueFalse => "true-false",
            QuestionKind::ShortAnswer => "short-answer",
            QuestionKind::MultipleChoice => "multiple-choice",
            QuestionKind::FillBlank => "fill-blank",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            QuestionKind::TrueFalse => "True/False",
            QuestionKind::ShortAnswer => "Short Answer",
            QuestionKind::MultipleChoice => "Multiple Choice",
            QuestionKind::FillBlank => "Fill the Blank",
        }
    }

    /// Noun used in generated sample questions
    pub fn sample_noun(&self) -> &'static str {
        match self {
            QuestionKind::TrueFalse => "true/false",
            QuestionKind::ShortAnswer => "short answer",
            QuestionKind::MultipleChoice => "multiple choice",
            QuestionKind::FillBlank => "fill-in-the-blank",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            QuestionKind::TrueFalse => "check-circle",
            QuestionKind::ShortAnswer => "edit",
            QuestionKind::MultipleChoice => "list",
            QuestionKind::FillBlank => "help-circle",
        }
    }

    pub fn all() -> Vec<QuestionKind> {
        vec![
            QuestionKind::TrueFalse,
            QuestionKind::ShortAnswer,
            QuestionKind::MultipleChoice,
            QuestionKind::FillBlank,
        ]
    }
}
