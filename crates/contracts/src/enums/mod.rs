pub mod question_kind;
pub mod study_tab;

pub use question_kind::QuestionKind;
pub use study_tab::StudyTab;
