pub mod chat_input;
pub mod dashboard;
pub mod message_list;
pub mod study_tabs;

pub use chat_input::ChatInput;
pub use dashboard::ChatDashboard;
pub use message_list::MessageList;
pub use study_tabs::StudyTabs;
