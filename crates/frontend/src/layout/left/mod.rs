pub mod left;
pub mod sidebar;
pub mod user_menu;

pub use left::Left;
pub use sidebar::ChatSidebar;
pub use user_menu::UserMenu;
