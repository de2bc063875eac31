pub mod app;
pub mod dialogs;
pub mod layout;
pub mod tabs;
pub mod theme;
pub mod widgets;
