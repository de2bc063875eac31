pub mod form;
pub mod menu;
pub mod searchbar;
pub mod statusbar;
pub mod table;
