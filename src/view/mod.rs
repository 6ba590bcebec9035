pub mod modals;
pub mod overlay;
pub mod page;
pub mod panels;
