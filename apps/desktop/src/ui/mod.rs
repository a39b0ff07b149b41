//! UI layer: app shell, branch columns, member cards, and the add-member
//! modal.

pub mod app;

pub use app::FamilyApp;
