pub mod download;
pub mod get;
pub mod page;
pub mod view;
