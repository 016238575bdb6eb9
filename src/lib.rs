pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod external;
pub mod format;
pub mod page;
