pub mod asset;
pub mod audit;
pub mod dispatch;
pub mod document;
pub mod project;
pub mod scan_expiry;
pub mod shared;
pub mod subcontractor;
pub mod user;
