mod asset;
mod document;
mod project;
mod subcontractor;
mod user;

pub use asset::AssetCommands;
pub use document::DocumentCommands;
pub use project::ProjectCommands;
pub use subcontractor::SubcontractorCommands;
pub use user::UserCommands;
