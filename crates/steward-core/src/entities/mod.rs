//! Entity structs for all Site Steward domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `steward-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` so the API layer can hand them to any wire
//! format and publish their schemas.

mod asset;
mod audit;
mod document;
mod project;
mod subcontractor;
mod user;

pub use asset::{Asset, AssetMove};
pub use audit::AuditEntry;
pub use document::ComplianceDocument;
pub use project::Project;
pub use subcontractor::Subcontractor;
pub use user::User;
