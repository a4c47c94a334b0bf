//! ID prefix constants.
//!
//! Every entity ID is `{prefix}-{8 hex chars}`, generated in SQL by
//! `StewardDb::generate_id`.

pub const PREFIX_ASSET: &str = "ast";
pub const PREFIX_MOVE: &str = "mov";
pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_SUBCONTRACTOR: &str = "sub";
pub const PREFIX_DOCUMENT: &str = "doc";
pub const PREFIX_USER: &str = "usr";
pub const PREFIX_AUDIT: &str = "aud";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_ASSET,
    PREFIX_MOVE,
    PREFIX_PROJECT,
    PREFIX_SUBCONTRACTOR,
    PREFIX_DOCUMENT,
    PREFIX_USER,
    PREFIX_AUDIT,
];

/// Check whether `id` carries the given prefix followed by a dash.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('-'))
}
