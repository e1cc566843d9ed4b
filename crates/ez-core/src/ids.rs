//! ID prefixes for persisted entities.
//!
//! IDs are `{prefix}-{16 hex chars}`, generated by `EzDb::generate_id`.

pub const PREFIX_TASK: &str = "tsk";
pub const PREFIX_TEMPLATE: &str = "wft";
pub const PREFIX_SWIPE: &str = "swp";
pub const PREFIX_MATCH: &str = "mch";

/// Every prefix in use, for collision checks in tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_TASK, PREFIX_TEMPLATE, PREFIX_SWIPE, PREFIX_MATCH];

/// Build an ID from a prefix and a hex suffix.
#[must_use]
pub fn format_id(prefix: &str, hex: &str) -> String {
    format!("{prefix}-{hex}")
}

/// Split an ID into its prefix, if it carries a known one.
#[must_use]
pub fn prefix_of(id: &str) -> Option<&'static str> {
    let (prefix, _) = id.split_once('-')?;
    ALL_PREFIXES.iter().copied().find(|known| *known == prefix)
}
