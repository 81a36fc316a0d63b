//! Query options controlling how a reference search behaves.

use serde::{Deserialize, Serialize};

/// What the caller intends to do with the results. Rename queries
/// restrict alias skipping so that rename edits stay well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceUse {
    #[default]
    Other,
    References,
    Rename,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindReferencesOptions {
    #[serde(rename = "use")]
    pub use_: ReferenceUse,
    /// Restrict results to concrete implementations and filter by
    /// inheritance from the queried container.
    pub implementations: bool,
    /// Also report raw text matches inside string literals.
    pub find_in_strings: bool,
    /// Also report raw text matches inside comments.
    pub find_in_comments: bool,
    /// Emit prefix/suffix text so shorthand syntax survives a rename.
    pub provide_prefix_and_suffix_text_for_rename: bool,
}

impl FindReferencesOptions {
    pub fn references() -> Self {
        Self { use_: ReferenceUse::References, ..Self::default() }
    }

    pub fn rename() -> Self {
        Self { use_: ReferenceUse::Rename, ..Self::default() }
    }

    pub fn implementations() -> Self {
        Self { implementations: true, ..Self::default() }
    }

    pub fn is_for_rename(&self) -> bool {
        self.use_ == ReferenceUse::Rename
    }
}
