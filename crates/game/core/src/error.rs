//! Common error infrastructure for sheet-core.
//!
//! The engine distinguishes two kinds of failure:
//!
//! - **Refusals** are the expected outcome of an illegal placement attempt.
//!   They are logged and returned inside [`crate::engine::ApplyOutcome`] /
//!   [`crate::engine::RemoveOutcome`], never as `Err`, and the character is
//!   left unchanged.
//! - **Errors** ([`CatalogError`], [`GraphError`]) signal malformed static data
//!   and are raised when a catalog or graph is constructed.

/// Severity level of a refusal or error, used for logging priorities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// The request broke a rule; the caller may try something else.
    ///
    /// Examples: prerequisite unmet, wrong category for the location
    Validation,

    /// The request targets a protected placement.
    ///
    /// Examples: breed-locked mod, insufficient talent points
    Locked,

    /// The request referenced data that does not exist.
    ///
    /// Examples: unknown mod id, unknown location
    NotFound,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Locked => "locked",
            Self::NotFound => "not_found",
        }
    }
}

/// Why the engine declined to place or remove a mod.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Refusal {
    #[error("mod {0} is not in the catalog")]
    UnknownMod(String),

    #[error("location {0} is not part of the node graph")]
    UnknownLocation(String),

    #[error("mod {mod_id} is not allowed at {location}")]
    NotAllowed { mod_id: String, location: String },

    #[error("prerequisites for {0} are not met")]
    PrerequisitesUnmet(String),

    #[error("{0} is restricted by a mod already on the character")]
    Restricted(String),

    #[error("{0} may only be taken once")]
    DuplicateCopy(String),

    #[error("{mod_id} at {location} is granted by the breed and cannot be changed")]
    BreedLocked { mod_id: String, location: String },

    #[error("{mod_id} costs {needed} talent points but only {available} are unspent")]
    InsufficientTalentPoints {
        mod_id: String,
        needed: i32,
        available: i32,
    },

    #[error("{location} holds {found:?}, not {mod_id}")]
    NotAtLocation {
        mod_id: String,
        location: String,
        found: Option<String>,
    },
}

impl Refusal {
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownMod(_) | Self::UnknownLocation(_) | Self::NotAtLocation { .. } => {
                ErrorSeverity::NotFound
            }
            Self::BreedLocked { .. } | Self::InsufficientTalentPoints { .. } => {
                ErrorSeverity::Locked
            }
            Self::NotAllowed { .. }
            | Self::PrerequisitesUnmet(_)
            | Self::Restricted(_)
            | Self::DuplicateCopy(_) => ErrorSeverity::Validation,
        }
    }
}

/// Malformed catalog data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate mod id {0}")]
    DuplicateMod(String),

    #[error("mod {mod_id} has an empty name")]
    MissingName { mod_id: String },
}

/// Malformed node graph data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("duplicate location {0}")]
    DuplicateLocation(String),

    #[error("location {location} connects to unknown location {target}")]
    DanglingConnection { location: String, target: String },
}
