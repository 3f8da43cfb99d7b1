//! Error types for the dice engine.

/// Errors that can occur while building, modifying or persisting a dice pool.
#[derive(Debug, thiserror::Error)]
pub enum YzError {
    /// A game identifier is not one of the supported games.
    #[error("unknown game: \"{game}\" (allowed games are: {allowed})")]
    UnknownGame {
        /// The identifier that was requested.
        game: String,
        /// Comma-separated list of valid game identifiers.
        allowed: String,
    },

    /// A die type key is not in the catalog, or not part of the game.
    #[error("unknown die type: \"{kind}\" (allowed types are: {allowed})")]
    UnknownDieType {
        /// The die type key that was requested.
        kind: String,
        /// Comma-separated list of valid die type keys.
        allowed: String,
    },

    /// A denomination does not select any die of the game.
    #[error("unknown die denomination: \"{denomination}\" for game {game} (allowed: {allowed})")]
    UnknownDenomination {
        /// The denomination that was requested.
        denomination: String,
        /// The game the lookup was made in.
        game: String,
        /// Comma-separated list of the game's denominations.
        allowed: String,
    },

    /// No die type with the requested role and face count exists.
    #[error("no {role} die with {faces} faces")]
    NoDieForRole {
        /// The requested role.
        role: String,
        /// The requested face count.
        faces: u32,
    },

    /// A pool manifest entry is malformed.
    #[error("invalid pool: {0}")]
    InvalidPool(String),

    /// A die size fell outside the step ladder during modifier resolution.
    ///
    /// This signals a broken internal invariant and is never recovered from.
    #[error("die with {faces} faces is out of range of the step ladder")]
    LadderOutOfRange {
        /// The offending face count.
        faces: u32,
    },

    /// A difficulty modifier is larger than any pool could use.
    #[error("modifier {delta} is out of range (at most {max} either way)")]
    ModifierOutOfRange {
        /// The requested modifier.
        delta: i32,
        /// The largest accepted magnitude.
        max: u32,
    },

    /// A pool could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result type for dice engine operations.
pub type YzResult<T> = Result<T, YzError>;
