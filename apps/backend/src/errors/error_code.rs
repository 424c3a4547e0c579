//! Error codes for the Bluff backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in Problem Details responses.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authorization
    /// Caller is not the current round-creation leader
    NotLeader,
    /// Player does not belong to the game or round
    NotAMember,

    // Request Validation
    /// Operation not allowed in the current game or round phase
    PhaseMismatch,
    /// Fewer than two connected players at round start
    InsufficientQuorum,
    /// Invalid game configuration (round count, max players)
    InvalidGameConfig,
    /// Empty or oversized display name
    InvalidDisplayName,
    /// Empty or oversized answer text
    InvalidAnswer,
    /// Fake answer equals the real answer
    AnswerMatchesTruth,
    /// Voter selected their own answer
    SelfVote,
    /// Chosen answer does not belong to the round
    AnswerNotInRound,
    /// Game is full
    GameFull,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// Round not found
    RoundNotFound,
    /// Player not found
    PlayerNotFound,
    /// Question not found
    QuestionNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Player already submitted an answer this round
    AlreadyAnswered,
    /// Player already voted this round
    AlreadyVoted,
    /// Round already exists for the current round number
    RoundAlreadyExists,
    /// Display name already taken in the game
    DisplayNameTaken,
    /// Join code collision
    JoinCodeConflict,
    /// Generic conflict (fallback for unmatched unique violations)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Canonical string as it appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotLeader => "NOT_LEADER",
            Self::NotAMember => "NOT_A_MEMBER",

            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::InsufficientQuorum => "INSUFFICIENT_QUORUM",
            Self::InvalidGameConfig => "INVALID_GAME_CONFIG",
            Self::InvalidDisplayName => "INVALID_DISPLAY_NAME",
            Self::InvalidAnswer => "INVALID_ANSWER",
            Self::AnswerMatchesTruth => "ANSWER_MATCHES_TRUTH",
            Self::SelfVote => "SELF_VOTE",
            Self::AnswerNotInRound => "ANSWER_NOT_IN_ROUND",
            Self::GameFull => "GAME_FULL",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::QuestionNotFound => "QUESTION_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::AlreadyAnswered => "ALREADY_ANSWERED",
            Self::AlreadyVoted => "ALREADY_VOTED",
            Self::RoundAlreadyExists => "ROUND_ALREADY_EXISTS",
            Self::DisplayNameTaken => "DISPLAY_NAME_TAKEN",
            Self::JoinCodeConflict => "JOIN_CODE_CONFLICT",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
