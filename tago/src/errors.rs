use thiserror::Error;

/// Errors returned by the fallible tago entry points.
///
/// Tag parsing itself never fails: malformed tag text degrades to fewer
/// instructions. These variants cover caller misuse that can be detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagoError {
    /// A directive normalized to the empty string.
    #[error("directive is empty after normalization")]
    EmptyDirective,

    /// The walked root type is not a tagged record.
    #[error("type `{type_name}` is not a tagged record")]
    NotARecord { type_name: &'static str },

    /// No record with this name was registered by `#[derive(Tagged)]`.
    #[error("no tagged record named `{name}` is registered")]
    UnknownRecord { name: String },
}

/// Convenience alias for results carrying a [`TagoError`].
pub type TagoResult<T> = Result<T, TagoError>;
