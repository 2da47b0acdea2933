use std::borrow::Cow;

/// Errors raised while resolving or applying scopes.
///
/// None of these are caught inside the engine: they abort the current
/// `apply_scopes` / `current_scopes` call and surface to the caller.
#[scopie_derive::scopie_error]
pub enum ScopeError {
    /// A scope declared a coercion `type` the engine does not know.
    /// Raised lazily, only when that scope reaches coercion.
    #[error("Unknown value for option 'type' provided: :{tag}{}", format_context(.context))]
    InvalidOption {
        tag: Cow<'static, str>,
        scope: Option<Cow<'static, str>>,
        context: Option<Cow<'static, str>>,
    },

    /// A value could not be parsed into its declared type.
    #[error("Invalid format{}: {message}", format_context(.context))]
    Format {
        message: Cow<'static, str>,
        scope: Option<Cow<'static, str>>,
        context: Option<Cow<'static, str>>,
    },

    /// Neither the owner nor the target exposes an operation for an applicable scope.
    #[error("Missing scope operation{}: {scope}", format_context(.context))]
    MissingOperation { scope: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A scope manifest could not be loaded or deserialized.
    #[error("Scope manifest error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

impl ScopeError {
    pub(crate) fn format(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Format { message: message.into(), scope: None, context: None }
    }

    /// Records the scope a coercion error was raised for.
    #[must_use]
    pub(crate) fn for_scope(mut self, name: &str) -> Self {
        if let Self::InvalidOption { scope, .. } | Self::Format { scope, .. } = &mut self {
            *scope = Some(name.to_owned().into());
        }
        self
    }

    /// Name of the scope this error was raised for.
    ///
    /// Coercion errors only carry it once they passed through the sequencer;
    /// a bare [`crate::coerce::coerce`] call leaves it empty.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        match self {
            Self::MissingOperation { scope, .. } => Some(scope),
            Self::InvalidOption { scope, .. } | Self::Format { scope, .. } => scope.as_deref(),
            Self::Config { .. } => None,
        }
    }
}
