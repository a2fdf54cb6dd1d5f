//! Error handling for rulegen
//!
//! This module provides the error types and user-facing error reporting for the
//! rule generator. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`RulegenError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! - **Project model**: [`RulegenError::ConfigurationNotFound`], [`RulegenError::TargetNotFound`],
//!   [`RulegenError::ManifestParseError`], [`RulegenError::DuplicateTarget`]
//! - **Resolution**: [`RulegenError::ResolutionFailure`], [`RulegenError::ArtifactCycle`],
//!   [`RulegenError::InvalidCoordinate`]
//! - **Processors**: [`RulegenError::EmptyProcessors`]
//!
//! Library code returns [`anyhow::Result`] and attaches these typed errors, so callers
//! can downcast to a [`RulegenError`] when they need to branch on the failure kind.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rulegen::core::{RulegenError, user_friendly_error};
//!
//! let error = RulegenError::ConfigurationNotFound {
//!     configuration: "annotationProcessor".to_string(),
//!     project: "app:libs/ui".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for rulegen operations
///
/// Each variant carries the identifiers a user needs to locate the problem:
/// configuration and project names, coordinates, or file paths.
///
/// Errors are never cached. A failed scope computation propagates one of these
/// variants to the immediate caller and leaves the scope cache untouched.
#[derive(Error, Debug)]
pub enum RulegenError {
    /// A named dependency configuration does not exist on the target.
    ///
    /// This is a caller or manifest error, not a transient condition, and is
    /// never retried.
    ///
    /// # Fields
    /// - `configuration`: The configuration name that was requested
    /// - `project`: Display name of the owning target (`project:path`)
    #[error("No valid configuration found for '{configuration}' in project '{project}'")]
    ConfigurationNotFound {
        /// The configuration name that could not be found
        configuration: String,
        /// Display name of the target that was searched
        project: String,
    },

    /// The host resolution engine could not resolve a dependency set.
    ///
    /// # Fields
    /// - `coordinate`: The failing dependency coordinate
    /// - `reason`: Why resolution failed
    #[error("Failed to resolve dependency '{coordinate}': {reason}")]
    ResolutionFailure {
        /// Coordinate of the dependency that failed to resolve
        coordinate: String,
        /// Reason for the failure
        reason: String,
    },

    /// One or more processor dependencies contribute no annotation processors.
    #[error("Configuration '{configuration}' of '{project}' has processor dependencies without processors")]
    EmptyProcessors {
        /// The configuration that was inspected
        configuration: String,
        /// Display name of the owning target
        project: String,
    },

    /// A target path referenced from another target is not part of the project
    #[error("Target '{path}' not found in project")]
    TargetNotFound {
        /// Path of the missing target
        path: String,
    },

    /// Two targets of the project manifest share one path
    #[error("Target path '{path}' is declared more than once in {file}")]
    DuplicateTarget {
        /// The repeated target path
        path: String,
        /// Path to the manifest file declaring it
        file: String,
    },

    /// A dependency coordinate string is malformed
    #[error("Invalid dependency coordinate '{coordinate}', expected 'group:name:version'")]
    InvalidCoordinate {
        /// The malformed coordinate string
        coordinate: String,
    },

    /// The resolved artifact graph contains a cycle
    #[error("Circular artifact dependency detected: {chain}")]
    ArtifactCycle {
        /// String representation of the cycle
        chain: String,
    },

    /// Project manifest file (rulegen.toml) not found
    #[error("Project manifest rulegen.toml not found in current directory")]
    ManifestNotFound,

    /// Project manifest parsing error
    #[error("Invalid project manifest syntax in {file}")]
    ManifestParseError {
        /// Path to the manifest file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Generic error for cases not covered by specific variants
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl Clone for RulegenError {
    fn clone(&self) -> Self {
        match self {
            Self::ConfigurationNotFound {
                configuration,
                project,
            } => Self::ConfigurationNotFound {
                configuration: configuration.clone(),
                project: project.clone(),
            },
            Self::ResolutionFailure {
                coordinate,
                reason,
            } => Self::ResolutionFailure {
                coordinate: coordinate.clone(),
                reason: reason.clone(),
            },
            Self::EmptyProcessors {
                configuration,
                project,
            } => Self::EmptyProcessors {
                configuration: configuration.clone(),
                project: project.clone(),
            },
            Self::TargetNotFound {
                path,
            } => Self::TargetNotFound {
                path: path.clone(),
            },
            Self::InvalidCoordinate {
                coordinate,
            } => Self::InvalidCoordinate {
                coordinate: coordinate.clone(),
            },
            Self::ArtifactCycle {
                chain,
            } => Self::ArtifactCycle {
                chain: chain.clone(),
            },
            Self::DuplicateTarget {
                path,
                file,
            } => Self::DuplicateTarget {
                path: path.clone(),
                file: file.clone(),
            },
            Self::ManifestNotFound => Self::ManifestNotFound,
            Self::ManifestParseError {
                file,
                reason,
            } => Self::ManifestParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // For errors that don't implement Clone, convert to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context in yellow (optional)
/// 3. **Suggestion**: Actionable steps in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use rulegen::core::{RulegenError, ErrorContext};
///
/// let context = ErrorContext::new(RulegenError::ManifestNotFound)
///     .with_suggestion("Create a rulegen.toml file or pass --manifest-path")
///     .with_details("rulegen reads targets and resolved artifacts from rulegen.toml");
///
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: RulegenError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: RulegenError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`RulegenError`] variants anywhere in the error chain, then
/// [`std::io::Error`] and [`toml::de::Error`]. Anything else is wrapped as
/// [`RulegenError::Other`] with the full context chain as its message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(rulegen_error) = error.chain().find_map(|e| e.downcast_ref::<RulegenError>()) {
        return create_error_context(rulegen_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>()
        && io_error.kind() == std::io::ErrorKind::PermissionDenied
    {
        return ErrorContext::new(RulegenError::Other {
            message: format!("{error:#}"),
        })
        .with_suggestion("Check write permissions for the output directory");
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(RulegenError::ManifestParseError {
            file: "rulegen.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax. Verify quotes, brackets, and table headers");
    }

    ErrorContext::new(RulegenError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: RulegenError) -> ErrorContext {
    match &error {
        RulegenError::ConfigurationNotFound {
            configuration,
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Declare '{configuration}' under the target's [targets.configurations] table or fix the name"
            ))
            .with_details("Configuration names are case sensitive"),
        RulegenError::ResolutionFailure {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Make sure every coordinate has a matching [[artifacts]] entry")
            .with_details("Failed resolutions are not cached; rerunning retries them"),
        RulegenError::EmptyProcessors {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Move dependencies without processors to a compile configuration")
            .with_details("Run 'rulegen check' to list the offending dependencies"),
        RulegenError::TargetNotFound {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Check the 'deps' and 'provided' entries against the declared target paths",
        ),
        RulegenError::DuplicateTarget {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Give every [[targets]] entry its own 'path'"),
        RulegenError::InvalidCoordinate {
            ..
        } => ErrorContext::new(error).with_suggestion("Use the form 'group:name:version'"),
        RulegenError::ArtifactCycle {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Remove one of the 'dependencies' edges listed in the cycle"),
        RulegenError::ManifestNotFound => ErrorContext::new(error)
            .with_suggestion("Create a rulegen.toml file or pass --manifest-path"),
        RulegenError::ManifestParseError {
            reason,
            ..
        } => {
            let reason = reason.clone();
            ErrorContext::new(error).with_details(reason)
        }
        _ => ErrorContext::new(error),
    }
}
