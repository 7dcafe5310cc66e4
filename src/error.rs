//! Link resolution errors.

/// Failure to resolve a markdown reference against the viewer route.
///
/// Both variants abort the whole rewrite pass of a document. There is no
/// best-effort fallback: a link that cannot be resolved exactly is never
/// replaced by a plausible guess.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// Current route lies outside the viewer namespace.
    ///
    /// Indicates a caller bug upstream, never a malformed document.
    #[error("route `{route}` does not start with the help prefix `{prefix}`")]
    RoutingContext {
        /// Route supplied by the caller.
        route: String,
        /// Configured help prefix.
        prefix: String,
    },

    /// Relative reference climbs above the root of the help tree.
    #[error("cannot resolve `{reference}` from `{route}`: too many parent directory steps")]
    PathUnderflow {
        /// Reference text as it appeared in the document.
        reference: String,
        /// Route the reference was resolved against.
        route: String,
    },
}
