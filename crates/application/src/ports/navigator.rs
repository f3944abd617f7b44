//! Navigation port
//!
//! The session needs to know where the user currently is and to send them
//! to the login entry point after an unauthorized response. What "path" and
//! "navigation" mean is up to the host surface.

/// Port for observing and changing the current navigational context.
pub trait Navigator: Send + Sync {
    /// The current path, e.g. `/admin/tokens`.
    fn current_path(&self) -> String;

    /// Navigates to the given path.
    fn navigate_to(&self, path: &str);
}
