//! Environment locale port

/// Port for reading the environment-reported locale.
///
/// A lookup failure is reported as `None` and treated as "no match" by the
/// resolver, never as an error.
pub trait LocaleSource: Send + Sync {
    /// The reported locale, e.g. `en-GB`, if the environment provides one.
    fn locale(&self) -> Option<String>;
}
