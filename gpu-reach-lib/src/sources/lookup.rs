/// Result of consulting a source's cache for a single name.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// The entry is cached.
    Hit(T),

    /// The source previously confirmed it has no such entry.
    KnownAbsent,

    /// Nothing is known yet; the source must be queried.
    Unknown,
}
