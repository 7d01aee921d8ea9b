//! Process-unique handles.
//!
//! Scene objects live in the rendering layer; the core refers to them only
//! through opaque `UniqueId<T>` handles, namespaced by a marker type so a
//! mockup handle can never be passed where some other handle is expected.

use std::sync::atomic::{AtomicU64, Ordering};

// One counter shared by all namespaces. Uniqueness is all that matters;
// the namespaces are a compile-time concern only.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// ID guaranteed unique within this execution of the program. IDs of
/// different namespaces may share a numeric value but never compare equal,
/// since they are different types.
pub struct UniqueId<T> {
    id: u64,
    // `fn() -> T` keeps the handle Send + Sync + Copy regardless of T.
    _namespace: std::marker::PhantomData<fn() -> T>,
}

impl<T> UniqueId<T> {
    /// Allocate the next id. A u64 counter does not wrap in any realistic
    /// session, so no overflow handling is attempted.
    #[must_use]
    pub fn next() -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            _namespace: std::marker::PhantomData,
        }
    }
    /// The raw numeric value. Only meaningful within this namespace and
    /// this process.
    #[must_use]
    pub fn value(self) -> u64 {
        self.id
    }
}

// Manual impls: deriving would needlessly bound T.
impl<T> Clone for UniqueId<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for UniqueId<T> {}
impl<T> PartialEq for UniqueId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl<T> Eq for UniqueId<T> {}
impl<T> std::hash::Hash for UniqueId<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
impl<T> std::fmt::Display for UniqueId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Unwrap OK - rsplit always yields at least one element.
        write!(
            f,
            "{}#{}",
            std::any::type_name::<T>().rsplit("::").next().unwrap(),
            self.id
        )
    }
}
impl<T> std::fmt::Debug for UniqueId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::UniqueId;

    struct Namespace;

    #[test]
    fn ids_are_unique() {
        let mut values: Vec<u64> = (0..256).map(|_| UniqueId::<Namespace>::next().value()).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), 256);
    }

    #[test]
    fn display_includes_namespace() {
        let id = UniqueId::<Namespace>::next();
        assert_eq!(id.to_string(), format!("Namespace#{}", id.value()));
    }
}
