//! Opaque callable handles carried through field configuration.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Reference to host-supplied behavior (access predicates, hooks, validators,
/// deferred defaults).
///
/// The validator only checks that a capability sits where one is allowed. It
/// never invokes or inspects the attached payload.
#[derive(Clone)]
pub struct Capability {
    name: Arc<str>,
    handle: Option<Arc<dyn Any + Send + Sync>>,
}

impl Capability {
    /// Create a named capability with no attached payload.
    pub fn named(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            handle: None,
        }
    }

    /// Create a named capability carrying a host payload.
    pub fn with_handle<T>(name: impl Into<Arc<str>>, handle: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            name: name.into(),
            handle: Some(Arc::new(handle)),
        }
    }

    /// Returns the capability name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true when a host payload is attached.
    #[must_use]
    pub const fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    /// Borrow the attached payload when it has type `T`.
    #[must_use]
    pub fn handle<T: Any>(&self) -> Option<&T> {
        self.handle.as_deref()?.downcast_ref::<T>()
    }
}

impl PartialEq for Capability {
    fn eq(&self, other: &Self) -> bool {
        if self.name != other.name {
            return false;
        }
        match (&self.handle, &other.handle) {
            (None, None) => true,
            (Some(left), Some(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl Eq for Capability {}

impl fmt::Debug for Capability {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Capability")
            .field("name", &self.name)
            .field("attached", &self.handle.is_some())
            .finish()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<capability {}>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_uses_name_and_payload_identity() {
        let plain = Capability::named("isAdmin");
        assert_eq!(plain, Capability::named("isAdmin"));
        assert_ne!(plain, Capability::named("isEditor"));

        let attached = Capability::with_handle("isAdmin", 7_u8);
        assert_ne!(plain, attached);
        assert_eq!(attached, attached.clone());
        assert_ne!(attached, Capability::with_handle("isAdmin", 7_u8));
    }

    #[test]
    fn payload_downcasts_only_to_its_type() {
        let capability = Capability::with_handle("limit", 42_u32);
        assert!(capability.has_handle());
        assert_eq!(capability.handle::<u32>(), Some(&42));
        assert_eq!(capability.handle::<String>(), None);
        assert_eq!(Capability::named("x").handle::<u32>(), None);
    }
}
