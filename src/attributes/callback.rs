//! Callback abstraction for attribute widget actions.
//!
//! Definitions carry an optional handler that turns a widget event into a
//! message for the host. Handlers are reference counted so a definition can be
//! cloned into the widget it describes without losing its action.
//!
//! ```ignore
//! use label_attributes::attributes::Callback;
//!
//! let on_toggle: Callback<bool, String> = Callback::new(|checked| format!("checked={checked}"));
//! assert_eq!(on_toggle.call(true).as_deref(), Some("checked=true"));
//! ```

use std::fmt;
use std::rc::Rc;

/// An optional event handler producing a message of type `M` from an input `T`.
pub struct Callback<T, M> {
    f: Option<Rc<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Create a new callback from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Rc::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Call the callback with a value, if it exists.
    ///
    /// Returns `None` when no handler is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    /// Check if the callback is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    /// Check if the callback is not set.
    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> Clone for Callback<T, M> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_callback() {
        let cb: Callback<u32, u32> = Callback::default();
        assert!(cb.is_none());
        assert_eq!(cb.call(1), None);
    }

    #[test]
    fn test_clone_keeps_handler() {
        let cb: Callback<u32, u32> = Callback::new(|v| v * 2);
        let cloned = cb.clone();
        assert!(cloned.is_some());
        assert_eq!(cloned.call(21), Some(42));
        assert_eq!(cb.call(2), Some(4));
    }
}
