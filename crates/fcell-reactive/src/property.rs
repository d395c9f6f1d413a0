#![forbid(unsafe_code)]

//! Properties that inherit their value from an owner until set directly.
//!
//! An [`InheritedProperty`] has two slots:
//!
//! - an **explicit** slot, filled by [`InheritedProperty::set`]. Once filled
//!   it wins for the rest of the property's life.
//! - an **owner** slot, an optional [`Observable`] the property falls back to.
//!
//! While the explicit slot is empty, the effective value follows the owner's
//! current value. The link is push-based: the property subscribes to the
//! owner, so a later change on the owner lands in the effective value (and
//! reaches the property's own subscribers) inside the owner's `set` call.
//! It does not matter whether the owner was changed before or after the
//! property was bound to it.
//!
//! ```
//! use fcell_reactive::{InheritedProperty, Observable};
//!
//! let column_style = Observable::new(String::new());
//! let mut cell_style = InheritedProperty::new("style", String::new());
//! cell_style.bind_owner(Some(&column_style));
//!
//! column_style.set("-fc-border-color: red".into());
//! assert_eq!(cell_style.get(), "-fc-border-color: red");
//!
//! cell_style.set("-fc-border-color: green".into());
//! column_style.set("-fc-border-color: blue".into());
//! assert_eq!(cell_style.get(), "-fc-border-color: green");
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::observable::{Observable, Subscription};

struct OwnerLink<T> {
    source: Observable<T>,
    _subscription: Subscription,
}

/// A named value that tracks an owner until it is given its own value.
pub struct InheritedProperty<T> {
    name: &'static str,
    default: T,
    effective: Observable<T>,
    explicit: Rc<Cell<bool>>,
    owner: Option<OwnerLink<T>>,
}

impl<T: fmt::Debug> fmt::Debug for InheritedProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InheritedProperty")
            .field("name", &self.name)
            .field("effective", &self.effective)
            .field("explicit", &self.explicit.get())
            .field("bound", &self.owner.is_some())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> InheritedProperty<T> {
    /// Create an unbound property that reports `default` until bound or set.
    #[must_use]
    pub fn new(name: &'static str, default: T) -> Self {
        Self {
            name,
            effective: Observable::new(default.clone()),
            default,
            explicit: Rc::new(Cell::new(false)),
            owner: None,
        }
    }

    /// Property name, e.g. `"id"` or `"style"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The effective value.
    #[must_use]
    pub fn get(&self) -> T {
        self.effective.get()
    }

    /// Borrow the effective value for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.effective.with(f)
    }

    /// Shared handle to the effective value.
    ///
    /// A clone of it keeps reading the current effective value, whether that
    /// came from [`set`](Self::set) or from the owner.
    #[must_use]
    pub fn effective(&self) -> &Observable<T> {
        &self.effective
    }

    /// Give the property its own value. The owner is ignored from now on.
    pub fn set(&mut self, value: T) {
        self.explicit.set(true);
        self.effective.set(value);
    }

    /// Whether [`set`](Self::set) has ever been called.
    #[must_use]
    pub fn is_explicit(&self) -> bool {
        self.explicit.get()
    }

    /// The observable this property currently falls back to.
    #[must_use]
    pub fn owner(&self) -> Option<&Observable<T>> {
        self.owner.as_ref().map(|link| &link.source)
    }

    /// Point the fallback at `owner`, or detach it with `None`.
    ///
    /// Without an explicit value the effective value is refreshed right away:
    /// to the owner's current value, or to the default when detaching.
    pub fn bind_owner(&mut self, owner: Option<&Observable<T>>) {
        if let (Some(current), Some(next)) = (self.owner.as_ref(), owner)
            && current.source.ptr_eq(next)
        {
            return;
        }

        self.owner = None;
        self.owner = owner.map(|source| {
            let explicit = Rc::clone(&self.explicit);
            let effective = self.effective.clone();
            let name = self.name;
            let subscription = source.subscribe(move |value: &T| {
                if explicit.get() {
                    return;
                }
                trace!(property = name, "inherited value changed on owner");
                effective.set(value.clone());
            });
            OwnerLink {
                source: source.clone(),
                _subscription: subscription,
            }
        });

        if self.explicit.get() {
            return;
        }
        let fallback = match owner {
            Some(source) => source.get(),
            None => self.default.clone(),
        };
        self.effective.set(fallback);
    }

    /// Observe changes of the effective value.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.effective.subscribe(callback)
    }

    /// Number of effective-value changes so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.effective.version()
    }
}
