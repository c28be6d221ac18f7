// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Empty-value detection for skip-empty triggers.
//!
//! A value is *blank* when it is absent or a string that is empty after
//! trimming whitespace. There is deliberately no special case for empty
//! collections.

/// Types that can report themselves as blank.
///
/// Used by the debounced async caller's skip-empty policy and by the
/// debounced validator's immediate-clear tier.
pub trait Blank {
    /// Whether this value should be treated as empty input.
    fn is_blank(&self) -> bool;
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

impl<T: Blank + ?Sized> Blank for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        match self {
            None => true,
            Some(inner) => inner.is_blank(),
        }
    }
}

impl<T: Blank + ?Sized> Blank for Box<T> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl<T: Blank + ?Sized> Blank for std::sync::Arc<T> {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

impl Blank for std::borrow::Cow<'_, str> {
    fn is_blank(&self) -> bool {
        self.as_ref().is_blank()
    }
}
