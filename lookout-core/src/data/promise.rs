use crate::data::ApiError;

/// A single-entity load.  `D` identifies what is being waited on, so that a
/// result for something the view has since moved away from is not taken.
#[derive(Clone, Debug, PartialEq)]
pub enum Promise<T, D = (), E = ApiError> {
    Empty,
    Deferred(D),
    Resolved(T),
    Rejected(E),
}

impl<T, D, E> Promise<T, D, E> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    pub fn deferred(&self) -> Option<&D> {
        match self {
            Self::Deferred(def) => Some(def),
            _ => None,
        }
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Self::Resolved(val) => Some(val),
            _ => None,
        }
    }

    pub fn resolved_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Resolved(val) => Some(val),
            _ => None,
        }
    }

    pub fn rejected(&self) -> Option<&E> {
        match self {
            Self::Rejected(err) => Some(err),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::Empty;
    }

    pub fn defer(&mut self, def: D) {
        *self = Self::Deferred(def);
    }

    /// Settles the promise only if it still waits on `def`.  Returns whether
    /// the result was taken.
    pub fn update(&mut self, (def, res): (D, Result<T, E>)) -> bool
    where
        D: PartialEq,
    {
        if self.deferred() != Some(&def) {
            return false;
        }
        *self = res.map_or_else(Self::Rejected, Self::Resolved);
        true
    }
}

impl<T, D, E> Default for Promise<T, D, E> {
    fn default() -> Self {
        Self::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_ignores_other_deferrals() {
        let mut promise: Promise<u32, &str> = Promise::default();
        promise.defer("b");
        assert!(!promise.update(("a", Ok(1))));
        assert_eq!(promise.deferred(), Some(&"b"));
        assert!(promise.update(("b", Ok(2))));
        assert_eq!(promise.resolved(), Some(&2));
    }

    #[test]
    fn update_after_settle_is_ignored() {
        let mut promise: Promise<u32, &str> = Promise::default();
        promise.defer("a");
        promise.update(("a", Err(ApiError::general())));
        assert_eq!(promise.rejected(), Some(&ApiError::general()));
        assert!(!promise.update(("a", Ok(1))));
        assert!(!promise.is_pending());
        assert!(!promise.is_resolved());
    }
}
