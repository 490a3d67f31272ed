use std::fmt;

use crate::ast::{FieldPath, SortDirection};

/// One `ORDERBY` key, linked to the key that breaks its ties.
pub struct Ordering {
    pub field: FieldPath,
    pub direction: SortDirection,
    /// Next key, consulted only when this key compares equal
    pub then: Option<Box<Ordering>>,
}

impl Ordering {
    pub fn new(field: FieldPath, direction: SortDirection) -> Self {
        Ordering {
            field,
            direction,
            then: None,
        }
    }

    /// Builds a chain from keys in priority order. Returns `None` for no keys.
    pub fn from_keys(keys: Vec<(FieldPath, SortDirection)>) -> Option<Self> {
        keys.into_iter().rev().fold(None, |then, (field, direction)| {
            Some(Ordering {
                field,
                direction,
                then: then.map(Box::new),
            })
        })
    }

    /// Iterates over the keys in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Ordering> {
        std::iter::successors(Some(self), |o| o.then.as_deref())
    }
}

impl Clone for Ordering {
    fn clone(&self) -> Self {
        let keys = self.iter().map(|o| (o.field.clone(), o.direction)).collect();
        Ordering::from_keys(keys).unwrap_or_else(|| Ordering::new(self.field.clone(), self.direction))
    }
}

impl PartialEq for Ordering {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.iter();
        let mut right = other.iter();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.field == b.field && a.direction == b.direction => {}
                _ => return false,
            }
        }
    }
}

impl Eq for Ordering {}

impl fmt::Debug for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|o| (&o.field, o.direction)))
            .finish()
    }
}

impl Drop for Ordering {
    fn drop(&mut self) {
        let mut then = self.then.take();
        while let Some(mut ordering) = then {
            then = ordering.then.take();
        }
    }
}
