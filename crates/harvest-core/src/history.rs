use std::sync::Arc;

/// Persistent append-only sequence.
///
/// Appending shares the whole prefix with the parent, so sibling search nodes hold their paths
/// without copying and no parent-pointer table is needed to rebuild a plan.
#[derive(Debug)]
pub struct History<T> {
    head: Option<Arc<Link<T>>>,
    len: usize,
}

#[derive(Debug)]
struct Link<T> {
    value: T,
    prev: Option<Arc<Link<T>>>,
}

impl<T> History<T> {
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A new history with `value` appended; `self` is left untouched.
    pub fn pushed(&self, value: T) -> Self {
        Self {
            head: Some(Arc::new(Link {
                value,
                prev: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&T> {
        self.head.as_deref().map(|link| &link.value)
    }

    /// Entries from most recent to oldest.
    pub fn iter_rev(&self) -> impl Iterator<Item = &T> {
        let mut cursor = self.head.as_deref();
        core::iter::from_fn(move || {
            let link = cursor?;
            cursor = link.prev.as_deref();
            Some(&link.value)
        })
    }

    /// Entries oldest first (root first).
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out: Vec<T> = self.iter_rev().cloned().collect();
        out.reverse();
        out
    }
}

impl<T> Clone for History<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for History<T> {
    fn drop(&mut self) {
        // Unlink iteratively so very long paths do not overflow the stack.
        let mut cursor = self.head.take();
        while let Some(link) = cursor {
            match Arc::try_unwrap(link) {
                Ok(mut link) => cursor = link.prev.take(),
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn siblings_share_prefix_without_interference() {
        let root = History::new().pushed(1).pushed(2);
        let left = root.pushed(3);
        let right = root.pushed(4);

        assert_eq!(root.to_vec(), vec![1, 2]);
        assert_eq!(left.to_vec(), vec![1, 2, 3]);
        assert_eq!(right.to_vec(), vec![1, 2, 4]);
        assert_eq!(right.last(), Some(&4));
        assert_eq!(left.len(), 3);
    }

    #[test]
    fn long_histories_drop_without_recursion() {
        let mut history = History::new();
        for i in 0..200_000u32 {
            history = history.pushed(i);
        }
        assert_eq!(history.len(), 200_000);
        drop(history);
    }
}
