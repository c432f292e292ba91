/// Hash set used for identity bookkeeping (visited sets, membership tests).
pub type Set<T> = ahash::AHashSet<T>;

/// Create an empty set sized for `capacity` entries.
pub fn with_capacity<T>(capacity: usize) -> Set<T> {
    Set::with_capacity(capacity)
}

#[cfg(test)]
mod tests {
    #[test]
    fn insert_reports_revisits() {
        let mut set = super::with_capacity(4);
        assert!(set.insert(3usize));
        assert!(!set.insert(3usize));
        assert!(set.contains(&3));
    }
}
