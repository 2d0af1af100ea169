/// First item with the highest key: ties go to the earliest one.
pub fn first_max_by_key<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    items.iter().reduce(|best, item| if key(item) > key(best) { item } else { best })
}

/// First item with the lowest key: ties go to the earliest one.
pub fn first_min_by_key<T, K: Ord>(items: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    items.iter().reduce(|best, item| if key(item) < key(best) { item } else { best })
}
