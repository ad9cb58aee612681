use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// Computes the structural hash of a value.
///
/// The hasher uses fixed keys, so the result depends only on the structure of the value. This is
/// what allows handles coming from different pools to agree on their hashes whenever they are
/// structurally equal.
pub fn structural_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_hash_is_deterministic() {
        let a = structural_hash(&("f", [1u64, 2, 3]));
        let b = structural_hash(&("f", [1u64, 2, 3]));
        assert_eq!(a, b);
        assert_ne!(a, structural_hash(&("f", [3u64, 2, 1])));
    }
}
