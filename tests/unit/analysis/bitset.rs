//! Tests for `TileBitset` operations over dense tile indices

#[cfg(test)]
mod tests {
    use tileadjacency::analysis::bitset::TileBitset;

    // Verifies new TileBitset is empty with count 0
    // Verified by initializing bitset with all bits set to 1
    #[test]
    fn test_new_bitset() {
        let bitset = TileBitset::new(10);
        assert_eq!(bitset.count(), 0);
        assert!(bitset.is_empty());
        assert_eq!(bitset.capacity(), 10);
    }

    // Tests insertion and containment checking
    // Verified by removing the bit-setting logic from insert method
    #[test]
    fn test_insert_and_contains() {
        let mut bitset = TileBitset::new(10);
        bitset.insert(0);
        bitset.insert(5);
        assert!(bitset.contains(0));
        assert!(bitset.contains(5));
        assert!(!bitset.contains(3));
        assert_eq!(bitset.count(), 2);
    }

    // Tests out-of-range indices are ignored
    // Verified by growing the bitset on insert
    #[test]
    fn test_out_of_range() {
        let mut bitset = TileBitset::new(4);
        bitset.insert(4);
        bitset.insert(100);
        assert!(bitset.is_empty());
        assert!(!bitset.contains(100));
    }

    // Tests union and intersection
    // Verified by swapping the two operations
    #[test]
    fn test_union_and_intersection() {
        let mut set1 = TileBitset::new(8);
        set1.insert(1);
        set1.insert(3);

        let mut set2 = TileBitset::new(8);
        set2.insert(3);
        set2.insert(6);

        assert_eq!(set1.intersection(&set2).to_vec(), vec![3]);

        set1.union_with(&set2);
        assert_eq!(set1.to_vec(), vec![1, 3, 6]);
    }

    // Tests display renders one digit per index
    // Verified by reversing bit order
    #[test]
    fn test_display() {
        let mut bitset = TileBitset::new(5);
        bitset.insert(1);
        bitset.insert(4);
        assert_eq!(bitset.to_string(), "01001");
    }
}
