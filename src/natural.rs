use std::cmp::Ordering;

/// Orders sprite names segment-by-segment, split on `_`. Segments that
/// both parse as integers compare numerically, anything else compares as
/// a plain string, so `sprite_2_10` lands after `sprite_2_9` instead of
/// between `sprite_2_1` and `sprite_2_2`. When all shared segments are
/// equal the shorter name sorts first.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_parts = a.split('_');
    let mut b_parts = b.split('_');

    loop {
        match (a_parts.next(), b_parts.next()) {
            (Some(ap), Some(bp)) => {
                let ord = match (ap.parse::<i64>(), bp.parse::<i64>()) {
                    (Ok(an), Ok(bn)) => an.cmp(&bn),
                    _ => ap.cmp(bp),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        }
    }
}

pub fn natural_less(a: &str, b: &str) -> bool {
    natural_cmp(a, b) == Ordering::Less
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_segments_compare_by_value() {
        let mut names = vec!["tile_10_1", "tile_2_9", "tile_2_10"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["tile_2_9", "tile_2_10", "tile_10_1"]);
    }

    #[test]
    fn test_string_segments_compare_lexicographically() {
        assert!(natural_less("apple_1", "banana_1"));
        assert!(natural_less("Tile_1", "tile_1")); // case-sensitive byte order
    }

    #[test]
    fn test_mixed_segments_fall_back_to_strings() {
        // "2a" does not fully parse, so "10" vs "2a" is a string compare
        assert!(natural_less("x_10", "x_2a"));
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert!(natural_less("sprite_1", "sprite_1_0"));
        assert!(!natural_less("sprite_1_0", "sprite_1"));
    }

    #[test]
    fn test_equal_names() {
        assert_eq!(natural_cmp("sprite_3_3", "sprite_3_3"), Ordering::Equal);
        assert!(!natural_less("sprite_3_3", "sprite_3_3"));
    }

    #[test]
    fn test_strict_ordering_is_antisymmetric() {
        let names = ["sprite_0_0", "sprite_0_1", "sprite_1_0", "sprite_10_2", "misc"];
        for a in &names {
            for b in &names {
                if a != b {
                    assert_ne!(natural_less(a, b), natural_less(b, a), "{} vs {}", a, b);
                }
            }
        }
    }
}
