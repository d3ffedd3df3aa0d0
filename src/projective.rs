//! Projectivity test for dependency trees
//!
//! Implements the pairwise arc test of Gómez-Rodríguez and Nivre (ACL 2010,
//! "A Transition-Based Parser for 2-Planar Dependency Structures"). A tree is
//! projective when no two dependency arcs, drawn above the token sequence,
//! cross each other.

/// Check whether a head assignment is projective.
///
/// `heads[d]` is the head position of the token at position `d`, or `None`
/// where no head is defined (sentinel positions, partial trees). When
/// `has_sentinels` is set the first and last positions are the start/root
/// sentinels and the start position's own arc is ignored.
///
/// O(n²) over the arcs; fine for sentence-sized inputs.
pub fn is_projective(heads: &[Option<usize>], has_sentinels: bool) -> bool {
    let arcs: Vec<(Option<usize>, usize)> = heads
        .iter()
        .copied()
        .enumerate()
        .map(|(dep, head)| (head, dep))
        .collect();
    let arcs = if has_sentinels && !arcs.is_empty() {
        &arcs[1..]
    } else {
        &arcs[..]
    };

    for &(h1, d1) in arcs {
        let Some(h1) = h1 else { continue };
        for &(h2, d2) in arcs {
            let Some(h2) = h2 else { continue };

            // Non-projectivity conditions for partial trees: an arc endpoint
            // coincides with the other arc's dependent and the first head
            // falls strictly inside the other arc.
            if (h2 == d1 && ((h2 > h1 && h1 > d2) || (h2 < h1 && h1 < d2)))
                || (h1 == d2 && ((h1 > h2 && h2 > d1) || (h1 < h2 && h2 < d1)))
            {
                return false;
            }

            // Canonical condition: the arcs' spans interleave.
            let (lo1, hi1) = (h1.min(d1), h1.max(d1));
            let (lo2, hi2) = (h2.min(d2), h2.max(d2));
            if lo1 < lo2 && lo2 < hi1 && hi1 < hi2 {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Padded head array over `raw` 1-based heads, root attachment = n + 1.
    fn padded(raw: &[usize]) -> Vec<Option<usize>> {
        let n = raw.len();
        let mut heads = vec![None];
        heads.extend(
            raw.iter()
                .map(|&h| if h == 0 { Some(n + 1) } else { Some(h) }),
        );
        heads.push(None);
        heads
    }

    #[test]
    fn test_flat_tree_is_projective() {
        // Every token attached to the same root position.
        for root in 1..=4 {
            let heads: Vec<usize> = (1..=4).map(|i| if i == root { 0 } else { root }).collect();
            assert!(is_projective(&padded(&heads), true), "root at {}", root);
        }
    }

    #[test]
    fn test_classic_crossing_is_non_projective() {
        // Arcs (3,1) and (4,2) over positions [1,2,3,4] cross.
        let heads = padded(&[3, 4, 0, 3]);
        assert!(!is_projective(&heads, true));
    }

    #[test]
    fn test_disjoint_spans_are_projective() {
        // Arcs (2,1) and (4,3) do not overlap.
        let heads = padded(&[2, 0, 4, 2]);
        assert!(is_projective(&heads, true));
    }

    #[test]
    fn test_nested_arcs_are_projective() {
        // 1 <- 2 <- 3 -> 4, plus root.
        let heads = padded(&[2, 3, 0, 3]);
        assert!(is_projective(&heads, true));
    }

    #[test]
    fn test_unpadded_crossing() {
        // Same crossing configuration, 0-based without sentinels: arcs
        // (2,0) and (3,1).
        let heads = vec![Some(2), Some(3), Some(4), Some(2)];
        assert!(!is_projective(&heads, false));
    }

    #[test]
    fn test_partial_tree_skips_undefined_heads() {
        let heads = vec![None, Some(3), None, Some(5), None];
        assert!(is_projective(&heads, true));
    }

    #[test]
    fn test_partial_tree_condition() {
        // Arcs (4,2) and (3,4): their spans nest, so the canonical condition
        // never fires, but h1 == d2 with h2 strictly inside (d1, h1) does.
        let heads = vec![None, None, Some(4), None, Some(3), None];
        assert!(!is_projective(&heads, true));
    }

    #[test]
    fn test_empty_and_single() {
        assert!(is_projective(&[], false));
        assert!(is_projective(&[Some(1)], false));
        assert!(is_projective(&padded(&[0]), true));
    }
}
