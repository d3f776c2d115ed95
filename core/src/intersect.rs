use crate::index::DocId;

/// Merge-intersect two ascending, duplicate-free lists.
///
/// Single pass, `O(|a| + |b|)`. Unsorted or duplicated input yields an
/// unspecified (but non-panicking) result.
pub fn intersect(a: &[DocId], b: &[DocId]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i] < b[j] {
            i += 1;
        } else if b[j] < a[i] {
            j += 1;
        } else {
            out.push(a[i]);
            i += 1;
            j += 1;
        }
    }
    out
}

/// Intersect every list, shortest first. An empty input yields an empty result.
pub fn intersect_all(lists: &[&[DocId]]) -> Vec<DocId> {
    let mut order: Vec<&[DocId]> = lists.to_vec();
    order.sort_by_key(|l| l.len());
    let mut iter = order.into_iter();
    let mut acc = match iter.next() {
        Some(first) => first.to_vec(),
        None => return Vec::new(),
    };
    for list in iter {
        if acc.is_empty() { break; }
        acc = intersect(&acc, list);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted_unique() -> impl Strategy<Value = Vec<DocId>> {
        proptest::collection::btree_set(0u32..200, 0..60).prop_map(|s| s.into_iter().collect())
    }

    #[test]
    fn basic_overlap() {
        assert_eq!(intersect(&[1, 3, 5, 7, 9], &[2, 3, 4, 9, 10]), vec![3, 9]);
    }

    #[test]
    fn disjoint_and_empty() {
        assert!(intersect(&[1, 2], &[3, 4]).is_empty());
        assert!(intersect(&[], &[3, 4]).is_empty());
        assert!(intersect(&[1], &[]).is_empty());
    }

    #[test]
    fn intersect_all_folds_and_short_circuits() {
        let a = [0, 1, 2, 3, 4];
        let b = [1, 3, 4];
        let c = [3, 4, 8];
        assert_eq!(intersect_all(&[&a, &b, &c]), vec![3, 4]);
        assert_eq!(intersect_all(&[&a, &[], &c]), Vec::<DocId>::new());
        assert!(intersect_all(&[]).is_empty());
        assert_eq!(intersect_all(&[&b]), vec![1, 3, 4]);
    }

    proptest! {
        #[test]
        fn symmetric(a in sorted_unique(), b in sorted_unique()) {
            prop_assert_eq!(intersect(&a, &b), intersect(&b, &a));
        }

        #[test]
        fn idempotent(a in sorted_unique()) {
            prop_assert_eq!(intersect(&a, &a), a);
        }

        #[test]
        fn matches_set_semantics(a in sorted_unique(), b in sorted_unique()) {
            let out = intersect(&a, &b);
            prop_assert!(out.windows(2).all(|w| w[0] < w[1]));
            let expected: Vec<DocId> = a.iter().copied().filter(|x| b.contains(x)).collect();
            prop_assert_eq!(out, expected);
        }
    }
}
