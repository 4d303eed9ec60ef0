//! Grouping item indices by predicate

/// Indices of `data` bucketed by predicate; an item lands in every group it matches
pub fn group_indexes_by<T, P>(data: &[T], groups: &[P]) -> Vec<Vec<usize>>
where
    P: Fn(&T) -> bool,
{
    let mut buckets = vec![Vec::new(); groups.len()];
    for (j, item) in data.iter().enumerate() {
        for (bucket, belongs) in buckets.iter_mut().zip(groups) {
            if belongs(item) {
                bucket.push(j);
            }
        }
    }
    buckets
}

/// The buckets of [`group_indexes_by`] concatenated in group order
pub fn make_group_order<T, P>(data: &[T], groups: &[P]) -> Vec<usize>
where
    P: Fn(&T) -> bool,
{
    group_indexes_by(data, groups).concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_indexes() {
        let labels = [2, 0, 1, 0, 2];
        let groups: Vec<Box<dyn Fn(&i32) -> bool>> = (0..3)
            .map(|g| Box::new(move |&label: &i32| label == g) as Box<dyn Fn(&i32) -> bool>)
            .collect();
        assert_eq!(
            group_indexes_by(&labels, &groups),
            vec![vec![1, 3], vec![2], vec![0, 4]]
        );
        assert_eq!(make_group_order(&labels, &groups), vec![1, 3, 2, 0, 4]);
    }

    #[test]
    fn test_overlapping_groups() {
        let values = [1, 2, 3, 4];
        let groups: [fn(&i32) -> bool; 2] = [|v| v % 2 == 0, |v| *v > 2];
        assert_eq!(group_indexes_by(&values, &groups), vec![vec![1, 3], vec![2, 3]]);
    }
}
