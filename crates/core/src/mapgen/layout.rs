//! Row count planning: how many rows a floor has and how wide each one is.

use crate::error::GenerationError;

/// Per-row node counts shaped like a diamond: rising from one node toward
/// `max_per_row`, then falling back. The plan has at least `min_rows` rows and
/// holds at least `node_count` nodes; rows are appended until both hold.
///
/// A plan whose total would exceed `ceiling` is rejected before it is built.
pub fn plan_rows(
    node_count: usize,
    min_rows: usize,
    max_per_row: usize,
    ceiling: usize,
) -> Result<Vec<usize>, GenerationError> {
    if max_per_row == 0 {
        return Err(GenerationError::ZeroRowCapacity);
    }
    // The widest row is always present in full.
    if max_per_row > ceiling {
        return Err(GenerationError::NodeCountTooLarge { requested: max_per_row, ceiling });
    }

    let mut rows = min_rows.max(usize::from(node_count > 0));
    if rows == 0 {
        return Err(GenerationError::NoRows);
    }

    let overflowed = || GenerationError::NodeCountTooLarge { requested: usize::MAX, ceiling };
    loop {
        // Every row holds at least one node.
        if rows > ceiling {
            return Err(GenerationError::NodeCountTooLarge { requested: rows, ceiling });
        }
        let plan = diamond_profile(rows, max_per_row).ok_or_else(overflowed)?;
        let total = plan
            .iter()
            .try_fold(0_usize, |sum, &width| sum.checked_add(width))
            .ok_or_else(overflowed)?;
        if total > ceiling {
            return Err(GenerationError::NodeCountTooLarge { requested: total, ceiling });
        }
        if total >= node_count {
            return Ok(plan);
        }
        rows += 1;
    }
}

/// `None` when the interpolation overflows.
fn diamond_profile(rows: usize, peak: usize) -> Option<Vec<usize>> {
    let peak_distance = (rows - 1) / 2;
    (0..rows)
        .map(|row| {
            // One or two rows have no rise to interpolate over.
            if peak_distance == 0 {
                return Some(peak);
            }
            let distance_from_edge = row.min(rows - 1 - row);
            let rise = distance_from_edge
                .checked_mul(peak - 1)?
                .checked_add(peak_distance / 2)?
                / peak_distance;
            rise.checked_add(1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn is_diamond(plan: &[usize]) -> bool {
        let Some(peak_index) = plan.iter().enumerate().max_by_key(|(_, count)| **count).map(|(i, _)| i)
        else {
            return false;
        };
        plan[..=peak_index].windows(2).all(|pair| pair[0] <= pair[1])
            && plan[peak_index..].windows(2).all(|pair| pair[0] >= pair[1])
    }

    #[test]
    fn default_plan_rises_then_falls() {
        let plan = plan_rows(5, 10, 3, 512).expect("valid plan");
        assert_eq!(plan, [1, 2, 2, 3, 3, 3, 3, 2, 2, 1]);
    }

    #[test]
    fn large_requests_append_rows_until_capacity_suffices() {
        let plan = plan_rows(40, 10, 3, 512).expect("valid plan");
        assert!(plan.len() > 10);
        assert!(plan.iter().sum::<usize>() >= 40);
        assert!(plan.iter().all(|&count| (1..=3).contains(&count)));
    }

    #[test]
    fn single_row_minimum_does_not_divide_by_zero() {
        assert_eq!(plan_rows(1, 1, 3, 512).expect("valid plan"), [3]);
        assert_eq!(plan_rows(2, 2, 4, 512).expect("valid plan"), [4, 4]);
    }

    #[test]
    fn row_width_of_one_yields_a_single_file_line() {
        let plan = plan_rows(12, 10, 1, 512).expect("valid plan");
        assert_eq!(plan, vec![1; 12]);
    }

    #[test]
    fn zero_capacity_and_zero_rows_fail_fast() {
        assert!(matches!(plan_rows(5, 10, 0, 512), Err(GenerationError::ZeroRowCapacity)));
        assert!(matches!(plan_rows(0, 0, 3, 512), Err(GenerationError::NoRows)));
    }

    #[test]
    fn zero_minimum_rows_still_places_requested_nodes() {
        let plan = plan_rows(4, 0, 2, 512).expect("valid plan");
        assert!(plan.iter().sum::<usize>() >= 4);
    }

    #[test]
    fn plans_wider_than_the_ceiling_are_rejected() {
        assert!(matches!(
            plan_rows(5, 10, 200, 512),
            Err(GenerationError::NodeCountTooLarge { requested, ceiling: 512 }) if requested > 512
        ));
        assert!(matches!(
            plan_rows(5, 10, 600, 512),
            Err(GenerationError::NodeCountTooLarge { requested: 600, ceiling: 512 })
        ));
    }

    #[test]
    fn extreme_settings_fail_instead_of_overflowing() {
        assert!(matches!(
            plan_rows(5, 10, usize::MAX, usize::MAX),
            Err(GenerationError::NodeCountTooLarge { ceiling: usize::MAX, .. })
        ));
        assert!(matches!(
            plan_rows(5, 10, usize::MAX, 512),
            Err(GenerationError::NodeCountTooLarge { requested: usize::MAX, ceiling: 512 })
        ));
        assert!(matches!(
            plan_rows(5, usize::MAX, 3, 512),
            Err(GenerationError::NodeCountTooLarge { requested: usize::MAX, ceiling: 512 })
        ));
    }

    #[test]
    fn plan_exactly_at_the_ceiling_is_accepted() {
        let plan = plan_rows(5, 10, 3, 22).expect("22 nodes fit a ceiling of 22");
        assert_eq!(plan.iter().sum::<usize>(), 22);
        assert!(matches!(
            plan_rows(5, 10, 3, 21),
            Err(GenerationError::NodeCountTooLarge { requested: 22, ceiling: 21 })
        ));
    }

    proptest! {
        #[test]
        fn plans_honour_bounds(
            node_count in 0_usize..200,
            min_rows in 1_usize..20,
            max_per_row in 1_usize..6
        ) {
            let plan = plan_rows(node_count, min_rows, max_per_row, 512).expect("valid plan");
            prop_assert!(plan.len() >= min_rows);
            prop_assert!(plan.iter().sum::<usize>() <= 512);
            prop_assert!(plan.iter().sum::<usize>() >= node_count);
            prop_assert!(plan.iter().all(|&count| count >= 1 && count <= max_per_row));
            prop_assert!(is_diamond(&plan), "plan {plan:?} is not diamond shaped");
        }
    }
}
