//! Conservation check between the two tallies

use crate::error::{PipelineError, PipelineResult};
use crate::tally::TallySnapshot;

/// Check that the collected-side tally matches the produced-side tally
///
/// Succeeds iff both counts and both sums are equal. A mismatch means the
/// concurrent stages lost, duplicated, or miscounted a value; callers treat
/// it as fatal.
pub fn check(produced: TallySnapshot, collected: TallySnapshot) -> PipelineResult<()> {
    if produced == collected {
        return Ok(());
    }

    Err(PipelineError::IntegrityMismatch {
        produced_count: produced.count,
        produced_sum: produced.sum,
        collected_count: collected.count,
        collected_sum: collected.sum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_matching_tallies() {
        let snap = TallySnapshot { count: 10, sum: 55 };
        assert!(check(snap, snap).is_ok());
    }

    #[test]
    fn test_check_empty_tallies() {
        let snap = TallySnapshot { count: 0, sum: 0 };
        assert!(check(snap, snap).is_ok());
    }

    #[test]
    fn test_check_count_mismatch() {
        let produced = TallySnapshot { count: 10, sum: 55 };
        let collected = TallySnapshot { count: 9, sum: 55 };

        let err = check(produced, collected).unwrap_err();
        match err {
            PipelineError::IntegrityMismatch {
                produced_count,
                collected_count,
                ..
            } => {
                assert_eq!(produced_count, 10);
                assert_eq!(collected_count, 9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_check_sum_mismatch() {
        let produced = TallySnapshot { count: 10, sum: 55 };
        let collected = TallySnapshot { count: 10, sum: 54 };

        let err = check(produced, collected).unwrap_err();
        match err {
            PipelineError::IntegrityMismatch {
                produced_sum,
                collected_sum,
                ..
            } => {
                assert_eq!(produced_sum, 55);
                assert_eq!(collected_sum, 54);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
