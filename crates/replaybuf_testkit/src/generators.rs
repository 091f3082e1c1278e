//! Property-based test generators using proptest.
//!
//! Provides strategies for source contents and for the ways a consumer may
//! split its reads.

use proptest::prelude::*;

/// Strategy for source contents, including the empty source.
pub fn content_strategy(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Strategy for a sequence of read sizes.
///
/// Zero-sized reads are included on purpose; they must not disturb the
/// stream.
pub fn read_plan_strategy(max_read: usize, max_steps: usize) -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..=max_read, 1..=max_steps)
}

/// Strategy for the per-pull cap of a chunked source.
pub fn pull_size_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![
        2 => 1usize..8,
        1 => 8usize..256,
    ]
}

/// A consumer step against a stream still recording.
#[derive(Debug, Clone)]
pub enum ConsumerOperation {
    /// Read up to this many bytes.
    Read(usize),
    /// Rewind to the start.
    Reset,
    /// Seek to an absolute offset.
    SeekStart(u64),
    /// Seek relative to the cursor.
    SeekCurrent(i64),
}

/// Strategy for consumer operations.
pub fn consumer_operation_strategy(max_offset: u64) -> impl Strategy<Value = ConsumerOperation> {
    let max_delta = i64::try_from(max_offset).unwrap_or(i64::MAX);
    prop_oneof![
        4 => (0usize..64).prop_map(ConsumerOperation::Read),
        1 => Just(ConsumerOperation::Reset),
        1 => (0..=max_offset).prop_map(ConsumerOperation::SeekStart),
        1 => (-max_delta..=max_delta).prop_map(ConsumerOperation::SeekCurrent),
    ]
}

/// Strategy for a sequence of consumer operations.
pub fn operation_sequence_strategy(
    max_offset: u64,
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<ConsumerOperation>> {
    prop::collection::vec(consumer_operation_strategy(max_offset), min_ops..max_ops)
}

/// Case budget for stream property tests.
///
/// Each case drives a whole stream through a source, so the default stays
/// well under proptest's own 256 cases.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of generated streams per property.
    pub cases: u32,
    /// Shrink steps allowed when minimizing a failing operation sequence.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 128,
            max_shrink_iters: 2048,
        }
    }
}

impl PropTestConfig {
    /// Budget for checks on the generators themselves.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 24,
            max_shrink_iters: 64,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn content_respects_bound(data in content_strategy(64)) {
            prop_assert!(data.len() <= 64);
        }

        #[test]
        fn read_plan_is_never_empty(plan in read_plan_strategy(16, 8)) {
            prop_assert!(!plan.is_empty());
            prop_assert!(plan.iter().all(|&n| n <= 16));
        }

        #[test]
        fn pull_size_is_positive(size in pull_size_strategy()) {
            prop_assert!(size > 0);
        }

        #[test]
        fn seeks_stay_in_range(ops in operation_sequence_strategy(32, 1, 16)) {
            for op in ops {
                match op {
                    ConsumerOperation::SeekStart(offset) => prop_assert!(offset <= 32),
                    ConsumerOperation::SeekCurrent(delta) => prop_assert!(delta.abs() <= 32),
                    ConsumerOperation::Read(_) | ConsumerOperation::Reset => {}
                }
            }
        }
    }
}
