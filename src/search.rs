use crate::codec::QualityEncoder;
use crate::constants::{ACCEPTANCE_THRESHOLD, MAX_QUALITY, MIN_QUALITY};
use crate::error::{CompressionError, Result};
use crate::units::percentage;

/// One encode performed during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    pub quality: u8,
    pub size: u64,
    /// `floor(100 * target / size)`
    pub ratio: u64,
}

impl Attempt {
    pub fn is_accepted(&self) -> bool {
        self.ratio >= ACCEPTANCE_THRESHOLD
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// First quality, counting down from 100, whose output crossed the threshold.
    Accepted { quality: u8, data: Vec<u8> },
    /// Even quality 1 stayed above the threshold.
    Unreachable { smallest_size: u64 },
}

/// Walks quality down from 100 to 1 until an encoding is close enough to
/// `target_bytes`.
///
/// Quality only ever decreases, one step per attempt, and the encoder is
/// never called outside `1..=100`. `on_attempt` sees every encode in order,
/// including the accepted one.
///
/// # Returns
/// * `Ok(SearchOutcome::Accepted)` with the encoded buffer to persist
/// * `Ok(SearchOutcome::Unreachable)` when quality 1 was tried without success
/// * `Err(CompressionError)` as soon as the encoder fails
pub fn search<E, F>(encoder: &E, target_bytes: u64, mut on_attempt: F) -> Result<SearchOutcome>
where
    E: QualityEncoder + ?Sized,
    F: FnMut(&Attempt),
{
    if target_bytes == 0 {
        return Err(CompressionError::InvalidTargetSize(0));
    }

    let mut smallest_size = u64::MAX;

    for quality in (MIN_QUALITY..=MAX_QUALITY).rev() {
        let data = encoder.encode(quality)?;
        if data.is_empty() {
            return Err(CompressionError::EmptyEncoding);
        }

        let size = data.len() as u64;
        let attempt = Attempt {
            quality,
            size,
            ratio: percentage(target_bytes, size),
        };
        on_attempt(&attempt);

        if attempt.is_accepted() {
            return Ok(SearchOutcome::Accepted { quality, data });
        }
        smallest_size = smallest_size.min(size);
    }

    Ok(SearchOutcome::Unreachable { smallest_size })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Produces `size_at(quality)` zero bytes and records each requested quality.
    struct ScriptedEncoder<S: Fn(u8) -> Option<usize>> {
        size_at: S,
        calls: RefCell<Vec<u8>>,
    }

    impl<S: Fn(u8) -> Option<usize>> ScriptedEncoder<S> {
        fn new(size_at: S) -> Self {
            Self {
                size_at,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl<S: Fn(u8) -> Option<usize>> QualityEncoder for ScriptedEncoder<S> {
        fn encode(&self, quality: u8) -> Result<Vec<u8>> {
            self.calls.borrow_mut().push(quality);
            match (self.size_at)(quality) {
                Some(len) => Ok(vec![0; len]),
                None => Err(CompressionError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "corrupt buffer",
                ))),
            }
        }
    }

    #[test]
    fn test_accepts_first_attempt_when_already_close() {
        let encoder = ScriptedEncoder::new(|_| Some(100_000));
        let outcome = search(&encoder, 204_800, |_| {}).unwrap();

        assert!(matches!(outcome, SearchOutcome::Accepted { quality: 100, .. }));
        assert_eq!(*encoder.calls.borrow(), vec![100]);
    }

    #[test]
    fn test_converges_after_three_decrements() {
        let encoder = ScriptedEncoder::new(|q| match q {
            100 => Some(300_000),
            99 => Some(250_000),
            98 => Some(220_000),
            _ => Some(210_000),
        });

        let mut seen = Vec::new();
        let outcome = search(&encoder, 204_800, |a| seen.push(*a)).unwrap();

        match outcome {
            SearchOutcome::Accepted { quality, data } => {
                assert_eq!(quality, 97);
                assert_eq!(data.len(), 210_000);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(*encoder.calls.borrow(), vec![100, 99, 98, 97]);
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[2].ratio, 93);
        assert!(!seen[2].is_accepted());
        assert_eq!(seen[3].ratio, 97);
        assert!(seen[3].is_accepted());
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        // 100 * 95 / 100 = 95 exactly
        let encoder = ScriptedEncoder::new(|q| if q == 100 { Some(101) } else { Some(100) });
        let outcome = search(&encoder, 95, |_| {}).unwrap();
        assert!(matches!(outcome, SearchOutcome::Accepted { quality: 99, .. }));
    }

    #[test]
    fn test_overshoot_below_target_is_accepted() {
        let encoder = ScriptedEncoder::new(|q| if q > 50 { Some(10_000) } else { Some(10) });
        let outcome = search(&encoder, 1024, |_| {}).unwrap();
        assert!(matches!(outcome, SearchOutcome::Accepted { quality: 50, .. }));
    }

    #[test]
    fn test_unreachable_stops_at_quality_one() {
        let encoder = ScriptedEncoder::new(|q| Some(50_000 + q as usize));
        let outcome = search(&encoder, 1024, |_| {}).unwrap();

        assert_eq!(
            outcome,
            SearchOutcome::Unreachable {
                smallest_size: 50_001
            }
        );
        let calls = encoder.calls.borrow();
        assert_eq!(calls.len(), 100);
        assert_eq!(calls.first(), Some(&100));
        assert_eq!(calls.last(), Some(&1));
        assert!(calls.windows(2).all(|w| w[0] == w[1] + 1));
    }

    #[test]
    fn test_encoder_error_aborts_search() {
        let encoder = ScriptedEncoder::new(|q| if q == 98 { None } else { Some(1_000_000) });
        let result = search(&encoder, 1024, |_| {});

        assert!(matches!(result, Err(CompressionError::Io(_))));
        assert_eq!(*encoder.calls.borrow(), vec![100, 99, 98]);
    }

    #[test]
    fn test_empty_encoding_is_an_error() {
        let encoder = ScriptedEncoder::new(|_| Some(0));
        let result = search(&encoder, 1024, |_| {});
        assert!(matches!(result, Err(CompressionError::EmptyEncoding)));
    }

    #[test]
    fn test_zero_target_rejected_without_encoding() {
        let encoder = ScriptedEncoder::new(|_| Some(10));
        let result = search(&encoder, 0, |_| {});
        assert!(matches!(result, Err(CompressionError::InvalidTargetSize(0))));
        assert!(encoder.calls.borrow().is_empty());
    }
}
