//! Strictly increasing nonces for signed requests
//!
//! Bitfinex rejects any authenticated request whose nonce is not greater than
//! the last one it accepted for the API key. Nonces are microsecond
//! timestamps, bumped past the last issued value whenever the clock has not
//! advanced (or went backwards).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{trace, warn};

use crate::error::{AuthError, AuthResult};

/// Nonce source owned by a single client
///
/// Safe to share between threads: issuance is a compare-and-swap loop, so two
/// concurrent callers can never receive the same value.
#[derive(Debug, Default)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    /// Create a generator that has not issued anything yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator whose next nonce is greater than `last`
    ///
    /// Useful when the exchange has already accepted nonces from another
    /// process using the same key.
    pub fn starting_after(last: u64) -> Self {
        Self {
            last: AtomicU64::new(last),
        }
    }

    /// Issue the next nonce
    ///
    /// # Errors
    /// [`AuthError::NonceExhausted`] once `u64::MAX` has been issued; no
    /// greater nonce exists.
    pub fn next(&self) -> AuthResult<u64> {
        let now = now_micros();
        let mut current = self.last.load(Ordering::Acquire);

        loop {
            let candidate = if now > current {
                now
            } else {
                match current.checked_add(1) {
                    Some(bumped) => bumped,
                    None => {
                        warn!("nonce space exhausted");
                        return Err(AuthError::NonceExhausted);
                    }
                }
            };

            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    if candidate != now {
                        trace!(clock = now, nonce = candidate, "clock did not advance, bumped nonce");
                    }
                    return Ok(candidate);
                }
                Err(observed) => current = observed,
            }
        }
    }

    /// Issue the next nonce rendered as a base-10 string
    pub fn next_string(&self) -> AuthResult<String> {
        self.next().map(|nonce| nonce.to_string())
    }

    /// The most recently issued nonce (0 if none)
    pub fn last_issued(&self) -> u64 {
        self.last.load(Ordering::Acquire)
    }
}

/// Microseconds since the UNIX epoch; a clock set before the epoch reads as 0
fn now_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_nonce_is_microsecond_timestamp() {
        let before = now_micros();
        let nonce = NonceGenerator::new().next().unwrap();
        let after = now_micros();

        assert!(nonce >= before);
        assert!(nonce <= after + 1);
    }

    #[test]
    fn test_tight_loop_strictly_increasing() {
        let generator = NonceGenerator::new();
        let nonces: Vec<u64> = (0..10_000).map(|_| generator.next().unwrap()).collect();

        assert!(nonces.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(generator.last_issued(), *nonces.last().unwrap());
    }

    #[test]
    fn test_starting_after_future_value() {
        // Far ahead of the wall clock, so every nonce is a bump
        let seed = now_micros() + 60_000_000_000;
        let generator = NonceGenerator::starting_after(seed);

        assert_eq!(generator.next().unwrap(), seed + 1);
        assert_eq!(generator.next().unwrap(), seed + 2);
        assert_eq!(generator.next_string().unwrap(), (seed + 3).to_string());
    }

    #[test]
    fn test_concurrent_callers_never_collide() {
        let generator = Arc::new(NonceGenerator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let generator = Arc::clone(&generator);
                thread::spawn(move || (0..2_000).map(|_| generator.next().unwrap()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            let nonces = handle.join().unwrap();
            // Each thread observes its own nonces in increasing order
            assert!(nonces.windows(2).all(|w| w[0] < w[1]));
            for nonce in nonces {
                assert!(seen.insert(nonce), "duplicate nonce {}", nonce);
            }
        }
        assert_eq!(seen.len(), 16_000);
    }

    #[test]
    fn test_exhausted_counter_is_an_error() {
        let generator = NonceGenerator::starting_after(u64::MAX - 1);
        assert_eq!(generator.next().unwrap(), u64::MAX);

        assert!(matches!(generator.next(), Err(AuthError::NonceExhausted)));
        assert!(matches!(generator.next_string(), Err(AuthError::NonceExhausted)));
        // Nothing wrapped around
        assert_eq!(generator.last_issued(), u64::MAX);
    }

    #[test]
    fn test_fresh_generator_reports_zero() {
        assert_eq!(NonceGenerator::new().last_issued(), 0);
    }
}
