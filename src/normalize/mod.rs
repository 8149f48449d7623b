//! Field normalizers for the typed columns
//!
//! Each normalizer turns one raw string into a [`ParseOutcome`] and never
//! fails the caller. Components:
//! - [`date`] - release date recovery through an ordered cascade of formats
//! - [`numeric`] - currency, count and locale-aware score extraction

pub mod date;
pub mod numeric;

pub use date::normalize_date;
pub use numeric::{
    Number, NumericMode, extract_currency, extract_integer, extract_number, extract_score,
};

use crate::models::ParseOutcome;
use tracing::trace;

/// A named parse strategy
pub type Strategy<T> = fn(&str) -> ParseOutcome<T>;

/// Ordered list of strategies evaluated until the first success
pub struct Cascade<T: 'static> {
    strategies: &'static [(&'static str, Strategy<T>)],
}

impl<T: 'static> Cascade<T> {
    pub const fn new(strategies: &'static [(&'static str, Strategy<T>)]) -> Self {
        Self { strategies }
    }

    /// Run the strategies in order. A total failure carries `input` unchanged.
    pub fn run(&self, input: &str) -> ParseOutcome<T> {
        for (name, strategy) in self.strategies {
            if let ParseOutcome::Parsed(value) = strategy(input) {
                trace!("Strategy '{}' parsed '{}'", name, input);
                return ParseOutcome::Parsed(value);
            }
        }
        ParseOutcome::failed(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn even(raw: &str) -> ParseOutcome<u32> {
        match raw.parse::<u32>() {
            Ok(n) if n % 2 == 0 => ParseOutcome::Parsed(n),
            _ => ParseOutcome::failed(raw),
        }
    }

    fn any(raw: &str) -> ParseOutcome<u32> {
        match raw.parse::<u32>() {
            Ok(n) => ParseOutcome::Parsed(n + 100),
            Err(_) => ParseOutcome::failed(raw),
        }
    }

    static STRATEGIES: [(&str, Strategy<u32>); 2] = [("even", even), ("any", any)];
    static CASCADE: Cascade<u32> = Cascade::new(&STRATEGIES);

    #[test]
    fn test_first_success_wins() {
        assert_eq!(CASCADE.run("4"), ParseOutcome::Parsed(4));
        assert_eq!(CASCADE.run("3"), ParseOutcome::Parsed(103));
    }

    #[test]
    fn test_total_failure_keeps_input() {
        assert_eq!(CASCADE.run("x"), ParseOutcome::failed("x"));
    }
}
