//! Reservation identifier synthesis.
//!
//! All randomness flows through an injected [`StdRng`] so tests can seed the
//! factory and assert reproducible output.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::carrier::eticket_prefix;

pub struct IdFactory {
    rng: StdRng,
}

impl IdFactory {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Booking id derived from the creation instant, unique to the second.
    /// Collisions within the same second are an accepted limitation.
    pub fn booking_id(&self, at: DateTime<Utc>) -> String {
        format!("ORDER_{}", at.format("%Y%m%d%H%M%S"))
    }

    /// 6 independently drawn uppercase letters.
    pub fn pnr(&mut self) -> String {
        (0..6).map(|_| self.rng.gen_range(b'A'..=b'Z') as char).collect()
    }

    /// 13-digit ticket number: the carrier's 3-digit prefix ("000" when the
    /// carrier is unknown) followed by 10 drawn digits.
    pub fn eticket_number(&mut self, carrier_code: &str) -> String {
        let tail: String = (0..10).map(|_| char::from(b'0' + self.rng.gen_range(0..10u8))).collect();
        format!("{}{}", eticket_prefix(carrier_code), tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_booking_id_is_second_resolution() {
        let factory = IdFactory::seeded(7);
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 14, 30, 59).unwrap();
        assert_eq!(factory.booking_id(at), "ORDER_20250601143059");
    }

    #[test]
    fn test_pnr_shape() {
        let mut factory = IdFactory::seeded(7);
        for _ in 0..50 {
            let pnr = factory.pnr();
            assert_eq!(pnr.len(), 6);
            assert!(pnr.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_eticket_shape_and_prefix() {
        let mut factory = IdFactory::seeded(7);
        let ticket = factory.eticket_number("DL");
        assert_eq!(ticket.len(), 13);
        assert!(ticket.starts_with("006"));
        assert!(ticket.chars().all(|c| c.is_ascii_digit()));

        let unknown = factory.eticket_number("ZZ");
        assert!(unknown.starts_with("000"));
    }

    #[test]
    fn test_seeded_factories_reproduce_output() {
        let mut a = IdFactory::seeded(42);
        let mut b = IdFactory::seeded(42);
        assert_eq!(a.pnr(), b.pnr());
        assert_eq!(a.eticket_number("AA"), b.eticket_number("AA"));
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = IdFactory::seeded(1);
        let mut b = IdFactory::seeded(2);
        // Six draws from disjoint streams; a collision here would be a
        // one-in-millions accident, not flakiness.
        assert_ne!(
            (0..6).map(|_| a.pnr()).collect::<Vec<_>>(),
            (0..6).map(|_| b.pnr()).collect::<Vec<_>>()
        );
    }
}
