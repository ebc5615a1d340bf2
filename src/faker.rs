//! Primitive value source.
//!
//! [`Faker`] is the only place randomness comes from. Leaf generators call
//! into it; composite generators only use it to size batches.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use fake::faker::internet::en::DomainSuffix;
use fake::faker::lorem::en::Word;
use fake::Fake;
use rand::distr::Alphanumeric;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use std::net::{IpAddr, Ipv4Addr};
use url::Url;
use uuid::Uuid;

const SECONDS_PER_DAY: i64 = 86_400;

/// Seedable source of primitive fake values.
#[derive(Debug, Clone)]
pub struct Faker {
    rng: ChaCha8Rng,
}

impl Faker {
    /// A faker seeded from the thread-local generator.
    pub fn new() -> Self {
        Self::seeded(rand::rng().random())
    }

    /// A faker that replays the same sequence for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Direct access to the underlying generator.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn bool(&mut self) -> bool {
        self.rng.random()
    }

    /// `true` with probability `p` (clamped to `0.0..=1.0`).
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }

    pub fn u8(&mut self) -> u8 {
        self.rng.random()
    }

    pub fn i8(&mut self) -> i8 {
        self.rng.random()
    }

    pub fn i16(&mut self) -> i16 {
        self.rng.random()
    }

    pub fn u16(&mut self) -> u16 {
        self.rng.random()
    }

    pub fn i32(&mut self) -> i32 {
        self.rng.random()
    }

    pub fn u32(&mut self) -> u32 {
        self.rng.random()
    }

    pub fn i64(&mut self) -> i64 {
        self.rng.random()
    }

    pub fn u64(&mut self) -> u64 {
        self.rng.random()
    }

    /// Uniform in `0.0..1.0`.
    pub fn f32(&mut self) -> f32 {
        self.rng.random()
    }

    /// Uniform in `0.0..1.0`.
    pub fn f64(&mut self) -> f64 {
        self.rng.random()
    }

    /// Two-decimal amount in `0.00..=10000.00`.
    pub fn decimal(&mut self) -> Decimal {
        Decimal::new(self.rng.random_range(0..=1_000_000i64), 2)
    }

    /// Alphanumeric ASCII character.
    pub fn char(&mut self) -> char {
        char::from(self.rng.sample(Alphanumeric))
    }

    /// Inclusive range; `min` is returned when the range is empty.
    pub fn range(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    /// A lorem-ipsum word.
    pub fn word(&mut self) -> String {
        Word().fake_with_rng(&mut self.rng)
    }

    /// A point in time within the last `days` days.
    pub fn recent(&mut self, days: u32) -> DateTime<Utc> {
        let span = SECONDS_PER_DAY * i64::from(days.max(1));
        Utc::now() - TimeDelta::seconds(self.rng.random_range(0..=span))
    }

    /// A calendar date within the last ten years.
    pub fn date(&mut self) -> NaiveDate {
        Utc::now().date_naive() - TimeDelta::days(self.rng.random_range(0..=3650))
    }

    pub fn time(&mut self) -> NaiveTime {
        let secs = self.rng.random_range(0..SECONDS_PER_DAY as u32);
        NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Up to one week.
    pub fn duration(&mut self) -> TimeDelta {
        TimeDelta::seconds(self.rng.random_range(0..=SECONDS_PER_DAY * 7))
    }

    pub fn uuid(&mut self) -> Uuid {
        Uuid::from_u128(self.rng.random())
    }

    pub fn ip_addr(&mut self) -> IpAddr {
        IpAddr::V4(Ipv4Addr::from(self.rng.random::<u32>()))
    }

    /// `https://<word>.<suffix>/<word>`.
    pub fn url(&mut self) -> Option<Url> {
        let host = self.word();
        let path = self.word();
        let suffix: String = DomainSuffix().fake_with_rng(&mut self.rng);
        Url::parse(&format!("https://{host}.{suffix}/{path}")).ok()
    }

    /// Uniform choice; `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.rng.random_range(0..items.len()))
    }
}

impl Default for Faker {
    fn default() -> Self {
        Self::new()
    }
}
