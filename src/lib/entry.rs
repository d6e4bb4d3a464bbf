use std::fmt;
use std::iter;
use std::ops;

use crate::lib::date::Date;

/// A price in whole yen
///
/// Sums saturate instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(pub u64);

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "¥{}", self.0)
    }
}

impl Amount {
    /// Largest price accepted from a data file
    pub const MAX: Amount = Amount(i64::MAX as u64);
}

impl ops::AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::default(), |mut acc, a| {
            acc += a;
            acc
        })
    }
}

/// One purchased item
///
/// `price` is the price of the whole line, not of a single unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub category: String,
    pub item_name: String,
    pub quantity: u32,
    pub price: Amount,
    pub purchase_date: Date,
}

impl Record {
    pub fn new<C, N>(category: C, item_name: N, quantity: u32, price: Amount, purchase_date: Date) -> Self
    where
        C: ToString,
        N: ToString,
    {
        Self {
            category: category.to_string(),
            item_name: item_name.to_string(),
            quantity,
            price,
            purchase_date,
        }
    }

    /// Whether the store accepts this record at all
    pub fn is_valid(&self) -> bool {
        self.quantity >= 1
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x{} ({}, {}) on {}",
            self.item_name, self.quantity, self.price, self.category, self.purchase_date
        )
    }
}

/// Interpret a number read from text as a nonnegative integer
///
/// Integral decimal renderings (`"3.0"`, `"900.00"`) are accepted since the
/// file may have gone through a tool that stores every number as a float.
pub fn coerce_integer(s: &str) -> Option<u64> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u64>() {
        return Some(n);
    }
    let (int, frac) = s.split_once('.')?;
    if !frac.bytes().all(|b| b == b'0') {
        return None;
    }
    if int.is_empty() {
        Some(0).filter(|_| !frac.is_empty())
    } else {
        int.parse::<u64>().ok()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn amounts_add_up() {
        let total: Amount = [500, 900, 0].iter().map(|n| Amount(*n)).sum();
        assert_eq!(total, Amount(1400));
        assert_eq!(total.to_string(), "¥1400");
    }

    #[test]
    fn huge_sums_saturate() {
        let mut total = Amount(u64::MAX);
        total += Amount(1);
        assert_eq!(total, Amount(u64::MAX));
        let total: Amount = [Amount::MAX, Amount::MAX, Amount::MAX].iter().copied().sum();
        assert_eq!(total, Amount(u64::MAX));
    }

    #[test]
    fn integer_coercion() {
        assert_eq!(coerce_integer("10"), Some(10));
        assert_eq!(coerce_integer(" 10 "), Some(10));
        assert_eq!(coerce_integer("900.0"), Some(900));
        assert_eq!(coerce_integer("900.000"), Some(900));
        assert_eq!(coerce_integer("900."), Some(900));
        assert_eq!(coerce_integer(".0"), Some(0));
        assert_eq!(coerce_integer("."), None);
        assert_eq!(coerce_integer("899.5"), None);
        assert_eq!(coerce_integer("-3"), None);
        assert_eq!(coerce_integer("-3.0"), None);
        assert_eq!(coerce_integer("ten"), None);
        assert_eq!(coerce_integer(""), None);
    }

    #[test]
    fn quantity_must_be_positive() {
        let date = "2024-05-01".parse().unwrap();
        assert!(Record::new("Stationery", "Pen", 1, Amount(0), date).is_valid());
        assert!(!Record::new("Stationery", "Pen", 0, Amount(500), date).is_valid());
    }
}
