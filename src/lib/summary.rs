use std::collections::BTreeMap;
use std::ops;

use crate::lib::{
    date::YearMonth,
    entry::{Amount, Record},
};

/// All purchases of one calendar month
#[derive(Debug, Clone)]
pub struct Summary<'r> {
    month: YearMonth,
    total: Amount,
    records: Vec<&'r Record>,
}

impl<'r> Summary<'r> {
    pub fn new_month(month: YearMonth) -> Self {
        Self {
            month,
            total: Amount::default(),
            records: Vec::new(),
        }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    /// Sum of the line prices
    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn records(&self) -> &[&'r Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl<'r> ops::AddAssign<&'r Record> for Summary<'r> {
    fn add_assign(&mut self, record: &'r Record) {
        if record.purchase_date.year_month() == self.month {
            self.total += record.price;
            self.records.push(record);
        }
    }
}

/// A collection of disjoint month summaries, in chronological order
#[derive(Debug, Default)]
pub struct Calendar<'r> {
    items: BTreeMap<YearMonth, Summary<'r>>,
}

impl<'r> Calendar<'r> {
    pub fn new() -> Self {
        Self { items: BTreeMap::new() }
    }

    /// File each record under its month, creating months as needed
    pub fn register<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'r Record>,
    {
        for record in records {
            let month = record.purchase_date.year_month();
            *self
                .items
                .entry(month)
                .or_insert_with(|| Summary::new_month(month)) += record;
        }
    }

    pub fn get(&self, month: YearMonth) -> Option<&Summary<'r>> {
        self.items.get(&month)
    }

    pub fn months(&self) -> impl Iterator<Item = YearMonth> + '_ {
        self.items.keys().copied()
    }

    pub fn contents(&self) -> impl Iterator<Item = &Summary<'r>> + '_ {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> Amount {
        self.contents().map(Summary::total).sum()
    }
}

impl<'r> FromIterator<&'r Record> for Calendar<'r> {
    fn from_iter<I: IntoIterator<Item = &'r Record>>(iter: I) -> Self {
        let mut cal = Calendar::new();
        cal.register(iter);
        cal
    }
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! rec {
        ( $cat:expr, $name:expr, $qty:expr, $price:expr, $date:expr ) => {
            Record::new($cat, $name, $qty, Amount($price), $date.parse().unwrap())
        };
    }

    #[test]
    fn one_month_two_records() {
        let records = vec![
            rec!("Stationery", "Pen", 10, 500, "2024-05-01"),
            rec!("Stationery", "Notebook", 3, 900, "2024-05-15"),
        ];
        let cal = records.iter().collect::<Calendar>();
        assert_eq!(cal.len(), 1);
        let may = cal.get("2024-05".parse().unwrap()).unwrap();
        assert_eq!(may.total(), Amount(1400));
        assert_eq!(may.len(), 2);
        assert_eq!(may.month().to_string(), "2024-05");
    }

    #[test]
    fn months_are_chronological() {
        let records = vec![
            rec!("Food", "Rice", 1, 2000, "2024-03-10"),
            rec!("Food", "Miso", 1, 400, "2023-12-31"),
            rec!("Food", "Tea", 2, 800, "2024-03-01"),
            rec!("Food", "Salt", 1, 100, "2024-01-01"),
        ];
        let cal = records.iter().collect::<Calendar>();
        let months = cal.months().map(|m| m.to_string()).collect::<Vec<_>>();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-03"]);
        assert_eq!(cal.get("2024-03".parse().unwrap()).unwrap().total(), Amount(2800));
        assert_eq!(cal.total(), Amount(3300));
    }

    #[test]
    fn summary_ignores_other_months() {
        let inside = rec!("Food", "Rice", 1, 2000, "2024-03-10");
        let outside = rec!("Food", "Rice", 1, 2000, "2024-04-10");
        let mut sum = Summary::new_month("2024-03".parse().unwrap());
        sum += &inside;
        sum += &outside;
        assert_eq!(sum.len(), 1);
        assert_eq!(sum.total(), Amount(2000));
    }

    #[test]
    fn overflowing_month_saturates() {
        let records = vec![
            rec!("Food", "A", 1, u64::MAX, "2024-05-01"),
            rec!("Food", "B", 1, 1, "2024-05-02"),
        ];
        let cal = records.iter().collect::<Calendar>();
        assert_eq!(cal.get("2024-05".parse().unwrap()).unwrap().total(), Amount(u64::MAX));
        assert_eq!(cal.total(), Amount(u64::MAX));
    }

    #[test]
    fn empty_calendar() {
        let cal = Calendar::new();
        assert!(cal.is_empty());
        assert!(cal.get("2024-03".parse().unwrap()).is_none());
        assert_eq!(cal.total(), Amount(0));
    }
}
