//! Day-precise time management
//!
//! Dates are written `YYYY-MM-DD` and read from a handful of close variants
//! (see `date.pest`). Purchases are aggregated per calendar month, which is
//! what `YearMonth` identifies.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use pest::Parser;
use pest_derive::*;
use std::fmt;
use std::str::FromStr;

/// Pest-generated parser for dates and months
#[derive(Parser)]
#[grammar = "lib/date.pest"]
struct DateParser;

type Pair<'i> = pest::iterators::Pair<'i, Rule>;

/// A date with day-precision
///
/// Supports years in the range 1000..=9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: u16,
    month: Month,
    day: u8,
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month.number(), self.day)
    }
}

/// Twelve months in the year, identified by their 3-letter abbreviations
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, PartialOrd, Ord, Hash)]
pub enum Month {
    Jan = 0,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// Parse a month from its stringified name (`"Jan"`, `"Feb"`, `"Mar"`, ...)
    ///
    /// # Panics
    ///
    /// This function will panic if the string is not a valid 3-character month name.
    ///
    /// It is meant to translate text matched by the grammar, not validate arbitrary
    /// user input.
    pub fn from(s: &str) -> Self {
        use Month::*;
        match s {
            "Jan" => Jan,
            "Feb" => Feb,
            "Mar" => Mar,
            "Apr" => Apr,
            "May" => May,
            "Jun" => Jun,
            "Jul" => Jul,
            "Aug" => Aug,
            "Sep" => Sep,
            "Oct" => Oct,
            "Nov" => Nov,
            "Dec" => Dec,
            _ => unreachable!(),
        }
    }

    /// Month from its 1-based number (`1` is `Jan`)
    pub fn from_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(Self::from_usize)
    }

    /// 1-based number of the month
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Number of days in this month of the given year
    pub fn count(self, year: u16) -> u8 {
        use Month::*;
        match self {
            Jan | Mar | May | Jul | Aug | Oct | Dec => 31,
            Apr | Jun | Sep | Nov => 30,
            Feb => if is_leap(year) { 29 } else { 28 },
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Ways in which a date taken from user input can be wrong
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateError {
    /// text does not look like a date at all
    Syntax(String),
    /// year is outside of 1000..=9999
    UnsupportedYear(usize),
    /// month number outside of 1..=12
    InvalidMonth(usize),
    /// Feb 29 of a non-leap year
    NotBissextile(usize),
    /// Feb 30 or Feb 31 or 31st day of a 30-day month
    MonthTooShort(Month, usize),
    /// day outside of 1..=31
    InvalidDay(usize),
}

impl Date {
    /// Validate year-month-day into date
    pub fn from(year: usize, month: Month, day: usize) -> Result<Self, DateError> {
        if !(1000..=9999).contains(&year) {
            Err(DateError::UnsupportedYear(year))
        } else if day == 0 || day > 31 {
            Err(DateError::InvalidDay(day))
        } else if day <= month.count(year as u16) as usize {
            Ok(Self { year: year as u16, month, day: day as u8 })
        } else if day >= 30 {
            Err(DateError::MonthTooShort(month, day))
        } else {
            Err(DateError::NotBissextile(year))
        }
    }

    /// Get date of the last day of the current month
    pub fn end_of_month(self) -> Self {
        Self { day: self.month.count(self.year), ..self }
    }

    /// Current day in the local timezone
    pub fn today() -> Result<Self, DateError> {
        use chrono::Datelike;
        let now = chrono::Local::now().date_naive();
        let n = now.month() as usize;
        let month = Month::from_number(n).ok_or(DateError::InvalidMonth(n))?;
        Date::from(now.year() as usize, month, now.day() as usize)
    }

    /// Calendar month this date falls in
    pub fn year_month(self) -> YearMonth {
        YearMonth { year: self.year, month: self.month }
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        let pair = parse_single(Rule::date, s.trim())?;
        let (year, month, day) = read_fields(pair)?;
        let month = month.ok_or_else(|| DateError::Syntax(format!("no month in '{}'", s)))?;
        Date::from(year, month, day)
    }
}

/// A calendar month of a given year, e.g. `2024-05`
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: u16,
    month: Month,
}

impl YearMonth {
    pub fn new(year: usize, month: Month) -> Result<Self, DateError> {
        if (1000..=9999).contains(&year) {
            Ok(Self { year: year as u16, month })
        } else {
            Err(DateError::UnsupportedYear(year))
        }
    }

    pub fn first_day(self) -> Date {
        Date { year: self.year, month: self.month, day: 1 }
    }

    pub fn last_day(self) -> Date {
        self.first_day().end_of_month()
    }

    /// Biject months with integers, consecutive months map to consecutive integers
    pub fn index(self) -> i64 {
        self.year as i64 * 12 + self.month as i64
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month.number())
    }
}

impl FromStr for YearMonth {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        let pair = parse_single(Rule::year_month, s.trim())?;
        let (year, month, _) = read_fields(pair)?;
        let month = month.ok_or_else(|| DateError::Syntax(format!("no month in '{}'", s)))?;
        YearMonth::new(year, month)
    }
}

fn parse_single(rule: Rule, s: &str) -> Result<Pair<'_>, DateError> {
    let mut pairs = DateParser::parse(rule, s).map_err(|e| DateError::Syntax(e.to_string()))?;
    pairs
        .next()
        .ok_or_else(|| DateError::Syntax(format!("'{}' is empty", s)))
}

/// Extract year, month and day (0 if absent) from a `date` or `year_month` node
fn read_fields(pair: Pair) -> Result<(usize, Option<Month>, usize), DateError> {
    let mut year = 0;
    let mut month = None;
    let mut day = 0;
    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::year => year = digits(&item),
            Rule::day => day = digits(&item),
            Rule::month => {
                for inner in item.into_inner() {
                    month = Some(match inner.as_rule() {
                        Rule::month_name => Month::from(inner.as_str()),
                        _ => {
                            let n = digits(&inner);
                            Month::from_number(n).ok_or(DateError::InvalidMonth(n))?
                        }
                    });
                }
            }
            _ => (),
        }
    }
    Ok((year, month, day))
}

// the grammar only lets ASCII digits through, at most 4 of them
fn digits(pair: &Pair) -> usize {
    pair.as_str()
        .bytes()
        .fold(0, |n, b| n * 10 + (b - b'0') as usize)
}

fn is_leap(year: u16) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DateError::*;
        match self {
            Syntax(msg) => write!(f, "not a valid date: {}", msg),
            UnsupportedYear(y) => write!(f, "{} is outside of the supported range for years", y),
            InvalidMonth(m) => write!(f, "{} is not a valid month", m),
            NotBissextile(y) => write!(f, "{} is not bissextile, Feb 29 does not exist", y),
            MonthTooShort(m, d) => write!(
                f,
                "{} is a short month, it does not have a {}th day",
                m, d,
            ),
            InvalidDay(d) => write!(f, "{} is not a valid day", d),
        }
    }
}

impl std::error::Error for DateError {}

impl DateError {
    /// What message to show to help fix the date error
    pub fn fix_hint(&self) -> String {
        use DateError::*;
        match self {
            Syntax(_) => "dates are written YYYY-MM-DD, e.g. 2024-05-01".to_string(),
            UnsupportedYear(_) => "year should be between 1000 and 9999 inclusive".to_string(),
            InvalidMonth(m) => format!("{} is not in the range 1 ..= 12", m),
            NotBissextile(y) => format!("did you mean {y}-02-28 or {y}-03-01 ?", y = y),
            MonthTooShort(m, d) => format!("{} is only {} days long", m,
                if *m == Month::Feb { 28.max(d - 1) } else { 30 }
            ),
            InvalidDay(d) => format!("{} is not in the range 1 ..= 31", d),
        }
    }
}
