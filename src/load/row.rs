//! On-disk shape of the data files
//!
//! Every field is read as text first so that coercion failures can be
//! reported with the offending value and line.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::lib::{
    category::Category,
    date::Date,
    entry::{self, Amount, Record},
    error::{Error, Result},
};

pub const RECORD_HEADER: [&str; 5] = ["Category", "Item Name", "Quantity", "Price", "Purchase Date"];
pub const CATEGORY_HEADER: [&str; 2] = ["Category", "Example"];

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordRow {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Item Name")]
    pub item_name: String,
    #[serde(rename = "Quantity")]
    pub quantity: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Purchase Date")]
    pub purchase_date: String,
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        Self {
            category: record.category.clone(),
            item_name: record.item_name.clone(),
            quantity: record.quantity.to_string(),
            price: record.price.0.to_string(),
            purchase_date: record.purchase_date.to_string(),
        }
    }
}

impl RecordRow {
    /// Validate the textual fields of the row found at `line` of `path`
    pub fn into_record(self, path: &Path, line: u64) -> Result<Record> {
        let quantity = entry::coerce_integer(&self.quantity)
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n >= 1)
            .ok_or_else(|| {
                Error::malformed(path, line, "quantity", &self.quantity, "expected a whole number of at least 1")
            })?;
        let price = entry::coerce_integer(&self.price)
            .map(Amount)
            .filter(|p| *p <= Amount::MAX)
            .ok_or_else(|| {
                Error::malformed(
                    path,
                    line,
                    "price",
                    &self.price,
                    format!("expected a whole number of yen between 0 and {}", Amount::MAX.0),
                )
            })?;
        let purchase_date = self
            .purchase_date
            .parse::<Date>()
            .map_err(|e| Error::malformed(path, line, "purchase date", &self.purchase_date, e))?;
        Ok(Record {
            category: self.category,
            item_name: self.item_name,
            quantity,
            price,
            purchase_date,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryRow {
    #[serde(rename = "Category")]
    pub name: String,
    #[serde(rename = "Example")]
    pub example: String,
}

impl From<&Category> for CategoryRow {
    fn from(cat: &Category) -> Self {
        Self {
            name: cat.name.clone(),
            example: cat.example.clone().unwrap_or_default(),
        }
    }
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            name: row.name,
            example: Some(row.example).filter(|ex| !ex.is_empty()),
        }
    }
}
