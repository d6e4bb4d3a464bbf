//! The purchase table, its categories, and where they are kept
//!
//! Every mutation is followed by a full rewrite of the data files.

use tracing::{debug, info, warn};

use crate::lib::{
    category::CategoryRegistry,
    date::YearMonth,
    entry::Record,
    error::{Error, Result},
    summary::{Calendar, Summary},
};
use crate::load::Store;

#[derive(Debug)]
pub struct Inventory {
    records: Vec<Record>,
    categories: CategoryRegistry,
    store: Store,
}

impl Inventory {
    /// Read both data files of `store`
    ///
    /// Categories that appear in records but were never registered are
    /// appended to the registry without an example.
    pub fn load(store: Store) -> Result<Self> {
        let records = store.read_records()?;
        let mut categories = store.read_categories()?;
        for record in &records {
            if !categories.contains(&record.category) {
                categories.insert(record.category.clone(), None);
            }
        }
        info!(
            records = records.len(),
            categories = categories.len(),
            path = %store.records_path().display(),
            categories_path = %store.categories_path().display(),
            "inventory loaded"
        );
        Ok(Self { records, categories, store })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    /// Append a record and save
    ///
    /// Records with a zero quantity are dropped without touching the files,
    /// in which case this returns `Ok(false)`. An unregistered category is
    /// registered on the fly, as a reload would do anyway.
    pub fn add_record(&mut self, record: Record) -> Result<bool> {
        if !record.is_valid() {
            warn!(item = %record.item_name, "record with zero quantity ignored");
            return Ok(false);
        }
        info!(category = %record.category, item = %record.item_name, "adding record");
        if self.categories.insert(record.category.clone(), None) {
            debug!(category = %record.category, "category registered from record");
        }
        self.records.push(record);
        self.persist()?;
        Ok(true)
    }

    /// Register a category and save
    pub fn add_category(&mut self, name: &str, example: Option<&str>) -> Result<()> {
        if !self
            .categories
            .insert(name.to_string(), example.map(str::to_string))
        {
            return Err(Error::DuplicateCategory(name.to_string()));
        }
        info!(category = name, "category added");
        self.persist()
    }

    /// Forget a category along with all its records, then save
    ///
    /// Unknown names are not an error. Returns how many records were removed.
    pub fn remove_category(&mut self, name: &str) -> Result<usize> {
        if self.categories.remove(name).is_none() {
            warn!(category = name, "removing a category that is not registered");
        }
        let before = self.records.len();
        self.records.retain(|r| r.category != name);
        let removed = before - self.records.len();
        info!(category = name, removed, "category removed");
        self.persist()?;
        Ok(removed)
    }

    /// Records of one category, in insertion order
    pub fn filter_by_category<'a>(&'a self, name: &'a str) -> ByCategory<'a> {
        ByCategory {
            inner: self.records.iter(),
            name,
        }
    }

    /// Records grouped by the month of their purchase date
    pub fn group_by_month(&self) -> Calendar<'_> {
        self.records.iter().collect()
    }

    /// Months that have at least one record, oldest first
    pub fn months(&self) -> Vec<YearMonth> {
        self.group_by_month().months().collect()
    }

    /// Records and total of a single month
    pub fn month(&self, month: YearMonth) -> Option<Summary<'_>> {
        self.group_by_month().get(month).cloned()
    }

    /// Overwrite the data files with the current state
    pub fn persist(&self) -> Result<()> {
        self.store.write_records(&self.records)?;
        self.store.write_categories(&self.categories)
    }
}

/// Iterator returned by `Inventory::filter_by_category`
#[derive(Debug, Clone)]
pub struct ByCategory<'a> {
    inner: std::slice::Iter<'a, Record>,
    name: &'a str,
}

impl<'a> Iterator for ByCategory<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.name;
        self.inner.find(|r| r.category == name)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}
