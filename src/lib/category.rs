//! Registered categories and their example item names

/// A category label, optionally with an illustration of how items in it
/// should be named (e.g. `ゼブラ - サラサボールペン - ブラック - 10本`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub example: Option<String>,
}

/// Ordered set of categories, unique by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    entries: Vec<Category>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.entries.iter().find(|c| c.name == name)
    }

    /// Example text of `name`, if both the category and its example exist
    pub fn example(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|c| c.example.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> + '_ {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|c| c.name.as_str())
    }

    /// Register a new category
    ///
    /// Returns `false` and leaves the registry untouched if the name is taken.
    /// An empty example is the same as no example.
    pub fn insert(&mut self, name: String, example: Option<String>) -> bool {
        if self.contains(&name) {
            false
        } else {
            let example = example.filter(|ex| !ex.is_empty());
            self.entries.push(Category { name, example });
            true
        }
    }

    /// Forget a category, absent names are ignored
    pub fn remove(&mut self, name: &str) -> Option<Category> {
        let idx = self.entries.iter().position(|c| c.name == name)?;
        Some(self.entries.remove(idx))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut reg = CategoryRegistry::new();
        assert!(reg.insert("Stationery".into(), Some("例: ペン - 黒 - 10本".into())));
        assert!(!reg.insert("Stationery".into(), Some("anything".into())));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.example("Stationery"), Some("例: ペン - 黒 - 10本"));
    }

    #[test]
    fn empty_example_is_no_example() {
        let mut reg = CategoryRegistry::new();
        reg.insert("Food".into(), Some(String::new()));
        assert_eq!(reg.get("Food"), Some(&Category { name: "Food".into(), example: None }));
        assert_eq!(reg.example("Food"), None);
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut reg = CategoryRegistry::new();
        reg.insert("Food".into(), None);
        reg.insert("Books".into(), None);
        reg.insert("Cleaning".into(), None);
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["Food", "Books", "Cleaning"]);
    }

    #[test]
    fn removal_is_tolerant() {
        let mut reg = CategoryRegistry::new();
        reg.insert("Food".into(), None);
        assert_eq!(reg.remove("Books"), None);
        assert_eq!(reg.example("Food"), None);
        assert_eq!(
            reg.remove("Food"),
            Some(Category { name: "Food".into(), example: None })
        );
        assert!(reg.is_empty());
        assert_eq!(reg.remove("Food"), None);
    }
}
