//! One handler per menu entry
//!
//! Handlers do the input checks the store leaves to its caller, print their
//! results on stdout, and describe anything that went wrong in `reports`.

use std::path::Path;

use crate::cli::{args::Command, plot::Plotter, report::Reports, table::Table};
use crate::inventory::Inventory;
use crate::lib::{
    date::{Date, YearMonth},
    entry::{Amount, Record},
    error::{Error, Result},
};

pub fn run(command: Command, inv: &mut Inventory, reports: &mut Reports) -> Result<()> {
    match command {
        Command::Add { category, item, quantity, price, date } => {
            add(inv, reports, category, item, quantity, price, date)
        }
        Command::View { category } => {
            view(inv, reports, category.as_deref());
            Ok(())
        }
        Command::CategoryAdd { name, example } => add_category(inv, reports, &name, &example),
        Command::CategoryRemove { name } => remove_category(inv, reports, &name),
        Command::CategoryList => {
            list_categories(inv);
            Ok(())
        }
        Command::Monthly { month } => {
            monthly(inv, reports, month);
            Ok(())
        }
        Command::Analyze { output } => analyze(inv, reports, &output),
    }
}

fn known_categories(inv: &Inventory) -> String {
    if inv.categories().is_empty() {
        "register one first with `kaimono category add <NAME> <EXAMPLE>`".to_string()
    } else {
        format!("known categories: {}", inv.categories().names().collect::<Vec<_>>().join(", "))
    }
}

fn add(
    inv: &mut Inventory,
    reports: &mut Reports,
    category: String,
    item: String,
    quantity: u32,
    price: Amount,
    date: Date,
) -> Result<()> {
    if item.trim().is_empty() {
        reports
            .make("Missing item name")
            .text("the item name may not be empty")
            .hint(match inv.categories().example(&category) {
                Some(ex) => format!("items of {} look like '{}'", category, ex),
                None => "give the item a name".to_string(),
            });
        return Ok(());
    }
    if !inv.categories().contains(&category) {
        let hint = known_categories(inv);
        reports
            .make("Unknown category")
            .text(format!("'{}' is not registered", category))
            .hint(hint);
        return Ok(());
    }
    let record = Record::new(&category, &item, quantity, price, date);
    let line = record.to_string();
    if inv.add_record(record)? {
        println!("Added {}", line);
        if let Some(ex) = inv.categories().example(&category) {
            println!("Item name example for {}: {}", category, ex);
        }
    } else {
        reports
            .make("Nothing added")
            .nonfatal()
            .text(format!("quantity of '{}' is {}", item, quantity))
            .hint("quantity must be at least 1");
    }
    Ok(())
}

fn view(inv: &Inventory, reports: &mut Reports, category: Option<&str>) {
    let table = match category {
        None => Table::records(inv.records()).with_title("All data"),
        Some(name) => {
            if !inv.categories().contains(name) {
                let hint = known_categories(inv);
                reports
                    .make("Unknown category")
                    .nonfatal()
                    .text(format!("'{}' is not registered", name))
                    .hint(hint);
            }
            Table::records(inv.filter_by_category(name)).with_title(format!("Category: {}", name))
        }
    };
    if table.is_empty() {
        println!("No items.");
    } else {
        print!("{}", table);
    }
}

fn add_category(inv: &mut Inventory, reports: &mut Reports, name: &str, example: &str) -> Result<()> {
    if name.trim().is_empty() || example.trim().is_empty() {
        reports
            .make("Missing value")
            .text("both the category name and an example item name are required")
            .hint("e.g. kaimono category add 文房具 'ゼブラ - サラサボールペン - ブラック - 10本'");
        return Ok(());
    }
    match inv.add_category(name, Some(example)) {
        Ok(()) => {
            println!("Category {} added.", name);
            Ok(())
        }
        Err(e @ Error::DuplicateCategory(_)) => {
            reports.error(&e);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn remove_category(inv: &mut Inventory, reports: &mut Reports, name: &str) -> Result<()> {
    if !inv.categories().contains(name) {
        let hint = known_categories(inv);
        reports
            .make("Unknown category")
            .nonfatal()
            .text(format!("'{}' is not registered", name))
            .hint(hint);
    }
    let removed = inv.remove_category(name)?;
    println!("Category {} removed along with {} item(s).", name, removed);
    Ok(())
}

fn list_categories(inv: &Inventory) {
    let mut table = Table::new("#", &["Category", "Example"], &[]).with_title("Categories");
    for (i, cat) in inv.categories().iter().enumerate() {
        table.push_line(
            (i + 1).to_string(),
            vec![cat.name.clone(), cat.example.clone().unwrap_or_default()],
        );
    }
    if table.is_empty() {
        println!("No categories.");
    } else {
        print!("{}", table);
    }
}

fn monthly(inv: &Inventory, reports: &mut Reports, month: Option<YearMonth>) {
    let months = inv.months();
    let available = months.iter().map(|m| m.to_string()).collect::<Vec<_>>().join(", ");
    let month = match month.or_else(|| months.last().copied()) {
        Some(month) => month,
        None => {
            reports
                .make("No purchases recorded")
                .nonfatal()
                .hint("add some with `kaimono add`");
            return;
        }
    };
    match inv.month(month) {
        Some(sum) => {
            let title = format!(
                "{} ({} .. {}): {} item(s), {}",
                month,
                month.first_day(),
                month.last_day(),
                sum.len(),
                sum.total()
            );
            print!("{}", Table::records(sum.records().iter().copied()).with_title(title));
            println!("Available months: {}", available);
        }
        None => {
            reports
                .make("No purchases that month")
                .nonfatal()
                .text(format!("nothing was bought in {}", month))
                .hint(format!("available months: {}", available));
        }
    }
}

fn analyze(inv: &Inventory, reports: &mut Reports, output: &Path) -> Result<()> {
    let cal = inv.group_by_month();
    if cal.is_empty() {
        reports
            .make("Nothing to analyze")
            .nonfatal()
            .text("no purchases recorded, no chart written");
        return Ok(());
    }
    print!("{}", Table::months(&cal).with_title(format!("Monthly, {} month(s)", cal.len())));
    Plotter::from(&cal)
        .render(output)
        .map_err(|e| Error::io(output, e))?;
    println!("Chart written to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::load::Store;
    use tempfile::TempDir;

    fn fresh(dir: &TempDir) -> Inventory {
        Inventory::load(Store::new(dir.path().join("inventory_data.csv"))).unwrap()
    }

    fn add_cmd(category: &str, item: &str, quantity: u32, price: u64, date: &str) -> Command {
        Command::Add {
            category: category.into(),
            item: item.into(),
            quantity,
            price: Amount(price),
            date: date.parse().unwrap(),
        }
    }

    #[test]
    fn add_requires_known_category() {
        let dir = TempDir::new().unwrap();
        let mut inv = fresh(&dir);
        let mut reports = Reports::new();
        run(add_cmd("Food", "Rice", 1, 2000, "2024-03-10"), &mut inv, &mut reports).unwrap();
        assert!(reports.is_fatal());
        assert!(inv.records().is_empty());
    }

    #[test]
    fn add_requires_item_name() {
        let dir = TempDir::new().unwrap();
        let mut inv = fresh(&dir);
        let mut reports = Reports::new();
        run(
            Command::CategoryAdd { name: "Food".into(), example: "米 - 5kg".into() },
            &mut inv,
            &mut reports,
        )
        .unwrap();
        run(add_cmd("Food", "  ", 1, 2000, "2024-03-10"), &mut inv, &mut reports).unwrap();
        assert!(reports.is_fatal());
        assert!(reports.to_string().contains("米 - 5kg"));
        assert!(inv.records().is_empty());
    }

    #[test]
    fn full_session() {
        let dir = TempDir::new().unwrap();
        let mut inv = fresh(&dir);
        let mut reports = Reports::new();
        let commands = vec![
            Command::CategoryAdd { name: "Stationery".into(), example: "例: ペン - 黒 - 10本".into() },
            add_cmd("Stationery", "Pen", 10, 500, "2024-05-01"),
            add_cmd("Stationery", "Notebook", 3, 900, "2024-05-15"),
            add_cmd("Stationery", "Eraser", 0, 100, "2024-05-15"),
            Command::View { category: None },
            Command::View { category: Some("Stationery".into()) },
            Command::CategoryList,
            Command::Monthly { month: None },
            Command::Analyze { output: dir.path().join("monthly.svg") },
        ];
        for cmd in commands {
            run(cmd, &mut inv, &mut reports).unwrap();
        }
        // only the zero quantity warning
        assert!(!reports.is_fatal());
        assert_eq!(reports.count_warnings(), 1);
        assert_eq!(inv.records().len(), 2);
        assert!(dir.path().join("monthly.svg").exists());

        run(
            Command::CategoryAdd { name: "Stationery".into(), example: "anything".into() },
            &mut inv,
            &mut reports,
        )
        .unwrap();
        assert_eq!(reports.count_warnings(), 2);
        assert_eq!(inv.categories().len(), 1);

        run(Command::CategoryRemove { name: "Stationery".into() }, &mut inv, &mut reports).unwrap();
        assert!(inv.records().is_empty());
        assert!(fresh(&dir).records().is_empty());
    }

    #[test]
    fn empty_inventory_only_warns() {
        let dir = TempDir::new().unwrap();
        let mut inv = fresh(&dir);
        let mut reports = Reports::new();
        run(Command::Monthly { month: None }, &mut inv, &mut reports).unwrap();
        run(Command::Analyze { output: dir.path().join("monthly.svg") }, &mut inv, &mut reports).unwrap();
        run(Command::CategoryRemove { name: "Ghost".into() }, &mut inv, &mut reports).unwrap();
        assert!(!reports.is_fatal());
        assert_eq!(reports.count_warnings(), 3);
        assert!(!dir.path().join("monthly.svg").exists());
    }
}
