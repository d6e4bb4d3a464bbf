//! Command line definition and the configuration it yields

use std::path::PathBuf;

use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};

use crate::cli::report::Reports;
use crate::lib::{
    date::{Date, YearMonth},
    entry::{self, Amount},
};
use crate::load::{Store, RECORDS_FILE};

pub fn app() -> App<'static, 'static> {
    App::new("kaimono")
        .version(crate_version!())
        .about("Keep track of purchases, by category and by month")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("file")
                .long("file")
                .short("f")
                .takes_value(true)
                .value_name("PATH")
                .global(true)
                .help("Record file [default: inventory_data.csv]"),
        )
        .arg(
            Arg::with_name("categories")
                .long("categories")
                .takes_value(true)
                .value_name("PATH")
                .global(true)
                .help("Category file [default: next to the record file]"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .global(true)
                .help("Log more (-v: info, -vv: debug)"),
        )
        .subcommand(
            SubCommand::with_name("add")
                .about("Add a purchased item")
                .arg(Arg::with_name("category").required(true).help("Category of the item"))
                .arg(Arg::with_name("item").required(true).help("Item name"))
                .arg(
                    Arg::with_name("quantity")
                        .long("quantity")
                        .short("q")
                        .takes_value(true)
                        .default_value("1"),
                )
                .arg(
                    Arg::with_name("price")
                        .long("price")
                        .short("p")
                        .takes_value(true)
                        .default_value("0")
                        .help("Price of the whole line, in yen"),
                )
                .arg(
                    Arg::with_name("date")
                        .long("date")
                        .short("d")
                        .takes_value(true)
                        .help("Purchase date, YYYY-MM-DD [default: today]"),
                ),
        )
        .subcommand(
            SubCommand::with_name("view")
                .about("List purchased items")
                .arg(
                    Arg::with_name("category")
                        .long("category")
                        .short("c")
                        .takes_value(true)
                        .help("Only items of this category"),
                ),
        )
        .subcommand(
            SubCommand::with_name("category")
                .about("Manage categories")
                .setting(AppSettings::SubcommandRequiredElseHelp)
                .subcommand(
                    SubCommand::with_name("add")
                        .about("Register a category")
                        .arg(Arg::with_name("name").required(true))
                        .arg(
                            Arg::with_name("example")
                                .required(true)
                                .help("Example item name, e.g. 'ゼブラ - サラサボールペン - ブラック - 10本'"),
                        ),
                )
                .subcommand(
                    SubCommand::with_name("remove")
                        .about("Delete a category and all of its items")
                        .arg(Arg::with_name("name").required(true)),
                )
                .subcommand(SubCommand::with_name("list").about("Show registered categories")),
        )
        .subcommand(
            SubCommand::with_name("monthly")
                .about("Items bought in one month")
                .arg(
                    Arg::with_name("month")
                        .help("YYYY-MM or YYYY-Mmm [default: latest month]"),
                ),
        )
        .subcommand(
            SubCommand::with_name("analyze")
                .about("Spending per month, as a table and a chart")
                .arg(
                    Arg::with_name("output")
                        .long("output")
                        .short("o")
                        .takes_value(true)
                        .value_name("PATH")
                        .default_value("monthly.svg"),
                ),
        )
}

/// What to do, and on which files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: Store,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        category: String,
        item: String,
        quantity: u32,
        price: Amount,
        date: Date,
    },
    View {
        category: Option<String>,
    },
    CategoryAdd {
        name: String,
        example: String,
    },
    CategoryRemove {
        name: String,
    },
    CategoryList,
    Monthly {
        month: Option<YearMonth>,
    },
    Analyze {
        output: PathBuf,
    },
}

impl Config {
    /// Interpret parsed arguments
    ///
    /// Values that cannot be understood are described in `reports`.
    pub fn from_matches(m: &ArgMatches, reports: &mut Reports) -> Option<Self> {
        let mut store = Store::new(global(m, "file").unwrap_or(RECORDS_FILE));
        if let Some(path) = global(m, "categories") {
            store = store.with_categories(path);
        }
        let command = match m.subcommand() {
            ("add", Some(sub)) => Command::Add {
                category: sub.value_of("category").unwrap_or_default().to_string(),
                item: sub.value_of("item").unwrap_or_default().to_string(),
                quantity: number(sub, "quantity", reports)
                    .and_then(|n| u32::try_from(n).ok().or_else(|| {
                        reports.make("Quantity too large").text(n);
                        None
                    }))?,
                price: number(sub, "price", reports).map(Amount)?,
                date: match sub.value_of("date") {
                    Some(s) => s
                        .parse::<Date>()
                        .map_err(|e| {
                            reports.date("--date", s, &e);
                        })
                        .ok()?,
                    None => Date::today()
                        .map_err(|e| {
                            reports.date("today", "", &e);
                        })
                        .ok()?,
                },
            },
            ("view", Some(sub)) => Command::View {
                category: sub.value_of("category").map(str::to_string),
            },
            ("category", Some(sub)) => match sub.subcommand() {
                ("add", Some(sub)) => Command::CategoryAdd {
                    name: sub.value_of("name").unwrap_or_default().to_string(),
                    example: sub.value_of("example").unwrap_or_default().to_string(),
                },
                ("remove", Some(sub)) => Command::CategoryRemove {
                    name: sub.value_of("name").unwrap_or_default().to_string(),
                },
                _ => Command::CategoryList,
            },
            ("monthly", Some(sub)) => Command::Monthly {
                month: match sub.value_of("month") {
                    Some(s) => Some(
                        s.parse::<YearMonth>()
                            .map_err(|e| {
                                reports.date("month", s, &e);
                            })
                            .ok()?,
                    ),
                    None => None,
                },
            },
            ("analyze", Some(sub)) => Command::Analyze {
                output: PathBuf::from(sub.value_of("output").unwrap_or("monthly.svg")),
            },
            (other, _) => {
                reports.make("Unknown command").text(other);
                return None;
            }
        };
        Some(Self { store, command })
    }
}

/// Global options may be given before or after the subcommand
fn global<'m>(m: &'m ArgMatches, name: &str) -> Option<&'m str> {
    let mut found = m.value_of(name);
    let mut cur = m;
    while let (_, Some(sub)) = cur.subcommand() {
        found = sub.value_of(name).or(found);
        cur = sub;
    }
    found
}

/// Number of `-v` flags, wherever they were given
pub fn verbosity(m: &ArgMatches) -> u64 {
    let mut count = m.occurrences_of("verbose");
    let mut cur = m;
    while let (_, Some(sub)) = cur.subcommand() {
        count = count.max(sub.occurrences_of("verbose"));
        cur = sub;
    }
    count
}

fn number(m: &ArgMatches, arg: &str, reports: &mut Reports) -> Option<u64> {
    let value = m.value_of(arg).unwrap_or_default();
    let n = entry::coerce_integer(value);
    if n.is_none() {
        reports
            .make(format!("Invalid {}", arg))
            .text(format!("'{}' is not a nonnegative whole number", value))
            .hint(format!("--{} expects something like 3", arg));
    }
    n
}

#[cfg(test)]
mod test {
    use super::*;

    fn config(args: &[&str]) -> (Option<Config>, Reports) {
        let m = app().get_matches_from_safe(args.iter().copied()).unwrap();
        let mut reports = Reports::new();
        (Config::from_matches(&m, &mut reports), reports)
    }

    #[test]
    fn add_with_everything() {
        let (cfg, reports) = config(&[
            "kaimono", "-f", "data.csv", "add", "Stationery", "Pen", "-q", "10", "-p", "500", "-d", "2024-05-01",
        ]);
        assert!(reports.is_empty());
        let cfg = cfg.unwrap();
        assert_eq!(cfg.store, Store::new("data.csv"));
        assert_eq!(
            cfg.command,
            Command::Add {
                category: "Stationery".into(),
                item: "Pen".into(),
                quantity: 10,
                price: Amount(500),
                date: "2024-05-01".parse().unwrap(),
            }
        );
    }

    #[test]
    fn add_defaults() {
        let (cfg, _) = config(&["kaimono", "add", "Food", "Rice"]);
        match cfg.unwrap().command {
            Command::Add { quantity, price, date, .. } => {
                assert_eq!(quantity, 1);
                assert_eq!(price, Amount(0));
                assert_eq!(date, Date::today().unwrap());
            }
            other => panic!("expected add, got {:?}", other),
        }
    }

    #[test]
    fn bad_values_are_reported() {
        let (cfg, reports) = config(&["kaimono", "add", "Food", "Rice", "-p", "cheap"]);
        assert!(cfg.is_none());
        assert!(reports.is_fatal());
        let (cfg, reports) = config(&["kaimono", "add", "Food", "Rice", "-d", "2023-02-29"]);
        assert!(cfg.is_none());
        assert!(reports.to_string().contains("2023-02-28"));
        let (cfg, reports) = config(&["kaimono", "monthly", "May"]);
        assert!(cfg.is_none());
        assert!(reports.is_fatal());
    }

    #[test]
    fn files_and_verbosity() {
        let args = ["kaimono", "view", "-c", "Food", "--categories", "cats.csv", "-vv"];
        let m = app().get_matches_from_safe(args.iter().copied()).unwrap();
        assert_eq!(verbosity(&m), 2);
        let (cfg, _) = config(&args);
        let cfg = cfg.unwrap();
        assert_eq!(cfg.store.records_path(), std::path::Path::new(RECORDS_FILE));
        assert_eq!(cfg.store.categories_path(), std::path::Path::new("cats.csv"));
        assert_eq!(cfg.command, Command::View { category: Some("Food".into()) });
    }

    #[test]
    fn category_subcommands() {
        let (cfg, _) = config(&["kaimono", "category", "add", "Stationery", "例: ペン - 黒 - 10本"]);
        assert_eq!(
            cfg.unwrap().command,
            Command::CategoryAdd { name: "Stationery".into(), example: "例: ペン - 黒 - 10本".into() }
        );
        let (cfg, _) = config(&["kaimono", "category", "remove", "Stationery"]);
        assert_eq!(cfg.unwrap().command, Command::CategoryRemove { name: "Stationery".into() });
        let (cfg, _) = config(&["kaimono", "category", "list"]);
        assert_eq!(cfg.unwrap().command, Command::CategoryList);
    }

    #[test]
    fn monthly_and_analyze() {
        let (cfg, _) = config(&["kaimono", "monthly", "2024-May"]);
        assert_eq!(cfg.unwrap().command, Command::Monthly { month: Some("2024-05".parse().unwrap()) });
        let (cfg, _) = config(&["kaimono", "monthly"]);
        assert_eq!(cfg.unwrap().command, Command::Monthly { month: None });
        let (cfg, _) = config(&["kaimono", "analyze"]);
        assert_eq!(cfg.unwrap().command, Command::Analyze { output: PathBuf::from("monthly.svg") });
    }
}
