use std::fmt;

use crate::lib::{
    entry::{Amount, Record},
    summary::Calendar,
};

/// Box-drawn table, one labeled line per item
pub struct Table {
    title: Option<String>,
    grid: GridFmt,
}

struct BoxFmt {
    width: usize,
    text: String,
}

struct ColFmt {
    width: usize,
    right: bool,
    label: BoxFmt,
    boxes: Vec<BoxFmt>,
}

struct GridFmt {
    labels: ColFmt,
    columns: Vec<ColFmt>,
}

impl Table {
    /// Empty table with the given column titles
    ///
    /// Columns whose title is in `right` are right-aligned.
    pub fn new(corner: &str, titles: &[&str], right: &[&str]) -> Self {
        let columns = titles
            .iter()
            .map(|t| ColFmt::with_label(BoxFmt::from(t.to_string()), right.contains(t)))
            .collect::<Vec<_>>();
        Self {
            title: None,
            grid: GridFmt::with_columns(BoxFmt::from(corner.to_string()), columns),
        }
    }

    pub fn with_title<S: ToString>(mut self, title: S) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn push_line(&mut self, label: String, cells: Vec<String>) {
        self.grid.push_line(
            BoxFmt::from(label),
            cells.into_iter().map(BoxFmt::from).collect::<Vec<_>>(),
        );
    }

    pub fn len(&self) -> usize {
        self.grid.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One line per record, numbered from 1
    pub fn records<'r, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'r Record>,
    {
        let mut table = Table::new(
            "#",
            &["Category", "Item Name", "Quantity", "Price", "Purchase Date"],
            &["Quantity", "Price"],
        );
        let mut total = Amount::default();
        for (i, rec) in records.into_iter().enumerate() {
            total += rec.price;
            table.push_line(
                (i + 1).to_string(),
                vec![
                    rec.category.clone(),
                    rec.item_name.clone(),
                    rec.quantity.to_string(),
                    rec.price.to_string(),
                    rec.purchase_date.to_string(),
                ],
            );
        }
        if !table.is_empty() {
            table.push_line(
                "Total".to_string(),
                vec![String::new(), String::new(), String::new(), total.to_string(), String::new()],
            );
        }
        table
    }

    /// One line per month with its item count and spending
    pub fn months(cal: &Calendar) -> Self {
        let mut table = Table::new("Month", &["Items", "Total Price"], &["Items", "Total Price"]);
        for sum in cal.contents() {
            table.push_line(
                sum.month().to_string(),
                vec![sum.len().to_string(), sum.total().to_string()],
            );
        }
        if !cal.is_empty() {
            table.push_line("Total".to_string(), vec![String::new(), cal.total().to_string()]);
        }
        table
    }
}

impl BoxFmt {
    fn from(text: String) -> Self {
        // wide glyphs (kana, kanji) take two terminal cells
        let width = text.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum();
        Self { text, width }
    }
}

fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
    )
}

impl ColFmt {
    fn with_label(label: BoxFmt, right: bool) -> Self {
        Self {
            width: label.width,
            right,
            label,
            boxes: Vec::new(),
        }
    }

    fn push(&mut self, b: BoxFmt) {
        self.width = self.width.max(b.width);
        self.boxes.push(b);
    }
}

impl GridFmt {
    fn with_columns(corner: BoxFmt, columns: Vec<ColFmt>) -> Self {
        Self {
            labels: ColFmt::with_label(corner, false),
            columns,
        }
    }

    fn push_line(&mut self, label: BoxFmt, boxes: Vec<BoxFmt>) {
        self.labels.push(label);
        for (i, b) in boxes.into_iter().enumerate() {
            self.columns[i].push(b);
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(title) = &self.title {
            writeln!(f, " {}", title)?;
        }
        write!(f, "{}", self.grid)
    }
}

impl fmt::Display for GridFmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // upper border
        write!(f, "{}", ULCORNER)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", LOJOIN)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", URCORNER)?;
        // title line
        write!(f, "{}", VLINE)?;
        self.labels.write_label(f)?;
        for c in &self.columns {
            write!(f, "{}", VLINE)?;
            c.write_label(f)?;
        }
        writeln!(f, "{}", VLINE)?;
        // separator
        write!(f, "{}", RTJOIN)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", CROSS)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", LTJOIN)?;

        // main block
        for idx in 0..self.labels.len() {
            write!(f, "{}", VLINE)?;
            self.labels.write_item(f, idx)?;
            for c in &self.columns {
                write!(f, "{}", VLINE)?;
                c.write_item(f, idx)?;
            }
            writeln!(f, "{}", VLINE)?;
        }
        // lower border
        write!(f, "{}", DLCORNER)?;
        self.labels.hline(f)?;
        for c in &self.columns {
            write!(f, "{}", HIJOIN)?;
            c.hline(f)?;
        }
        writeln!(f, "{}", DRCORNER)?;
        Ok(())
    }
}

impl ColFmt {
    fn write_label(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.label.write(f, self.width, self.right)
    }

    fn write_item(&self, f: &mut fmt::Formatter, idx: usize) -> fmt::Result {
        match self.boxes.get(idx) {
            Some(b) => b.write(f, self.width, self.right),
            None => BoxFmt::from(String::new()).write(f, self.width, self.right),
        }
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }

    fn hline(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", HLINE.repeat(self.width + 2))
    }
}

const HLINE: &str = "─";
const VLINE: &str = "│";
const ULCORNER: &str = "┌";
const URCORNER: &str = "┐";
const DLCORNER: &str = "└";
const DRCORNER: &str = "┘";
const LTJOIN: &str = "┤";
const RTJOIN: &str = "├";
const HIJOIN: &str = "┴";
const LOJOIN: &str = "┬";
const CROSS: &str = "┼";
impl BoxFmt {
    fn write(&self, f: &mut fmt::Formatter, width: usize, right: bool) -> fmt::Result {
        let padding = " ".repeat(width.saturating_sub(self.width));
        if right {
            write!(f, " {}{} ", padding, self.text)
        } else {
            write!(f, " {}{} ", self.text, padding)
        }
    }
}
