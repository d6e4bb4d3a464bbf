//! Monthly spending chart

use std::io;
use std::path::Path;

use svg::{
    node::element::{path::Data, Circle, Line, Path as SvgPath, Text},
    Document,
};

use crate::lib::{date::YearMonth, entry::Amount, summary::Calendar};

pub struct Plotter {
    data: Vec<(YearMonth, Amount)>,
}

impl Plotter {
    pub fn from(cal: &Calendar) -> Self {
        Self {
            data: cal.contents().map(|sum| (sum.month(), sum.total())).collect(),
        }
    }

    /// Write the chart to `file` as SVG
    pub fn render(&self, file: &Path) -> io::Result<()> {
        svg::save(file, &self.line_plot().to_document())
    }

    fn line_plot(&self) -> LineDrawer {
        LineDrawer {
            points: self
                .data
                .iter()
                .map(|(x, y)| ((x.to_scalar(), x.to_string()), (y.to_scalar(), y.to_string())))
                .collect::<Vec<_>>(),
        }
    }
}

pub trait Scalar {
    fn to_scalar(&self) -> i64;
}

impl Scalar for Amount {
    fn to_scalar(&self) -> i64 {
        i64::try_from(self.0).unwrap_or(i64::MAX)
    }
}

impl Scalar for YearMonth {
    fn to_scalar(&self) -> i64 {
        self.index()
    }
}

/// Points with their labels, x increasing
#[derive(Debug)]
struct LineDrawer {
    points: Vec<((i64, String), (i64, String))>,
}

impl LineDrawer {
    fn to_document(&self) -> Document {
        let fheight: f32 = 600.0;
        let fwidth: f32 = 1000.0;
        let stroke_width: f32 = 2.0;
        let margin: f32 = 80.0;
        // y axis starts at zero, x axis spans the months present
        let xmin = self.points.iter().map(|((x, _), _)| *x).min().unwrap_or(0);
        let xmax = self.points.iter().map(|((x, _), _)| *x).max().unwrap_or(0);
        let ymax = self.points.iter().map(|(_, (y, _))| *y).max().unwrap_or(0).max(1);
        let width = xmax - xmin;
        let resize_x = |x: i64| {
            if width == 0 {
                fwidth / 2.0
            } else {
                (x - xmin) as f32 / width as f32 * fwidth
            }
        };
        let resize_y = |y: i64| (ymax - y) as f32 / ymax as f32 * fheight;

        let mut data = Data::new();
        for (i, ((x, _), (y, _))) in self.points.iter().enumerate() {
            let pt = (resize_x(*x), resize_y(*y));
            data = if i == 0 { data.move_to(pt) } else { data.line_to(pt) };
        }
        let line = SvgPath::new()
            .set("fill", "none")
            .set("stroke", "steelblue")
            .set("stroke-width", stroke_width)
            .set("d", data);
        let markers = self.points.iter().map(|((x, _), (y, _))| {
            Circle::new()
                .set("cx", resize_x(*x))
                .set("cy", resize_y(*y))
                .set("r", 5.0)
                .set("fill", "steelblue")
        });
        let xlabels = self.points.iter().map(|((x, month), _)| {
            label(month, resize_x(*x), fheight + 25.0, "middle")
        });
        let yaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", 0.0)
            .set("y1", 0.0)
            .set("y2", fheight)
            .set("stroke", "black")
            .set("stroke-width", stroke_width);
        let xaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", fwidth)
            .set("y1", fheight)
            .set("y2", fheight)
            .set("stroke", "black")
            .set("stroke-width", stroke_width);
        // ymax is at least 1, the label shows the real highest total
        let top = self
            .points
            .iter()
            .max_by_key(|(_, (y, _))| *y)
            .map(|(_, (_, text))| text.clone())
            .unwrap_or_default();

        let document = markers
            .fold(Document::new(), |doc, marker| doc.add(marker))
            .add(line);
        xlabels
            .fold(document, |doc, text| doc.add(text))
            .add(label(&top, -10.0, resize_y(ymax) + 5.0, "end"))
            .add(label("0", -10.0, fheight + 5.0, "end"))
            .add(label("Total price per month", fwidth / 2.0, -30.0, "middle"))
            .add(yaxis)
            .add(xaxis)
            .set("viewBox", (-margin, -margin, fwidth + 2.0 * margin, fheight + 2.0 * margin))
    }
}

fn label(text: &str, x: f32, y: f32, anchor: &str) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("text-anchor", anchor)
        .set("font-family", "sans-serif")
        .set("font-size", 14)
        .add(svg::node::Text::new(text))
}
