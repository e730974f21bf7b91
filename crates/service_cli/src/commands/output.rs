//! Rendering of command results as tables, JSON or CSV.

use std::io::Write;

use pricer_risk::simulation::{SimulationSeries, SweepAxis};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// Plain-text table drawn with box characters.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table with the given column headers.
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Missing cells render blank, extra cells are dropped.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Writes the table to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let widths = self.widths();
        let rule = |left: &str, mid: &str, right: &str| -> String {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{left}{}{right}", segments.join(mid))
        };
        let line = |cells: &[String]| -> String {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    format!(" {cell:>w$} ")
                })
                .collect();
            format!("│{}│", padded.join("│"))
        };

        writeln!(out, "{}", rule("┌", "┬", "┐"))?;
        writeln!(out, "{}", line(&self.headers))?;
        writeln!(out, "{}", rule("├", "┼", "┤"))?;
        for row in &self.rows {
            writeln!(out, "{}", line(row))?;
        }
        writeln!(out, "{}", rule("└", "┴", "┘"))?;
        Ok(())
    }
}

/// Writes `value` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Writes one CSV record per item, with a header row from the field names.
pub fn write_csv<W, T, I>(out: &mut W, records: I) -> Result<()>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_writer(out);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a sweep series: the whole series as JSON, one CSV record per
/// point, or a table whose leading column follows the swept axis.
pub fn write_series<W: Write>(
    series: &SimulationSeries,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, series),
        OutputFormat::Csv => write_csv(out, series),
        OutputFormat::Table => {
            let mut table = match series.axis() {
                SweepAxis::Price => Table::new(&["Stock", "Move", "Option", "P&L $", "P&L %"]),
                SweepAxis::Time => Table::new(&["Days", "Stock", "Option", "P&L $", "P&L %"]),
            };
            for point in series {
                let lead = match series.axis() {
                    SweepAxis::Price => vec![
                        format!("{:.2}", point.stock_price),
                        percent(point.price_change_percent),
                    ],
                    SweepAxis::Time => vec![
                        format!("{}", point.days_to_expiry),
                        format!("{:.2}", point.stock_price),
                    ],
                };
                let mut row = lead;
                row.extend([
                    format!("{:.4}", point.option_price),
                    money(point.dollar_pnl),
                    percent(point.percent_pnl),
                ]);
                table.add_row(row);
            }
            table.write_to(out)
        }
    }
}

/// Signed dollar amount, e.g. `+41.80` or `-300.00`.
pub fn money(value: f64) -> String {
    format!("{value:+.2}")
}

/// Signed percentage, e.g. `+13.9%`.
pub fn percent(value: f64) -> String {
    format!("{value:+.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        price: f64,
        label: &'static str,
    }

    #[test]
    fn test_table_aligns_columns() {
        let mut table = Table::new(&["Price", "P&L $"]);
        table.add_row(vec!["100.00".to_string(), money(41.8)]);
        table.add_row(vec!["5.00".to_string(), money(-300.0)]);

        let mut buf = Vec::new();
        table.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with('┌'));
        assert!(lines[3].contains("+41.80"));
        assert!(lines[4].contains("  5.00"));
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_table_tolerates_short_rows() {
        let mut table = Table::new(&["a", "b"]);
        table.add_row(vec!["1".to_string()]);

        let mut buf = Vec::new();
        table.write_to(&mut buf).unwrap();
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_json_output() {
        let mut buf = Vec::new();
        write_json(&mut buf, &Row { price: 1.5, label: "x" }).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["price"], 1.5);
        assert_eq!(value["label"], "x");
    }

    #[test]
    fn test_csv_output() {
        let mut buf = Vec::new();
        let rows = [Row { price: 1.5, label: "x" }, Row { price: 2.0, label: "y" }];
        write_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "price,label\n1.5,x\n2.0,y\n");
    }

    #[test]
    fn test_series_csv_has_one_record_per_point() {
        use pricer_core::types::OptionType;
        use pricer_risk::simulation::{generate_time_decay_simulation, TimeDecayRequest};

        let request = TimeDecayRequest::new(100.0, 100.0, 3.0, 5, 0.25, OptionType::Call);
        let series = generate_time_decay_simulation(&request);

        let mut buf = Vec::new();
        write_series(&series, OutputFormat::Csv, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), series.len() + 1);
        assert!(text.starts_with("stock_price,days_to_expiry,option_price"));

        let mut buf = Vec::new();
        write_series(&series, OutputFormat::Table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), series.len() + 4);
        assert!(text.lines().nth(1).is_some_and(|l| l.contains("Days")));
    }

    #[test]
    fn test_signed_formatting() {
        assert_eq!(money(0.0), "+0.00");
        assert_eq!(money(-12.346), "-12.35");
        assert_eq!(percent(13.94), "+13.9%");
    }
}
