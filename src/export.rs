use crate::report::{ReportTable, TableRow};
use chrono::NaiveDate;

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

pub const HEADERS: [&str; 13] = [
    "No.",
    "Ruas",
    "Gerbang",
    "Gardu",
    "Hari",
    "Tanggal",
    "Metode Pembayaran",
    "Gol I",
    "Gol II",
    "Gol III",
    "Gol IV",
    "Gol V",
    "Total Lalin",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

/// `Laporan_Lalin_2023_11_01.csv` for report date `2023-11-01`.
pub fn file_name(date: NaiveDate) -> String {
    format!("Laporan_Lalin_{}.csv", date.format("%Y_%m_%d"))
}

pub fn render_csv(table: &ReportTable) -> String {
    let mut out = String::new();
    push_line(&mut out, HEADERS.iter().map(|header| header.to_string()));

    for row in &table.rows {
        let mut cells = match row {
            TableRow::Data {
                no,
                ruas,
                gerbang,
                gardu,
                hari,
                tanggal,
                metode,
                ..
            } => vec![
                no.to_string(),
                ruas.clone(),
                gerbang.clone(),
                gardu.to_string(),
                hari.clone(),
                tanggal.clone(),
                metode.to_string(),
            ],
            TableRow::Subtotal { .. } | TableRow::GrandTotal { .. } => {
                let mut cells = vec![row.label()];
                cells.extend(std::iter::repeat_n(String::new(), 6));
                cells
            }
        };
        let values = row.values();
        cells.extend(values.per_class.iter().map(u64::to_string));
        cells.push(values.total.to_string());
        push_line(&mut out, cells.into_iter());
    }

    out
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>) {
    let line: Vec<String> = cells.map(|cell| escape_cell(&cell)).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

fn escape_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gerbang, Lalin, PaymentMethod};
    use crate::report::{aggregate, build_table, GateDirectory};

    #[test]
    fn csv_contains_rows_and_totals() {
        let directory = GateDirectory::new(&[Gerbang {
            id: 1,
            branch_id: 16,
            gate_name: "Cikunir, Timur".into(),
            branch_name: "JORR".into(),
        }]);
        let record = Lalin {
            date: "2023-11-01".into(),
            branch_id: 16,
            gate_id: 1,
            lane_id: 2,
            class: 3,
            cash: 8,
            ..Default::default()
        };
        let table = build_table(&aggregate(&[record], &directory), PaymentMethod::Tunai);
        let csv = render_csv(&table);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("No.,Ruas,Gerbang"));
        assert_eq!(lines[1], "1,JORR,\"Cikunir, Timur\",2,Rabu,2023-11-01,Tunai,0,0,8,0,0,8");
        assert_eq!(lines[2], "Total Lalin JORR,,,,,,,0,0,8,0,0,8");
        assert_eq!(lines[3], "Total Lalin Keseluruhan,,,,,,,0,0,8,0,0,8");
    }

    #[test]
    fn export_file_name_uses_underscores() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
        assert_eq!(file_name(date), "Laporan_Lalin_2023_11_01.csv");
    }
}
