//! Daily traffic report: grouping by (ruas, gerbang, gardu, tanggal) and the
//! subtotal/grand-total table built on top of it.

use crate::models::{Gerbang, Lalin, PaymentMethod, VEHICLE_CLASSES};
use crate::validation::parse_date_prefix;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Gate names by (branch id, gate id), branch names by branch id.
#[derive(Debug, Default, Clone)]
pub struct GateDirectory {
    gates: HashMap<(i64, i64), (String, String)>,
    branches: HashMap<i64, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateLabel {
    pub ruas: String,
    pub gerbang: String,
    pub known: bool,
}

impl GateDirectory {
    pub fn new(gates: &[Gerbang]) -> Self {
        let mut directory = Self::default();
        for gate in gates {
            directory.gates.insert(
                (gate.branch_id, gate.id),
                (gate.branch_name.clone(), gate.gate_name.clone()),
            );
            directory
                .branches
                .entry(gate.branch_id)
                .or_insert_with(|| gate.branch_name.clone());
        }
        directory
    }

    /// Unknown gates keep their traffic under placeholder names.
    pub fn resolve(&self, branch_id: i64, gate_id: i64) -> GateLabel {
        if let Some((ruas, gerbang)) = self.gates.get(&(branch_id, gate_id)) {
            return GateLabel {
                ruas: ruas.clone(),
                gerbang: gerbang.clone(),
                known: true,
            };
        }
        GateLabel {
            ruas: self.branch_name(branch_id),
            gerbang: format!("Gerbang {gate_id}"),
            known: false,
        }
    }

    pub fn branch_name(&self, branch_id: i64) -> String {
        self.branches
            .get(&branch_id)
            .cloned()
            .unwrap_or_else(|| format!("Ruas {branch_id}"))
    }
}

/// Totals of one vehicle class inside a report row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTotals {
    #[serde(rename = "Tunai")]
    pub cash: u64,
    #[serde(rename = "KTP")]
    pub official_pass: u64,
    #[serde(rename = "Flo")]
    pub flo: u64,
    #[serde(rename = "EToll")]
    pub e_toll: u64,
    #[serde(rename = "Keseluruhan")]
    pub overall: u64,
    #[serde(rename = "ETF")]
    pub etf: u64,
}

impl ClassTotals {
    pub fn add(&mut self, lalin: &Lalin) {
        self.cash = self.cash.saturating_add(lalin.cash);
        self.official_pass = self.official_pass.saturating_add(lalin.official_pass());
        self.flo = self.flo.saturating_add(lalin.flo);
        self.e_toll = self.e_toll.saturating_add(lalin.e_toll());
        self.overall = self
            .cash
            .saturating_add(self.official_pass)
            .saturating_add(self.flo)
            .saturating_add(self.e_toll);
        self.etf = self
            .e_toll
            .saturating_add(self.cash)
            .saturating_add(self.flo);
    }

    pub fn value(&self, method: PaymentMethod) -> u64 {
        match method {
            PaymentMethod::Tunai => self.cash,
            PaymentMethod::EToll => self.e_toll,
            PaymentMethod::Flo => self.flo,
            PaymentMethod::Ktp => self.official_pass,
            PaymentMethod::Keseluruhan => self.overall,
            PaymentMethod::Etf => self.etf,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Ruas")]
    pub ruas: String,
    #[serde(rename = "Gerbang")]
    pub gerbang: String,
    #[serde(rename = "Gardu")]
    pub gardu: i64,
    #[serde(rename = "Tanggal")]
    pub tanggal: String,
    #[serde(rename = "Hari")]
    pub hari: String,
    /// Index 0 is golongan I.
    #[serde(rename = "Gol")]
    pub classes: [ClassTotals; VEHICLE_CLASSES],
}

impl ReportRow {
    pub fn values(&self, method: PaymentMethod) -> ClassValues {
        let mut values = ClassValues::default();
        for (slot, totals) in values.per_class.iter_mut().zip(self.classes.iter()) {
            *slot = totals.value(method);
        }
        values.total = values.per_class.iter().sum();
        values
    }

    pub fn matches(&self, search: &str) -> bool {
        let needle = search.to_lowercase();
        self.ruas.to_lowercase().contains(&needle) || self.gerbang.to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    branch_id: i64,
    gate_id: i64,
    lane_id: i64,
    date: String,
}

/// Groups traffic records into one row per (branch, gate, lane, date),
/// in order of first appearance.
pub fn aggregate(records: &[Lalin], directory: &GateDirectory) -> Vec<ReportRow> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut rows: Vec<ReportRow> = Vec::new();
    let mut placeholders = 0usize;

    for record in records {
        let Some(slot) = class_slot(record.class) else {
            warn!(
                class = record.class,
                gate = record.gate_id,
                "skipping traffic record with unknown vehicle class"
            );
            continue;
        };

        let date = date_key(&record.date);
        let key = GroupKey {
            branch_id: record.branch_id,
            gate_id: record.gate_id,
            lane_id: record.lane_id,
            date: date.clone(),
        };

        let position = *index.entry(key).or_insert_with(|| {
            let label = directory.resolve(record.branch_id, record.gate_id);
            if !label.known {
                placeholders += 1;
            }
            rows.push(ReportRow {
                ruas: label.ruas,
                gerbang: label.gerbang,
                gardu: record.lane_id,
                hari: day_name(&date),
                tanggal: date,
                classes: Default::default(),
            });
            rows.len() - 1
        });

        rows[position].classes[slot].add(record);
    }

    if placeholders > 0 {
        debug!(placeholders, "report rows rendered with placeholder gate names");
    }
    rows
}

fn class_slot(class: i64) -> Option<usize> {
    usize::try_from(class)
        .ok()
        .filter(|class| (1..=VEHICLE_CLASSES).contains(class))
        .map(|class| class - 1)
}

fn date_key(raw: &str) -> String {
    match parse_date_prefix(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => raw.trim().to_string(),
    }
}

pub fn day_name(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(date) => indonesian_weekday(date.weekday()).to_string(),
        Err(_) => "-".to_string(),
    }
}

fn indonesian_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

/// Per-class values for one payment method plus their sum ("Total Lalin").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassValues {
    pub per_class: [u64; VEHICLE_CLASSES],
    pub total: u64,
}

impl ClassValues {
    fn accumulate(&mut self, other: &ClassValues) {
        for (slot, value) in self.per_class.iter_mut().zip(other.per_class.iter()) {
            *slot = slot.saturating_add(*value);
        }
        self.total = self.total.saturating_add(other.total);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TableRow {
    Data {
        no: usize,
        ruas: String,
        gerbang: String,
        gardu: i64,
        hari: String,
        tanggal: String,
        metode: &'static str,
        values: ClassValues,
    },
    Subtotal {
        ruas: String,
        values: ClassValues,
    },
    #[serde(rename = "grandtotal")]
    GrandTotal { values: ClassValues },
}

impl TableRow {
    pub fn label(&self) -> String {
        match self {
            TableRow::Data { no, .. } => no.to_string(),
            TableRow::Subtotal { ruas, .. } => format!("Total Lalin {ruas}"),
            TableRow::GrandTotal { .. } => "Total Lalin Keseluruhan".to_string(),
        }
    }

    pub fn values(&self) -> &ClassValues {
        match self {
            TableRow::Data { values, .. }
            | TableRow::Subtotal { values, .. }
            | TableRow::GrandTotal { values } => values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    pub method: PaymentMethod,
    pub method_name: &'static str,
    pub tab_name: &'static str,
    pub rows: Vec<TableRow>,
}

impl ReportTable {
    pub fn grand_total(&self) -> Option<&ClassValues> {
        self.rows.iter().find_map(|row| match row {
            TableRow::GrandTotal { values } => Some(values),
            _ => None,
        })
    }
}

/// Case-insensitive name order, byte order as tie-breaker.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Data rows sorted by ruas, then one subtotal per ruas, then the grand total.
/// An empty input produces an empty table.
pub fn build_table(rows: &[ReportRow], method: PaymentMethod) -> ReportTable {
    let mut sorted: Vec<&ReportRow> = rows.iter().collect();
    sorted.sort_by(|a, b| compare_names(&a.ruas, &b.ruas));

    let mut table_rows = Vec::with_capacity(sorted.len() * 2 + 1);
    let mut subtotals: Vec<(String, ClassValues)> = Vec::new();
    let mut grand_total = ClassValues::default();

    for (position, row) in sorted.iter().enumerate() {
        let values = row.values(method);

        match subtotals.last_mut() {
            Some((ruas, subtotal)) if *ruas == row.ruas => subtotal.accumulate(&values),
            _ => subtotals.push((row.ruas.clone(), values)),
        }
        grand_total.accumulate(&values);

        table_rows.push(TableRow::Data {
            no: position + 1,
            ruas: row.ruas.clone(),
            gerbang: row.gerbang.clone(),
            gardu: row.gardu,
            hari: row.hari.clone(),
            tanggal: row.tanggal.clone(),
            metode: method.display_name(),
            values,
        });
    }

    if !sorted.is_empty() {
        table_rows.extend(
            subtotals
                .into_iter()
                .map(|(ruas, values)| TableRow::Subtotal { ruas, values }),
        );
        table_rows.push(TableRow::GrandTotal {
            values: grand_total,
        });
    }

    ReportTable {
        method,
        method_name: method.display_name(),
        tab_name: method.tab_name(),
        rows: table_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(id: i64, branch_id: i64, gate_name: &str, branch_name: &str) -> Gerbang {
        Gerbang {
            id,
            branch_id,
            gate_name: gate_name.into(),
            branch_name: branch_name.into(),
        }
    }

    fn lalin(branch_id: i64, gate_id: i64, lane_id: i64, class: i64) -> Lalin {
        Lalin {
            date: "2023-11-01".into(),
            branch_id,
            gate_id,
            lane_id,
            class,
            ..Default::default()
        }
    }

    fn directory() -> GateDirectory {
        GateDirectory::new(&[
            gate(1, 16, "Cikunir 1", "Jakarta Outer Ring Road"),
            gate(2, 16, "Cikunir 2", "Jakarta Outer Ring Road"),
            gate(1, 12, "Bekasi Barat", "Cipularang"),
        ])
    }

    #[test]
    fn single_record_totals() {
        let mut record = lalin(16, 1, 1, 1);
        record.cash = 10;
        record.official_operational = 5;
        record.e_bca = 20;

        let rows = aggregate(&[record], &directory());
        assert_eq!(rows.len(), 1);
        let totals = rows[0].classes[0];
        assert_eq!(totals.overall, 35);
        assert_eq!(totals.etf, 30);
        assert_eq!(rows[0].hari, "Rabu");
        assert_eq!(rows[0].ruas, "Jakarta Outer Ring Road");
        assert_eq!(rows[0].gerbang, "Cikunir 1");
    }

    #[test]
    fn identical_keys_merge_into_one_row() {
        let mut first = lalin(16, 1, 3, 1);
        first.cash = 4;
        let mut second = lalin(16, 1, 3, 1);
        second.date = "2023-11-01T00:00:00.000Z".into();
        second.cash = 6;
        second.flo = 2;
        let mut other_class = lalin(16, 1, 3, 2);
        other_class.e_mandiri = 9;

        let rows = aggregate(&[first, second, other_class], &directory());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tanggal, "2023-11-01");
        assert_eq!(rows[0].classes[0].cash, 10);
        assert_eq!(rows[0].classes[0].overall, 12);
        assert_eq!(rows[0].classes[0].etf, 12);
        assert_eq!(rows[0].classes[1].e_toll, 9);
    }

    #[test]
    fn overall_totals_match_flat_sum() {
        let mut records = Vec::new();
        for i in 0..40u64 {
            let mut record = lalin(16 - (i % 2) as i64 * 4, (i % 3) as i64 + 1, (i % 4) as i64, (i % 5) as i64 + 1);
            record.cash = i;
            record.official_partner = i % 7;
            record.official_employee = 1;
            record.flo = i % 3;
            record.e_bri = i * 2;
            record.e_nobu = i % 5;
            records.push(record);
        }

        let flat: u64 = records.iter().map(Lalin::overall).sum();
        let rows = aggregate(&records, &directory());
        let grouped: u64 = rows
            .iter()
            .flat_map(|row| row.classes.iter())
            .map(|totals| totals.overall)
            .sum();
        assert_eq!(grouped, flat);

        let table = build_table(&rows, PaymentMethod::Keseluruhan);
        assert_eq!(table.grand_total().map(|values| values.total), Some(flat));
    }

    #[test]
    fn unknown_gates_use_placeholders() {
        let mut known_branch = lalin(16, 99, 1, 1);
        known_branch.cash = 3;
        let mut unknown_branch = lalin(77, 5, 1, 1);
        unknown_branch.cash = 2;

        let rows = aggregate(&[known_branch, unknown_branch], &directory());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ruas, "Jakarta Outer Ring Road");
        assert_eq!(rows[0].gerbang, "Gerbang 99");
        assert_eq!(rows[1].ruas, "Ruas 77");
        assert_eq!(rows[1].gerbang, "Gerbang 5");
    }

    #[test]
    fn records_outside_vehicle_classes_are_skipped() {
        let mut records = vec![lalin(16, 1, 1, 6), lalin(16, 1, 1, 0), lalin(16, 1, 1, -2)];
        for record in &mut records {
            record.cash = 50;
        }
        assert!(aggregate(&records, &directory()).is_empty());
    }

    #[test]
    fn table_orders_rows_subtotals_and_grand_total() {
        let mut jorr = lalin(16, 2, 1, 1);
        jorr.cash = 5;
        let mut cipularang = lalin(12, 1, 1, 2);
        cipularang.cash = 7;
        let mut jorr_other_lane = lalin(16, 1, 2, 1);
        jorr_other_lane.cash = 1;

        let rows = aggregate(&[jorr, cipularang, jorr_other_lane], &directory());
        let table = build_table(&rows, PaymentMethod::Tunai);

        let labels: Vec<String> = table.rows.iter().map(TableRow::label).collect();
        assert_eq!(
            labels,
            vec![
                "1",
                "2",
                "3",
                "Total Lalin Cipularang",
                "Total Lalin Jakarta Outer Ring Road",
                "Total Lalin Keseluruhan",
            ]
        );

        match &table.rows[3] {
            TableRow::Subtotal { values, .. } => {
                assert_eq!(values.per_class, [0, 7, 0, 0, 0]);
                assert_eq!(values.total, 7);
            }
            other => panic!("expected subtotal, got {other:?}"),
        }
        match &table.rows[4] {
            TableRow::Subtotal { values, .. } => assert_eq!(values.total, 6),
            other => panic!("expected subtotal, got {other:?}"),
        }
        assert_eq!(table.grand_total().map(|values| values.total), Some(13));
        assert_eq!(table.method_name, "Tunai");
    }

    #[test]
    fn empty_table_has_no_totals() {
        let table = build_table(&[], PaymentMethod::Etf);
        assert!(table.rows.is_empty());
        assert!(table.grand_total().is_none());
    }

    #[test]
    fn search_matches_ruas_or_gerbang() {
        let rows = aggregate(&[lalin(16, 1, 1, 1)], &directory());
        assert!(rows[0].matches("cikunir"));
        assert!(rows[0].matches("OUTER"));
        assert!(!rows[0].matches("cipularang"));
    }

    #[test]
    fn day_names() {
        assert_eq!(day_name("2023-11-05"), "Minggu");
        assert_eq!(day_name("garbage"), "-");
    }
}
