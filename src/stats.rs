use crate::models::Lalin;
use crate::report::GateDirectory;
use serde::Serialize;
use std::collections::BTreeMap;

/// Chart series for the dashboard page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardData {
    pub by_payment_method: BTreeMap<String, u64>,
    pub by_shift: BTreeMap<u8, u64>,
    pub by_gerbang: BTreeMap<String, u64>,
    pub by_ruas: BTreeMap<String, u64>,
    pub total_records: usize,
}

pub const PAYMENT_BUCKETS: [&str; 8] = ["BCA", "BRI", "BNI", "DKI", "Mandiri", "Mega", "Nobu", "Flo"];

pub fn build_dashboard(records: &[Lalin], directory: &GateDirectory) -> DashboardData {
    let mut data = DashboardData {
        by_payment_method: PAYMENT_BUCKETS
            .iter()
            .map(|name| (name.to_string(), 0))
            .collect(),
        total_records: records.len(),
        ..Default::default()
    };

    for record in records {
        let total = record.overall();

        for (bucket, amount) in [
            ("BCA", record.e_bca),
            ("BRI", record.e_bri),
            ("BNI", record.e_bni),
            ("DKI", record.e_dki),
            ("Mandiri", record.e_mandiri),
            ("Mega", record.e_mega),
            ("Nobu", record.e_nobu),
            ("Flo", record.flo),
        ] {
            add(&mut data.by_payment_method, bucket.to_string(), amount);
        }

        add(&mut data.by_shift, shift_of(record), total);

        let label = directory.resolve(record.branch_id, record.gate_id);
        add(&mut data.by_gerbang, label.gerbang, total);
        add(&mut data.by_ruas, label.ruas, total);
    }

    data
}

/// Shift derived from gate and lane ids: remainder 0, 1, 2 maps to shift 1, 2, 3.
pub fn shift_of(record: &Lalin) -> u8 {
    match (record.gate_id.rem_euclid(3) + record.lane_id.rem_euclid(3)) % 3 {
        0 => 1,
        1 => 2,
        _ => 3,
    }
}

fn add<K: Ord>(map: &mut BTreeMap<K, u64>, key: K, amount: u64) {
    let entry = map.entry(key).or_insert(0);
    *entry = entry.saturating_add(amount);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gerbang;

    fn record(gate_id: i64, lane_id: i64) -> Lalin {
        Lalin {
            date: "2023-11-01".into(),
            branch_id: 16,
            gate_id,
            lane_id,
            class: 1,
            cash: 10,
            e_bca: 2,
            e_nobu: 1,
            flo: 3,
            official_operational: 4,
            ..Default::default()
        }
    }

    #[test]
    fn dashboard_buckets_and_shifts() {
        let directory = GateDirectory::new(&[Gerbang {
            id: 1,
            branch_id: 16,
            gate_name: "Cikunir 1".into(),
            branch_name: "JORR".into(),
        }]);
        let records = vec![record(1, 2), record(1, 3), record(2, 2)];

        let data = build_dashboard(&records, &directory);
        assert_eq!(data.by_payment_method["BCA"], 6);
        assert_eq!(data.by_payment_method["Nobu"], 3);
        assert_eq!(data.by_payment_method["Flo"], 9);
        assert_eq!(data.by_payment_method["Mega"], 0);

        // (1+2)%3=0 -> 1, (1+3)%3=1 -> 2, (2+2)%3=1 -> 2
        assert_eq!(data.by_shift.get(&1), Some(&20));
        assert_eq!(data.by_shift.get(&2), Some(&40));
        assert_eq!(data.by_shift.get(&3), None);

        assert_eq!(data.by_gerbang["Cikunir 1"], 40);
        assert_eq!(data.by_gerbang["Gerbang 2"], 20);
        assert_eq!(data.by_ruas["JORR"], 60);
        assert_eq!(data.total_records, 3);
    }

    #[test]
    fn shift_handles_extreme_ids() {
        assert_eq!(shift_of(&record(i64::MAX, i64::MAX)), 3);
        assert_eq!(shift_of(&record(i64::MIN, 0)), 2);
        assert_eq!(shift_of(&record(1, 2)), 1);
    }

    #[test]
    fn empty_input_keeps_payment_buckets() {
        let data = build_dashboard(&[], &GateDirectory::default());
        assert_eq!(data.by_payment_method.len(), PAYMENT_BUCKETS.len());
        assert!(data.by_shift.is_empty());
    }
}
