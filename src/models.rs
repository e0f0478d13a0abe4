use crate::errors::AppError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of vehicle classes (golongan I to V).
pub const VEHICLE_CLASSES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gerbang {
    pub id: i64,
    #[serde(rename = "IdCabang")]
    pub branch_id: i64,
    #[serde(rename = "NamaGerbang")]
    pub gate_name: String,
    #[serde(rename = "NamaCabang")]
    pub branch_name: String,
}

/// Input for creating a gate. The id is optional because the API may assign it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGerbang {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "IdCabang")]
    pub branch_id: i64,
    #[serde(rename = "NamaGerbang")]
    pub gate_name: String,
    #[serde(rename = "NamaCabang")]
    pub branch_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GerbangPatch {
    #[serde(rename = "IdCabang", default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
    #[serde(rename = "NamaGerbang", default, skip_serializing_if = "Option::is_none")]
    pub gate_name: Option<String>,
    #[serde(rename = "NamaCabang", default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
}

/// One traffic record as served by `GET /lalins`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lalin {
    #[serde(rename = "Tanggal")]
    pub date: String,
    #[serde(rename = "IdCabang")]
    pub branch_id: i64,
    #[serde(rename = "IdGerbang")]
    pub gate_id: i64,
    #[serde(rename = "IdGardu")]
    pub lane_id: i64,
    /// Golongan; values outside 1..=5 are skipped by the report.
    #[serde(rename = "Golongan", default, deserialize_with = "lenient_number")]
    pub class: i64,
    #[serde(rename = "Tunai", default, deserialize_with = "lenient_amount")]
    pub cash: u64,
    #[serde(rename = "DinasOpr", default, deserialize_with = "lenient_amount")]
    pub official_operational: u64,
    #[serde(rename = "DinasMitra", default, deserialize_with = "lenient_amount")]
    pub official_partner: u64,
    #[serde(rename = "DinasKary", default, deserialize_with = "lenient_amount")]
    pub official_employee: u64,
    #[serde(rename = "eFlo", default, deserialize_with = "lenient_amount")]
    pub flo: u64,
    #[serde(rename = "eMandiri", default, deserialize_with = "lenient_amount")]
    pub e_mandiri: u64,
    #[serde(rename = "eBri", default, deserialize_with = "lenient_amount")]
    pub e_bri: u64,
    #[serde(rename = "eBni", default, deserialize_with = "lenient_amount")]
    pub e_bni: u64,
    #[serde(rename = "eBca", default, deserialize_with = "lenient_amount")]
    pub e_bca: u64,
    #[serde(rename = "eNobu", default, deserialize_with = "lenient_amount")]
    pub e_nobu: u64,
    #[serde(rename = "eDKI", default, deserialize_with = "lenient_amount")]
    pub e_dki: u64,
    #[serde(rename = "eMega", default, deserialize_with = "lenient_amount")]
    pub e_mega: u64,
}

/// Amounts are not validated upstream: null, negative or non-numeric values
/// count as zero instead of failing the whole page.
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(number)) => number.as_u64().unwrap_or(0),
        Some(serde_json::Value::String(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(number)) => number.as_i64().unwrap_or(0),
        Some(serde_json::Value::String(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

impl Lalin {
    pub fn e_toll(&self) -> u64 {
        [
            self.e_mandiri,
            self.e_bri,
            self.e_bni,
            self.e_bca,
            self.e_nobu,
            self.e_dki,
            self.e_mega,
        ]
        .iter()
        .fold(0u64, |acc, value| acc.saturating_add(*value))
    }

    /// Official passes (KTP): operational, partner and employee.
    pub fn official_pass(&self) -> u64 {
        self.official_operational
            .saturating_add(self.official_partner)
            .saturating_add(self.official_employee)
    }

    pub fn overall(&self) -> u64 {
        self.cash
            .saturating_add(self.e_toll())
            .saturating_add(self.flo)
            .saturating_add(self.official_pass())
    }

    pub fn etf(&self) -> u64 {
        self.e_toll().saturating_add(self.cash).saturating_add(self.flo)
    }

}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Tunai,
    EToll,
    Flo,
    #[serde(rename = "KTP")]
    Ktp,
    Keseluruhan,
    #[serde(rename = "ETF")]
    Etf,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::Tunai,
        PaymentMethod::EToll,
        PaymentMethod::Flo,
        PaymentMethod::Ktp,
        PaymentMethod::Keseluruhan,
        PaymentMethod::Etf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Tunai => "Tunai",
            PaymentMethod::EToll => "EToll",
            PaymentMethod::Flo => "Flo",
            PaymentMethod::Ktp => "KTP",
            PaymentMethod::Keseluruhan => "Keseluruhan",
            PaymentMethod::Etf => "ETF",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Tunai => "Tunai",
            PaymentMethod::EToll => "E-Toll",
            PaymentMethod::Flo => "Flo",
            PaymentMethod::Ktp => "KTP",
            PaymentMethod::Keseluruhan => "Keseluruhan",
            PaymentMethod::Etf => "E-Toll+Tunai+Flo",
        }
    }

    pub fn tab_name(&self) -> &'static str {
        match self {
            PaymentMethod::Tunai => "Total Tunai",
            PaymentMethod::EToll => "Total E-Toll",
            PaymentMethod::Flo => "Total Flo",
            PaymentMethod::Ktp => "Total KTP",
            PaymentMethod::Keseluruhan => "Total Keseluruhan",
            PaymentMethod::Etf => "Total E-Toll+Tunai+Flo",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                AppError::validation(vec![format!("Invalid payment method: {}", value.trim())])
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Slice a locally held list as if it were served page by page.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Page<T> {
        let limit = self.limit as usize;
        let start = (self.page as usize - 1).saturating_mul(limit);
        let data = items.iter().skip(start).take(limit).cloned().collect();
        Page {
            data,
            total_pages: items.len().div_ceil(limit) as u32,
            current_page: self.page,
            total_records: items.len() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total_pages: u32,
    pub current_page: u32,
    pub total_records: u64,
}

/// Filters accepted by `GET /lalins`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LalinFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tanggal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub is_logged_in: i64,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub token: String,
    pub is_logged_in: bool,
}
