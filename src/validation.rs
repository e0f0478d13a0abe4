use chrono::{DateTime, Local, NaiveDate};

/// Trim and drop angle brackets from free-text input.
pub fn sanitize_string(input: &str) -> String {
    input.trim().replace(['<', '>'], "")
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn validate_required(value: &str, field: &str) -> Option<String> {
    value
        .trim()
        .is_empty()
        .then(|| format!("{field} tidak boleh kosong"))
}

pub fn validate_min_len(value: &str, field: &str, min: usize) -> Option<String> {
    let len = value.chars().count();
    (len > 0 && len < min).then(|| format!("{field} minimal {min} karakter"))
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, nothing else.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.date_naive())
    })
}

/// Upstream dates may carry any suffix after the day; only the first ten
/// characters are read. Not for user input.
pub fn parse_date_prefix(value: &str) -> Option<NaiveDate> {
    parse_date(value).or_else(|| {
        value
            .trim()
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    })
}

pub fn validate_date(value: &str) -> Vec<String> {
    validate_date_at(value, Local::now().date_naive())
}

pub fn validate_date_at(value: &str, today: NaiveDate) -> Vec<String> {
    check_date_at(value, today).err().unwrap_or_default()
}

/// The parsed date, or the validation messages for it.
pub fn check_date(value: &str) -> Result<NaiveDate, Vec<String>> {
    check_date_at(value, Local::now().date_naive())
}

pub fn check_date_at(value: &str, today: NaiveDate) -> Result<NaiveDate, Vec<String>> {
    if value.trim().is_empty() {
        return Err(vec!["Tanggal tidak boleh kosong".to_string()]);
    }
    match parse_date(value) {
        None => Err(vec!["Format tanggal tidak valid".to_string()]),
        Some(date) if date > today => Err(vec![
            "Tanggal tidak boleh lebih dari hari ini".to_string(),
        ]),
        Some(date) => Ok(date),
    }
}
