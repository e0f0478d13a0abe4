use crate::models::{PaymentMethod, User};
use crate::report::TableRow;
use crate::service::ReportPage;
use crate::stats::DashboardData;
use crate::validation::escape_html;
use std::collections::BTreeMap;

pub fn render_login() -> String {
    LOGIN_HTML.replace("{{STYLE}}", STYLE)
}

pub fn render_dashboard(user: &User, date: &str, data: &DashboardData) -> String {
    let total: u64 = data.by_ruas.values().sum();
    let shifts: BTreeMap<String, u64> = data
        .by_shift
        .iter()
        .map(|(shift, amount)| (format!("Shift {shift}"), *amount))
        .collect();

    // Escaped labels carry no `{{`; fixed markup is still substituted first.
    DASHBOARD_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{RECORDS}}", &data.total_records.to_string())
        .replace("{{TOTAL}}", &total.to_string())
        .replace("{{USER}}", &escape_html(&user.username))
        .replace("{{DATE}}", &escape_html(date))
        .replace("{{PAYMENT}}", &render_bars(&data.by_payment_method))
        .replace("{{SHIFT}}", &render_bars(&shifts))
        .replace("{{GERBANG}}", &render_bars(&data.by_gerbang))
        .replace("{{RUAS}}", &render_bars(&data.by_ruas))
}

fn render_bars(series: &BTreeMap<String, u64>) -> String {
    if series.is_empty() {
        return r#"<p class="empty">Tidak ada data</p>"#.to_string();
    }
    let max = series.values().copied().max().unwrap_or(0).max(1);
    series
        .iter()
        .map(|(label, amount)| {
            let width = amount.saturating_mul(100) / max;
            format!(
                r#"<div class="bar"><span class="label">{}</span><span class="track"><span class="fill" style="width: {width}%"></span></span><span class="value">{amount}</span></div>"#,
                escape_html(label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Printable daily report for one payment method.
pub fn render_report(page: &ReportPage, printed_at: &str) -> String {
    let date = page.tanggal.as_deref().unwrap_or("Semua tanggal");
    REPORT_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{DATE}}", &escape_html(date))
        .replace("{{PRINTED_AT}}", &escape_html(printed_at))
        .replace("{{METHOD}}", page.table.tab_name)
        .replace("{{TABS}}", &render_tabs(page))
        .replace("{{ROWS}}", &render_rows(&page.table.rows))
}

fn render_tabs(page: &ReportPage) -> String {
    let date = page.tanggal.as_deref().unwrap_or_default();
    PaymentMethod::ALL
        .iter()
        .map(|method| {
            let class = if *method == page.table.method { "tab active" } else { "tab" };
            format!(
                r#"<a class="{class}" href="/laporan?tanggal={}&method={}">{}</a>"#,
                escape_html(date),
                method.as_str(),
                method.tab_name()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_rows(rows: &[TableRow]) -> String {
    if rows.is_empty() {
        return r#"<tr><td colspan="13" class="empty">Tidak ada data</td></tr>"#.to_string();
    }

    rows.iter()
        .map(|row| {
            let values = row.values();
            let mut cells: String = values
                .per_class
                .iter()
                .map(|amount| format!("<td class=\"num\">{amount}</td>"))
                .collect();
            cells.push_str(&format!("<td class=\"num\">{}</td>", values.total));

            match row {
                TableRow::Data {
                    no,
                    ruas,
                    gerbang,
                    gardu,
                    hari,
                    tanggal,
                    metode,
                    ..
                } => format!(
                    "<tr><td>{no}</td><td>{}</td><td>{}</td><td>{gardu}</td><td>{}</td><td>{}</td><td>{metode}</td>{cells}</tr>",
                    escape_html(ruas),
                    escape_html(gerbang),
                    escape_html(hari),
                    escape_html(tanggal),
                ),
                TableRow::Subtotal { .. } => format!(
                    "<tr class=\"subtotal\"><td colspan=\"7\">{}</td>{cells}</tr>",
                    escape_html(&row.label())
                ),
                TableRow::GrandTotal { .. } => format!(
                    "<tr class=\"grandtotal\"><td colspan=\"7\">{}</td>{cells}</tr>",
                    escape_html(&row.label())
                ),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

const STYLE: &str = r#"
    :root {
      --bg: #f3f5f8;
      --ink: #1f2a37;
      --muted: #6b7280;
      --accent: #1d4ed8;
      --accent-soft: rgba(29, 78, 216, 0.12);
      --card: #ffffff;
      --line: rgba(31, 42, 55, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
      padding: 28px 18px 48px;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 22px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: baseline;
      gap: 8px;
    }

    h1 {
      margin: 0;
      font-size: 1.7rem;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.1rem;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 14px;
      padding: 18px;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 18px;
    }

    .stat .value {
      font-size: 1.8rem;
      font-weight: 600;
      color: var(--accent);
    }

    .bar {
      display: grid;
      grid-template-columns: 140px 1fr 80px;
      align-items: center;
      gap: 10px;
      margin-bottom: 6px;
      font-size: 0.9rem;
    }

    .track {
      background: var(--accent-soft);
      border-radius: 999px;
      height: 10px;
      overflow: hidden;
    }

    .fill {
      display: block;
      height: 100%;
      background: var(--accent);
    }

    .value,
    .num {
      text-align: right;
    }

    .empty {
      color: var(--muted);
      text-align: center;
    }

    .tabs {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
    }

    .tab {
      padding: 6px 12px;
      border-radius: 999px;
      color: var(--muted);
      text-decoration: none;
      border: 1px solid var(--line);
    }

    .tab.active {
      background: var(--accent);
      color: white;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.85rem;
    }

    th,
    td {
      border: 1px solid var(--line);
      padding: 6px 8px;
    }

    th {
      background: var(--accent-soft);
    }

    tr.subtotal td {
      font-weight: 600;
      background: #f8fafc;
    }

    tr.grandtotal td {
      font-weight: 700;
      background: #e2e8f0;
    }

    form {
      display: grid;
      gap: 12px;
      max-width: 360px;
    }

    input,
    button {
      font: inherit;
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid var(--line);
    }

    button {
      background: var(--accent);
      color: white;
      border: none;
      cursor: pointer;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    @media print {
      body {
        background: white;
        padding: 0;
      }

      .no-print {
        display: none;
      }
    }
"#;

const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="id">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Login - Dashboard Lalin</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Dashboard Lalu Lintas</h1>
      <p class="subtitle">Masuk untuk melihat laporan harian.</p>
    </header>
    <section class="card">
      <form id="login">
        <input name="username" placeholder="Username" autocomplete="username" />
        <input name="password" type="password" placeholder="Password" autocomplete="current-password" />
        <button type="submit">Login</button>
        <p class="status" id="status"></p>
      </form>
    </section>
  </main>
  <script>
    const form = document.getElementById('login');
    const statusEl = document.getElementById('status');

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      statusEl.textContent = '';
      const body = {
        username: form.username.value,
        password: form.password.value,
      };
      const res = await fetch('/api/auth/login', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(body),
      });
      if (res.ok) {
        window.location.reload();
        return;
      }
      const err = await res.json().catch(() => ({ message: 'Login gagal' }));
      statusEl.textContent = err.message;
      statusEl.dataset.type = 'error';
    });
  </script>
</body>
</html>
"#;

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="id">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Dashboard Lalin</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Dashboard Lalu Lintas</h1>
        <p class="subtitle">Tanggal {{DATE}}</p>
      </div>
      <div class="no-print">
        <span>{{USER}}</span>
        <a class="tab" href="/laporan?tanggal={{DATE}}">Laporan</a>
        <button type="button" id="logout">Logout</button>
      </div>
    </header>
    <section class="grid">
      <div class="card stat">
        <h2>Total Lalin</h2>
        <span class="value">{{TOTAL}}</span>
      </div>
      <div class="card stat">
        <h2>Jumlah Data</h2>
        <span class="value">{{RECORDS}}</span>
      </div>
    </section>
    <section class="grid">
      <div class="card">
        <h2>Metode Pembayaran</h2>
        {{PAYMENT}}
      </div>
      <div class="card">
        <h2>Shift</h2>
        {{SHIFT}}
      </div>
      <div class="card">
        <h2>Gerbang</h2>
        {{GERBANG}}
      </div>
      <div class="card">
        <h2>Ruas</h2>
        {{RUAS}}
      </div>
    </section>
  </main>
  <script>
    document.getElementById('logout').addEventListener('click', async () => {
      await fetch('/api/auth/logout', { method: 'POST' });
      window.location.reload();
    });
  </script>
</body>
</html>
"#;

const REPORT_HTML: &str = r#"<!DOCTYPE html>
<html lang="id">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Laporan Lalu Lintas Per Hari</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Laporan Lalu Lintas Per Hari</h1>
        <p class="subtitle">Tanggal: {{DATE}}</p>
        <p class="subtitle">Dicetak pada: {{PRINTED_AT}}</p>
      </div>
      <nav class="tabs no-print">
        {{TABS}}
      </nav>
    </header>
    <section class="card">
      <h2>{{METHOD}}</h2>
      <table>
        <thead>
          <tr>
            <th>No.</th>
            <th>Ruas</th>
            <th>Gerbang</th>
            <th>Gardu</th>
            <th>Hari</th>
            <th>Tanggal</th>
            <th>Metode Pembayaran</th>
            <th>Gol I</th>
            <th>Gol II</th>
            <th>Gol III</th>
            <th>Gol IV</th>
            <th>Gol V</th>
            <th>Total Lalin</th>
          </tr>
        </thead>
        <tbody>
          {{ROWS}}
        </tbody>
      </table>
    </section>
  </main>
</body>
</html>
"#;
