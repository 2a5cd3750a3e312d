//! Mock portfolio data shown on the dashboard.
//!
//! The numbers are fixed demo values. They are rendered two ways: as HTML
//! fragments substituted into the dashboard view, and as a JSON
//! [`DashboardPayload`] that `app.js` uses to animate the counters and draw
//! the canvas charts.

use serde::Serialize;

use crate::charts::{DonutChart, LineChart, Segment};
use crate::template::escape_html;

/// Default canvas size for the line chart when the client sends none.
pub const DEFAULT_CHART_WIDTH: f64 = 720.0;
pub const DEFAULT_CHART_HEIGHT: f64 = 280.0;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const PORTFOLIO: [f64; 12] = [
    1_800_000.0,
    1_920_000.0,
    1_850_000.0,
    2_050_000.0,
    2_180_000.0,
    2_100_000.0,
    2_250_000.0,
    2_380_000.0,
    2_310_000.0,
    2_520_000.0,
    2_680_000.0,
    2_847_563.0,
];

/// A headline number with an animated counter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Kpi {
    pub label: String,
    /// Whole dollars; the counter animates from zero to this.
    pub target: i64,
    /// Month-over-month change in percent.
    pub change_pct: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Transaction {
    pub name: String,
    pub category: String,
    /// Signed amount in cents; negative is money out.
    pub amount_cents: i64,
    pub date: String,
    pub emoji: String,
    /// CSS background for the icon bubble.
    pub background: String,
}

impl Transaction {
    pub fn is_credit(&self) -> bool {
        self.amount_cents >= 0
    }

    pub fn formatted_amount(&self) -> String {
        format_signed_amount(self.amount_cents)
    }
}

/// Monthly spend against budget for one category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpendingItem {
    pub label: String,
    pub value: i64,
    pub max: i64,
    pub color: String,
}

impl SpendingItem {
    /// Share of budget used, clamped to 0..=100.
    pub fn percent(&self) -> f64 {
        if self.max <= 0 {
            return 0.0;
        }
        (self.value as f64 / self.max as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Everything the dashboard shows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dashboard {
    pub kpis: Vec<Kpi>,
    pub months: Vec<String>,
    pub portfolio: Vec<f64>,
    pub allocation: Vec<Segment>,
    pub transactions: Vec<Transaction>,
    pub spending: Vec<SpendingItem>,
}

/// JSON body served to the browser.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardPayload {
    pub kpis: Vec<Kpi>,
    pub portfolio: LineChart,
    pub allocation: DonutChart,
    pub transactions: Vec<Transaction>,
    pub spending: Vec<SpendingItem>,
}

impl Dashboard {
    /// The fixed demo data set.
    pub fn demo() -> Self {
        let tx = |name: &str, category: &str, cents: i64, date: &str, emoji: &str, bg: &str| {
            Transaction {
                name: name.to_string(),
                category: category.to_string(),
                amount_cents: cents,
                date: date.to_string(),
                emoji: emoji.to_string(),
                background: bg.to_string(),
            }
        };
        let seg = |label: &str, value: f64, color: &str| Segment {
            label: label.to_string(),
            value,
            color: color.to_string(),
        };
        let spend = |label: &str, value: i64, max: i64, color: &str| SpendingItem {
            label: label.to_string(),
            value,
            max,
            color: color.to_string(),
        };
        let kpi = |label: &str, target: i64, change_pct: f64| Kpi {
            label: label.to_string(),
            target,
            change_pct,
        };

        let spending = vec![
            spend("Housing", 2100, 3000, "var(--green)"),
            spend("Food & Dining", 890, 1200, "var(--blue)"),
            spend("Transportation", 420, 800, "var(--violet)"),
            spend("Entertainment", 310, 500, "var(--amber)"),
        ];
        let monthly_spend: i64 = spending.iter().map(|s| s.value).sum();
        let net_worth = PORTFOLIO[PORTFOLIO.len() - 1];
        let gain = net_worth - PORTFOLIO[PORTFOLIO.len() - 2];

        Self {
            kpis: vec![
                kpi("Total Net Worth", net_worth as i64, 6.2),
                kpi("Monthly Income", 18_420, 4.1),
                kpi("Monthly Spending", monthly_spend, -2.3),
                kpi("Investment Gains", gain as i64, 12.8),
            ],
            months: MONTHS.iter().map(|m| (*m).to_string()).collect(),
            portfolio: PORTFOLIO.to_vec(),
            allocation: vec![
                seg("Stocks", 42.0, "#00d68f"),
                seg("Bonds", 20.0, "#3b82f6"),
                seg("Real Estate", 18.0, "#7b61ff"),
                seg("Crypto", 12.0, "#f59e0b"),
                seg("Cash", 8.0, "#22d3ee"),
            ],
            transactions: vec![
                tx("Apple Inc.", "Stock Purchase", -425_000, "Feb 11, 2026", "🍎", "var(--green-dim)"),
                tx("Salary Deposit", "Employment", 1_842_000, "Feb 10, 2026", "💰", "var(--blue-dim)"),
                tx("Netflix", "Subscription", -1_799, "Feb 9, 2026", "🎬", "var(--coral-dim)"),
                tx("Dividend — MSFT", "Investment Income", 34_580, "Feb 8, 2026", "📈", "var(--violet-dim)"),
                tx("Whole Foods", "Groceries", -18_742, "Feb 7, 2026", "🛒", "var(--amber-dim)"),
                tx("Tesla Bond Coupon", "Bond Interest", 62_500, "Feb 6, 2026", "⚡", "var(--green-dim)"),
                tx("Uber Rides", "Transportation", -4_250, "Feb 5, 2026", "🚗", "var(--coral-dim)"),
            ],
            spending,
        }
    }

    /// Chart geometry for a client canvas of `width` x `height`.
    pub fn payload(&self, width: f64, height: f64) -> DashboardPayload {
        let labels: Vec<&str> = self.months.iter().map(String::as_str).collect();
        DashboardPayload {
            kpis: self.kpis.clone(),
            portfolio: LineChart::layout(&self.portfolio, &labels, width, height),
            allocation: DonutChart::layout(&self.allocation),
            transactions: self.transactions.clone(),
            spending: self.spending.clone(),
        }
    }

    /// KPI cards; the counter starts at `$0` and `app.js` animates it.
    pub fn kpi_cards_html(&self) -> String {
        self.kpis
            .iter()
            .map(|k| {
                let trend = if k.change_pct >= 0.0 { "up" } else { "down" };
                format!(
                    concat!(
                        r#"<div class="kpi-card">"#,
                        r#"<span class="kpi-label">{label}</span>"#,
                        r#"<span class="kpi-value" data-target="{target}">$0</span>"#,
                        r#"<span class="kpi-change {trend}">{change:+.1}%</span>"#,
                        "</div>"
                    ),
                    label = escape_html(&k.label),
                    target = k.target,
                    trend = trend,
                    change = k.change_pct,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn transactions_html(&self) -> String {
        self.transactions
            .iter()
            .map(|tx| {
                let class = if tx.is_credit() { "positive" } else { "negative" };
                format!(
                    concat!(
                        r#"<div class="tx-row">"#,
                        r#"<div class="tx-icon-wrap" style="background:{bg}">{emoji}</div>"#,
                        r#"<div class="tx-details">"#,
                        r#"<span class="tx-name">{name}</span>"#,
                        r#"<span class="tx-category">{category}</span>"#,
                        "</div>",
                        r#"<div class="tx-right">"#,
                        r#"<span class="tx-amount {class}">{amount}</span>"#,
                        r#"<span class="tx-date">{date}</span>"#,
                        "</div></div>"
                    ),
                    bg = escape_html(&tx.background),
                    emoji = tx.emoji,
                    name = escape_html(&tx.name),
                    category = escape_html(&tx.category),
                    class = class,
                    amount = tx.formatted_amount(),
                    date = escape_html(&tx.date),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Bars start at zero width; `app.js` grows them to `data-width`.
    pub fn spending_html(&self) -> String {
        self.spending
            .iter()
            .map(|item| {
                format!(
                    concat!(
                        r#"<div class="spending-item">"#,
                        r#"<div class="spending-item-header">"#,
                        r#"<span class="spending-item-label">{label}</span>"#,
                        r#"<span class="spending-item-value">{value}</span>"#,
                        "</div>",
                        r#"<div class="spending-bar-track">"#,
                        r#"<div class="spending-bar-fill" style="background:{color}" data-width="{pct:.1}%"></div>"#,
                        "</div></div>"
                    ),
                    label = escape_html(&item.label),
                    value = format_usd_whole(item.value),
                    color = escape_html(&item.color),
                    pct = item.percent(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn donut_legend_html(&self) -> String {
        self.allocation
            .iter()
            .map(|seg| {
                format!(
                    r#"<div class="legend-item"><span class="legend-dot" style="background:{color}"></span>{label} ({value}%)</div>"#,
                    color = escape_html(&seg.color),
                    label = escape_html(&seg.label),
                    value = seg.value,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Group digits in threes: `2847563` becomes `"2,847,563"`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Whole dollars: `2847563` becomes `"$2,847,563"`, `-5` becomes `"-$5"`.
pub fn format_usd_whole(dollars: i64) -> String {
    let sign = if dollars < 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(dollars.unsigned_abs()))
}

/// Always-signed cents: `1842000` becomes `"+$18,420.00"`.
pub fn format_signed_amount(cents: i64) -> String {
    let sign = if cents >= 0 { '+' } else { '-' };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", group_thousands(abs / 100), abs % 100)
}
