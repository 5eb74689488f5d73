// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text email drafting.
//!
//! Builds the monthly announcement mail: subject line, greeting, a
//! separator-framed title, one block per employee covering the month in
//! seven-day runs, and a closing footer.

use serde::{Deserialize, Serialize};
use shift_grid::GridSnapshot;
use shift_grid_domain::EmployeeId;
use time::Date;
use tracing::debug;

use crate::day_label;

/// Separator line framing the body title and footer.
const SEPARATOR: &str = "-------------------------------------";

/// A ready-to-send mail: subject plus plain-text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDraft {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Composes the monthly shift announcement from a snapshot.
#[must_use]
pub fn compose_email(snapshot: &GridSnapshot) -> EmailDraft {
    let month = snapshot.month();
    let title = format!("{}年{}月", month.year(), u8::from(month.month()));
    debug!("Composing announcement mail for {month}");

    let mut body = String::new();
    body.push_str("皆様\n\n");
    body.push_str(&format!(
        "{title}のシフト表をお送りします。\nご確認ください。\n\n"
    ));
    body.push_str(SEPARATOR);
    body.push('\n');
    body.push_str(&format!("{title} シフト表\n"));
    body.push_str(SEPARATOR);
    body.push_str("\n\n");

    if snapshot.employees().is_empty() {
        body.push_str("※ 表示する従業員が選択されていません\n\n");
    }
    for employee in snapshot.employees() {
        body.push_str(&format!("■ {}\n", employee.display_name()));
        for week in snapshot.days().chunks(7) {
            body.push_str(&week_line(snapshot, employee.id, week));
        }
        body.push('\n');
    }

    body.push_str(SEPARATOR);
    body.push('\n');
    body.push_str("ご不明点があればご連絡ください。\n\n");

    EmailDraft {
        subject: format!("{title}のシフト表"),
        body,
    }
}

/// One body line covering up to seven days of a single employee's month.
fn week_line(snapshot: &GridSnapshot, employee: EmployeeId, week: &[Date]) -> String {
    let (Some(first), Some(last)) = (week.first(), week.last()) else {
        return String::new();
    };
    let entries: Vec<String> = week
        .iter()
        .map(|day| format!("{}{}", day_label(*day), snapshot.shift_at(employee, *day)))
        .collect();
    format!(
        "{}〜{}: {}\n",
        short_date(*first),
        short_date(*last),
        entries.join(" ")
    )
}

/// `M/d` with no zero padding, as the mail body prints dates.
fn short_date(date: Date) -> String {
    format!("{}/{}", u8::from(date.month()), date.day())
}
