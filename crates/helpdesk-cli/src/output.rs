//! Plain-text tables and JSON output.

use anyhow::Result;
use chrono::Utc;
use helpdesk_core::models::{
    Agent, Category, Customer, Department, EmailConfig, Notification, Role, SlaPolicy, Ticket,
    TicketComment, User,
};
use helpdesk_core::utils::{format_age, format_optional, format_timestamp, truncate};
use serde::Serialize;

/// Longest cell printed in a table column
const MAX_CELL_WIDTH: usize = 48;

/// How a record is shown as a table row.
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn list<T: Serialize + TableRow>(&self, items: &[T]) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(items)?);
        } else if items.is_empty() {
            println!("(none)");
        } else {
            let rows: Vec<Vec<String>> = items.iter().map(TableRow::cells).collect();
            print!("{}", render_table(T::HEADERS, &rows));
        }
        Ok(())
    }

    pub fn item<T: Serialize + TableRow>(&self, item: &T) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(item)?);
        } else {
            print!("{}", render_record(T::HEADERS, &item.cells()));
        }
        Ok(())
    }

    /// Status line; suppressed in JSON mode so stdout stays parseable
    pub fn message(&self, message: &str) {
        if !self.json {
            println!("{}", message);
        }
    }
}

/// Render rows under headers with space-padded columns
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| truncate(cell, MAX_CELL_WIDTH)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_line(&mut out, &header_cells, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

/// Render one record as `Header: value` lines
pub fn render_record(headers: &[&str], cells: &[String]) -> String {
    let width = headers.iter().map(|h| h.chars().count()).max().unwrap_or(0);
    headers
        .iter()
        .zip(cells)
        .map(|(header, cell)| format!("{:<width$}  {}\n", format!("{}:", header), cell, width = width + 1))
        .collect()
}

fn id_or_dash(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

impl TableRow for Ticket {
    const HEADERS: &'static [&'static str] =
        &["ID", "Subject", "Status", "Priority", "Agent", "Customer", "Created", "Due"];

    fn cells(&self) -> Vec<String> {
        let due = match self.due_at {
            Some(due) if self.is_overdue(Utc::now()) => format!("{} (overdue)", format_timestamp(&due)),
            Some(due) => format_timestamp(&due),
            None => "-".to_string(),
        };
        vec![
            self.id.to_string(),
            self.subject.clone(),
            self.status.to_string(),
            self.priority.to_string(),
            id_or_dash(self.agent_id),
            id_or_dash(self.customer_id),
            format_age(&self.created_at, Utc::now()),
            due,
        ]
    }
}

impl TableRow for TicketComment {
    const HEADERS: &'static [&'static str] = &["ID", "Author", "When", "Comment"];

    fn cells(&self) -> Vec<String> {
        let body = if self.internal {
            format!("[internal] {}", self.body)
        } else {
            self.body.clone()
        };
        vec![
            self.id.to_string(),
            format_optional(self.author_name.as_deref(), "-"),
            format_age(&self.created_at, Utc::now()),
            body,
        ]
    }
}

impl TableRow for Agent {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Email", "Phone", "Department", "Active"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            format_optional(self.phone.as_deref(), "-"),
            id_or_dash(self.department_id),
            yes_no(self.active),
        ]
    }
}

impl TableRow for Customer {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Email", "Phone"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.display_name(),
            self.email.clone(),
            format_optional(self.phone.as_deref(), "-"),
        ]
    }
}

impl TableRow for Department {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Email", "Description"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            format_optional(self.email.as_deref(), "-"),
            format_optional(self.description.as_deref(), ""),
        ]
    }
}

impl TableRow for Role {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Permissions"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.permissions.join(", "),
        ]
    }
}

impl TableRow for Category {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Parent", "Description"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            id_or_dash(self.parent_id),
            format_optional(self.description.as_deref(), ""),
        ]
    }
}

impl TableRow for User {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Email", "Role", "Active", "Last login"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            format_optional(self.role.as_deref(), "-"),
            yes_no(self.active),
            self.last_login_at
                .as_ref()
                .map(|at| format_age(at, Utc::now()))
                .unwrap_or_else(|| "never".to_string()),
        ]
    }
}

impl TableRow for SlaPolicy {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Priority", "First response", "Resolution"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.priority.to_string(),
            SlaPolicy::format_minutes(self.first_response_minutes),
            SlaPolicy::format_minutes(self.resolution_minutes),
        ]
    }
}

impl TableRow for EmailConfig {
    const HEADERS: &'static [&'static str] = &["SMTP host", "Port", "Username", "From", "TLS"];

    fn cells(&self) -> Vec<String> {
        let from = match self.from_name.as_deref() {
            Some(name) if !name.is_empty() => format!("{} <{}>", name, self.from_address),
            _ => self.from_address.clone(),
        };
        vec![
            self.smtp_host.clone(),
            self.smtp_port.to_string(),
            format_optional(self.username.as_deref(), "-"),
            from,
            yes_no(self.use_tls),
        ]
    }
}

impl TableRow for Notification {
    const HEADERS: &'static [&'static str] = &["ID", "", "When", "Message", "Link"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            if self.read { " " } else { "*" }.to_string(),
            format_age(&self.created_at, Utc::now()),
            self.message.clone(),
            format_optional(self.link.as_deref(), ""),
        ]
    }
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}
