use anyhow::Result;
use chrono::Utc;
use helpdesk_core::models::Ticket;
use serde::Serialize;

use crate::app::App;

#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    open_tickets: usize,
    unassigned_tickets: usize,
    overdue_tickets: usize,
    agents: usize,
    customers: usize,
    unread_notifications: u32,
}

impl Summary {
    fn count_tickets(&mut self, tickets: &[Ticket]) {
        let now = Utc::now();
        let open: Vec<&Ticket> = tickets.iter().filter(|t| !t.status.is_finished()).collect();
        self.open_tickets = open.len();
        self.unassigned_tickets = open.iter().filter(|t| !t.is_assigned()).count();
        self.overdue_tickets = open.iter().filter(|t| t.is_overdue(now)).count();
    }
}

/// Fetch every count concurrently; the first failure aborts the rest
pub async fn run(app: &App) -> Result<()> {
    let services = &app.services;
    let (tickets, agents, customers, unread) = futures::try_join!(
        services.tickets.list(),
        services.agents.list(),
        services.customers.list(),
        services.notifications.unread_count(),
    )?;

    let mut summary = Summary {
        agents: agents.len(),
        customers: customers.len(),
        unread_notifications: unread,
        ..Default::default()
    };
    summary.count_tickets(&tickets);

    if app.output.is_json() {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Open tickets:          {}", summary.open_tickets);
        println!("  unassigned:          {}", summary.unassigned_tickets);
        println!("  overdue:             {}", summary.overdue_tickets);
        println!("Agents:                {}", summary.agents);
        println!("Customers:             {}", summary.customers);
        println!("Unread notifications:  {}", summary.unread_notifications);
    }
    Ok(())
}
