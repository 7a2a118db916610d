use anyhow::Result;
use helpdesk_core::models::{NewComment, NewTicket, TicketFilter};

use crate::app::App;
use crate::cli::TicketCommand;

pub async fn run(app: &App, command: TicketCommand) -> Result<()> {
    let tickets = &app.services.tickets;
    let output = &app.output;

    match command {
        TicketCommand::List {
            status,
            priority,
            agent,
            customer,
            search,
        } => {
            let filter = TicketFilter {
                status,
                priority,
                agent_id: agent,
                customer_id: customer,
                search,
                ..Default::default()
            };
            let list = tickets.list_filtered(&filter).await?;
            output.list(&list)
        }
        TicketCommand::Show { id } => {
            let (ticket, comments) = futures::try_join!(tickets.get(id), tickets.comments(id))?;
            if output.is_json() {
                let combined = serde_json::json!({ "ticket": ticket, "comments": comments });
                println!("{}", serde_json::to_string_pretty(&combined)?);
                return Ok(());
            }
            output.item(&ticket)?;
            if !ticket.description.is_empty() {
                println!("\n{}", ticket.description);
            }
            if !comments.is_empty() {
                output.message("");
                output.list(&comments)?;
            }
            Ok(())
        }
        TicketCommand::Create {
            subject,
            description,
            priority,
            customer,
            category,
            department,
        } => {
            let ticket = tickets
                .create(&NewTicket {
                    subject,
                    description,
                    priority,
                    customer_id: customer,
                    category_id: category,
                    department_id: department,
                })
                .await?;
            output.message(&format!("Created ticket #{}", ticket.id));
            output.item(&ticket)
        }
        TicketCommand::Status { id, status } => {
            let ticket = tickets.set_status(id, status).await?;
            output.message(&format!("Ticket #{} is now {}", ticket.id, ticket.status));
            Ok(())
        }
        TicketCommand::Assign { id, agent } => {
            let ticket = tickets.assign(id, agent).await?;
            output.message(&format!("Ticket #{} assigned to agent {}", ticket.id, agent));
            Ok(())
        }
        TicketCommand::Comment { id, text, internal } => {
            let comment = tickets
                .add_comment(
                    id,
                    &NewComment {
                        body: text,
                        internal,
                    },
                )
                .await?;
            output.item(&comment)
        }
        TicketCommand::Delete { id } => {
            tickets.delete(id).await?;
            output.message(&format!("Deleted ticket #{}", id));
            Ok(())
        }
    }
}
