//! One handler per top-level subcommand.

mod resources;
mod session;
mod settings;
mod summary;
mod tickets;

use anyhow::Result;
use helpdesk_core::models::{
    AgentUpdate, CustomerUpdate, NewAgent, NewCategory, NewCustomer, NewDepartment, NewRole,
    NewSlaPolicy,
};

use crate::app::App;
use crate::cli::Command;

pub async fn run(app: &mut App, command: Command) -> Result<()> {
    match command {
        Command::Login { email } => session::login(app, email).await,
        Command::Logout => session::logout(app),
        Command::Whoami => session::whoami(app).await,
        Command::Status => session::status(app),
        Command::Passwd => session::change_password(app).await,
        Command::Tickets(command) => tickets::run(app, command).await,
        Command::Agents(action) => {
            resources::run::<_, NewAgent, AgentUpdate>(&app.output, &app.services.agents, action)
                .await
        }
        Command::Customers(action) => {
            resources::run::<_, NewCustomer, CustomerUpdate>(
                &app.output,
                &app.services.customers,
                action,
            )
            .await
        }
        Command::Departments(action) => {
            resources::run::<_, NewDepartment, NewDepartment>(
                &app.output,
                &app.services.departments,
                action,
            )
            .await
        }
        Command::Roles(action) => {
            resources::run::<_, NewRole, NewRole>(&app.output, &app.services.roles, action).await
        }
        Command::Categories(action) => {
            resources::run::<_, NewCategory, NewCategory>(
                &app.output,
                &app.services.categories,
                action,
            )
            .await
        }
        Command::Sla(action) => {
            resources::run::<_, NewSlaPolicy, NewSlaPolicy>(&app.output, &app.services.sla, action)
                .await
        }
        Command::Users(command) => settings::users(app, command).await,
        Command::EmailConfig(command) => settings::email_config(app, command).await,
        Command::Notifications(command) => settings::notifications(app, command).await,
        Command::Summary => summary::run(app).await,
    }
}
