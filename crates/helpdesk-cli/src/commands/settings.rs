//! Accounts, outgoing mail and notifications.

use anyhow::Result;
use helpdesk_core::models::{EmailConfigUpdate, NewUser, UserUpdate};

use super::resources::{self, read_body};
use crate::app::App;
use crate::cli::{EmailConfigCommand, NotificationCommand, UserCommand};

pub async fn users(app: &App, command: UserCommand) -> Result<()> {
    let users = &app.services.users;
    match command {
        UserCommand::Crud(action) => {
            resources::run::<_, NewUser, UserUpdate>(&app.output, users.resource(), action).await
        }
        UserCommand::Enable { id } => {
            let user = users.set_active(id, true).await?;
            app.output.message(&format!("Enabled {}", user.email));
            Ok(())
        }
        UserCommand::Disable { id } => {
            let user = users.set_active(id, false).await?;
            app.output.message(&format!("Disabled {}", user.email));
            Ok(())
        }
    }
}

pub async fn email_config(app: &App, command: EmailConfigCommand) -> Result<()> {
    let email_config = &app.services.email_config;
    match command {
        EmailConfigCommand::Show => {
            let config = email_config.get().await?;
            app.output.item(&config)
        }
        EmailConfigCommand::Update(data) => {
            let update: EmailConfigUpdate = read_body(&data)?;
            let config = email_config.update(&update).await?;
            app.output.item(&config)
        }
        EmailConfigCommand::Test { to } => {
            email_config.send_test(&to).await?;
            app.output.message(&format!("Test message sent to {}", to));
            Ok(())
        }
    }
}

pub async fn notifications(app: &App, command: NotificationCommand) -> Result<()> {
    let notifications = &app.services.notifications;
    match command {
        NotificationCommand::List => {
            let list = notifications.list().await?;
            app.output.list(&list)
        }
        NotificationCommand::Read { id } => {
            notifications.mark_read(id).await?;
            app.output.message("Marked as read");
            Ok(())
        }
        NotificationCommand::ReadAll => {
            notifications.mark_all_read().await?;
            app.output.message("All notifications marked as read");
            Ok(())
        }
    }
}
