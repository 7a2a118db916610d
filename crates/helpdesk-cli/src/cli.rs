//! Command-line definitions.

use clap::{Args, Parser, Subcommand};
use helpdesk_core::models::{TicketPriority, TicketStatus};

#[derive(Parser, Debug)]
#[command(name = "helpdesk", version, about = "Administer the helpdesk ticketing system")]
pub struct Cli {
    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Backend address, overriding HELPDESK_API_URL and the config file
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user as the backend sees it
    Whoami,
    /// Show the local session state and configured backend
    Status,
    /// Change the password of the logged-in user
    Passwd,
    /// Work with tickets
    #[command(subcommand)]
    Tickets(TicketCommand),
    /// Manage support agents
    #[command(subcommand)]
    Agents(ResourceAction),
    /// Manage customers
    #[command(subcommand)]
    Customers(ResourceAction),
    /// Manage departments
    #[command(subcommand)]
    Departments(ResourceAction),
    /// Manage roles
    #[command(subcommand)]
    Roles(ResourceAction),
    /// Manage ticket categories
    #[command(subcommand)]
    Categories(ResourceAction),
    /// Manage SLA policies
    #[command(subcommand)]
    Sla(ResourceAction),
    /// Manage login accounts
    #[command(subcommand)]
    Users(UserCommand),
    /// Outgoing email settings
    #[command(subcommand)]
    EmailConfig(EmailConfigCommand),
    /// Your notifications
    #[command(subcommand)]
    Notifications(NotificationCommand),
    /// Ticket, agent, customer and notification counts at a glance
    Summary,
}

/// Operations shared by every plain collection
#[derive(Subcommand, Debug, Clone)]
pub enum ResourceAction {
    /// List all entries
    List,
    /// Show one entry
    Show { id: i64 },
    /// Create an entry from a JSON body
    Create(DataArg),
    /// Replace fields of an entry from a JSON body
    Update {
        id: i64,
        #[command(flatten)]
        data: DataArg,
    },
    /// Delete an entry
    Delete { id: i64 },
}

#[derive(Args, Debug, Clone)]
pub struct DataArg {
    /// JSON body, or @path to read it from a file
    #[arg(long, value_name = "JSON")]
    pub data: String,
}

#[derive(Subcommand, Debug)]
pub enum TicketCommand {
    /// List tickets, optionally filtered
    List {
        #[arg(long)]
        status: Option<TicketStatus>,
        #[arg(long)]
        priority: Option<TicketPriority>,
        #[arg(long)]
        agent: Option<i64>,
        #[arg(long)]
        customer: Option<i64>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a ticket and its comments
    Show { id: i64 },
    /// Open a new ticket
    Create {
        #[arg(long)]
        subject: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "medium")]
        priority: TicketPriority,
        #[arg(long)]
        customer: Option<i64>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        department: Option<i64>,
    },
    /// Move a ticket to another status
    Status { id: i64, status: TicketStatus },
    /// Assign a ticket to an agent
    Assign { id: i64, agent: i64 },
    /// Add a comment to a ticket
    Comment {
        id: i64,
        text: String,
        /// Visible to agents only
        #[arg(long)]
        internal: bool,
    },
    /// Delete a ticket
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    #[command(flatten)]
    Crud(ResourceAction),
    /// Allow an account to log in again
    Enable { id: i64 },
    /// Block an account from logging in
    Disable { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum EmailConfigCommand {
    /// Show the current settings
    Show,
    /// Change settings from a JSON body
    Update(DataArg),
    /// Send a test message
    Test { to: String },
}

#[derive(Subcommand, Debug)]
pub enum NotificationCommand {
    /// List notifications
    List,
    /// Mark one notification as read
    Read { id: i64 },
    /// Mark every notification as read
    ReadAll,
}
