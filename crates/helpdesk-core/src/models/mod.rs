//! Data models for helpdesk entities.
//!
//! These types mirror the JSON the backend sends and accepts:
//!
//! - `Ticket`, `TicketComment`: support requests and their discussion
//! - `Agent`, `Customer`, `User`: people and login accounts
//! - `Department`, `Role`, `Category`: organisation structure
//! - `SlaPolicy`, `EmailConfig`: service settings
//! - `Notification`: in-app notifications for the current user
//!
//! Field names are camelCase on the wire. With the `ts` feature every type
//! also derives its TypeScript declaration.

pub mod directory;
pub mod notification;
pub mod person;
pub mod settings;
pub mod ticket;

pub use directory::{Category, Department, NewCategory, NewDepartment, NewRole, Role};
pub use notification::{Notification, UnreadCount};
pub use person::{
    Agent, AgentUpdate, Customer, CustomerUpdate, NewAgent, NewCustomer, NewUser, User, UserUpdate,
};
pub use settings::{EmailConfig, EmailConfigUpdate, NewSlaPolicy, SlaPolicy};
pub use ticket::{
    NewComment, NewTicket, Ticket, TicketComment, TicketFilter, TicketPriority, TicketStatus,
    TicketUpdate,
};
