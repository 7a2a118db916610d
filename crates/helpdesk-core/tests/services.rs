//! Auth and entity services against the mock backend.

mod common;

use std::sync::{Arc, Mutex};

use helpdesk_core::models::{
    AgentUpdate, CustomerUpdate, EmailConfigUpdate, NewCategory, NewComment, NewDepartment,
    NewRole, NewSlaPolicy, NewTicket, TicketFilter, TicketPriority, TicketStatus,
};
use helpdesk_core::session::USER_KEY;
use helpdesk_core::{
    ApiClient, ApiError, AuthService, MemorySessionStore, Services, SessionState, SessionStore,
};
use serde_json::json;

struct Setup {
    backend: common::MockBackend,
    store: Arc<MemorySessionStore>,
    api: ApiClient,
    services: Services,
}

async fn setup(store: MemorySessionStore) -> Setup {
    let backend = common::start().await;
    let store = Arc::new(store);
    let api = ApiClient::new(&backend.base_url, store.clone()).unwrap();
    let services = Services::new(&api);
    Setup {
        backend,
        store,
        api,
        services,
    }
}

#[tokio::test]
async fn login_stores_token_and_user() {
    let s = setup(MemorySessionStore::new()).await;
    let auth = AuthService::new(s.api.clone());
    assert_eq!(s.api.session_state(), SessionState::Unauthenticated);

    let user = auth
        .login(common::VALID_EMAIL, common::VALID_PASSWORD)
        .await
        .unwrap();

    assert_eq!(user.email, common::VALID_EMAIL);
    assert_eq!(s.store.token().as_deref(), Some(common::ISSUED_TOKEN));
    assert!(s.store.get(USER_KEY).is_some());
    assert_eq!(auth.cached_user(), Some(user));
    assert_eq!(s.api.session_state(), SessionState::Authenticated);

    // The stored token is used from now on
    let me = auth.current_user().await.unwrap();
    assert_eq!(me.id, 1);
    assert_eq!(
        s.backend.recorder.last_auth_header().as_deref(),
        Some(format!("Bearer {}", common::ISSUED_TOKEN).as_str())
    );
}

#[tokio::test]
async fn login_replaces_previous_session_state() {
    let s = setup(MemorySessionStore::with_token("stale")).await;
    s.store.set("leftover", "x").unwrap();
    let auth = AuthService::new(s.api.clone());

    auth.login(common::VALID_EMAIL, common::VALID_PASSWORD)
        .await
        .unwrap();

    assert_eq!(s.store.token().as_deref(), Some(common::ISSUED_TOKEN));
    assert_eq!(s.store.get("leftover"), None);
}

#[tokio::test]
async fn failed_login_goes_through_teardown() {
    let s = setup(MemorySessionStore::new()).await;
    let auth = AuthService::new(s.api.clone());
    let events = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&events);
    s.api.on_session_expired(move |_| *counter.lock().unwrap() += 1);

    let err = auth
        .login(common::VALID_EMAIL, "wrong")
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(s.store.is_empty());
    assert_eq!(*events.lock().unwrap(), 1);
}

#[tokio::test]
async fn logout_then_request_is_unauthenticated() {
    let s = setup(MemorySessionStore::new()).await;
    let auth = AuthService::new(s.api.clone());
    auth.login(common::VALID_EMAIL, common::VALID_PASSWORD)
        .await
        .unwrap();

    auth.logout().unwrap();
    assert!(s.store.is_empty());

    let err = auth.current_user().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
}

#[tokio::test]
async fn ticket_crud_and_workflow() {
    let s = setup(MemorySessionStore::with_token("abc123")).await;
    let tickets = &s.services.tickets;

    let all = tickets.list().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].subject, "VPN down");

    let filtered = tickets
        .list_filtered(&TicketFilter {
            status: Some(TicketStatus::Open),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 2);

    let one = tickets.get(1).await.unwrap();
    assert_eq!(one.subject, "Printer jammed");

    let missing = tickets.get(99).await.unwrap_err();
    assert!(matches!(missing, ApiError::NotFound { .. }));

    let created = tickets
        .create(&NewTicket {
            subject: "New laptop".to_string(),
            description: "For the new hire".to_string(),
            priority: TicketPriority::High,
            customer_id: Some(7),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id, 3);
    assert_eq!(created.subject, "New laptop");

    let closed = tickets.set_status(1, TicketStatus::Closed).await.unwrap();
    assert_eq!(closed.status, TicketStatus::Closed);

    let assigned = tickets.assign(1, 3).await.unwrap();
    assert_eq!(assigned.agent_id, Some(3));

    tickets.delete(1).await.unwrap();

    let bodies = s.backend.recorder.bodies();
    assert_eq!(bodies[0]["priority"], "high");
    assert_eq!(bodies[0]["customerId"], 7);
    assert!(bodies[0].get("categoryId").is_none());
    assert_eq!(bodies[1], json!({ "status": "closed" }));
    assert_eq!(bodies[2], json!({ "agentId": 3 }));
}

#[tokio::test]
async fn ticket_comments() {
    let s = setup(MemorySessionStore::with_token("abc123")).await;

    let comments = s.services.tickets.comments(1).await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author_name.as_deref(), Some("Dana"));

    let added = s
        .services
        .tickets
        .add_comment(
            1,
            &NewComment {
                body: "Replaced toner".to_string(),
                internal: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(added.ticket_id, 1);
    assert!(added.internal);
}

#[tokio::test]
async fn generic_resources_and_settings() {
    let s = setup(MemorySessionStore::with_token("abc123")).await;

    let agents = s.services.agents.list().await.unwrap();
    assert_eq!(agents[0].name, "Dana Ruiz");
    assert!(agents[0].active);

    let user = s.services.users.set_active(4, false).await.unwrap();
    assert!(!user.active);

    let sla = s
        .services
        .sla
        .update(
            1,
            &NewSlaPolicy {
                name: "Urgent".to_string(),
                priority: TicketPriority::Urgent,
                first_response_minutes: 15,
                resolution_minutes: 240,
            },
        )
        .await
        .unwrap();
    assert_eq!(sla.first_response_minutes, 15);

    let config = s.services.email_config.get().await.unwrap();
    assert_eq!(config.smtp_port, 587);

    let updated = s
        .services
        .email_config
        .update(&EmailConfigUpdate {
            smtp_host: Some("mail.example.org".to_string()),
            password: Some("s3cret".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.smtp_host, "mail.example.org");

    s.services
        .email_config
        .send_test("ops@example.com")
        .await
        .unwrap();

    let bodies = s.backend.recorder.bodies();
    assert_eq!(bodies[0], json!({ "active": false }));
    assert_eq!(
        bodies[2],
        json!({ "smtpHost": "mail.example.org", "password": "s3cret" })
    );
    assert_eq!(bodies[3], json!({ "to": "ops@example.com" }));
}

#[tokio::test]
async fn directory_and_people_bodies() {
    let s = setup(MemorySessionStore::with_token("abc123")).await;

    let department = s
        .services
        .departments
        .create(&NewDepartment {
            name: "Billing".to_string(),
            email: Some("billing@example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(department.id, 5);
    assert_eq!(department.name, "Billing");

    let role = s
        .services
        .roles
        .create(&NewRole {
            name: "Supervisor".to_string(),
            permissions: vec!["tickets.assign".to_string()],
        })
        .await
        .unwrap();
    assert!(role.has_permission("tickets.assign"));

    let category = s
        .services
        .categories
        .create(&NewCategory {
            name: "Printers".to_string(),
            parent_id: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(!category.is_top_level());

    let agent = s
        .services
        .agents
        .update(
            3,
            &AgentUpdate {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!agent.active);
    assert_eq!(agent.name, "Dana Ruiz");

    let customer = s
        .services
        .customers
        .update(
            9,
            &CustomerUpdate {
                company: Some("Acme".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(customer.display_name(), "Lee Park (Acme)");

    let bodies = s.backend.recorder.bodies();
    assert_eq!(
        bodies[0],
        json!({ "name": "Billing", "email": "billing@example.com" })
    );
    assert_eq!(
        bodies[1],
        json!({ "name": "Supervisor", "permissions": ["tickets.assign"] })
    );
    assert_eq!(bodies[2], json!({ "name": "Printers", "parentId": 2 }));
    assert_eq!(bodies[3], json!({ "active": false }));
    assert_eq!(bodies[4], json!({ "company": "Acme" }));
}

#[tokio::test]
async fn notifications() {
    let s = setup(MemorySessionStore::with_token("abc123")).await;
    let notifications = &s.services.notifications;

    let all = notifications.list().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(!all[0].read);
    assert_eq!(all[0].link.as_deref(), Some("/tickets/2"));

    assert_eq!(notifications.unread_count().await.unwrap(), 1);
    notifications.mark_read(1).await.unwrap();
    notifications.mark_all_read().await.unwrap();
    assert_eq!(s.backend.recorder.request_count(), 4);
}

#[tokio::test]
async fn service_call_with_expired_session_tears_down() {
    let s = setup(MemorySessionStore::new()).await;
    let auth = AuthService::new(s.api.clone());
    auth.login(common::VALID_EMAIL, common::VALID_PASSWORD)
        .await
        .unwrap();

    // The backend forgets the token; the next protected call is rejected
    s.store.set("token", "revoked").unwrap();
    let err = auth.current_user().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(s.store.is_empty());
    assert_eq!(auth.cached_user(), None);
}
