//! CRUD for the plain collections: agents, customers, departments, roles,
//! categories and SLA policies.

use std::path::Path;

use anyhow::{Context, Result};
use helpdesk_core::services::Resource;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::cli::{DataArg, ResourceAction};
use crate::output::{Output, TableRow};

/// Run one CRUD action. `C` and `U` are the create and update bodies that
/// `--data` must decode into before anything is sent.
pub async fn run<T, C, U>(
    output: &Output,
    resource: &Resource<T>,
    action: ResourceAction,
) -> Result<()>
where
    T: DeserializeOwned + Serialize + TableRow,
    C: DeserializeOwned + Serialize,
    U: DeserializeOwned + Serialize,
{
    match action {
        ResourceAction::List => {
            let items = resource.list().await?;
            output.list(&items)
        }
        ResourceAction::Show { id } => {
            let item = resource.get(id).await?;
            output.item(&item)
        }
        ResourceAction::Create(data) => {
            let body: C = read_body(&data)?;
            let item = resource.create(&body).await?;
            output.item(&item)
        }
        ResourceAction::Update { id, data } => {
            let body: U = read_body(&data)?;
            let item = resource.update(id, &body).await?;
            output.item(&item)
        }
        ResourceAction::Delete { id } => {
            resource.delete(id).await?;
            output.message(&format!("Deleted {}/{}", resource.path().trim_start_matches('/'), id));
            Ok(())
        }
    }
}

/// Parse `--data`, reading it from a file when it starts with `@`
pub fn read_data(data: &DataArg) -> Result<Value> {
    let text = match data.data.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("Failed to read {}", path))?,
        None => data.data.clone(),
    };
    let value: Value = serde_json::from_str(&text).context("--data is not valid JSON")?;
    if !value.is_object() {
        anyhow::bail!("--data must be a JSON object");
    }
    Ok(value)
}

/// `--data` decoded into a typed request body
pub fn read_body<B: DeserializeOwned>(data: &DataArg) -> Result<B> {
    serde_json::from_value(read_data(data)?).context("--data does not match the expected fields")
}
