//! Wait-and-resolve workflows
//!
//! Each mutating operation issues its request and gets a task handle back.
//! Without waiting the handle is the result. With waiting the task is polled
//! to completion and, when the operation produces a resource, that resource
//! is fetched through the id the completed task carries.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use ssclient::{
    Domain, DomainCreateRequest, Network, NetworkCreateRequest, Nic, NicCreateRequest,
    PowerAction, Record, RecordFields, Server, ServerCreateRequest, ServerUpdateRequest,
    SnapshotCreateRequest, SsClient, Task, TaskHandle, TaskResultField, Volume,
    VolumeCreateRequest, VolumeResizeRequest,
};
use tracing::info;

use crate::error::{CoreError, Result};
use crate::progress::{DEFAULT_TASK_TIMEOUT, DOMAIN_CREATE_TIMEOUT, TaskPoller};

/// Whether an operation blocks until its task finishes
#[derive(Debug, Default)]
pub enum Wait {
    /// Return the task handle straight away
    #[default]
    No,
    /// Poll with the given poller
    Until(TaskPoller),
}

impl Wait {
    pub fn poller(&self) -> Option<&TaskPoller> {
        match self {
            Wait::No => None,
            Wait::Until(poller) => Some(poller),
        }
    }
}

/// Outcome of an operation that produces a fetchable resource
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resolved<T> {
    Task(TaskHandle),
    Resource(T),
}

/// Outcome of an operation with nothing to fetch afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    Task(TaskHandle),
    Completed,
}

async fn resolve<T, F, Fut>(
    client: &SsClient,
    handle: TaskHandle,
    wait: &Wait,
    default_timeout: Duration,
    field: TaskResultField,
    fetch: F,
) -> Result<Resolved<T>>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = ssclient::Result<T>>,
{
    let Some(poller) = wait.poller() else {
        return Ok(Resolved::Task(handle));
    };

    let task = poller
        .wait_within(client, &handle.task_id, default_timeout)
        .await?;
    let resource_id = task
        .result_id(field)
        .ok_or_else(|| CoreError::MissingTaskResult {
            task_id: handle.task_id.clone(),
            field,
        })?
        .to_string();

    info!(task_id = %handle.task_id, %field, %resource_id, "Task completed, fetching result");
    Ok(Resolved::Resource(fetch(resource_id).await?))
}

async fn settle(client: &SsClient, handle: TaskHandle, wait: &Wait) -> Result<Settled> {
    match wait.poller() {
        None => Ok(Settled::Task(handle)),
        Some(poller) => {
            poller.wait(client, &handle.task_id).await?;
            Ok(Settled::Completed)
        }
    }
}

/// Create a server and optionally wait for it
///
/// # Example
///
/// ```rust,ignore
/// use s2ctl_core::progress::TaskPoller;
/// use s2ctl_core::workflows::{Resolved, Wait, create_server};
///
/// match create_server(&client, &request, &Wait::Until(TaskPoller::new())).await? {
///     Resolved::Resource(server) => println!("{} is up", server.id),
///     Resolved::Task(handle) => println!("queued as {}", handle.task_id),
/// }
/// ```
pub async fn create_server(
    client: &SsClient,
    request: &ServerCreateRequest,
    wait: &Wait,
) -> Result<Resolved<Server>> {
    let servers = client.servers();
    let handle = servers.create(request).await?;
    resolve(
        client,
        handle,
        wait,
        DEFAULT_TASK_TIMEOUT,
        TaskResultField::ServerId,
        |id| async move { servers.get(&id).await },
    )
    .await
}

pub async fn update_server(
    client: &SsClient,
    server_id: &str,
    request: &ServerUpdateRequest,
    wait: &Wait,
) -> Result<Resolved<Server>> {
    let servers = client.servers();
    let handle = servers.update(server_id, request).await?;
    resolve(
        client,
        handle,
        wait,
        DEFAULT_TASK_TIMEOUT,
        TaskResultField::ServerId,
        |id| async move { servers.get(&id).await },
    )
    .await
}

pub async fn create_volume(
    client: &SsClient,
    server_id: &str,
    request: &VolumeCreateRequest,
    wait: &Wait,
) -> Result<Resolved<Volume>> {
    let volumes = client.servers().volumes(server_id);
    let handle = volumes.create(request).await?;
    resolve(
        client,
        handle,
        wait,
        DEFAULT_TASK_TIMEOUT,
        TaskResultField::VolumeId,
        |id| async move { volumes.get(&id).await },
    )
    .await
}

pub async fn resize_volume(
    client: &SsClient,
    server_id: &str,
    volume_id: &str,
    request: &VolumeResizeRequest,
    wait: &Wait,
) -> Result<Resolved<Volume>> {
    let volumes = client.servers().volumes(server_id);
    let handle = volumes.update(volume_id, request).await?;
    resolve(
        client,
        handle,
        wait,
        DEFAULT_TASK_TIMEOUT,
        TaskResultField::VolumeId,
        |id| async move { volumes.get(&id).await },
    )
    .await
}

pub async fn create_nic(
    client: &SsClient,
    server_id: &str,
    request: &NicCreateRequest,
    wait: &Wait,
) -> Result<Resolved<Nic>> {
    let nics = client.servers().nics(server_id);
    let handle = nics.create(request).await?;
    resolve(
        client,
        handle,
        wait,
        DEFAULT_TASK_TIMEOUT,
        TaskResultField::NicId,
        |id| async move { nics.get(&id).await },
    )
    .await
}

pub async fn create_network(
    client: &SsClient,
    request: &NetworkCreateRequest,
    wait: &Wait,
) -> Result<Resolved<Network>> {
    let networks = client.networks();
    let handle = networks.create(request).await?;
    resolve(
        client,
        handle,
        wait,
        DEFAULT_TASK_TIMEOUT,
        TaskResultField::NetworkId,
        |id| async move { networks.get(&id).await },
    )
    .await
}

/// Create a domain; waiting allows three minutes unless overridden
pub async fn create_domain(
    client: &SsClient,
    request: &DomainCreateRequest,
    wait: &Wait,
) -> Result<Resolved<Domain>> {
    let domains = client.domains();
    let handle = domains.create(request).await?;
    resolve(
        client,
        handle,
        wait,
        DOMAIN_CREATE_TIMEOUT,
        TaskResultField::DomainId,
        |id| async move { domains.get(&id).await },
    )
    .await
}

/// Create a record; the field set is validated before anything is sent
pub async fn create_record(
    client: &SsClient,
    domain_name: &str,
    fields: &RecordFields,
    wait: &Wait,
) -> Result<Resolved<Record>> {
    let records = client.domains().records(domain_name);
    let handle = records.create(fields).await?;
    resolve(
        client,
        handle,
        wait,
        DEFAULT_TASK_TIMEOUT,
        TaskResultField::RecordId,
        |id| async move { records.get(&id).await },
    )
    .await
}

pub async fn update_record(
    client: &SsClient,
    domain_name: &str,
    record_id: &str,
    fields: &RecordFields,
    wait: &Wait,
) -> Result<Resolved<Record>> {
    let records = client.domains().records(domain_name);
    let handle = records.update(record_id, fields).await?;
    resolve(
        client,
        handle,
        wait,
        DEFAULT_TASK_TIMEOUT,
        TaskResultField::RecordId,
        |id| async move { records.get(&id).await },
    )
    .await
}

pub async fn power(
    client: &SsClient,
    server_id: &str,
    action: PowerAction,
    wait: &Wait,
) -> Result<Settled> {
    let handle = client.servers().power(server_id).apply(action).await?;
    settle(client, handle, wait).await
}

pub async fn create_snapshot(
    client: &SsClient,
    server_id: &str,
    request: &SnapshotCreateRequest,
    wait: &Wait,
) -> Result<Settled> {
    let handle = client.servers().snapshots(server_id).create(request).await?;
    settle(client, handle, wait).await
}

pub async fn rollback_snapshot(
    client: &SsClient,
    server_id: &str,
    snapshot_id: &str,
    wait: &Wait,
) -> Result<Settled> {
    let handle = client
        .servers()
        .snapshots(server_id)
        .rollback(snapshot_id)
        .await?;
    settle(client, handle, wait).await
}

/// Poll an already running task and return it once completed
pub async fn wait_for_task(client: &SsClient, task_id: &str, poller: &TaskPoller) -> Result<Task> {
    poller.wait(client, task_id).await
}
