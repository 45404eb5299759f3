//! Serverspace API client
//!
//! A thin async SDK for the Serverspace public API. [`SsClient`] is the
//! transport; each resource family has a handler that builds the path,
//! encodes the payload and unwraps the response envelope.
//!
//! Mutating calls return a [`TaskHandle`] right away. Waiting for the task
//! and resolving its result is left to the caller (see `s2ctl-core`).
//!
//! # Example
//!
//! ```no_run
//! use ssclient::SsClient;
//!
//! # async fn example() -> ssclient::Result<()> {
//! let client = SsClient::builder()
//!     .base_url("https://api.serverspace.io")
//!     .api_key("04f1d...")
//!     .build()?;
//!
//! for server in client.servers().list().await? {
//!     println!("{} {}", server.id, server.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod domains;
pub mod error;
pub mod metainfo;
pub mod networks;
pub mod nics;
pub mod power;
pub mod project;
pub mod records;
pub mod servers;
pub mod snapshots;
pub mod ssh_keys;
pub mod tags;
pub mod tasks;
pub mod types;
pub mod volumes;

pub use client::{API_KEY_HEADER, SsClient, SsClientBuilder};
pub use error::{ApiError, Result};

pub use domains::{Domain, DomainCreateRequest, DomainHandler};
pub use metainfo::{Image, ImageHandler, Location, LocationHandler};
pub use networks::{Network, NetworkCreateRequest, NetworkHandler, NetworkUpdateRequest};
pub use nics::{Nic, NicCreateRequest, NicHandler};
pub use power::{PowerAction, PowerHandler};
pub use project::{Project, ProjectHandler};
pub use records::{
    Record, RecordData, RecordFields, RecordHandler, RecordRequest, RecordType, Ttl,
    UnknownValueError, ValidationError,
};
pub use servers::{
    PublicNetworkSpec, Server, ServerCreateRequest, ServerHandler, ServerNic, ServerUpdateRequest,
    ServerVolume, VolumeSpec,
};
pub use snapshots::{Snapshot, SnapshotCreateRequest, SnapshotHandler};
pub use ssh_keys::{SshKey, SshKeyCreateRequest, SshKeyHandler};
pub use tags::TagHandler;
pub use tasks::TaskHandler;
pub use types::{Tag, Task, TaskHandle, TaskResultField, TaskStatus};
pub use volumes::{Volume, VolumeCreateRequest, VolumeHandler, VolumeResizeRequest};
