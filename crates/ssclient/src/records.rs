//! DNS records of a domain: `api/v1/domains/{name}/records/`
//!
//! Every record carries `name`, `type` and `ttl`. On top of that each type
//! needs a fixed set of payload fields, and the API rejects both missing and
//! superfluous ones. [`RecordFields::validate`] enforces that locally so a bad
//! payload never reaches the network.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::client::SsClient;
use crate::error::Result;
use crate::types::TaskHandle;

/// Supported record types; lowercase on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Srv,
    Txt,
}

impl RecordType {
    pub const ALL: [RecordType; 7] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Cname,
        RecordType::Mx,
        RecordType::Ns,
        RecordType::Srv,
        RecordType::Txt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::A => "a",
            RecordType::Aaaa => "aaaa",
            RecordType::Cname => "cname",
            RecordType::Mx => "mx",
            RecordType::Ns => "ns",
            RecordType::Srv => "srv",
            RecordType::Txt => "txt",
        }
    }

    /// Complete field set a record of this type must carry, common fields included
    pub const fn required_fields(self) -> &'static [&'static str] {
        match self {
            RecordType::A | RecordType::Aaaa => &["name", "type", "ttl", "ip"],
            RecordType::Cname => &["name", "type", "ttl", "canonical_name"],
            RecordType::Mx => &["name", "type", "ttl", "mail_host", "priority"],
            RecordType::Ns => &["name", "type", "ttl", "name_server_host"],
            RecordType::Srv => &[
                "name", "type", "ttl", "protocol", "service", "weight", "port", "target",
                "priority",
            ],
            RecordType::Txt => &["name", "type", "ttl", "text"],
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        RecordType::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| UnknownValueError {
                kind: "record type",
                value: s.to_string(),
            })
    }
}

/// Time-to-live values accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ttl {
    #[serde(rename = "1s")]
    OneSecond,
    #[serde(rename = "5s")]
    FiveSeconds,
    #[serde(rename = "30s")]
    ThirtySeconds,
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "10m")]
    TenMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Ttl {
    pub const ALL: [Ttl; 13] = [
        Ttl::OneSecond,
        Ttl::FiveSeconds,
        Ttl::ThirtySeconds,
        Ttl::OneMinute,
        Ttl::FiveMinutes,
        Ttl::TenMinutes,
        Ttl::FifteenMinutes,
        Ttl::ThirtyMinutes,
        Ttl::OneHour,
        Ttl::TwoHours,
        Ttl::SixHours,
        Ttl::TwelveHours,
        Ttl::OneDay,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Ttl::OneSecond => "1s",
            Ttl::FiveSeconds => "5s",
            Ttl::ThirtySeconds => "30s",
            Ttl::OneMinute => "1m",
            Ttl::FiveMinutes => "5m",
            Ttl::TenMinutes => "10m",
            Ttl::FifteenMinutes => "15m",
            Ttl::ThirtyMinutes => "30m",
            Ttl::OneHour => "1h",
            Ttl::TwoHours => "2h",
            Ttl::SixHours => "6h",
            Ttl::TwelveHours => "12h",
            Ttl::OneDay => "1d",
        }
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ttl {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ttl::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownValueError {
                kind: "TTL",
                value: s.to_string(),
            })
    }
}

/// A string did not name a known record type or TTL
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownValueError {
    pub kind: &'static str,
    pub value: String,
}

/// Record field set does not match what its type requires
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid fields for {record_type} record: missing [{}], unexpected [{}]", .missing_fields.join(", "), .extra_fields.join(", "))]
pub struct ValidationError {
    pub record_type: RecordType,
    pub missing_fields: Vec<String>,
    pub extra_fields: Vec<String>,
}

/// Loosely typed record input, as collected from flags
///
/// Any combination of optional fields can be set; [`RecordFields::validate`]
/// decides whether the combination is legal for `record_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    pub name: String,
    pub record_type: RecordType,
    pub ttl: Ttl,
    pub ip: Option<String>,
    pub canonical_name: Option<String>,
    pub mail_host: Option<String>,
    pub name_server_host: Option<String>,
    pub text: Option<String>,
    pub protocol: Option<String>,
    pub service: Option<String>,
    pub priority: Option<u16>,
    pub weight: Option<u16>,
    pub port: Option<u16>,
    pub target: Option<String>,
}

impl RecordFields {
    pub fn new(name: impl Into<String>, record_type: RecordType, ttl: Ttl) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl,
            ip: None,
            canonical_name: None,
            mail_host: None,
            name_server_host: None,
            text: None,
            protocol: None,
            service: None,
            priority: None,
            weight: None,
            port: None,
            target: None,
        }
    }

    /// Names of the fields that carry a value, common fields included
    pub fn supplied_fields(&self) -> Vec<&'static str> {
        let optional = [
            ("ip", self.ip.is_some()),
            ("canonical_name", self.canonical_name.is_some()),
            ("mail_host", self.mail_host.is_some()),
            ("name_server_host", self.name_server_host.is_some()),
            ("text", self.text.is_some()),
            ("protocol", self.protocol.is_some()),
            ("service", self.service.is_some()),
            ("priority", self.priority.is_some()),
            ("weight", self.weight.is_some()),
            ("port", self.port.is_some()),
            ("target", self.target.is_some()),
        ];
        let mut fields = vec!["name", "type", "ttl"];
        fields.extend(optional.iter().filter(|(_, set)| *set).map(|(name, _)| *name));
        fields
    }

    /// Check the field set against the type and build the wire payload
    pub fn validate(&self) -> std::result::Result<RecordRequest, ValidationError> {
        let supplied = self.supplied_fields();
        let required = self.record_type.required_fields();

        let missing_fields: Vec<String> = required
            .iter()
            .filter(|field| !supplied.contains(field))
            .map(|field| field.to_string())
            .collect();
        let extra_fields: Vec<String> = supplied
            .iter()
            .filter(|field| !required.contains(field))
            .map(|field| field.to_string())
            .collect();

        match self.record_data() {
            Some(data) if missing_fields.is_empty() && extra_fields.is_empty() => {
                Ok(RecordRequest {
                    name: self.name.clone(),
                    ttl: self.ttl,
                    data,
                })
            }
            _ => Err(ValidationError {
                record_type: self.record_type,
                missing_fields,
                extra_fields,
            }),
        }
    }

    fn record_data(&self) -> Option<RecordData> {
        Some(match self.record_type {
            RecordType::A => RecordData::A {
                ip: self.ip.clone()?,
            },
            RecordType::Aaaa => RecordData::Aaaa {
                ip: self.ip.clone()?,
            },
            RecordType::Cname => RecordData::Cname {
                canonical_name: self.canonical_name.clone()?,
            },
            RecordType::Mx => RecordData::Mx {
                mail_host: self.mail_host.clone()?,
                priority: self.priority?,
            },
            RecordType::Ns => RecordData::Ns {
                name_server_host: self.name_server_host.clone()?,
            },
            RecordType::Srv => RecordData::Srv {
                protocol: self.protocol.clone()?,
                service: self.service.clone()?,
                priority: self.priority?,
                weight: self.weight?,
                port: self.port?,
                target: self.target.clone()?,
            },
            RecordType::Txt => RecordData::Txt {
                text: self.text.clone()?,
            },
        })
    }
}

/// Type-specific payload of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecordData {
    A {
        ip: String,
    },
    Aaaa {
        ip: String,
    },
    Cname {
        canonical_name: String,
    },
    Mx {
        mail_host: String,
        priority: u16,
    },
    Ns {
        name_server_host: String,
    },
    Srv {
        protocol: String,
        service: String,
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },
    Txt {
        text: String,
    },
}

/// Validated create/update payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRequest {
    pub name: String,
    pub ttl: Ttl,
    #[serde(flatten)]
    pub data: RecordData,
}

/// A record as returned by the API
///
/// `type` and `ttl` stay strings so records the client cannot create
/// (SOA, for instance) still decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Handler bound to one domain's records
#[derive(Debug, Clone)]
pub struct RecordHandler {
    client: SsClient,
    path: String,
}

impl RecordHandler {
    pub fn new(client: SsClient, domain_name: &str) -> Self {
        Self {
            client,
            path: format!("api/v1/domains/{}/records/", domain_name),
        }
    }

    fn item_path(&self, record_id: &str) -> String {
        format!("{}{}", self.path, record_id)
    }

    /// Validate `fields` and create the record; nothing is sent when validation fails
    pub async fn create(&self, fields: &RecordFields) -> Result<TaskHandle> {
        let request = fields.validate()?;
        self.client.post(&self.path, &request).await
    }

    pub async fn get(&self, record_id: &str) -> Result<Record> {
        self.client
            .get_envelope(&self.item_path(record_id), "record")
            .await
    }

    pub async fn list(&self) -> Result<Vec<Record>> {
        self.client.get_envelope(&self.path, "records").await
    }

    /// Replace a record; validated like [`RecordHandler::create`]
    pub async fn update(&self, record_id: &str, fields: &RecordFields) -> Result<TaskHandle> {
        let request = fields.validate()?;
        self.client.put(&self.item_path(record_id), &request).await
    }

    pub async fn delete(&self, record_id: &str) -> Result<()> {
        self.client.delete(&self.item_path(record_id)).await
    }
}
