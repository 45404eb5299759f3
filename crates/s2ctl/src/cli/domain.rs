//! DNS domain and record command definitions

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Args, Subcommand};
use ssclient::{RecordFields, RecordType, Ttl};

use super::WaitArgs;

/// Domain commands
#[derive(Subcommand, Debug)]
pub enum DomainCommands {
    /// Create new domain
    Create {
        /// Domain name
        #[arg(long)]
        name: String,

        /// Copy existing DNS records from the current name servers
        #[arg(long)]
        migrate_records: bool,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Display all domains in the project
    List,

    /// Get information about a domain
    Get {
        /// Domain name
        domain_name: String,
    },

    /// Delete a domain
    Delete {
        /// Domain name
        domain_name: String,
    },

    /// Create a DNS record
    #[command(after_help = "FIELDS PER TYPE:
    a, aaaa   --ip
    cname     --cname
    mx        --mail-host --priority
    ns        --name-server-host
    txt       --text
    srv       --service --protocol --priority --weight --port --target

EXAMPLES:
    s2ctl domain create-record example.com --name www --type a --ttl 1h --ip 203.0.113.10
    s2ctl domain create-record example.com --name example.com. --type mx --ttl 1d \\
        --mail-host mx.example.com --priority 10
")]
    CreateRecord {
        /// Domain name
        domain_name: String,

        #[command(flatten)]
        record: RecordArgs,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Replace a DNS record
    UpdateRecord {
        /// Domain name
        domain_name: String,

        /// Record identifier
        #[arg(long)]
        record_id: i64,

        #[command(flatten)]
        record: RecordArgs,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Display all records of a domain
    ListRecord {
        /// Domain name
        domain_name: String,
    },

    /// Get information about a record
    GetRecord {
        /// Domain name
        domain_name: String,

        /// Record identifier
        #[arg(long)]
        record_id: i64,
    },

    /// Delete a record
    DeleteRecord {
        /// Domain name
        domain_name: String,

        /// Record identifier
        #[arg(long)]
        record_id: i64,
    },
}

/// Record fields as flags; which ones are needed depends on `--type`
#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Name of the resource
    #[arg(long)]
    pub name: String,

    /// Type of the record
    #[arg(
        long = "type",
        ignore_case = true,
        value_parser = PossibleValuesParser::new(RecordType::ALL.map(RecordType::as_str))
            .try_map(|s| s.parse::<RecordType>())
    )]
    pub record_type: RecordType,

    /// How long resolvers may cache the record
    #[arg(
        long,
        value_parser = PossibleValuesParser::new(Ttl::ALL.map(Ttl::as_str))
            .try_map(|s| s.parse::<Ttl>())
    )]
    pub ttl: Ttl,

    /// IP address of the host (a, aaaa)
    #[arg(long)]
    pub ip: Option<String>,

    /// Canonical name of the domain (cname)
    #[arg(long)]
    pub cname: Option<String>,

    /// Mail exchange host accepting mail for the domain (mx)
    #[arg(long)]
    pub mail_host: Option<String>,

    /// Name server host (ns)
    #[arg(long)]
    pub name_server_host: Option<String>,

    /// Text value (txt)
    #[arg(long)]
    pub text: Option<String>,

    /// Symbolic name of the service (srv)
    #[arg(long)]
    pub service: Option<String>,

    /// Transport protocol of the service, such as TCP or UDP (srv)
    #[arg(long)]
    pub protocol: Option<String>,

    /// Relative weight among records with the same priority (srv)
    #[arg(long)]
    pub weight: Option<u16>,

    /// Port the service listens on (srv)
    #[arg(long)]
    pub port: Option<u16>,

    /// Canonical hostname providing the service, ending in a dot (srv)
    #[arg(long)]
    pub target: Option<String>,

    /// Lower values are preferred (mx, srv)
    #[arg(long)]
    pub priority: Option<u16>,
}

impl RecordArgs {
    /// Collect the flags into an unvalidated record
    pub fn to_fields(&self) -> RecordFields {
        RecordFields {
            ip: self.ip.clone(),
            canonical_name: self.cname.clone(),
            mail_host: self.mail_host.clone(),
            name_server_host: self.name_server_host.clone(),
            text: self.text.clone(),
            protocol: self.protocol.clone(),
            service: self.service.clone(),
            priority: self.priority,
            weight: self.weight,
            port: self.port,
            target: self.target.clone(),
            ..RecordFields::new(self.name.clone(), self.record_type, self.ttl)
        }
    }
}
