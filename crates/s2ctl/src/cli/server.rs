//! Server command definitions

use clap::Subcommand;
use ssclient::VolumeSpec;

use super::{WaitArgs, parse_size, parse_volume};

/// Server commands
#[derive(Subcommand, Debug)]
pub enum ServerCommands {
    /// Create new virtual server
    #[command(after_help = "EXAMPLES:
    # 10G boot volume plus a 30G volume named 'data'
    s2ctl server create --name web --location am2 --image Debian-12-X64 \\
        --cpu 2 --ram 2G --volume 10G --volume data:30G --public-network 50
")]
    Create {
        /// Name of new server
        #[arg(long)]
        name: String,

        /// Where to create the server (see "locations")
        #[arg(long)]
        location: String,

        /// OS image for the server (see "images")
        #[arg(long)]
        image: String,

        /// CPU cores count
        #[arg(long)]
        cpu: u32,

        /// RAM size (e.g. 1024, 1024M or 1G)
        #[arg(long, value_parser = parse_size)]
        ram: u64,

        /// Volume as [NAME:]SIZE; may be repeated. The first one is the boot volume
        #[arg(long = "volume", value_name = "[NAME:]SIZE", value_parser = parse_volume, required = true)]
        volumes: Vec<VolumeSpec>,

        /// Bandwidth of a public network interface in Mbps; may be repeated
        #[arg(long = "public-network", value_name = "MBPS", required = true)]
        public_networks: Vec<u32>,

        /// SSH key identifier to install (see "ssh-key"); may be repeated
        #[arg(long = "ssh-key", value_name = "KEY_ID")]
        ssh_key_ids: Vec<i64>,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Change server configuration
    #[command(group(
        clap::ArgGroup::new("change")
            .required(true)
            .multiple(true)
            .args(["cpu", "ram"]),
    ))]
    Edit {
        /// Server identifier
        server_id: String,

        /// CPU cores count
        #[arg(long)]
        cpu: Option<u32>,

        /// RAM size (e.g. 1024, 1024M or 1G)
        #[arg(long, value_parser = parse_size)]
        ram: Option<u64>,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Display all virtual servers in the project
    List,

    /// Get information about a server
    Get {
        /// Server identifier
        server_id: String,
    },

    /// Delete a server
    Delete {
        /// Server identifier
        server_id: String,
    },

    /// Add new storage volume to a server
    AddVolume {
        /// Server identifier
        server_id: String,

        /// Name of new volume
        #[arg(long)]
        volume_name: String,

        /// Size of new volume (e.g. 10240, 10240M or 10G)
        #[arg(long, value_parser = parse_size)]
        volume_size: u64,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Resize a storage volume
    EditVolume {
        /// Server identifier
        server_id: String,

        /// Volume identifier
        #[arg(long)]
        volume_id: i64,

        /// New size, greater than the current one (e.g. 20480, 20480M or 20G)
        #[arg(long, value_parser = parse_size)]
        volume_size: u64,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Get information about a storage volume
    GetVolume {
        /// Server identifier
        server_id: String,

        /// Volume identifier
        #[arg(long)]
        volume_id: i64,
    },

    /// Display all storage volumes of a server
    ListVolume {
        /// Server identifier
        server_id: String,
    },

    /// Remove a storage volume from a server
    DeleteVolume {
        /// Server identifier
        server_id: String,

        /// Volume identifier
        #[arg(long)]
        volume_id: i64,
    },

    /// Add new network interface to a server
    #[command(group(
        clap::ArgGroup::new("target")
            .required(true)
            .args(["network_id", "bandwidth"]),
    ))]
    AddNic {
        /// Server identifier
        server_id: String,

        /// Isolated network to connect (see "network")
        #[arg(long)]
        network_id: Option<String>,

        /// Bandwidth in Mbps for a new public interface
        #[arg(long, value_name = "MBPS")]
        bandwidth: Option<u32>,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Display all network interfaces of a server
    ListNic {
        /// Server identifier
        server_id: String,
    },

    /// Get information about a network interface
    GetNic {
        /// Server identifier
        server_id: String,

        /// Network interface identifier
        #[arg(long)]
        nic_id: i64,
    },

    /// Remove a network interface from a server
    DeleteNic {
        /// Server identifier
        server_id: String,

        /// Network interface identifier
        #[arg(long)]
        nic_id: i64,
    },

    /// Turn a server on
    PowerOn {
        /// Server identifier
        server_id: String,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Turn a server off
    PowerOff {
        /// Server identifier
        server_id: String,

        /// Cut the power instead of asking the OS to shut down
        #[arg(long)]
        hard: bool,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Reboot a server
    Reboot {
        /// Server identifier
        server_id: String,

        /// Hardware reset instead of an OS reboot
        #[arg(long)]
        hard: bool,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Create snapshot of a server
    CreateSnapshot {
        /// Server identifier
        server_id: String,

        /// Name of the snapshot
        #[arg(long)]
        name: String,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Display all snapshots of a server
    ListSnapshot {
        /// Server identifier
        server_id: String,
    },

    /// Roll a server back to a saved snapshot
    RollbackSnapshot {
        /// Server identifier
        server_id: String,

        /// Snapshot identifier
        #[arg(long)]
        snapshot_id: i64,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Remove a snapshot of a server
    DeleteSnapshot {
        /// Server identifier
        server_id: String,

        /// Snapshot identifier
        #[arg(long)]
        snapshot_id: i64,
    },

    /// Add tag to server
    AddTag {
        /// Server identifier
        server_id: String,

        /// Name of tag
        #[arg(long)]
        name: String,
    },

    /// Remove tag from server
    DeleteTag {
        /// Server identifier
        server_id: String,

        /// Name of tag
        #[arg(long)]
        name: String,
    },
}
