//! Isolated network command definitions

use clap::Subcommand;

use super::WaitArgs;

/// Network commands
#[derive(Subcommand, Debug)]
pub enum NetworkCommands {
    /// Create new isolated network
    Create {
        /// Where to create the network (see "locations")
        #[arg(long)]
        location: String,

        /// Name of the network
        #[arg(long)]
        name: String,

        /// Long description of the network
        #[arg(long)]
        description: String,

        /// Network address
        #[arg(long)]
        network_prefix: String,

        /// Count of leading 1 bits in the routing mask (24 is 255.255.255.0)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=32))]
        mask: u8,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Display all isolated networks in the project
    List,

    /// Get information about a network
    Get {
        /// Network identifier
        network_id: String,
    },

    /// Update network name and description
    Edit {
        /// Network identifier
        network_id: String,

        /// New name
        #[arg(long)]
        name: String,

        /// New description
        #[arg(long)]
        description: String,
    },

    /// Delete a network
    Delete {
        /// Network identifier
        network_id: String,
    },

    /// Add tag to network
    AddTag {
        /// Network identifier
        network_id: String,

        /// Name of tag
        #[arg(long)]
        name: String,
    },

    /// Remove tag from network
    DeleteTag {
        /// Network identifier
        network_id: String,

        /// Name of tag
        #[arg(long)]
        name: String,
    },
}
