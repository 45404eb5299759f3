//! SSH key commands

use ssclient::SshKeyCreateRequest;

use crate::cli::SshKeyCommands;
use crate::connection::ConnectionManager;
use crate::error::{Result as CliResult, S2ctlError};
use crate::output::{OutputFormat, print_output};

pub async fn handle_ssh_key_command(
    conn_mgr: &ConnectionManager,
    command: &SshKeyCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    match command {
        SshKeyCommands::Create {
            name,
            public_key,
            file,
        } => {
            let public_key = match (public_key, file) {
                (Some(key), _) => key.trim().to_string(),
                (None, Some(path)) => std::fs::read_to_string(path)
                    .map_err(|e| S2ctlError::FileError {
                        path: path.display().to_string(),
                        message: e.to_string(),
                    })?
                    .trim()
                    .to_string(),
                (None, None) => {
                    return Err(S2ctlError::InvalidInput {
                        message: "either --public-key or --file is required".to_string(),
                    });
                }
            };

            let client = conn_mgr.create_client()?;
            let request = SshKeyCreateRequest {
                name: name.clone(),
                public_key,
            };
            let key = client.ssh_keys().create(&request).await?;
            print_output(key, output_format, query)?;
        }
        SshKeyCommands::List => {
            let keys = conn_mgr.create_client()?.ssh_keys().list().await?;
            print_output(keys, output_format, query)?;
        }
        SshKeyCommands::Get { key_id } => {
            let key = conn_mgr
                .create_client()?
                .ssh_keys()
                .get(&key_id.to_string())
                .await?;
            print_output(key, output_format, query)?;
        }
        SshKeyCommands::Delete { key_id } => {
            conn_mgr
                .create_client()?
                .ssh_keys()
                .delete(&key_id.to_string())
                .await?;
        }
    }

    Ok(())
}
