//! Context management commands
//!
//! Contexts are the only commands that write the config file. Each mutating
//! command loads, changes and saves it exactly once.

use s2ctl_core::config::CredentialStore;
use serde_json::json;
use tracing::{debug, info};

use crate::cli::ContextCommands;
use crate::connection::ConnectionManager;
use crate::error::{Result as CliResult, S2ctlError};
use crate::output::{OutputFormat, print_output};

pub fn handle_context_command(
    conn_mgr: &mut ConnectionManager,
    command: &ContextCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    match command {
        #[cfg(feature = "secure-storage")]
        ContextCommands::Create {
            name,
            key,
            use_keyring,
        } => create_context(conn_mgr, name, key.as_deref(), *use_keyring),
        #[cfg(not(feature = "secure-storage"))]
        ContextCommands::Create { name, key } => {
            create_context(conn_mgr, name, key.as_deref(), false)
        }
        ContextCommands::Select { name } => {
            conn_mgr.config.select_context(name)?;
            conn_mgr.save_config()?;
            info!("Context '{}' is now active", name);
            Ok(())
        }
        ContextCommands::List => {
            print_output(conn_mgr.config.list_contexts(), output_format, query)?;
            Ok(())
        }
        ContextCommands::Show => {
            let active = json!({
                "active_context": conn_mgr.config.current_context_name(),
            });
            print_output(active, output_format, query)?;
            Ok(())
        }
        ContextCommands::Delete { name } => {
            let removed = conn_mgr.config.remove_context(name)?;
            conn_mgr.save_config()?;
            CredentialStore::default().delete_credential(&removed.api_key)?;
            debug!("Removed context '{}'", name);
            Ok(())
        }
    }
}

fn create_context(
    conn_mgr: &mut ConnectionManager,
    name: &str,
    key: Option<&str>,
    use_keyring: bool,
) -> CliResult<()> {
    let api_key = match key {
        Some(key) => key.to_string(),
        None => rpassword::prompt_password("API key: ").map_err(|e| S2ctlError::InvalidInput {
            message: format!("Failed to read API key: {}", e),
        })?,
    };
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(S2ctlError::InvalidInput {
            message: "API key must not be empty".to_string(),
        });
    }

    let store = CredentialStore::for_keyring(use_keyring)?;
    conn_mgr.config.add_context(name, api_key, &store)?;
    conn_mgr.save_config()?;
    info!("Context '{}' created ({})", name, store.storage_backend());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use s2ctl_core::config::Config;
    use tempfile::TempDir;

    fn manager(dir: &TempDir) -> ConnectionManager {
        ConnectionManager::new(Config::default())
            .with_config_path(Some(dir.path().join("config.toml")))
    }

    #[test]
    fn test_first_context_becomes_current_and_is_saved() {
        let dir = TempDir::new().unwrap();
        let mut conn_mgr = manager(&dir);

        create_context(&mut conn_mgr, "work", Some("04abcdef"), false).unwrap();

        let saved = Config::load_from_path(&dir.path().join("config.toml")).unwrap();
        assert_eq!(saved.current_context_name(), Some("work"));
        assert_eq!(saved.current_api_key().unwrap(), "04abcdef");
    }

    #[test]
    fn test_duplicate_context_is_a_usage_error() {
        let dir = TempDir::new().unwrap();
        let mut conn_mgr = manager(&dir);
        create_context(&mut conn_mgr, "work", Some("04abcdef"), false).unwrap();

        let err = create_context(&mut conn_mgr, "work", Some("04ffffff"), false).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_blank_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut conn_mgr = manager(&dir);
        let err = create_context(&mut conn_mgr, "work", Some("  "), false).unwrap_err();
        assert!(matches!(err, S2ctlError::InvalidInput { .. }));
        assert!(conn_mgr.config.contexts.is_empty());
    }

    #[test]
    fn test_select_and_delete() {
        let dir = TempDir::new().unwrap();
        let mut conn_mgr = manager(&dir);
        create_context(&mut conn_mgr, "work", Some("04abcdef"), false).unwrap();
        create_context(&mut conn_mgr, "home", Some("06abcdef"), false).unwrap();

        handle_context_command(
            &mut conn_mgr,
            &ContextCommands::Select {
                name: "home".to_string(),
            },
            OutputFormat::Json,
            None,
        )
        .unwrap();
        assert_eq!(conn_mgr.config.current_context_name(), Some("home"));

        handle_context_command(
            &mut conn_mgr,
            &ContextCommands::Delete {
                name: "home".to_string(),
            },
            OutputFormat::Json,
            None,
        )
        .unwrap();

        let saved = Config::load_from_path(&dir.path().join("config.toml")).unwrap();
        assert_eq!(saved.contexts.len(), 1);
        assert_eq!(saved.current_context_name(), None);
    }

    #[test]
    fn test_select_unknown_context_fails() {
        let dir = TempDir::new().unwrap();
        let mut conn_mgr = manager(&dir);
        let err = handle_context_command(
            &mut conn_mgr,
            &ContextCommands::Select {
                name: "nope".to_string(),
            },
            OutputFormat::Json,
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
