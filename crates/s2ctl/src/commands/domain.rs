//! DNS domain and record commands

use s2ctl_core::workflows;
use ssclient::DomainCreateRequest;

use super::wait::wait_mode;
use crate::cli::DomainCommands;
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::{OutputFormat, print_output};

pub async fn handle_domain_command(
    conn_mgr: &ConnectionManager,
    command: &DomainCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    // Record flags are checked against the type before any request goes out
    match command {
        DomainCommands::CreateRecord { record, .. } | DomainCommands::UpdateRecord { record, .. } => {
            record.to_fields().validate()?;
        }
        _ => {}
    }

    let client = conn_mgr.create_client()?;
    let domains = client.domains();

    match command {
        DomainCommands::Create {
            name,
            migrate_records,
            wait,
        } => {
            let request = DomainCreateRequest {
                name: name.clone(),
                migrate_records: *migrate_records,
            };
            let outcome = workflows::create_domain(&client, &request, &wait_mode(wait)).await?;
            print_output(outcome, output_format, query)?;
        }
        DomainCommands::List => {
            print_output(domains.list().await?, output_format, query)?;
        }
        DomainCommands::Get { domain_name } => {
            print_output(domains.get(domain_name).await?, output_format, query)?;
        }
        DomainCommands::Delete { domain_name } => {
            domains.delete(domain_name).await?;
        }
        DomainCommands::CreateRecord {
            domain_name,
            record,
            wait,
        } => {
            let outcome = workflows::create_record(
                &client,
                domain_name,
                &record.to_fields(),
                &wait_mode(wait),
            )
            .await?;
            print_output(outcome, output_format, query)?;
        }
        DomainCommands::UpdateRecord {
            domain_name,
            record_id,
            record,
            wait,
        } => {
            let outcome = workflows::update_record(
                &client,
                domain_name,
                &record_id.to_string(),
                &record.to_fields(),
                &wait_mode(wait),
            )
            .await?;
            print_output(outcome, output_format, query)?;
        }
        DomainCommands::ListRecord { domain_name } => {
            let records = domains.records(domain_name).list().await?;
            print_output(records, output_format, query)?;
        }
        DomainCommands::GetRecord {
            domain_name,
            record_id,
        } => {
            let record = domains
                .records(domain_name)
                .get(&record_id.to_string())
                .await?;
            print_output(record, output_format, query)?;
        }
        DomainCommands::DeleteRecord {
            domain_name,
            record_id,
        } => {
            domains
                .records(domain_name)
                .delete(&record_id.to_string())
                .await?;
        }
    }

    Ok(())
}
