//! Service catalog command handlers
//!
//! Read-only lookups against the static service catalog: icons, display
//! names, explore tabs and connection schemas.

use anyhow::{Result, anyhow};
use clap::Subcommand;
use colored::*;
use tessera_core::catalog::{ServiceCatalog, ServiceCategory, SupportedServices};

/// Service subcommands
#[derive(Subcommand)]
pub enum ServiceCommands {
    /// Show how a service type is presented
    Show {
        /// Service type (e.g. "Mysql", "Looker")
        service_type: String,
    },
    /// List supported service types by category
    List {
        /// Service types to hide instead of the default list (comma-separated)
        #[arg(long, value_delimiter = ',')]
        unsupported: Vec<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the connection schema of a service type
    Schema {
        /// Service category (database, messaging, dashboard, pipeline, mlmodel, metadata, storage, search)
        #[arg(value_parser = parse_category)]
        category: ServiceCategory,

        /// Service type
        service_type: String,
    },
}

/// Parse a service category from its schema directory name
fn parse_category(s: &str) -> Result<ServiceCategory> {
    ServiceCategory::ALL
        .into_iter()
        .find(|c| c.to_string().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| anyhow!("unknown service category: `{}`", s))
}

/// Handle service commands
///
/// # Arguments
/// * `command` - The service command to execute
pub fn handle_service_command(command: ServiceCommands) -> Result<()> {
    let catalog = ServiceCatalog::global();

    match command {
        ServiceCommands::Show { service_type } => {
            show_service(catalog, &service_type);
            Ok(())
        }
        ServiceCommands::List { unsupported, json } => {
            let services = if unsupported.is_empty() {
                catalog.supported_services()
            } else {
                catalog.with_unsupported(unsupported).supported_services()
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&services)?);
            } else {
                print_supported(&services);
            }
            Ok(())
        }
        ServiceCommands::Schema {
            category,
            service_type,
        } => {
            let schema = catalog.connection_schema(category, &service_type);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

/// Print the presentation details of one service type
fn show_service(catalog: &ServiceCatalog, service_type: &str) {
    let entry = catalog.get(service_type);

    println!(
        "{}",
        format!("Service: {}", catalog.service_display_name(service_type)).bold()
    );
    match entry {
        Some(entry) => println!("  Category:  {}", entry.category.to_string().cyan()),
        None => println!("  Category:  {}", "unknown".yellow()),
    }
    println!("  Icon:      {}", catalog.service_type_logo(service_type));
    println!(
        "  Explore:   {}",
        catalog.data_assets_tab(service_type).as_str().dimmed()
    );
    if !catalog.is_supported(service_type) {
        println!("  {}", "Not supported for ingestion".red());
    }
}

/// Print supported services grouped by category
fn print_supported(services: &SupportedServices) {
    let groups = [
        ("Database", &services.database_services),
        ("Messaging", &services.messaging_services),
        ("Dashboard", &services.dashboard_services),
        ("Pipeline", &services.pipeline_services),
        ("ML Model", &services.mlmodel_services),
        ("Metadata", &services.metadata_services),
        ("Storage", &services.storage_services),
        ("Search", &services.search_services),
    ];

    for (label, types) in groups {
        println!(
            "{}",
            format!("{} ({}):", label, types.len()).bold()
        );
        println!("  {}", types.join(", ").dimmed());
        println!();
    }
}
