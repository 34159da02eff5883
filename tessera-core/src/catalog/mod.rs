//! Service catalog
//!
//! Static lookups from a service type (e.g. `"Mysql"`, `"kafka"`) to its
//! category, icon, display name, explore-page tab and connection-schema
//! fragment. The table is built once and never mutated; a catalog with a
//! different unsupported-services list is a separate value.
//!
//! Unknown service types never fail: each lookup has an explicit fallback.

pub mod icons;
mod services;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use services::ServiceRow;

static CATALOG: LazyLock<ServiceCatalog> = LazyLock::new(ServiceCatalog::new);

/// Kind of service a connector talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceCategory {
    Database,
    Messaging,
    Dashboard,
    Pipeline,
    MlModel,
    Metadata,
    Storage,
    Search,
}

impl ServiceCategory {
    /// Categories in lookup precedence order
    pub const ALL: [ServiceCategory; 8] = [
        ServiceCategory::Database,
        ServiceCategory::Messaging,
        ServiceCategory::Dashboard,
        ServiceCategory::MlModel,
        ServiceCategory::Pipeline,
        ServiceCategory::Storage,
        ServiceCategory::Search,
        ServiceCategory::Metadata,
    ];

    fn rows(self) -> &'static [ServiceRow] {
        match self {
            ServiceCategory::Database => services::DATABASE,
            ServiceCategory::Messaging => services::MESSAGING,
            ServiceCategory::Dashboard => services::DASHBOARD,
            ServiceCategory::Pipeline => services::PIPELINE,
            ServiceCategory::MlModel => services::ML_MODEL,
            ServiceCategory::Metadata => services::METADATA,
            ServiceCategory::Storage => services::STORAGE,
            ServiceCategory::Search => services::SEARCH,
        }
    }

    /// Icon used for a service of this category without its own icon
    pub fn default_icon(self) -> Option<&'static str> {
        match self {
            ServiceCategory::Database => Some(icons::DATABASE_DEFAULT),
            ServiceCategory::Messaging => Some(icons::TOPIC_DEFAULT),
            ServiceCategory::Dashboard => Some(icons::DASHBOARD_DEFAULT),
            ServiceCategory::Pipeline => Some(icons::PIPELINE_DEFAULT),
            ServiceCategory::MlModel => Some(icons::ML_MODEL_DEFAULT),
            ServiceCategory::Storage => Some(icons::CUSTOM_STORAGE_DEFAULT),
            ServiceCategory::Metadata | ServiceCategory::Search => None,
        }
    }

    /// Explore-page tab listing the assets of this category
    pub fn explore_tab(self) -> ExploreTab {
        match self {
            ServiceCategory::Database | ServiceCategory::Metadata => ExploreTab::Tables,
            ServiceCategory::Messaging => ExploreTab::Topics,
            ServiceCategory::Dashboard => ExploreTab::Dashboards,
            ServiceCategory::Pipeline => ExploreTab::Pipelines,
            ServiceCategory::MlModel => ExploreTab::MlModels,
            ServiceCategory::Storage => ExploreTab::Containers,
            ServiceCategory::Search => ExploreTab::SearchIndexes,
        }
    }

    /// Directory of this category's connection schemas
    fn schema_dir(self) -> &'static str {
        match self {
            ServiceCategory::Database => "database",
            ServiceCategory::Messaging => "messaging",
            ServiceCategory::Dashboard => "dashboard",
            ServiceCategory::Pipeline => "pipeline",
            ServiceCategory::MlModel => "mlmodel",
            ServiceCategory::Metadata => "metadata",
            ServiceCategory::Storage => "storage",
            ServiceCategory::Search => "search",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema_dir())
    }
}

/// Explore-page tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExploreTab {
    Tables,
    Topics,
    Dashboards,
    Pipelines,
    #[serde(rename = "mlmodels")]
    MlModels,
    Containers,
    SearchIndexes,
}

impl ExploreTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExploreTab::Tables => "tables",
            ExploreTab::Topics => "topics",
            ExploreTab::Dashboards => "dashboards",
            ExploreTab::Pipelines => "pipelines",
            ExploreTab::MlModels => "mlmodels",
            ExploreTab::Containers => "containers",
            ExploreTab::SearchIndexes => "searchIndexes",
        }
    }
}

/// One known service type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceEntry {
    pub service_type: &'static str,
    pub category: ServiceCategory,
    pub icon: Option<&'static str>,
    pub display_name: Option<&'static str>,
}

/// Connection form definition: JSON schema plus UI hints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfigSchema {
    pub schema: Value,
    pub ui_schema: Value,
}

/// Supported service types per category, custom types last
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedServices {
    pub database_services: Vec<&'static str>,
    pub messaging_services: Vec<&'static str>,
    pub dashboard_services: Vec<&'static str>,
    pub pipeline_services: Vec<&'static str>,
    pub mlmodel_services: Vec<&'static str>,
    pub metadata_services: Vec<&'static str>,
    pub storage_services: Vec<&'static str>,
    pub search_services: Vec<&'static str>,
}

/// Immutable service-type lookup table
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    /// Keyed by lower-cased service type
    entries: HashMap<String, ServiceEntry>,
    unsupported: Vec<String>,
}

impl ServiceCatalog {
    fn new() -> Self {
        let mut entries = HashMap::new();

        for category in ServiceCategory::ALL {
            for &(service_type, icon, display_name) in category.rows() {
                entries
                    .entry(service_type.to_lowercase())
                    .or_insert(ServiceEntry {
                        service_type,
                        category,
                        icon,
                        display_name,
                    });
            }
        }

        Self {
            entries,
            unsupported: services::DEFAULT_UNSUPPORTED
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// The process-wide catalog with the default unsupported list
    pub fn global() -> &'static ServiceCatalog {
        &CATALOG
    }

    /// Copy of this catalog hiding a different set of service types
    pub fn with_unsupported<I, S>(&self, unsupported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: self.entries.clone(),
            unsupported: unsupported.into_iter().map(Into::into).collect(),
        }
    }

    /// Looks up a service type, ignoring case
    pub fn get(&self, service_type: &str) -> Option<&ServiceEntry> {
        self.entries.get(&service_type.to_lowercase())
    }

    pub fn is_supported(&self, service_type: &str) -> bool {
        !self
            .unsupported
            .iter()
            .any(|u| u.eq_ignore_ascii_case(service_type))
    }

    /// Icon for a service type
    ///
    /// Falls back to the category icon for supported types without their own
    /// icon, and to [`icons::DEFAULT_SERVICE`] for everything else.
    pub fn service_type_logo(&self, service_type: &str) -> &'static str {
        match self.get(service_type) {
            Some(ServiceEntry {
                icon: Some(icon), ..
            }) => *icon,
            Some(entry) if self.is_supported(entry.service_type) => entry
                .category
                .default_icon()
                .unwrap_or(icons::DEFAULT_SERVICE),
            _ => icons::DEFAULT_SERVICE,
        }
    }

    /// Explore tab for a service type; unknown types land on Tables
    pub fn data_assets_tab(&self, service_type: &str) -> ExploreTab {
        match self.get(service_type) {
            Some(entry) => entry.category.explore_tab(),
            None => ExploreTab::Tables,
        }
    }

    /// Human-readable service name
    ///
    /// Curated names where the capitalized form reads badly, otherwise the
    /// input with its first letter upper-cased and the rest lower-cased.
    pub fn service_display_name(&self, service_type: &str) -> String {
        match self.get(service_type).and_then(|e| e.display_name) {
            Some(name) => name.to_string(),
            None => capitalize(service_type),
        }
    }

    /// Supported service types of every category
    pub fn supported_services(&self) -> SupportedServices {
        let list = |category: ServiceCategory| {
            let mut types: Vec<&'static str> = category
                .rows()
                .iter()
                .map(|&(service_type, _, _)| service_type)
                .filter(|t| self.is_supported(t))
                .collect();
            types.sort_by(|a, b| compare_service_types(a, b));
            types
        };

        SupportedServices {
            database_services: list(ServiceCategory::Database),
            messaging_services: list(ServiceCategory::Messaging),
            dashboard_services: list(ServiceCategory::Dashboard),
            pipeline_services: list(ServiceCategory::Pipeline),
            mlmodel_services: list(ServiceCategory::MlModel),
            metadata_services: list(ServiceCategory::Metadata),
            storage_services: list(ServiceCategory::Storage),
            search_services: list(ServiceCategory::Search),
        }
    }

    /// Connection form for a service type within a category
    ///
    /// Types outside the category get an empty schema with the common UI hints.
    pub fn connection_schema(
        &self,
        category: ServiceCategory,
        service_type: &str,
    ) -> ServiceConfigSchema {
        let schema = match self.get(service_type) {
            Some(entry) if entry.category == category => json!({
                "$ref": format!(
                    "connectionSchemas/connections/{}/{}Connection.json",
                    category.schema_dir(),
                    schema_file_stem(entry.service_type)
                )
            }),
            _ => json!({}),
        };

        ServiceConfigSchema {
            schema,
            ui_schema: common_ui_schema(),
        }
    }
}

/// Orders service types alphabetically with custom types last
pub fn compare_service_types(a: &str, b: &str) -> Ordering {
    let a_custom = a.contains("Custom");
    let b_custom = b.contains("Custom");

    a_custom
        .cmp(&b_custom)
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// `S3` -> `s3`, `BigQuery` -> `bigQuery`
fn schema_file_stem(service_type: &str) -> String {
    if service_type
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return service_type.to_lowercase();
    }

    let mut chars = service_type.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn common_ui_schema() -> Value {
    let hidden = json!({ "ui:widget": "hidden", "ui:hideError": true });
    let mut defaults = serde_json::Map::new();
    for field in [
        "supportsMetadataExtraction",
        "supportsUsageExtraction",
        "supportsLineageExtraction",
        "supportsProfiler",
        "supportsDatabase",
        "supportsQueryComment",
        "supportsDBTExtraction",
        "type",
    ] {
        defaults.insert(field.to_string(), hidden.clone());
    }

    let mut schema = defaults.clone();
    schema.insert("connection".to_string(), Value::Object(defaults));
    Value::Object(schema)
}
