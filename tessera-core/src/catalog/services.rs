//! Known service types per category
//!
//! Each row is `(service type, specific icon, curated display name)`.
//! Service types keep the catalog's canonical casing; lookups are
//! case-insensitive.

use super::icons::*;

pub(super) type ServiceRow = (&'static str, Option<&'static str>, Option<&'static str>);

pub(super) const DATABASE: &[ServiceRow] = &[
    ("BigQuery", Some(BIGQUERY), Some("BigQuery")),
    ("BigTable", Some(BIGTABLE), Some("BigTable")),
    ("Mysql", Some(MYSQL), None),
    ("Redshift", Some(REDSHIFT), None),
    ("Snowflake", Some(SNOWFLAKE), None),
    ("Postgres", Some(POSTGRES), None),
    ("Mssql", Some(MSSQL), None),
    ("Oracle", Some(ORACLE), None),
    ("Athena", Some(ATHENA), None),
    ("Hive", Some(HIVE), None),
    ("Impala", Some(IMPALA), None),
    ("Presto", Some(PRESTO), None),
    ("Trino", Some(TRINO), None),
    ("Vertica", Some(VERTICA), None),
    ("Glue", Some(GLUE), None),
    ("MariaDB", Some(MARIADB), Some("MariaDB")),
    ("Druid", Some(DRUID), None),
    ("Db2", Some(IBMDB2), None),
    ("Clickhouse", Some(CLICKHOUSE), None),
    ("Databricks", Some(DATABRICKS), None),
    ("AzureSQL", Some(AZURESQL), Some("AzureSQL")),
    ("DynamoDB", Some(DYNAMODB), Some("DynamoDB")),
    ("SingleStore", Some(SINGLESTORE), Some("SingleStore")),
    ("SQLite", Some(SQLITE), Some("SQlite")),
    ("DeltaLake", Some(DELTALAKE), Some("DeltaLake")),
    ("Salesforce", Some(SALESFORCE), None),
    ("PinotDB", Some(PINOT), Some("pinotdb")),
    ("Datalake", Some(DATALAKE), None),
    ("DomoDatabase", Some(DOMO), Some("DomoDatabase")),
    ("QueryLog", None, None),
    ("CustomDatabase", None, Some("Custom Database")),
    ("Dbt", None, None),
    ("SapHana", Some(SAP_HANA), Some("SapHana")),
    ("MongoDB", Some(MONGODB), Some("MongoDB")),
    ("Couchbase", Some(COUCHBASE), None),
    ("Greenplum", Some(GREENPLUM), None),
    ("Doris", Some(DORIS), None),
    ("UnityCatalog", Some(UNITY_CATALOG), Some("UnityCatalog")),
    ("SAS", Some(SAS), Some("SAS")),
    ("Iceberg", Some(ICEBERG), None),
    ("Teradata", Some(TERADATA), None),
];

pub(super) const MESSAGING: &[ServiceRow] = &[
    ("Kafka", Some(KAFKA), None),
    ("Redpanda", Some(REDPANDA), None),
    ("Kinesis", Some(KINESIS), None),
    ("CustomMessaging", None, Some("Custom Messaging")),
];

pub(super) const DASHBOARD: &[ServiceRow] = &[
    ("Superset", Some(SUPERSET), None),
    ("Looker", Some(LOOKER), None),
    ("Tableau", Some(TABLEAU), None),
    ("Redash", Some(REDASH), None),
    ("Metabase", Some(METABASE), None),
    ("PowerBI", Some(POWERBI), Some("PowerBI")),
    ("QuickSight", Some(QUICKSIGHT), Some("QuickSight")),
    ("DomoDashboard", Some(DOMO), Some("DomoDashboard")),
    ("Mode", Some(MODE), None),
    ("CustomDashboard", None, Some("Custom Dashboard")),
    ("QlikSense", Some(QLIK_SENSE), Some("QlikSense")),
    ("QlikCloud", Some(QLIK_SENSE), Some("QlikCloud")),
    ("Lightdash", Some(LIGHTDASH), None),
];

pub(super) const PIPELINE: &[ServiceRow] = &[
    ("Airflow", Some(AIRFLOW), None),
    ("GluePipeline", Some(GLUE), Some("Glue Pipeline")),
    ("Airbyte", Some(AIRBYTE), None),
    ("Fivetran", Some(FIVETRAN), None),
    ("Flink", Some(FLINK), None),
    ("Dagster", Some(DAGSTER), None),
    ("Nifi", Some(NIFI), None),
    ("DomoPipeline", Some(DOMO), Some("DomoPipeline")),
    ("CustomPipeline", None, Some("Custom Pipeline")),
    ("DatabricksPipeline", Some(DATABRICKS), Some("DatabricksPipeline")),
    ("Spline", Some(SPLINE), None),
    ("Spark", Some(SPARK), None),
    ("OpenLineage", Some(OPENLINEAGE), Some("OpenLineage")),
    ("KafkaConnect", Some(KAFKA), Some("KafkaConnect")),
    ("DBTCloud", Some(DBT), Some("DBTCloud")),
];

pub(super) const ML_MODEL: &[ServiceRow] = &[
    ("Mlflow", Some(MLFLOW), None),
    ("Sklearn", Some(SCIKIT), None),
    ("CustomMlModel", None, Some("Custom Ml Model")),
    ("SageMaker", Some(SAGEMAKER), Some("SageMaker")),
];

pub(super) const METADATA: &[ServiceRow] = &[
    ("Amundsen", Some(AMUNDSEN), None),
    ("MetadataES", None, None),
    ("OpenMetadata", Some(OPENMETADATA), None),
    ("Atlas", Some(ATLAS), None),
    ("Alation", None, None),
];

pub(super) const STORAGE: &[ServiceRow] = &[
    ("S3", Some(AMAZON_S3), None),
    ("ADLS", None, None),
    ("GCS", None, None),
    ("CustomStorage", None, Some("Custom Storage")),
];

pub(super) const SEARCH: &[ServiceRow] = &[
    ("ElasticSearch", Some(ELASTIC_SEARCH), Some("ElasticSearch")),
    ("OpenSearch", Some(OPEN_SEARCH), None),
    ("CustomSearch", None, Some("Custom Search")),
];

/// Service types hidden from the "add service" lists by default
pub(super) const DEFAULT_UNSUPPORTED: &[&str] = &["ADLS", "QueryLog", "Dbt", "GCS", "Alation"];
