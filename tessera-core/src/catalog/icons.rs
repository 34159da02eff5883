//! Service icon asset paths
//!
//! Paths are relative to the UI asset root; the image files themselves are
//! served by the front end.

// Database services
pub const MYSQL: &str = "assets/img/service-icon-mysql.png";
pub const REDSHIFT: &str = "assets/img/service-icon-redshift.png";
pub const BIGQUERY: &str = "assets/img/service-icon-bigquery.png";
pub const BIGTABLE: &str = "assets/img/service-icon-bigtable.png";
pub const HIVE: &str = "assets/img/service-icon-hive.png";
pub const IMPALA: &str = "assets/img/service-icon-impala.png";
pub const POSTGRES: &str = "assets/img/service-icon-postgres.png";
pub const ORACLE: &str = "assets/img/service-icon-oracle.png";
pub const SNOWFLAKE: &str = "assets/img/service-icon-snowflake.png";
pub const MSSQL: &str = "assets/img/service-icon-mssql.png";
pub const ATHENA: &str = "assets/img/service-icon-athena.png";
pub const PRESTO: &str = "assets/img/service-icon-presto.png";
pub const TRINO: &str = "assets/img/service-icon-trino.png";
pub const GLUE: &str = "assets/img/service-icon-glue.png";
pub const DOMO: &str = "assets/img/service-icon-domo.png";
pub const MARIADB: &str = "assets/img/service-icon-mariadb.png";
pub const VERTICA: &str = "assets/img/service-icon-vertica.png";
pub const AZURESQL: &str = "assets/img/service-icon-azuresql.png";
pub const CLICKHOUSE: &str = "assets/img/service-icon-clickhouse.png";
pub const DATABRICKS: &str = "assets/img/service-icon-databrick.png";
pub const UNITY_CATALOG: &str = "assets/img/service-icon-unitycatalog.png";
pub const IBMDB2: &str = "assets/img/service-icon-ibmdb2.png";
pub const DORIS: &str = "assets/img/service-icon-doris.png";
pub const DRUID: &str = "assets/img/service-icon-druid.png";
pub const DYNAMODB: &str = "assets/img/service-icon-dynamodb.png";
pub const SINGLESTORE: &str = "assets/img/service-icon-singlestore.png";
pub const SQLITE: &str = "assets/img/service-icon-sqlite.png";
pub const SALESFORCE: &str = "assets/img/service-icon-salesforce.png";
pub const SAP_HANA: &str = "assets/img/service-icon-sap-hana.png";
pub const DELTALAKE: &str = "assets/img/service-icon-delta-lake.png";
pub const PINOT: &str = "assets/img/service-icon-pinot.png";
pub const DATALAKE: &str = "assets/img/service-icon-datalake.png";
pub const MONGODB: &str = "assets/img/service-icon-mongodb.png";
pub const SAS: &str = "assets/img/service-icon-sas.png";
pub const COUCHBASE: &str = "assets/img/service-icon-couchbase.png";
pub const GREENPLUM: &str = "assets/img/service-icon-greenplum.png";
pub const ICEBERG: &str = "assets/img/service-icon-iceberg.png";
pub const TERADATA: &str = "assets/img/service-icon-teradata.png";

// Messaging services
pub const KAFKA: &str = "assets/img/service-icon-kafka.png";
pub const REDPANDA: &str = "assets/img/service-icon-redpanda.png";
pub const KINESIS: &str = "assets/img/service-icon-kinesis.png";

// Dashboard services
pub const SUPERSET: &str = "assets/img/service-icon-superset.png";
pub const LOOKER: &str = "assets/img/service-icon-looker.png";
pub const TABLEAU: &str = "assets/img/service-icon-tableau.png";
pub const REDASH: &str = "assets/img/service-icon-redash.png";
pub const METABASE: &str = "assets/img/service-icon-metabase.png";
pub const POWERBI: &str = "assets/img/service-icon-power-bi.png";
pub const QUICKSIGHT: &str = "assets/img/service-icon-quicksight.png";
pub const MODE: &str = "assets/img/service-icon-mode.png";
pub const QLIK_SENSE: &str = "assets/img/service-icon-qlik-sense.png";
pub const LIGHTDASH: &str = "assets/img/service-icon-lightdash.png";

// Pipeline services
pub const AIRFLOW: &str = "assets/img/service-icon-airflow.png";
pub const AIRBYTE: &str = "assets/img/service-icon-airbyte.png";
pub const DAGSTER: &str = "assets/img/service-icon-dagster.png";
pub const FIVETRAN: &str = "assets/img/service-icon-fivetran.png";
pub const DBT: &str = "assets/img/service-icon-dbt.png";
pub const SPARK: &str = "assets/img/service-icon-spark.png";
pub const SPLINE: &str = "assets/img/service-icon-spline.png";
pub const NIFI: &str = "assets/img/service-icon-nifi.png";
pub const OPENLINEAGE: &str = "assets/img/service-icon-openlineage.png";
pub const FLINK: &str = "assets/img/service-icon-flink.png";

// ML model services
pub const MLFLOW: &str = "assets/img/service-icon-mlflow.png";
pub const SCIKIT: &str = "assets/img/service-icon-scikit.png";
pub const SAGEMAKER: &str = "assets/img/service-icon-sagemaker.png";

// Metadata services
pub const AMUNDSEN: &str = "assets/img/service-icon-amundsen.png";
pub const ATLAS: &str = "assets/img/service-icon-atlas.png";
pub const OPENMETADATA: &str = "assets/img/service-icon-openmetadata.png";

// Storage and search services
pub const AMAZON_S3: &str = "assets/img/service-icon-amazon-s3.png";
pub const ELASTIC_SEARCH: &str = "assets/img/service-icon-elasticsearch.png";
pub const OPEN_SEARCH: &str = "assets/img/service-icon-open-search.png";

// Category fallbacks
pub const DATABASE_DEFAULT: &str = "assets/img/database-default.svg";
pub const TOPIC_DEFAULT: &str = "assets/img/topic-default.svg";
pub const DASHBOARD_DEFAULT: &str = "assets/img/dashboard-default.svg";
pub const PIPELINE_DEFAULT: &str = "assets/img/pipeline-default.svg";
pub const ML_MODEL_DEFAULT: &str = "assets/img/ml-model-default.svg";
pub const CUSTOM_STORAGE_DEFAULT: &str = "assets/img/storage-default.svg";

/// Icon of last resort for anything the catalog does not know
pub const DEFAULT_SERVICE: &str = "assets/img/default-service-icon.png";
