//! Asset records published for Hive databases and tables

use crate::hive::config::HiveConfig;
use crate::hive::describe::{Classification, ColumnDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DATABASE_ASSET_TYPE: &str = "hive_database";
pub const TABLE_ASSET_TYPE: &str = "hive_table";
const ASSET_SOURCE: &str = "hive";
const ASSET_STATUS: &str = "active";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub info: AssetInfo,
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    pub relationships: Vec<AssetRelationship>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInfo {
    pub name: String,
    pub qualified_name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub status: String,
    pub description: String,
    pub source: String,
    pub source_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRelationship {
    pub relationship_type: String,
    pub asset_id: String,
}

impl Asset {
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    fn put_property(&mut self, key: &str, value: impl Into<Value>) {
        self.properties.insert(key.to_string(), value.into());
    }
}

/// Builds asset records with consistent IDs and common properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBuilder {
    id_prefix: String,
    host: String,
    port: u16,
    owner: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

impl AssetBuilder {
    /// `id_prefix` defaults to `hive-<host>`; a blank owner is omitted
    pub fn new(host: &str, port: u16, id_prefix: Option<&str>, owner: Option<&str>) -> Self {
        Self {
            id_prefix: non_blank(id_prefix).unwrap_or_else(|| format!("hive-{}", host)),
            host: host.to_string(),
            port,
            owner: non_blank(owner),
        }
    }

    pub fn from_config(config: &HiveConfig) -> Self {
        Self::new(
            &config.connection.host,
            config.connection.port,
            config.assets.id_prefix.as_deref(),
            config.assets.owner.as_deref(),
        )
    }

    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    pub fn database_id(&self, database: &str) -> String {
        format!("{}.{}", self.id_prefix, database)
    }

    pub fn table_id(&self, database: &str, table: &str) -> String {
        format!("{}.{}.{}", self.id_prefix, database, table)
    }

    fn put_common_properties(&self, asset: &mut Asset, updated_at: i64) {
        asset.put_property("host", self.host.as_str());
        asset.put_property("port", self.port.to_string());
        asset.put_property("updatedAt", updated_at.to_string());
        if let Some(owner) = &self.owner {
            asset.put_property("owner", owner.as_str());
        }
    }

    pub fn database_asset(&self, database: &str, updated_at: i64) -> Asset {
        let mut asset = Asset {
            id: self.database_id(database),
            info: AssetInfo {
                name: database.to_string(),
                qualified_name: database.to_string(),
                asset_type: DATABASE_ASSET_TYPE.to_string(),
                status: ASSET_STATUS.to_string(),
                description: format!("Hive database: {}", database),
                source: ASSET_SOURCE.to_string(),
                source_id: database.to_string(),
            },
            columns: Vec::new(),
            relationships: Vec::new(),
            properties: Map::new(),
        };
        self.put_common_properties(&mut asset, updated_at);
        asset
    }

    /// Table asset with its columns, a `parent` link to the database, and the
    /// decoded detail section when there is one
    pub fn table_asset(
        &self,
        database: &str,
        table: &str,
        classification: Classification,
        updated_at: i64,
    ) -> Asset {
        let qualified_name = format!("{}.{}", database, table);
        let mut asset = Asset {
            id: self.table_id(database, table),
            info: AssetInfo {
                name: table.to_string(),
                qualified_name: qualified_name.clone(),
                asset_type: TABLE_ASSET_TYPE.to_string(),
                status: ASSET_STATUS.to_string(),
                description: format!("Hive table: {}", table),
                source: ASSET_SOURCE.to_string(),
                source_id: qualified_name,
            },
            columns: classification.columns,
            relationships: vec![AssetRelationship {
                relationship_type: "parent".to_string(),
                asset_id: self.database_id(database),
            }],
            properties: Map::new(),
        };

        if let Some(outcome) = classification.decoded {
            let key = outcome.property_name();
            asset.put_property(key, outcome.into_property_value());
        }
        asset.put_property("database", database);
        self.put_common_properties(&mut asset, updated_at);
        asset
    }
}
