//! Table schema description (pure data).
//!
//! Describes the task table independently of any SDK so the same value can
//! drive table provisioning and be inspected in tests.

/// Attribute name of the partition key.
pub const USER_ID_ATTR: &str = "userId";
/// Attribute name of the sort key.
pub const TODO_ID_ATTR: &str = "todoId";
/// Attribute name of the creation timestamp, the sort key of the listing index.
pub const CREATED_AT_ATTR: &str = "createdAt";

pub const NAME_ATTR: &str = "name";
pub const DUE_DATE_ATTR: &str = "dueDate";
pub const DONE_ATTR: &str = "done";
pub const ATTACHMENT_URL_ATTR: &str = "attachmentUrl";

/// Default table name.
pub const DEFAULT_TABLE_NAME: &str = "todos";
/// Default name of the local secondary index ordering a user's tasks by creation.
pub const DEFAULT_CREATED_AT_INDEX: &str = "CreatedAtIndex";

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: KeyAttribute,
    pub local_indexes: Vec<LocalIndexConfig>,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

impl KeyAttribute {
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: AttributeType::String,
        }
    }
}

/// Key attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

/// Local Secondary Index configuration.
///
/// Shares the table's partition key; only the sort key differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalIndexConfig {
    pub name: String,
    pub sort_key: KeyAttribute,
    pub projection: ProjectionType,
}

/// Index projection type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionType {
    All,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Renames the creation-ordered index.
    pub fn with_created_at_index(mut self, name: &str) -> Self {
        for index in &mut self.local_indexes {
            if index.sort_key.name == CREATED_AT_ATTR {
                index.name = name.to_string();
            }
        }
        self
    }

    /// Returns the name of the index sorted by creation time, if any.
    pub fn created_at_index(&self) -> Option<&str> {
        self.local_indexes
            .iter()
            .find(|index| index.sort_key.name == CREATED_AT_ATTR)
            .map(|index| index.name.as_str())
    }
}

/// Returns the canonical table configuration for tasks.
pub fn todos_table_config() -> TableConfig {
    TableConfig {
        table_name: DEFAULT_TABLE_NAME.to_string(),
        partition_key: KeyAttribute::string(USER_ID_ATTR),
        sort_key: KeyAttribute::string(TODO_ID_ATTR),
        local_indexes: vec![LocalIndexConfig {
            name: DEFAULT_CREATED_AT_INDEX.to_string(),
            sort_key: KeyAttribute::string(CREATED_AT_ATTR),
            projection: ProjectionType::All,
        }],
        billing_mode: BillingMode::PayPerRequest,
    }
}
