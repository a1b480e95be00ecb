//! Table provisioning (Imperative Shell around a pure plan).

use std::time::Duration;

use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, LocalSecondaryIndex, Projection,
    ProjectionType, ScalarAttributeType, TableStatus,
};
use todos_core::storage::schema::{self, AttributeType, KeyAttribute};
use todos_core::storage::{RepositoryError, Result, TableConfig};

use super::error::{map_describe_table_error, map_provisioning_error};
use super::DynamoDbRepository;

const ACTIVATION_ATTEMPTS: usize = 60;
const ACTIVATION_DELAY: Duration = Duration::from_secs(2);

/// What `ensure_table` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    AlreadyExists,
}

/// Observed state of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableState {
    Missing,
    Active,
    Pending,
}

/// Decides what to do given the current table state.
fn plan(state: TableState) -> ProvisionOutcome {
    match state {
        TableState::Missing => ProvisionOutcome::Created,
        TableState::Active | TableState::Pending => ProvisionOutcome::AlreadyExists,
    }
}

fn to_scalar_type(attr_type: &AttributeType) -> ScalarAttributeType {
    match attr_type {
        AttributeType::String => ScalarAttributeType::S,
    }
}

fn key_element(key: &KeyAttribute, key_type: KeyType) -> Result<KeySchemaElement> {
    KeySchemaElement::builder()
        .attribute_name(&key.name)
        .key_type(key_type)
        .build()
        .map_err(map_provisioning_error)
}

fn attribute_definition(key: &KeyAttribute) -> Result<AttributeDefinition> {
    AttributeDefinition::builder()
        .attribute_name(&key.name)
        .attribute_type(to_scalar_type(&key.attribute_type))
        .build()
        .map_err(map_provisioning_error)
}

fn to_billing_mode(mode: schema::BillingMode) -> BillingMode {
    match mode {
        schema::BillingMode::PayPerRequest => BillingMode::PayPerRequest,
    }
}

fn to_projection_type(projection: schema::ProjectionType) -> ProjectionType {
    match projection {
        schema::ProjectionType::All => ProjectionType::All,
    }
}

impl DynamoDbRepository {
    /// Creates the table described by [`DynamoDbRepository::table_config`]
    /// unless it already exists, then waits for it to become active.
    pub async fn ensure_table(&self) -> Result<ProvisionOutcome> {
        let outcome = plan(self.table_state().await?);
        if outcome == ProvisionOutcome::Created {
            self.create_table(&self.table_config()).await?;
        }
        self.wait_for_table_active().await?;
        Ok(outcome)
    }

    async fn table_state(&self) -> Result<TableState> {
        match self
            .client
            .describe_table()
            .table_name(self.table_name())
            .send()
            .await
        {
            Ok(response) => {
                let status = response.table().and_then(|table| table.table_status());
                Ok(match status {
                    Some(TableStatus::Active) => TableState::Active,
                    _ => TableState::Pending,
                })
            }
            Err(err) => match map_describe_table_error(err) {
                None => Ok(TableState::Missing),
                Some(mapped) => Err(mapped),
            },
        }
    }

    async fn create_table(&self, config: &TableConfig) -> Result<()> {
        let mut attribute_definitions = vec![
            attribute_definition(&config.partition_key)?,
            attribute_definition(&config.sort_key)?,
        ];

        let mut request = self
            .client
            .create_table()
            .table_name(&config.table_name)
            .key_schema(key_element(&config.partition_key, KeyType::Hash)?)
            .key_schema(key_element(&config.sort_key, KeyType::Range)?)
            .billing_mode(to_billing_mode(config.billing_mode));

        for index in &config.local_indexes {
            if !attribute_definitions
                .iter()
                .any(|a| a.attribute_name() == index.sort_key.name)
            {
                attribute_definitions.push(attribute_definition(&index.sort_key)?);
            }

            request = request.local_secondary_indexes(
                LocalSecondaryIndex::builder()
                    .index_name(&index.name)
                    .key_schema(key_element(&config.partition_key, KeyType::Hash)?)
                    .key_schema(key_element(&index.sort_key, KeyType::Range)?)
                    .projection(
                        Projection::builder()
                            .projection_type(to_projection_type(index.projection))
                            .build(),
                    )
                    .build()
                    .map_err(map_provisioning_error)?,
            );
        }

        request
            .set_attribute_definitions(Some(attribute_definitions))
            .send()
            .await
            .map_err(map_provisioning_error)?;
        Ok(())
    }

    async fn wait_for_table_active(&self) -> Result<()> {
        for _ in 0..ACTIVATION_ATTEMPTS {
            if self.table_state().await? == TableState::Active {
                return Ok(());
            }
            tokio::time::sleep(ACTIVATION_DELAY).await;
        }

        Err(RepositoryError::Unavailable(format!(
            "Timeout waiting for table '{}' to become active",
            self.table_name()
        )))
    }
}
