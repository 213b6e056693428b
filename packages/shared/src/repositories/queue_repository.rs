use crate::models::queue::QueueUser;
use crate::repositories::errors::queue_repository_errors::QueueRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::to_item;

/// Hand-off to the external matchmaker: waiting players are written here
/// and picked up from the table by the pairing process.
#[async_trait]
pub trait QueueRepository: Send + Sync {
    async fn join_queue(&self, user: &QueueUser) -> Result<(), QueueRepositoryError>;
    async fn leave_queue(&self, player_id: &str) -> Result<(), QueueRepositoryError>;
}

pub struct DynamoDbQueueRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbQueueRepository {
    pub fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl QueueRepository for DynamoDbQueueRepository {
    async fn join_queue(&self, user: &QueueUser) -> Result<(), QueueRepositoryError> {
        let item = to_item(user).map_err(|e| QueueRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| QueueRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }

    async fn leave_queue(&self, player_id: &str) -> Result<(), QueueRepositoryError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("player_id", AttributeValue::S(player_id.to_string()))
            .send()
            .await
            .map_err(|e| QueueRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }
}
