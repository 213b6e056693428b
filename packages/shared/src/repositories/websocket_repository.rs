use async_trait::async_trait;
use aws_sdk_apigatewaymanagement::{primitives::Blob, Client as ApiGatewayClient};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::env;
use tracing::info;

#[async_trait]
pub trait WebSocketRepository: Send + Sync {
    async fn store_connection(
        &self,
        player_id: &str,
        connection_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn remove_connection_by_id(
        &self,
        connection_id: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_connection_id(
        &self,
        player_id: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_player_id(
        &self,
        connection_id: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>>;

    async fn send_message(
        &self,
        connection_id: &str,
        message: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

pub struct DynamoDbWebSocketRepository {
    dynamodb_client: DynamoDbClient,
    api_gateway_client: ApiGatewayClient,
    table_name: String,
}

impl DynamoDbWebSocketRepository {
    pub fn new(
        dynamodb_client: DynamoDbClient,
        sdk_config: &aws_config::SdkConfig,
        table_name: &str,
        endpoint: Option<&str>,
    ) -> Self {
        let endpoint = endpoint
            .map(str::to_string)
            .unwrap_or_else(Self::default_api_gateway_endpoint);
        let api_gateway_config = aws_sdk_apigatewaymanagement::config::Builder::from(sdk_config)
            .endpoint_url(endpoint)
            .build();

        Self {
            dynamodb_client,
            api_gateway_client: ApiGatewayClient::from_conf(api_gateway_config),
            table_name: table_name.to_string(),
        }
    }

    // Format: https://{api-id}.execute-api.{region}.amazonaws.com/{stage}
    fn default_api_gateway_endpoint() -> String {
        let region = env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string());
        let api_id = env::var("WEBSOCKET_API_ID").unwrap_or_default();
        let stage = env::var("STAGE").unwrap_or_else(|_| "dev".to_string());

        format!(
            "https://{}.execute-api.{}.amazonaws.com/{}",
            api_id, region, stage
        )
    }

    fn string_attribute(
        item: &std::collections::HashMap<String, AttributeValue>,
        name: &str,
    ) -> Option<String> {
        match item.get(name) {
            Some(AttributeValue::S(value)) => Some(value.clone()),
            _ => None,
        }
    }
}

#[async_trait]
impl WebSocketRepository for DynamoDbWebSocketRepository {
    async fn store_connection(
        &self,
        player_id: &str,
        connection_id: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .item("player_id", AttributeValue::S(player_id.to_string()))
            .item("connection_id", AttributeValue::S(connection_id.to_string()))
            .send()
            .await?;

        info!("Stored WebSocket connection for player: {}", player_id);
        Ok(())
    }

    async fn remove_connection_by_id(
        &self,
        connection_id: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        let player_id = self.get_player_id(connection_id).await?;

        if let Some(player_id) = &player_id {
            info!("Removing connection for player: {}", player_id);
            self.dynamodb_client
                .delete_item()
                .table_name(&self.table_name)
                .key("player_id", AttributeValue::S(player_id.clone()))
                .condition_expression("connection_id = :connection_id")
                .expression_attribute_values(
                    ":connection_id",
                    AttributeValue::S(connection_id.to_string()),
                )
                .send()
                .await?;
        }

        info!("Removed WebSocket connection by ID: {}", connection_id);
        Ok(player_id)
    }

    async fn get_connection_id(
        &self,
        player_id: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        let result = self
            .dynamodb_client
            .get_item()
            .table_name(&self.table_name)
            .key("player_id", AttributeValue::S(player_id.to_string()))
            .send()
            .await?;

        Ok(result
            .item
            .as_ref()
            .and_then(|item| Self::string_attribute(item, "connection_id")))
    }

    async fn get_player_id(
        &self,
        connection_id: &str,
    ) -> Result<Option<String>, Box<dyn std::error::Error + Send + Sync>> {
        let mut start_key = None;

        loop {
            let output = self
                .dynamodb_client
                .scan()
                .table_name(&self.table_name)
                .filter_expression("connection_id = :connection_id")
                .expression_attribute_values(
                    ":connection_id",
                    AttributeValue::S(connection_id.to_string()),
                )
                .set_exclusive_start_key(start_key)
                .send()
                .await?;

            if let Some(player_id) = output
                .items
                .unwrap_or_default()
                .iter()
                .find_map(|item| Self::string_attribute(item, "player_id"))
            {
                return Ok(Some(player_id));
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => return Ok(None),
            }
        }
    }

    async fn send_message(
        &self,
        connection_id: &str,
        message: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.api_gateway_client
            .post_to_connection()
            .connection_id(connection_id)
            .data(Blob::new(message.as_bytes()))
            .send()
            .await?;

        info!("Sent message to connection: {}", connection_id);
        Ok(())
    }
}
