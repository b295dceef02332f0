use contracts::domain::a003_broker::Broker;

use crate::shared::api::ApiClient;

pub async fn fetch_brokers(client: &ApiClient) -> Result<Vec<Broker>, String> {
    client.get("/brokers").await.into_result()
}
