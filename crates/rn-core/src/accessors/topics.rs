use crate::error::Result;
use crate::models::Topic;
use crate::traits::Gateway;

pub async fn fetch_topics(gateway: &dyn Gateway) -> Result<Vec<Topic>> {
    Ok(gateway.select_topics().await?)
}
