use crate::error::Result;
use crate::models::User;
use crate::traits::Gateway;

pub async fn fetch_users(gateway: &dyn Gateway) -> Result<Vec<User>> {
    Ok(gateway.select_users().await?)
}
