use crate::model::{AssetRecord, FetchError};

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self) -> Result<Vec<AssetRecord>, FetchError>;
}
