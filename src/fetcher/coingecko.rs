use crate::config::AppConfig;
use crate::fetcher::traits::Fetcher;
use crate::model::{AssetRecord, FetchError};
use crate::parser::{MarketParser, Parser};

use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

const USER_AGENT: &str = "coin-snapshot/0.1 (+https://www.coingecko.com/en/api)";

/// Fixed query sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketQuery {
    pub vs_currency: String,
    pub order: &'static str,
    pub per_page: u32,
    pub page: u32,
    pub sparkline: bool,
}

impl MarketQuery {
    pub fn from_config(cfg: &AppConfig) -> Self {
        Self {
            vs_currency: cfg.vs_currency.clone(),
            order: "market_cap_desc",
            per_page: cfg.per_page,
            page: cfg.page,
            sparkline: false,
        }
    }

    pub fn params(&self) -> [(&'static str, String); 5] {
        [
            ("vs_currency", self.vs_currency.clone()),
            ("order", self.order.to_string()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
            ("sparkline", self.sparkline.to_string()),
        ]
    }
}

pub struct CoinGeckoFetcher {
    client: Client,
    url: String,
    query: MarketQuery,
    parser: MarketParser,
}

impl CoinGeckoFetcher {
    pub fn new(cfg: &AppConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(cfg.request_timeout_seconds))
            .build()?;

        Ok(Self::with_client(client, cfg))
    }

    pub fn with_client(client: Client, cfg: &AppConfig) -> Self {
        Self {
            client,
            url: cfg.api_url.clone(),
            query: MarketQuery::from_config(cfg),
            parser: MarketParser::new(),
        }
    }
}

#[async_trait::async_trait]
impl Fetcher for CoinGeckoFetcher {
    async fn fetch(&self) -> Result<Vec<AssetRecord>, FetchError> {
        debug!("GET {} {:?}", self.url, self.query);

        let response = self.client
            .get(&self.url)
            .query(&self.query.params())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let records = self.parser.parse(&body)?;
        info!("Fetched {} assets", records.len());
        Ok(records)
    }
}
