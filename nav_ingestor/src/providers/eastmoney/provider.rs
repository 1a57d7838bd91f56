use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use snafu::{ResultExt, ensure};

use crate::models::{nav::NavRecord, request_params::NavRequestParams};
use crate::providers::{
    ApiSnafu, ClientBuildSnafu, NavProvider, PayloadSnafu, ProviderError, ProviderInitError,
    ReqwestSnafu,
    eastmoney::{
        params::construct_params,
        response::{LsjzEnvelope, extract_jsonp_payload},
    },
};

const BASE_URL: &str = "http://api.fund.eastmoney.com/f10/lsjz";

// The endpoint rejects or degrades requests that do not look like they come
// from the fund-detail pages, hence the fixed Referer and browser User-Agent.
const REFERER: &str = "http://fundf10.eastmoney.com/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct EastmoneyProvider {
    client: Client,
    base_url: String,
}

impl EastmoneyProvider {
    /// Creates a new Eastmoney provider with the fixed browser-like headers
    /// and request timeout applied to every call.
    pub fn new() -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::REFERER, header::HeaderValue::from_static(REFERER));
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }
}

#[async_trait]
impl NavProvider for EastmoneyProvider {
    async fn fetch_nav_history(
        &self,
        params: NavRequestParams,
    ) -> Result<Vec<NavRecord>, ProviderError> {
        let query = construct_params(&params);

        tracing::debug!(fund_code = %params.fund_code, "requesting NAV history page");

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .context(ReqwestSnafu)?;

        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown API error".to_string());
            return ApiSnafu { message }.fail();
        }

        let body = response.text().await.context(ReqwestSnafu)?;
        let payload = extract_jsonp_payload(&body)?;
        let envelope: LsjzEnvelope = match serde_json::from_str(payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                return PayloadSnafu {
                    message: format!("JSON decode failed: {e}"),
                }
                .fail();
            }
        };

        ensure!(
            envelope.err_code == 0,
            ApiSnafu {
                message: envelope
                    .err_msg
                    .unwrap_or_else(|| format!("provider error code {}", envelope.err_code)),
            }
        );

        let records = envelope
            .data
            .map(|data| data.lsjz_list)
            .unwrap_or_default()
            .into_iter()
            .map(NavRecord::from)
            .collect();

        Ok(records)
    }
}
