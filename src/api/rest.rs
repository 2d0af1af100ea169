//! JSON-over-HTTP billing service client.

mod response;

use std::time::Duration;

use async_trait::async_trait;
use clap::crate_name;
use http::{
    StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue},
};
use reqwest::{Client, Url};
use serde::{Serialize, de::DeserializeOwned};

use self::response::{
    CalculationDetailResponse,
    MonthlyBillsResponse,
    SeriesResponse,
    SubmitResponse,
};
use crate::{
    api::{
        BillingService,
        models::{
            CalculationReport,
            ComputationInput,
            ComputationResult,
            Id,
            MonthlyBillPoint,
            MonthlyBills,
            RatePoint,
        },
    },
    core::month::Month,
    prelude::*,
};

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn new(base_url: Url, access_token: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(access_token) = access_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {access_token}"))
                .context("invalid access token")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let client = Client::builder()
            .user_agent(crate_name!())
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("invalid base URL: `{}`", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(path = ?segments))]
    async fn get<Q: Serialize + Sync, R: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &Q,
    ) -> Result<R> {
        let path = segments.join("/");
        let response = self
            .client
            .get(self.url(segments)?)
            .query(query)
            .send()
            .await
            .with_context(|| format!("failed to call `{path}`"))?
            .error_for_status()
            .with_context(|| format!("`{path}` failed"))?
            .json::<serde_json::Value>()
            .await
            .with_context(|| format!("failed to deserialize `{path}` response JSON"))?;
        debug!(?response, "call succeeded");
        serde_json::from_value(response)
            .with_context(|| format!("failed to deserialize `{path}` response structure"))
    }
}

#[derive(Serialize)]
struct MonthQuery {
    month: Month,
}

#[async_trait]
impl BillingService for Api {
    #[instrument(skip_all, fields(month = %month))]
    async fn fetch_monthly_bills(&self, month: Month) -> Result<MonthlyBills> {
        info!("fetching…");
        let bills = MonthlyBills::try_from(
            self.get::<_, MonthlyBillsResponse>(&["bills"], &MonthQuery { month }).await?,
        )?;
        info!(n_units = bills.records.len(), "fetched");
        Ok(bills)
    }

    #[instrument(skip_all, fields(unit_id = %unit_id, month = %month))]
    async fn fetch_calculation_detail(
        &self,
        unit_id: &Id,
        month: Month,
    ) -> Result<CalculationReport> {
        info!("fetching…");
        let response: CalculationDetailResponse =
            self.get(&["bills", &unit_id.to_string()], &MonthQuery { month }).await?;
        Ok(response.into())
    }

    #[instrument(skip_all, fields(unit_id = %input.unit_id, month = %input.month))]
    async fn submit_computation(&self, input: &ComputationInput) -> Result<ComputationResult> {
        const PATH: &str = "bills/compute";

        info!(reading = ?input.reading, rate = ?input.rate, "submitting…");
        let response = self
            .client
            .post(self.url(&["bills", "compute"])?)
            .json(input)
            .send()
            .await
            .with_context(|| format!("failed to call `{PATH}`"))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("failed to read `{PATH}` response body"))?;
        let result = parse_submit_response(status, &body)?;
        debug!(?result, "submission completed");
        Ok(result)
    }

    #[instrument(skip_all)]
    async fn fetch_bill_history(&self) -> Result<Vec<MonthlyBillPoint>> {
        let response: SeriesResponse<MonthlyBillPoint> =
            self.get(&["analytics", "bills"], &()).await?;
        info!(n_points = response.data.len(), "fetched the bill history");
        Ok(response.data)
    }

    #[instrument(skip_all)]
    async fn fetch_rate_history(&self) -> Result<Vec<RatePoint>> {
        let response: SeriesResponse<RatePoint> = self.get(&["analytics", "rates"], &()).await?;
        info!(n_points = response.data.len(), "fetched the rate history");
        Ok(response.data)
    }
}

/// Turn the raw submission response into the result.
///
/// An unreadable body is only tolerated when the HTTP status has already told the outcome.
fn parse_submit_response(status: StatusCode, body: &[u8]) -> Result<ComputationResult> {
    let response = match serde_json::from_slice::<SubmitResponse>(body) {
        Ok(response) => response,
        Err(_) if status.is_success() => SubmitResponse::default(),
        Err(error) => {
            return Err(error).with_context(|| format!("`bills/compute` failed with {status}"));
        }
    };
    Ok(response.or_status(status).into())
}
