use http::StatusCode;
use serde::Deserialize;

use crate::{
    api::models::{
        BillReceipt,
        CalculationDetail,
        CalculationReport,
        ComputationResult,
        FALLBACK_FAILURE_REASON,
        MonthlyBills,
        UnitRecord,
    },
    prelude::*,
};

#[derive(Deserialize)]
pub struct MonthlyBillsResponse {
    #[serde(default = "MonthlyBillsResponse::default_success")]
    success: bool,

    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    data: Vec<UnitRecord>,

    #[serde(default)]
    total_bill: BillReceipt,
}

impl MonthlyBillsResponse {
    const fn default_success() -> bool {
        true
    }
}

impl TryFrom<MonthlyBillsResponse> for MonthlyBills {
    type Error = Error;

    fn try_from(response: MonthlyBillsResponse) -> Result<Self> {
        if !response.success {
            match response.message {
                Some(message) => bail!(r#"failed to fetch the monthly bills ("{message}")"#),
                None => bail!("failed to fetch the monthly bills"),
            }
        }
        Ok(Self { records: response.data, receipt: response.total_bill })
    }
}

#[derive(Deserialize)]
pub struct CalculationDetailResponse {
    data: CalculationDetail,

    #[serde(rename = "TotalBill", default)]
    total_bill: BillReceipt,
}

impl From<CalculationDetailResponse> for CalculationReport {
    fn from(response: CalculationDetailResponse) -> Self {
        Self { detail: response.data, receipt: response.total_bill }
    }
}

#[derive(Deserialize)]
pub struct SeriesResponse<T> {
    pub data: Vec<T>,
}

/// Submission response of the billing service.
///
/// Acceptance may be reported in any of three places, and any one of them is enough:
/// the top-level `success`, the nested `data.success`, or a 2xx `status`.
#[derive(Default, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    success: Option<bool>,

    #[serde(default)]
    data: Option<SubmitResponseData>,

    #[serde(default)]
    status: Option<u16>,

    #[serde(default)]
    message: Option<String>,
}

#[derive(Default, Deserialize)]
struct SubmitResponseData {
    #[serde(default)]
    success: Option<bool>,

    #[serde(default)]
    message: Option<String>,
}

impl SubmitResponse {
    /// Fill in the transport status unless the body reports its own.
    pub fn or_status(mut self, status: StatusCode) -> Self {
        self.status.get_or_insert(status.as_u16());
        self
    }

    fn is_accepted(&self) -> bool {
        self.success == Some(true)
            || self.data.as_ref().and_then(|data| data.success) == Some(true)
            || self
                .status
                .and_then(|status| StatusCode::from_u16(status).ok())
                .is_some_and(|status| status.is_success())
    }
}

impl From<SubmitResponse> for ComputationResult {
    fn from(response: SubmitResponse) -> Self {
        if response.is_accepted() {
            return Self::Success;
        }
        let reason = response
            .message
            .into_iter()
            .chain(response.data.and_then(|data| data.message))
            .find(|message| !message.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_FAILURE_REASON.to_owned());
        Self::Failure(reason)
    }
}
