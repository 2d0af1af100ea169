use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::{
    core::{month::Month, reading::MeterReading},
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

/// Reason shown when a failed submission carries no usable message.
pub const FALLBACK_FAILURE_REASON: &str = "Failed to compute the bill";

/// Unit or submeter identifier.
///
/// The billing service is not consistent here and sends either strings or numbers.
#[derive(
    Clone,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(from = "RawId")]
pub struct Id(String);

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for Id {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        }
    }
}

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    #[default]
    #[display("pending")]
    Pending,

    #[display("computed")]
    Computed,

    #[display("paid")]
    Paid,

    #[serde(other)]
    #[display("unknown")]
    Unknown,
}

/// Bill of a single unit for the selected month.
#[must_use]
#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnitBill {
    #[serde(default)]
    pub status: BillStatus,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub previous_reading: KilowattHours,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub current_reading: KilowattHours,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub rate: Option<KilowattHourRate>,
}

impl UnitBill {
    pub const fn reading(&self) -> MeterReading {
        MeterReading::new(self.previous_reading, self.current_reading)
    }
}

#[must_use]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnitRecord {
    pub unit_id: Id,

    pub submeter_id: Id,

    #[serde(default)]
    pub tenant_name: String,

    /// Absent until the first reading is recorded for the month.
    #[serde(default)]
    pub bill: Option<UnitBill>,
}

impl UnitRecord {
    pub fn reading(&self) -> MeterReading {
        self.bill.as_ref().map(UnitBill::reading).unwrap_or_default()
    }

    /// Unit's own rate, falling back to the building default.
    pub fn rate_or(&self, default: Option<KilowattHourRate>) -> KilowattHourRate {
        self.bill.as_ref().and_then(|bill| bill.rate).or(default).unwrap_or_default()
    }
}

/// Building-level totals for a month.
#[must_use]
#[serde_as]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BillReceipt {
    /// Default rate for the units that do not have their own.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub rate: Option<KilowattHourRate>,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub total_consumption: KilowattHours,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub total_amount: Cost,
}

#[must_use]
pub struct MonthlyBills {
    pub records: Vec<UnitRecord>,
    pub receipt: BillReceipt,
}

#[must_use]
#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalculationDetail {
    pub unit_id: Id,

    pub submeter_id: Id,

    #[serde(default)]
    pub tenant_name: String,

    #[serde(default)]
    pub status: BillStatus,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub previous_reading: KilowattHours,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub current_reading: KilowattHours,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub rate: Option<KilowattHourRate>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub consumption: Option<KilowattHours>,

    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub amount: Option<Cost>,
}

impl CalculationDetail {
    pub const fn reading(&self) -> MeterReading {
        MeterReading::new(self.previous_reading, self.current_reading)
    }
}

/// Calculation detail of a unit together with the building receipt.
#[must_use]
pub struct CalculationReport {
    pub detail: CalculationDetail,
    pub receipt: BillReceipt,
}

impl CalculationReport {
    pub fn rate(&self) -> KilowattHourRate {
        self.detail.rate.or(self.receipt.rate).unwrap_or_default()
    }
}

/// Everything needed to compute one unit's bill.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComputationInput {
    pub unit_id: Id,
    pub month: Month,
    pub reading: MeterReading,
    pub rate: KilowattHourRate,
}

/// Outcome of a bill submission, as decided by the service adapter.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ComputationResult {
    Success,
    Failure(String),
}

impl ComputationResult {
    /// Build the failure from a transport or application fault.
    pub fn from_fault(error: &Error) -> Self {
        let message = format!("{error:#}");
        if message.trim().is_empty() {
            Self::Failure(FALLBACK_FAILURE_REASON.to_owned())
        } else {
            Self::Failure(message)
        }
    }
}

#[must_use]
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBillPoint {
    pub month: String,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub total_bill: Cost,
}

#[must_use]
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub month: String,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub rate: KilowattHourRate,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_unit_record_ok() -> Result {
        // language=json
        let body = r#"{
            "unit_id": 12,
            "submeter_id": "SM-0012",
            "tenant_name": "Dela Cruz",
            "bill": {
                "status": "computed",
                "previous_reading": "100.5",
                "current_reading": 150.5,
                "rate": "12.5"
            }
        }"#;
        let record = serde_json::from_str::<UnitRecord>(body)?;
        assert_eq!(record.unit_id, Id::from("12"));
        assert_eq!(record.submeter_id, Id::from("SM-0012"));
        let bill = record.bill.context("the bill is missing")?;
        assert_eq!(bill.status, BillStatus::Computed);
        assert_abs_diff_eq!(bill.previous_reading.0, 100.5);
        assert_abs_diff_eq!(bill.current_reading.0, 150.5);
        assert_eq!(bill.rate, Some(KilowattHourRate(12.5)));
        Ok(())
    }

    #[test]
    fn test_unit_record_without_bill_ok() -> Result {
        // language=json
        let body = r#"{"unit_id": "A-1", "submeter_id": 7, "tenant_name": "Santos"}"#;
        let record = serde_json::from_str::<UnitRecord>(body)?;
        assert!(record.bill.is_none());
        assert_eq!(record.reading(), MeterReading::default());
        assert_eq!(record.rate_or(Some(KilowattHourRate(11.0))), KilowattHourRate(11.0));
        assert_eq!(record.rate_or(None), KilowattHourRate::ZERO);
        Ok(())
    }

    #[test]
    fn test_unknown_bill_status_ok() -> Result {
        let status = serde_json::from_str::<BillStatus>(r#""overdue""#)?;
        assert_eq!(status, BillStatus::Unknown);
        Ok(())
    }

    #[test]
    fn test_computation_input_serialization() -> Result {
        let input = ComputationInput {
            unit_id: Id::from("12"),
            month: "2024-05".parse()?,
            reading: MeterReading::new(KilowattHours(100.0), KilowattHours(150.0)),
            rate: KilowattHourRate(12.5),
        };
        assert_eq!(
            serde_json::to_value(&input)?,
            serde_json::json!({
                "unit_id": "12",
                "month": "2024-05",
                "reading": {"previous": 100.0, "current": 150.0},
                "rate": 12.5,
            }),
        );
        Ok(())
    }

    #[test]
    fn test_failure_from_fault() {
        assert_eq!(
            ComputationResult::from_fault(&anyhow!("connection reset")),
            ComputationResult::Failure("connection reset".to_owned()),
        );
        assert_eq!(
            ComputationResult::from_fault(
                &anyhow!("connection refused").context("failed to call `bills/compute`"),
            ),
            ComputationResult::Failure(
                "failed to call `bills/compute`: connection refused".to_owned(),
            ),
        );
        assert_eq!(
            ComputationResult::from_fault(&anyhow!("")),
            ComputationResult::Failure(FALLBACK_FAILURE_REASON.to_owned()),
        );
    }
}
