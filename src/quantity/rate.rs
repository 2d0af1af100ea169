use crate::quantity::{cost::Cost, energy::KilowattHours};

quantity!(
    /// Currency per kilowatt-hour.
    KilowattHourRate, suffix: "/kWh", precision: 2
);

implement_mul!(KilowattHours, KilowattHourRate, Cost);
