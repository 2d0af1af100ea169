quantity!(
    /// Meter readings and the consumption derived from them.
    KilowattHours, suffix: "kWh", precision: 2
);
