quantity!(
    /// Billed amount in the building's currency.
    ///
    /// Currency symbols are left to the presentation layer.
    Cost, suffix: "", precision: 2
);
