use enumset::{EnumSet, EnumSetType};

/// What the caller is allowed to do with a unit's bill.
#[derive(EnumSetType, Debug)]
pub enum Capability {
    /// Change the readings and the rate.
    Edit,

    /// Submit the computation.
    Submit,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Role {
    /// Read-only access.
    #[default]
    Viewer,

    /// Enters readings and computes bills.
    Operator,

    Admin,
}

impl Role {
    #[must_use]
    pub fn capabilities(self) -> EnumSet<Capability> {
        match self {
            Self::Viewer => EnumSet::empty(),
            Self::Operator | Self::Admin => Capability::Edit | Capability::Submit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_is_read_only() {
        assert!(Role::Viewer.capabilities().is_empty());
    }

    #[test]
    fn test_operator_capabilities() {
        let capabilities = Role::Operator.capabilities();
        assert!(capabilities.contains(Capability::Edit));
        assert!(capabilities.contains(Capability::Submit));
        assert_eq!(Role::Admin.capabilities(), capabilities);
    }
}
