use std::fmt::{Debug, Display, Formatter};

/// Signed percentage, or `N/A` when the change is not defined.
pub struct FormattedPercent(pub Option<f64>);

impl Debug for FormattedPercent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedPercent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(percent) => write!(f, "{percent:+.1}%"),
            None => write!(f, "N/A"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(FormattedPercent(Some(12.5)).to_string(), "+12.5%");
        assert_eq!(FormattedPercent(Some(-25.0)).to_string(), "-25.0%");
        assert_eq!(FormattedPercent(Some(0.0)).to_string(), "+0.0%");
        assert_eq!(FormattedPercent(None).to_string(), "N/A");
    }
}
