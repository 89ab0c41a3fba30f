use serde::{Deserialize, Serialize};

/// Settlement state of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    /// Nothing received yet
    #[default]
    Unpaid,
    /// Some money received, balance outstanding
    Partial,
    /// Paid in full (or over)
    Paid,
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillStatus::Unpaid => write!(f, "unpaid"),
            BillStatus::Partial => write!(f, "partial"),
            BillStatus::Paid => write!(f, "paid"),
        }
    }
}

impl std::str::FromStr for BillStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(BillStatus::Unpaid),
            "partial" => Ok(BillStatus::Partial),
            "paid" => Ok(BillStatus::Paid),
            _ => Err(format!("Invalid bill status: {}", s)),
        }
    }
}
