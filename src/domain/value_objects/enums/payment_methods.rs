use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    Cash,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "UPI")]
    Upi,
    AppWallet,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::AppWallet => "AppWallet",
        }
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Cash" => Ok(PaymentMethod::Cash),
            "Credit Card" => Ok(PaymentMethod::CreditCard),
            "UPI" => Ok(PaymentMethod::Upi),
            "AppWallet" => Ok(PaymentMethod::AppWallet),
            other => Err(format!("unsupported payment method: {other}")),
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!(PaymentMethod::try_from("Credit Card"), Ok(PaymentMethod::CreditCard));
        assert_eq!(PaymentMethod::try_from("UPI"), Ok(PaymentMethod::Upi));
        assert_eq!(PaymentMethod::CreditCard.to_string(), "Credit Card");
    }

    #[test]
    fn rejects_unknown_method() {
        assert!(PaymentMethod::try_from("cash").is_err());
        assert!(PaymentMethod::try_from("Bitcoin").is_err());
    }
}
