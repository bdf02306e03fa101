use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mobile-money networks accepted by the payment screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mtn,
    Vodafone,
    Airteltigo,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Mtn, Network::Vodafone, Network::Airteltigo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mtn => "mtn",
            Network::Vodafone => "vodafone",
            Network::Airteltigo => "airteltigo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Network::Mtn => "MTN Mobile Money",
            Network::Vodafone => "Vodafone Cash",
            Network::Airteltigo => "AirtelTigo Money",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkOption {
    pub value: Network,
    pub label: &'static str,
}

pub fn network_options() -> Vec<NetworkOption> {
    Network::ALL
        .into_iter()
        .map(|n| NetworkOption {
            value: n,
            label: n.label(),
        })
        .collect()
}

/// Built at submit time, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaymentRequest {
    pub phone_number: String,
    pub network: Network,
    pub amount_ghs: u32,
    pub reference: String,
}

/// Confirmation shown once the simulated settlement finishes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub reference: String,
    pub network: Network,
    pub network_label: &'static str,
    pub phone_number: String,
    pub amount: String,
    pub merchant_number: String,
}

/// "GHS 50.00"
pub fn display_amount(amount_ghs: u32) -> String {
    format!("GHS {amount_ghs}.00")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_parse_is_case_insensitive() {
        assert_eq!("MTN".parse::<Network>().unwrap(), Network::Mtn);
        assert_eq!("airteltigo".parse::<Network>().unwrap(), Network::Airteltigo);
    }

    #[test]
    fn test_network_parse_unknown() {
        assert!("glo".parse::<Network>().is_err());
    }

    #[test]
    fn test_network_labels() {
        let labels: Vec<_> = network_options().iter().map(|o| o.label).collect();
        assert_eq!(
            labels,
            vec!["MTN Mobile Money", "Vodafone Cash", "AirtelTigo Money"]
        );
    }

    #[test]
    fn test_display_amount() {
        assert_eq!(display_amount(50), "GHS 50.00");
    }
}
