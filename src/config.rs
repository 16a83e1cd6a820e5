use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

/// Runtime configuration for the order desk.
///
/// Explicitly owned and injected into the engine rather than living in a
/// process-wide global. Deserializable from JSON; `Default` mirrors the
/// original deployment's catalog and payment methods.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Users allowed to approve/reject items and edit prices.
    pub admin_ids: HashSet<u64>,
    /// Catalog seed: service name to price.
    pub services: BTreeMap<String, Decimal>,
    /// Allow-list of service names whose price may be edited at runtime.
    pub editable_services: Vec<String>,
    /// Accepted payment methods, in presentation order.
    pub payment_methods: Vec<PaymentMethod>,
}

/// A payment method together with the payout details shown to the user
/// once they pick it.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethod {
    pub name: String,
    pub account_number: String,
    pub account_name: String,
}

impl Config {
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    pub fn payment_method(&self, name: &str) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|m| m.name == name)
    }

    pub fn payment_method_names(&self) -> Vec<String> {
        self.payment_methods.iter().map(|m| m.name.clone()).collect()
    }

    pub fn is_editable_service(&self, service: &str) -> bool {
        self.editable_services.iter().any(|s| s == service)
    }
}

impl Default for Config {
    fn default() -> Self {
        let services = BTreeMap::from([
            ("Telegram Premium - 1 Month".to_string(), dec!(1000)),
            ("Telegram Premium - 3 Months".to_string(), dec!(2000)),
            ("Telegram Premium - 6 Months".to_string(), dec!(5000)),
            ("Telegram Premium - 1 Year".to_string(), dec!(8000)),
            ("Telegram Stars".to_string(), dec!(2000)),
        ]);
        let editable_services = vec![
            "Telegram Premium - 1 Month".to_string(),
            "Telegram Premium - 3 Months".to_string(),
            "Telegram Premium - 6 Months".to_string(),
            "Telegram Premium - 1 Year".to_string(),
        ];
        let payment_methods = vec![
            PaymentMethod {
                name: "TeleBirr".to_string(),
                account_number: "096139850".to_string(),
                account_name: "Abdisa Feleke".to_string(),
            },
            PaymentMethod {
                name: "CBE".to_string(),
                account_number: "010000006623".to_string(),
                account_name: "Abdisa Feleke".to_string(),
            },
        ];
        Self {
            admin_ids: HashSet::new(),
            services,
            editable_services,
            payment_methods,
        }
    }
}
