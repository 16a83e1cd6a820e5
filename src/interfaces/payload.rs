use crate::domain::review::ReviewAction;
use crate::error::{DeskError, ItemKind, Result};

/// A structured callback payload, round-tripped unchanged through the
/// transport layer (e.g. embedded in an inline-keyboard button).
///
/// One encoder/decoder pair owns the wire format; decode validates part
/// counts and field syntax instead of trusting fixed split offsets. Payment
/// methods must not contain the `_` delimiter; encode refuses them so a
/// malformed payload can never be produced in the first place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackPayload {
    /// Admin decision on an order or feedback item:
    /// `<action>_<item_type>_<item_id>`.
    Review {
        action: ReviewAction,
        item: ItemKind,
        id: String,
    },
    /// User picks a payment method for an approved order:
    /// `pay_<method>_<order_id>`.
    SelectPayment { method: String, order_id: String },
    /// User claims to have paid: `confirm_payment_<method>_<order_id>`.
    ConfirmPayment { method: String, order_id: String },
}

const DELIMITER: char = '_';

fn check_method(method: &str) -> Result<()> {
    if method.is_empty() || method.contains(DELIMITER) {
        return Err(DeskError::InvalidFormat(format!(
            "payment method may not be empty or contain '{DELIMITER}': {method}"
        )));
    }
    Ok(())
}

fn check_id(item: ItemKind, id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(DeskError::InvalidFormat("empty item id".to_string()));
    }
    if item == ItemKind::Feedback && id.parse::<u64>().is_err() {
        return Err(DeskError::InvalidFormat(format!(
            "feedback id is not a number: {id}"
        )));
    }
    Ok(())
}

impl CallbackPayload {
    pub fn encode(&self) -> Result<String> {
        match self {
            CallbackPayload::Review { action, item, id } => {
                check_id(*item, id)?;
                Ok(format!("{}_{}_{}", action.as_str(), item, id))
            }
            CallbackPayload::SelectPayment { method, order_id } => {
                check_method(method)?;
                check_id(ItemKind::Order, order_id)?;
                Ok(format!("pay_{method}_{order_id}"))
            }
            CallbackPayload::ConfirmPayment { method, order_id } => {
                check_method(method)?;
                check_id(ItemKind::Order, order_id)?;
                Ok(format!("confirm_payment_{method}_{order_id}"))
            }
        }
    }

    pub fn decode(data: &str) -> Result<Self> {
        let invalid = || DeskError::InvalidFormat(format!("bad callback payload: {data}"));

        if let Some(rest) = data.strip_prefix("confirm_payment_") {
            let (method, order_id) = rest.split_once(DELIMITER).ok_or_else(invalid)?;
            check_method(method)?;
            check_id(ItemKind::Order, order_id)?;
            return Ok(CallbackPayload::ConfirmPayment {
                method: method.to_string(),
                order_id: order_id.to_string(),
            });
        }
        if let Some(rest) = data.strip_prefix("pay_") {
            let (method, order_id) = rest.split_once(DELIMITER).ok_or_else(invalid)?;
            check_method(method)?;
            check_id(ItemKind::Order, order_id)?;
            return Ok(CallbackPayload::SelectPayment {
                method: method.to_string(),
                order_id: order_id.to_string(),
            });
        }

        let (action, rest) = data.split_once(DELIMITER).ok_or_else(invalid)?;
        let action: ReviewAction = action.parse()?;
        let (item, id) = rest.split_once(DELIMITER).ok_or_else(invalid)?;
        let item: ItemKind = item.parse()?;
        check_id(item, id)?;
        Ok(CallbackPayload::Review {
            action,
            item,
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_payload_wire_format() {
        let payload = CallbackPayload::Review {
            action: ReviewAction::Approve,
            item: ItemKind::Order,
            id: "ORD-12".to_string(),
        };
        assert_eq!(payload.encode().unwrap(), "approve_order_ORD-12");
        assert_eq!(CallbackPayload::decode("approve_order_ORD-12").unwrap(), payload);

        let payload = CallbackPayload::Review {
            action: ReviewAction::Reject,
            item: ItemKind::Feedback,
            id: "3".to_string(),
        };
        assert_eq!(payload.encode().unwrap(), "reject_feedback_3");
        assert_eq!(CallbackPayload::decode("reject_feedback_3").unwrap(), payload);
    }

    #[test]
    fn test_payment_payload_wire_formats() {
        let select = CallbackPayload::SelectPayment {
            method: "CBE".to_string(),
            order_id: "ORD-1".to_string(),
        };
        assert_eq!(select.encode().unwrap(), "pay_CBE_ORD-1");
        assert_eq!(CallbackPayload::decode("pay_CBE_ORD-1").unwrap(), select);

        let confirm = CallbackPayload::ConfirmPayment {
            method: "TeleBirr".to_string(),
            order_id: "ORD-1".to_string(),
        };
        assert_eq!(confirm.encode().unwrap(), "confirm_payment_TeleBirr_ORD-1");
        assert_eq!(
            CallbackPayload::decode("confirm_payment_TeleBirr_ORD-1").unwrap(),
            confirm
        );
    }

    #[test]
    fn test_decode_rejects_malformed_payloads() {
        for data in [
            "",
            "approve",
            "approve_order",
            "approve_order_",
            "approve_invoice_1",
            "promote_order_ORD-1",
            "reject_feedback_abc",
            "pay_CBE",
            "confirm_payment_CBE",
            "confirm_payment__ORD-1",
        ] {
            assert!(
                matches!(CallbackPayload::decode(data), Err(DeskError::InvalidFormat(_))),
                "expected InvalidFormat for {data:?}"
            );
        }
    }

    #[test]
    fn test_encode_refuses_delimiter_in_method() {
        let payload = CallbackPayload::SelectPayment {
            method: "My_Bank".to_string(),
            order_id: "ORD-1".to_string(),
        };
        assert!(matches!(payload.encode(), Err(DeskError::InvalidFormat(_))));
    }

    #[test]
    fn test_order_id_may_contain_delimiterless_punctuation() {
        // Order ids use '-'; the decoder must pass them through unchanged.
        let decoded = CallbackPayload::decode("confirm_payment_CBE_ORD-42").unwrap();
        assert_eq!(
            decoded,
            CallbackPayload::ConfirmPayment {
                method: "CBE".to_string(),
                order_id: "ORD-42".to_string(),
            }
        );
    }
}
