//! Payload validation — turning raw model text into a typed digest.
//!
//! The contract is fail-closed (see `digest`): missing fields, type
//! mismatches, and out-of-enum domain values anywhere in the payload reject
//! the payload as a whole. Unknown extra fields are ignored so a model that
//! starts emitting additional keys does not break existing runs.

use crate::digest::ResearchDigest;
use crate::error::ValidationError;

/// Parse a raw text payload into a [`ResearchDigest`].
///
/// Pure function, no side effects. Empty or whitespace-only input fails
/// with [`ValidationError::EmptyPayload`] without attempting a parse;
/// anything else that does not conform to the schema fails with
/// [`ValidationError::MalformedPayload`] naming the offending field.
pub fn parse_digest(raw: &str) -> Result<ResearchDigest, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyPayload);
    }

    serde_json::from_str(raw).map_err(|e| ValidationError::MalformedPayload {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::ResearchDomain;

    fn valid_payload() -> String {
        serde_json::json!({
            "topic": "Garment Simulation",
            "report_date": "2024-06-10",
            "items": [
                {
                    "title": "Neural Cloth Solver",
                    "source_link": "https://example.org/neural-cloth",
                    "publication_date": "2024-06-01",
                    "primary_domain": "AI & Data-Driven Methods",
                    "relevance_explanation": "Replaces the solver with a GNN surrogate.",
                    "key_innovation": "Order-of-magnitude speedup at comparable drape quality.",
                    "summary": "A graph network trained on simulated drapes."
                },
                {
                    "title": "GarmentCode v2",
                    "source_link": "https://example.org/garmentcode",
                    "publication_date": "2024-05-28",
                    "primary_domain": "Programmatic Pattern Design & Garment-Code",
                    "relevance_explanation": "Parametric sewing pattern language.",
                    "key_innovation": "Pattern DSL with differentiable parameters.",
                    "summary": "Treats garments as code for dataset generation."
                }
            ]
        })
        .to_string()
    }

    #[test]
    fn valid_payload_round_trips() {
        let digest = parse_digest(&valid_payload()).unwrap();
        assert_eq!(digest.topic, "Garment Simulation");
        assert_eq!(digest.items.len(), 2);
        assert_eq!(digest.items[0].title, "Neural Cloth Solver");
        assert_eq!(
            digest.items[0].primary_domain,
            ResearchDomain::AiDataDrivenMethods
        );
        assert_eq!(digest.items[1].publication_date, "2024-05-28");
    }

    #[test]
    fn empty_input_fails_with_empty_payload() {
        assert_eq!(parse_digest(""), Err(ValidationError::EmptyPayload));
    }

    #[test]
    fn whitespace_only_fails_with_empty_payload() {
        assert_eq!(parse_digest("  \n\t  "), Err(ValidationError::EmptyPayload));
    }

    #[test]
    fn garbage_text_fails_with_malformed_payload() {
        let err = parse_digest("this is not json").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedPayload { .. }));
    }

    #[test]
    fn missing_domain_on_one_item_rejects_whole_payload() {
        let mut value: serde_json::Value =
            serde_json::from_str(&valid_payload()).unwrap();
        value["items"][1]
            .as_object_mut()
            .unwrap()
            .remove("primary_domain");

        let err = parse_digest(&value.to_string()).unwrap_err();
        match err {
            ValidationError::MalformedPayload { reason } => {
                assert!(reason.contains("primary_domain"), "reason was: {reason}");
            }
            other => panic!("expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn invalid_domain_value_rejects_whole_payload() {
        let mut value: serde_json::Value =
            serde_json::from_str(&valid_payload()).unwrap();
        value["items"][0]["primary_domain"] = "Knitwear Futurism".into();

        let err = parse_digest(&value.to_string()).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedPayload { .. }));
    }

    #[test]
    fn unknown_extra_fields_are_ignored() {
        let mut value: serde_json::Value =
            serde_json::from_str(&valid_payload()).unwrap();
        value["model_confidence"] = 0.93.into();
        value["items"][0]["citations"] = serde_json::json!(["a", "b"]);

        let digest = parse_digest(&value.to_string()).unwrap();
        assert_eq!(digest.items.len(), 2);
    }

    #[test]
    fn mistyped_items_field_rejected() {
        let payload = r#"{"topic": "t", "report_date": "2024-06-10", "items": "none"}"#;
        assert!(matches!(
            parse_digest(payload),
            Err(ValidationError::MalformedPayload { .. })
        ));
    }
}
