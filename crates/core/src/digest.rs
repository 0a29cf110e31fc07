//! Digest value objects — the data contract with the generative model.
//!
//! These types define the exact shape a model payload must match to be
//! accepted. The contract is strict and fail-closed: a payload with any
//! non-conforming item is rejected as a whole, because a malformed item
//! likely means the model drifted from instructions and the entire batch
//! is suspect.

use serde::{Deserialize, Serialize};

/// The closed set of research domains an item can belong to.
///
/// Wire values must match the model contract exactly — anything outside
/// this set fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResearchDomain {
    #[serde(rename = "Programmatic Pattern Design & Garment-Code")]
    ProgrammaticPatternDesign,

    #[serde(rename = "Physics-Based Modeling")]
    PhysicsBasedModeling,

    #[serde(rename = "Collision Handling")]
    CollisionHandling,

    #[serde(rename = "AI & Data-Driven Methods")]
    AiDataDrivenMethods,

    #[serde(rename = "Real-Time vs. High-Fidelity")]
    RealTimeVsHighFidelity,

    #[serde(rename = "Material Realism")]
    MaterialRealism,

    #[serde(rename = "Other")]
    Other,
}

impl ResearchDomain {
    /// The wire value, as shown to readers (chat messages, Notion tags).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProgrammaticPatternDesign => "Programmatic Pattern Design & Garment-Code",
            Self::PhysicsBasedModeling => "Physics-Based Modeling",
            Self::CollisionHandling => "Collision Handling",
            Self::AiDataDrivenMethods => "AI & Data-Driven Methods",
            Self::RealTimeVsHighFidelity => "Real-Time vs. High-Fidelity",
            Self::MaterialRealism => "Material Realism",
            Self::Other => "Other",
        }
    }

    /// All wire values, in declaration order. Used to build the response
    /// schema sent to the model.
    pub fn wire_values() -> Vec<&'static str> {
        [
            Self::ProgrammaticPatternDesign,
            Self::PhysicsBasedModeling,
            Self::CollisionHandling,
            Self::AiDataDrivenMethods,
            Self::RealTimeVsHighFidelity,
            Self::MaterialRealism,
            Self::Other,
        ]
        .iter()
        .map(|d| d.as_str())
        .collect()
    }
}

impl std::fmt::Display for ResearchDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single curated research item. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchItem {
    /// The title of the paper, codebase, or article
    pub title: String,

    /// URL or citation for the source. Not validated as a URL — any
    /// non-empty string the model emits is accepted.
    pub source_link: String,

    /// Date of publication or release, expected as `YYYY-MM-DD`.
    /// NOT guaranteed well-formed: the producer is an external model and
    /// may emit malformed dates. See `filter` for how those are handled.
    pub publication_date: String,

    /// The primary research domain this item belongs to
    pub primary_domain: ResearchDomain,

    /// Why this item is relevant to the domain
    pub relevance_explanation: String,

    /// The specific problem solved or the key innovation introduced
    pub key_innovation: String,

    /// A concise summary of the item's content
    pub summary: String,
}

/// A validated research digest — the unit handed to publishers.
///
/// Constructed once per task run from a single model payload, mutated only
/// by the filter step (report-date overwrite + item pruning), then discarded
/// after publishing. No caching, no persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchDigest {
    /// The main research topic (e.g., "Garment Simulation")
    pub topic: String,

    /// Date stamp of this report. The authoritative value is the processing
    /// time — whatever the model returned here is overwritten by the filter.
    pub report_date: String,

    /// Curated items, ordered most-relevant first. Bounded to at most 10 by
    /// contract with the model; a quantity violation is not rejected, only
    /// requested in the query text.
    pub items: Vec<ResearchItem>,
}

/// JSON Schema for the digest, sent to the model as the structured-output
/// response schema.
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "topic": {
                "type": "string",
                "description": "The main research topic (e.g., Garment Simulation)."
            },
            "report_date": {
                "type": "string",
                "description": "Date of this report generation."
            },
            "items": {
                "type": "array",
                "description": "List of max 10 curated research items, ordered by relevance.",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": {
                            "type": "string",
                            "description": "The title of the paper, codebase, or article."
                        },
                        "source_link": {
                            "type": "string",
                            "description": "URL or citation for the source."
                        },
                        "publication_date": {
                            "type": "string",
                            "description": "Date of publication or release (YYYY-MM-DD). Must be within the last 1 month."
                        },
                        "primary_domain": {
                            "type": "string",
                            "enum": ResearchDomain::wire_values(),
                            "description": "The primary research domain this item belongs to."
                        },
                        "relevance_explanation": {
                            "type": "string",
                            "description": "Explanation of why this item is relevant to the domain."
                        },
                        "key_innovation": {
                            "type": "string",
                            "description": "The specific problem solved or the key innovation introduced."
                        },
                        "summary": {
                            "type": "string",
                            "description": "A concise summary of the item's content."
                        }
                    },
                    "required": [
                        "title",
                        "source_link",
                        "publication_date",
                        "primary_domain",
                        "relevance_explanation",
                        "key_innovation",
                        "summary"
                    ]
                }
            }
        },
        "required": ["topic", "report_date", "items"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_wire_values_round_trip() {
        for value in ResearchDomain::wire_values() {
            let json = format!("\"{value}\"");
            let domain: ResearchDomain = serde_json::from_str(&json).unwrap();
            assert_eq!(domain.as_str(), value);
            assert_eq!(serde_json::to_string(&domain).unwrap(), json);
        }
    }

    #[test]
    fn unknown_domain_rejected() {
        let result: Result<ResearchDomain, _> =
            serde_json::from_str("\"Quantum Tailoring\"");
        assert!(result.is_err());
    }

    #[test]
    fn response_schema_lists_all_domains() {
        let schema = response_schema();
        let domains = schema["properties"]["items"]["items"]["properties"]["primary_domain"]
            ["enum"]
            .as_array()
            .unwrap();
        assert_eq!(domains.len(), 7);
        assert!(domains.iter().any(|d| d == "Physics-Based Modeling"));
    }

    #[test]
    fn response_schema_requires_every_item_field() {
        let schema = response_schema();
        let required = schema["properties"]["items"]["items"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required.len(), 7);
    }
}
