//! Declared input schemas for the memory tools.
//!
//! Tool arguments arrive loosely typed from the protocol layer. Each `*Args`
//! struct decodes from the wire names advertised by its `input_schema`, is
//! checked here before any request is built, and is turned into the typed
//! request the client sends.

use crate::types::{ListQuery, MemoryType, SearchMode, SearchRequest, StoreMemoryRequest};
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

pub const DEFAULT_SOURCE: &str = "openclaw-assistant";
pub const TITLE_MAX_CHARS: usize = 255;

pub const SEARCH_LIMIT: IntBounds = IntBounds {
    min: 1,
    max: Some(50),
    default: 10,
};
pub const MIN_SIMILARITY: FloatBounds = FloatBounds {
    min: 0.0,
    max: 1.0,
    default: 0.5,
};
pub const LIST_LIMIT: IntBounds = IntBounds {
    min: 1,
    max: Some(100),
    default: 20,
};
pub const LIST_OFFSET: IntBounds = IntBounds {
    min: 0,
    max: None,
    default: 0,
};

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    Invalid { field: &'static str, message: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: String,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntBounds {
    pub min: u32,
    pub max: Option<u32>,
    pub default: u32,
}

impl IntBounds {
    fn property(self, description: &str) -> Value {
        let mut property = json!({
            "type": "integer",
            "description": format!("{description} (default {})", self.default),
            "minimum": self.min,
            "default": self.default,
        });
        if let Some(max) = self.max {
            property["maximum"] = json!(max);
        }
        property
    }

    fn describe(self) -> String {
        match self.max {
            Some(max) => format!("between {} and {max}", self.min),
            None => format!("at least {}", self.min),
        }
    }

    pub fn resolve(self, field: &'static str, value: Option<u32>) -> Result<u32, ValidationError> {
        let value = value.unwrap_or(self.default);
        let above_max = self.max.is_some_and(|max| value > max);
        if value < self.min || above_max {
            return Err(ValidationError::OutOfRange {
                field,
                expected: self.describe(),
                value: value.to_string(),
            });
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatBounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl FloatBounds {
    fn property(self, description: &str) -> Value {
        json!({
            "type": "number",
            "description": format!("{description} (default {})", self.default),
            "minimum": self.min,
            "maximum": self.max,
            "default": self.default,
        })
    }

    pub fn resolve(self, field: &'static str, value: Option<f64>) -> Result<f64, ValidationError> {
        let value = value.unwrap_or(self.default);
        if !(self.min..=self.max).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field,
                expected: format!("between {} and {}", self.min, self.max),
                value: value.to_string(),
            });
        }
        Ok(value)
    }
}

fn parse_enum<T>(field: &'static str, raw: &str) -> Result<T, ValidationError>
where
    T: std::str::FromStr<Err = String>,
{
    raw.parse()
        .map_err(|message| ValidationError::Invalid { field, message })
}

fn memory_type_property(description: &str) -> Value {
    let names: Vec<&str> = MemoryType::ALL.iter().map(|x| x.as_str()).collect();
    json!({
        "type": "string",
        "description": format!("{description}: {}", names.join(", ")),
        "enum": names,
    })
}

fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreMemoryArgs {
    #[serde(rename = "type")]
    pub memory_type: String,
    pub title: String,
    pub content: String,
    pub source: Option<String>,
    pub meta: Option<Value>,
}

impl StoreMemoryArgs {
    #[must_use]
    pub fn input_schema() -> Value {
        object_schema(
            json!({
                "type": memory_type_property("Memory type"),
                "title": {
                    "type": "string",
                    "description": "Short descriptive title",
                    "maxLength": TITLE_MAX_CHARS,
                },
                "content": {
                    "type": "string",
                    "description": "Full content to store",
                },
                "source": {
                    "type": "string",
                    "description": format!("Origin identifier (default {DEFAULT_SOURCE})"),
                    "default": DEFAULT_SOURCE,
                },
                "meta": {
                    "type": "object",
                    "description": "Optional metadata",
                },
            }),
            &["type", "title", "content"],
        )
    }

    pub fn validate(self) -> Result<StoreMemoryRequest, ValidationError> {
        let memory_type = parse_enum::<MemoryType>("type", &self.memory_type)?;
        if self.title.chars().count() > TITLE_MAX_CHARS {
            return Err(ValidationError::TooLong {
                field: "title",
                max: TITLE_MAX_CHARS,
            });
        }
        let meta = match self.meta {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                return Err(ValidationError::Invalid {
                    field: "meta",
                    message: "expected an object".to_string(),
                });
            }
        };

        Ok(StoreMemoryRequest {
            memory_type,
            title: self.title,
            content: self.content,
            source: self.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            meta,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchMemoryArgs {
    pub query: String,
    pub types: Option<Vec<String>>,
    pub limit: Option<u32>,
    pub min_similarity: Option<f64>,
    pub mode: Option<String>,
}

impl SearchMemoryArgs {
    #[must_use]
    pub fn input_schema() -> Value {
        let modes: Vec<&str> = SearchMode::ALL.iter().map(|x| x.as_str()).collect();
        object_schema(
            json!({
                "query": {
                    "type": "string",
                    "description": "Natural language search query",
                },
                "types": {
                    "type": "array",
                    "description": "Filter by types",
                    "items": memory_type_property("Memory type"),
                },
                "limit": SEARCH_LIMIT.property("Max results"),
                "min_similarity": MIN_SIMILARITY.property("Minimum similarity"),
                "mode": {
                    "type": "string",
                    "description": format!(
                        "Search mode: {} (default {})",
                        modes.join(", "),
                        SearchMode::default()
                    ),
                    "enum": modes,
                    "default": SearchMode::default().as_str(),
                },
            }),
            &["query"],
        )
    }

    pub fn validate(self) -> Result<SearchRequest, ValidationError> {
        let types = self
            .types
            .map(|raw| {
                raw.iter()
                    .map(|value| parse_enum::<MemoryType>("types", value))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        let mode = match self.mode {
            Some(raw) => parse_enum::<SearchMode>("mode", &raw)?,
            None => SearchMode::default(),
        };

        Ok(SearchRequest {
            query: self.query,
            types,
            limit: SEARCH_LIMIT.resolve("limit", self.limit)?,
            min_similarity: MIN_SIMILARITY.resolve("min_similarity", self.min_similarity)?,
            mode,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMemoriesArgs {
    #[serde(rename = "type")]
    pub memory_type: Option<String>,
    pub source: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListMemoriesArgs {
    #[must_use]
    pub fn input_schema() -> Value {
        object_schema(
            json!({
                "type": memory_type_property("Filter by type"),
                "source": {
                    "type": "string",
                    "description": "Filter by source",
                },
                "limit": LIST_LIMIT.property("Max results"),
                "offset": LIST_OFFSET.property("Skip N results"),
            }),
            &[],
        )
    }

    pub fn validate(self) -> Result<ListQuery, ValidationError> {
        let memory_type = self
            .memory_type
            .map(|raw| parse_enum::<MemoryType>("type", &raw))
            .transpose()?;

        Ok(ListQuery {
            memory_type,
            source: self.source,
            limit: LIST_LIMIT.resolve("limit", self.limit)?,
            offset: LIST_OFFSET.resolve("offset", self.offset)?,
        })
    }
}

/// Arguments of `get_memory` and `delete_memory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MemoryIdArgs {
    pub memory_id: i64,
}

impl MemoryIdArgs {
    #[must_use]
    pub fn input_schema(description: &str) -> Value {
        object_schema(
            json!({
                "memory_id": {
                    "type": "integer",
                    "description": description,
                },
            }),
            &["memory_id"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DEFAULT_SOURCE, ListMemoriesArgs, MemoryIdArgs, SearchMemoryArgs, StoreMemoryArgs,
        ValidationError,
    };
    use crate::types::{MemoryType, SearchMode};
    use serde_json::json;

    fn store_args(memory_type: &str) -> StoreMemoryArgs {
        StoreMemoryArgs {
            memory_type: memory_type.to_string(),
            title: "title".to_string(),
            content: "content".to_string(),
            ..StoreMemoryArgs::default()
        }
    }

    #[test]
    fn store_applies_default_source() {
        let request = store_args("decision").validate().expect("valid");
        assert_eq!(request.memory_type, MemoryType::Decision);
        assert_eq!(request.source, DEFAULT_SOURCE);
        assert!(request.meta.is_none());
    }

    #[test]
    fn store_rejects_unknown_type() {
        let error = store_args("note").validate().expect_err("invalid type");
        assert!(matches!(error, ValidationError::Invalid { field: "type", .. }));
    }

    #[test]
    fn store_title_limit_counts_characters() {
        let mut args = store_args("code");
        args.title = "é".repeat(255);
        assert!(args.clone().validate().is_ok());

        args.title.push('é');
        assert_eq!(
            args.validate().expect_err("too long"),
            ValidationError::TooLong {
                field: "title",
                max: 255
            }
        );
    }

    #[test]
    fn store_meta_must_be_an_object() {
        let mut args = store_args("log");
        args.meta = Some(json!({"repo": "x"}));
        let request = args.clone().validate().expect("object meta");
        assert_eq!(request.meta.expect("meta").get("repo"), Some(&json!("x")));

        args.meta = Some(json!(["not", "a", "map"]));
        assert!(args.validate().is_err());
    }

    #[test]
    fn search_defaults_match_declared_schema() {
        let request = SearchMemoryArgs {
            query: "q".to_string(),
            ..SearchMemoryArgs::default()
        }
        .validate()
        .expect("valid");
        assert_eq!(request.limit, 10);
        assert!((request.min_similarity - 0.5).abs() < f64::EPSILON);
        assert_eq!(request.mode, SearchMode::Hybrid);
        assert!(request.types.is_none());
    }

    #[test]
    fn search_bounds_are_enforced() {
        for limit in [0, 51] {
            let result = SearchMemoryArgs {
                query: "q".to_string(),
                limit: Some(limit),
                ..SearchMemoryArgs::default()
            }
            .validate();
            assert!(result.is_err(), "limit {limit} should be rejected");
        }

        for min_similarity in [-0.1, 1.5] {
            let result = SearchMemoryArgs {
                query: "q".to_string(),
                min_similarity: Some(min_similarity),
                ..SearchMemoryArgs::default()
            }
            .validate();
            assert!(result.is_err());
        }

        let edge = SearchMemoryArgs {
            query: "q".to_string(),
            limit: Some(50),
            min_similarity: Some(1.0),
            ..SearchMemoryArgs::default()
        }
        .validate();
        assert!(edge.is_ok());
    }

    #[test]
    fn search_rejects_unknown_type_filter_and_mode() {
        let bad_type = SearchMemoryArgs {
            query: "q".to_string(),
            types: Some(vec!["code".to_string(), "email".to_string()]),
            ..SearchMemoryArgs::default()
        }
        .validate();
        assert!(matches!(
            bad_type,
            Err(ValidationError::Invalid { field: "types", .. })
        ));

        let bad_mode = SearchMemoryArgs {
            query: "q".to_string(),
            mode: Some("vector".to_string()),
            ..SearchMemoryArgs::default()
        }
        .validate();
        assert!(matches!(
            bad_mode,
            Err(ValidationError::Invalid { field: "mode", .. })
        ));
    }

    #[test]
    fn list_defaults_and_limit_bound() {
        let query = ListMemoriesArgs::default().validate().expect("valid");
        assert_eq!(query.limit, 20);
        assert_eq!(query.offset, 0);
        assert!(query.memory_type.is_none());

        let error = ListMemoriesArgs {
            limit: Some(101),
            ..ListMemoriesArgs::default()
        }
        .validate()
        .expect_err("limit too large");
        assert_eq!(
            error.to_string(),
            "limit must be between 1 and 100, got 101"
        );
    }

    #[test]
    fn args_decode_from_wire_names() {
        let store: StoreMemoryArgs = serde_json::from_value(json!({
            "type": "code",
            "title": "Retry helper",
            "content": "fn retry() {}",
        }))
        .expect("decode store args");
        assert_eq!(store.memory_type, "code");
        assert!(store.source.is_none());

        let list: ListMemoriesArgs =
            serde_json::from_value(json!({"type": "log", "source": null, "offset": 40}))
                .expect("decode list args");
        assert_eq!(list.memory_type.as_deref(), Some("log"));
        assert_eq!(list.offset, Some(40));

        let missing =
            serde_json::from_value::<StoreMemoryArgs>(json!({"title": "t", "content": "c"}))
                .expect_err("type is required");
        assert!(missing.to_string().contains("`type`"));

        let fractional = serde_json::from_value::<MemoryIdArgs>(json!({"memory_id": 1.5}));
        assert!(fractional.is_err());
    }

    #[test]
    fn schemas_advertise_wire_names_enums_and_defaults() {
        let store = StoreMemoryArgs::input_schema();
        assert_eq!(store["required"], json!(["type", "title", "content"]));
        assert_eq!(
            store["properties"]["type"]["enum"],
            json!(["decision", "code", "log", "conversation"])
        );
        assert_eq!(store["properties"]["title"]["maxLength"], json!(255));
        assert_eq!(store["properties"]["source"]["default"], json!(DEFAULT_SOURCE));

        let search = SearchMemoryArgs::input_schema();
        assert_eq!(search["required"], json!(["query"]));
        assert_eq!(
            search["properties"]["mode"]["description"],
            json!("Search mode: semantic, keyword, hybrid (default hybrid)")
        );
        assert_eq!(search["properties"]["limit"]["maximum"], json!(50));
        assert_eq!(search["properties"]["min_similarity"]["default"], json!(0.5));
        assert_eq!(
            search["properties"]["types"]["items"]["enum"],
            store["properties"]["type"]["enum"]
        );

        let list = ListMemoriesArgs::input_schema();
        assert_eq!(list["required"], json!([]));
        assert_eq!(list["properties"]["limit"]["default"], json!(20));
        assert!(list["properties"]["offset"].get("maximum").is_none());

        let get = MemoryIdArgs::input_schema("Memory ID to retrieve");
        assert_eq!(get["required"], json!(["memory_id"]));
        assert_eq!(get["properties"]["memory_id"]["type"], json!("integer"));
    }
}
