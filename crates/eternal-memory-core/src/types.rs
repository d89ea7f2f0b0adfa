use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MemoryType {
    Decision,
    Code,
    Log,
    Conversation,
}

impl MemoryType {
    pub const ALL: [Self; 4] = [Self::Decision, Self::Code, Self::Log, Self::Conversation];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Decision => "decision",
            Self::Code => "code",
            Self::Log => "log",
            Self::Conversation => "conversation",
        }
    }
}

impl Display for MemoryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "decision" => Ok(Self::Decision),
            "code" => Ok(Self::Code),
            "log" => Ok(Self::Log),
            "conversation" => Ok(Self::Conversation),
            _ => Err(format!(
                "Invalid memory type '{s}'. Allowed: {}",
                Self::ALL
                    .iter()
                    .map(|x| x.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Semantic,
    Keyword,
    #[default]
    Hybrid,
}

impl SearchMode {
    pub const ALL: [Self; 3] = [Self::Semantic, Self::Keyword, Self::Hybrid];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Semantic => "semantic",
            Self::Keyword => "keyword",
            Self::Hybrid => "hybrid",
        }
    }
}

impl Display for SearchMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "semantic" => Ok(Self::Semantic),
            "keyword" => Ok(Self::Keyword),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(format!(
                "Invalid search mode '{s}'. Allowed: {}",
                Self::ALL
                    .iter()
                    .map(|x| x.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

/// Body of `POST /api/v1/memories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreMemoryRequest {
    #[serde(rename = "type")]
    pub memory_type: MemoryType,
    pub title: String,
    pub content: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

/// Body of `POST /api/v1/search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<MemoryType>>,
    pub limit: u32,
    pub min_similarity: f64,
    pub mode: SearchMode,
}

/// Query of `GET /api/v1/memories`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub memory_type: Option<MemoryType>,
    pub source: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMemory {
    pub id: i64,
    #[serde(default)]
    pub chunk_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchHit>,
    #[serde(default)]
    pub total_found: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub memory: SearchHitMemory,
    pub chunk: Chunk,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHitMemory {
    pub memory_id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub memory_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryPage {
    #[serde(default)]
    pub items: Vec<MemorySummary>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySummary {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub memory_type: String,
    #[serde(default)]
    pub chunk_count: u64,
}

/// A full memory as returned by `GET /api/v1/memories/{id}`.
///
/// `type` stays a string on the read side so records written by newer API
/// versions still render. Display-only fields default when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub memory_type: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, deserialize_with = "display_text")]
    pub created_at: String,
    #[serde(default)]
    pub chunk_count: u64,
    #[serde(default)]
    pub meta: Option<Value>,
    #[serde(default)]
    pub chunks: Vec<Chunk>,
}

/// Accepts any JSON scalar for a field that is only ever printed.
fn display_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{
        MemoryRecord, MemorySummary, MemoryType, SearchMode, SearchRequest, StoreMemoryRequest,
        StoredMemory,
    };
    use serde_json::{Value, json};

    #[test]
    fn memory_type_parses_closed_set_only() {
        for memory_type in MemoryType::ALL {
            assert_eq!(memory_type.as_str().parse::<MemoryType>(), Ok(memory_type));
        }
        let error = "note".parse::<MemoryType>().expect_err("unknown type");
        assert!(error.contains("decision, code, log, conversation"));
        assert!("Code".parse::<MemoryType>().is_err());
    }

    #[test]
    fn search_mode_defaults_to_hybrid() {
        assert_eq!(SearchMode::default(), SearchMode::Hybrid);
        assert_eq!("keyword".parse::<SearchMode>(), Ok(SearchMode::Keyword));
        assert!("fuzzy".parse::<SearchMode>().is_err());
    }

    #[test]
    fn store_request_omits_absent_meta() {
        let request = StoreMemoryRequest {
            memory_type: MemoryType::Log,
            title: "t".to_string(),
            content: "c".to_string(),
            source: "s".to_string(),
            meta: None,
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({"type": "log", "title": "t", "content": "c", "source": "s"})
        );
    }

    #[test]
    fn search_request_omits_absent_types() {
        let request = SearchRequest {
            query: "q".to_string(),
            types: None,
            limit: 10,
            min_similarity: 0.5,
            mode: SearchMode::default(),
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert!(value.get("types").is_none());
        assert_eq!(value.get("mode").and_then(Value::as_str), Some("hybrid"));
    }

    #[test]
    fn memory_record_tolerates_missing_chunks_and_null_meta() {
        let record: MemoryRecord = serde_json::from_value(json!({
            "title": "t",
            "type": "code",
            "source": "s",
            "created_at": "2024-01-01T00:00:00Z",
            "chunk_count": 0,
            "meta": null
        }))
        .expect("decode record");
        assert!(record.chunks.is_empty());
        assert!(record.meta.is_none());
    }

    #[test]
    fn sparse_records_still_decode() {
        let record: MemoryRecord = serde_json::from_value(json!({
            "title": "Deploy notes",
            "type": "log",
            "created_at": 1_718_000_000,
        }))
        .expect("decode sparse record");
        assert_eq!(record.created_at, "1718000000");
        assert_eq!(record.chunk_count, 0);
        assert!(record.source.is_empty());
        assert!(record.chunks.is_empty());

        let stored: StoredMemory =
            serde_json::from_value(json!({"id": 9})).expect("decode without chunk_count");
        assert_eq!(stored.id, 9);
        assert_eq!(stored.chunk_count, 0);

        let summary: MemorySummary =
            serde_json::from_value(json!({"id": 3, "title": "t"})).expect("decode summary");
        assert_eq!(summary.chunk_count, 0);
    }
}
