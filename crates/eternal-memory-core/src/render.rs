use crate::types::{MemoryPage, MemoryRecord, SearchResponse, StoredMemory};
use std::fmt::Write as _;

pub const CONTENT_PREVIEW_CHARS: usize = 500;
pub const NO_MEMORIES: &str = "No memories found.";

/// Cuts `content` to the preview length, counting characters.
#[must_use]
pub fn preview_content(content: &str) -> String {
    match content.char_indices().nth(CONTENT_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

#[must_use]
pub fn format_stored(stored: &StoredMemory) -> String {
    format!(
        "Memory stored successfully. ID: {}, Chunks: {}",
        stored.id, stored.chunk_count
    )
}

#[must_use]
pub fn format_search_results(response: &SearchResponse) -> String {
    if response.results.is_empty() {
        return NO_MEMORIES.to_string();
    }

    let mut output = format!("Found {} memories:\n\n", response.total_found);
    for hit in &response.results {
        output.push_str("---\n");
        let _ = writeln!(
            output,
            "**{}** (ID: {})",
            hit.memory.title, hit.memory.memory_id
        );
        let _ = writeln!(
            output,
            "Type: {} | Similarity: {:.2}",
            hit.memory.memory_type,
            hit.chunk.similarity.unwrap_or_default()
        );
        let _ = writeln!(
            output,
            "Content: {}\n",
            preview_content(&hit.chunk.content)
        );
    }
    output
}

#[must_use]
pub fn format_memory_list(page: &MemoryPage, offset: u32, limit: u32) -> String {
    if page.items.is_empty() {
        return NO_MEMORIES.to_string();
    }

    let mut output = format!(
        "Showing {} of {} memories:\n\n",
        page.items.len(),
        page.total
    );
    for item in &page.items {
        let _ = writeln!(
            output,
            "- [{}] {} ({}, {} chunks)",
            item.id, item.title, item.memory_type, item.chunk_count
        );
    }

    let next_offset = u64::from(offset) + u64::from(limit);
    if page.total > next_offset {
        let _ = write!(output, "\nUse offset={next_offset} to see more.");
    }
    output
}

#[must_use]
pub fn format_memory_detail(record: &MemoryRecord) -> String {
    let mut output = format!("# {}\n\n", record.title);
    let _ = writeln!(output, "**Type:** {}", record.memory_type);
    let _ = writeln!(output, "**Source:** {}", record.source);
    let _ = writeln!(output, "**Created:** {}", record.created_at);
    let _ = writeln!(output, "**Chunks:** {}", record.chunk_count);
    if let Some(meta) = &record.meta {
        let _ = writeln!(output, "**Metadata:** {meta}");
    }

    output.push_str("\n## Content\n\n");
    for chunk in &record.chunks {
        output.push_str(&chunk.content);
        output.push_str("\n\n");
    }
    output
}

#[must_use]
pub fn format_deleted(memory_id: i64) -> String {
    format!("Memory {memory_id} deleted.")
}

#[must_use]
pub fn format_not_found(memory_id: i64) -> String {
    format!("Memory {memory_id} not found.")
}
