//! Projects a raw Gemini reply onto the `GroundedResponse` display shape.

use crate::models::*;

pub fn normalize(response: GeminiResponse) -> GroundedResponse {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return GroundedResponse::default();
    };

    let text = candidate
        .content
        .map(|content| answer_text(&content))
        .unwrap_or_default();

    let sources = candidate
        .grounding_metadata
        .and_then(|metadata| metadata.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .map(to_source)
        .collect();

    GroundedResponse { text, sources }
}

/// Concatenated text parts of a candidate, the same value the SDKs expose as `response.text`.
pub fn answer_text(content: &GeminiContent) -> String {
    content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect()
}

fn to_source(chunk: GeminiGroundingChunk) -> Source {
    Source {
        web: chunk.web.map(|web| WebSource {
            uri: web.uri,
            title: web.title,
        }),
        place: chunk.maps.map(to_place),
    }
}

fn to_place(maps: GeminiMapsChunk) -> PlaceSource {
    // Only the first answer-source group carries snippets; it may not exist.
    let review_snippets = maps
        .place_answer_sources
        .into_iter()
        .next()
        .map(|group| group.review_snippets)
        .unwrap_or_default()
        .into_iter()
        .map(|snippet| ReviewSnippet {
            uri: snippet.uri,
            title: snippet.title,
            text: snippet.text,
        })
        .collect();

    PlaceSource {
        uri: maps.uri,
        title: maps.title,
        review_snippets,
    }
}
