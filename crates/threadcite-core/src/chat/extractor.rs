//! Reply extraction: turn the assistant's new message into a [`Reply`].
//!
//! Text blocks are concatenated in order. Every `file_citation` annotation
//! becomes a [`SourceReference`]: the file id is resolved to a name and the
//! page number is read from the citation marker (`【<page>:<index>†source】`).
//! Each distinct (file name, page) pair is reported once.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use threadcite_types::assistant::{Annotation, ContentBlock, MessageQuery, ThreadMessage};
use threadcite_types::chat::{Reply, SourceReference};
use threadcite_types::error::TurnError;
use threadcite_types::session::RunHandle;
use tracing::debug;

use crate::assistant::client::AssistantClient;

use super::resolver::{FileNameCache, SourceResolver};

static CITATION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"【(\d+):(\d+)†source】").expect("citation marker pattern is valid")
});

/// Extract the page number from a citation marker.
///
/// The first marker found anywhere in `marker_text` wins; its first number
/// is the page. Text without a marker has no page.
pub fn parse_page_number(marker_text: &str) -> Option<String> {
    CITATION_MARKER
        .captures(marker_text)
        .and_then(|caps| caps.get(1))
        .map(|page| page.as_str().to_string())
}

/// Fetch the reply to the turn anchored by `handle` and build a [`Reply`].
///
/// Lists the thread's messages after the anchoring user message and uses the
/// first one. No message yields an empty reply. Listing or file lookup
/// failures are extraction failures.
pub async fn extract_reply<C: AssistantClient, K: FileNameCache>(
    client: &C,
    resolver: &SourceResolver<K>,
    handle: &RunHandle,
) -> Result<Reply, TurnError> {
    let messages = client
        .list_messages(
            &handle.thread_id,
            &MessageQuery::after(handle.anchor_message_id.clone()),
        )
        .await
        .map_err(TurnError::Extraction)?;

    let Some(message) = messages.first() else {
        debug!(
            thread.id = %handle.thread_id,
            anchor = %handle.anchor_message_id,
            "No message after anchor"
        );
        return Ok(Reply::empty());
    };

    reply_from_message(client, resolver, message).await
}

/// Build a [`Reply`] from one assistant message.
pub async fn reply_from_message<C: AssistantClient, K: FileNameCache>(
    client: &C,
    resolver: &SourceResolver<K>,
    message: &ThreadMessage,
) -> Result<Reply, TurnError> {
    let mut text = String::new();
    let mut sources = Vec::new();
    let mut seen = HashSet::new();

    for block in &message.content {
        let ContentBlock::Text { text: content } = block else {
            continue;
        };
        text.push_str(&content.value);

        for annotation in &content.annotations {
            let Annotation::FileCitation {
                text: marker,
                file_citation,
                ..
            } = annotation
            else {
                continue;
            };

            let file_name = resolver
                .resolve_file_name(client, &file_citation.file_id)
                .await
                .map_err(TurnError::Extraction)?;
            let source = SourceReference::new(file_name, parse_page_number(marker));

            if seen.insert(source.clone()) {
                sources.push(source);
            }
        }
    }

    Ok(Reply { text, sources })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::resolver::InMemoryFileNameCache;
    use crate::testing::{ScriptedClient, assistant_message, citation, text_block};
    use threadcite_types::assistant::{RunStatus, SortOrder};

    fn handle() -> RunHandle {
        RunHandle {
            run_id: "run_1".to_string(),
            thread_id: "thread_1".to_string(),
            anchor_message_id: "msg_user_1".to_string(),
            status: RunStatus::Completed,
        }
    }

    fn resolver() -> SourceResolver<InMemoryFileNameCache> {
        SourceResolver::new(InMemoryFileNameCache::new())
    }

    #[test]
    fn test_parse_page_number() {
        assert_eq!(parse_page_number("【12:3†source】").as_deref(), Some("12"));
        assert_eq!(parse_page_number("see 【7:0†source】 here").as_deref(), Some("7"));
        assert_eq!(parse_page_number("no marker here"), None);
        assert_eq!(parse_page_number("[12:3†source]"), None);
        assert_eq!(parse_page_number("【12†source】"), None);
    }

    #[tokio::test]
    async fn test_lists_chronologically_after_anchor() {
        let client = ScriptedClient::new()
            .with_reply(assistant_message(vec![text_block("hi", Vec::new())]));
        extract_reply(&client, &resolver(), &handle()).await.unwrap();

        let query = client.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(query.order, SortOrder::Asc);
        assert_eq!(query.after.as_deref(), Some("msg_user_1"));
    }

    #[tokio::test]
    async fn test_no_message_yields_empty_reply() {
        let client = ScriptedClient::new();
        let reply = extract_reply(&client, &resolver(), &handle()).await.unwrap();
        assert_eq!(reply, Reply::empty());
    }

    #[tokio::test]
    async fn test_identical_citations_deduplicated() {
        let marker = "【3:1†source】";
        let client = ScriptedClient::new()
            .with_file("f1", Some("green.pdf"))
            .with_reply(assistant_message(vec![text_block(
                "Answer.",
                vec![citation("f1", marker), citation("f1", marker)],
            )]));

        let reply = extract_reply(&client, &resolver(), &handle()).await.unwrap();
        assert_eq!(reply.text, "Answer.");
        assert_eq!(
            reply.sources,
            vec![SourceReference::new("green.pdf", Some("3".to_string()))]
        );
        assert_eq!(ScriptedClient::count(&client.calls.retrieve_file), 1);
    }

    #[tokio::test]
    async fn test_distinct_pages_are_kept() {
        let client = ScriptedClient::new()
            .with_file("f1", Some("a.pdf"))
            .with_file("f2", Some("b.pdf"))
            .with_reply(assistant_message(vec![text_block(
                "x",
                vec![
                    citation("f1", "【1:0†source】"),
                    citation("f1", "【2:0†source】"),
                    citation("f2", "【1:0†source】"),
                    citation("f2", "garbled"),
                ],
            )]));

        let reply = extract_reply(&client, &resolver(), &handle()).await.unwrap();
        assert_eq!(reply.sources.len(), 4);
        assert!(reply.sources.contains(&SourceReference::new("b.pdf", None)));
    }

    #[tokio::test]
    async fn test_non_text_blocks_and_annotations_ignored() {
        let client = ScriptedClient::new().with_reply(assistant_message(vec![
            ContentBlock::Other,
            text_block("only text", vec![Annotation::Other]),
        ]));

        let reply = extract_reply(&client, &resolver(), &handle()).await.unwrap();
        assert_eq!(reply.text, "only text");
        assert!(reply.sources.is_empty());
        assert_eq!(ScriptedClient::count(&client.calls.retrieve_file), 0);
    }

    #[tokio::test]
    async fn test_message_without_text_blocks_is_empty() {
        let client =
            ScriptedClient::new().with_reply(assistant_message(vec![ContentBlock::Other]));
        let reply = extract_reply(&client, &resolver(), &handle()).await.unwrap();
        assert!(reply.is_empty());
    }

    #[tokio::test]
    async fn test_listing_failure_is_extraction_error() {
        let client = ScriptedClient::new().failing_list();
        let err = extract_reply(&client, &resolver(), &handle()).await.unwrap_err();
        assert!(matches!(err, TurnError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_file_lookup_failure_is_extraction_error() {
        let client = ScriptedClient::new().with_reply(assistant_message(vec![text_block(
            "x",
            vec![citation("missing", "【1:0†source】")],
        )]));
        let err = extract_reply(&client, &resolver(), &handle()).await.unwrap_err();
        assert!(matches!(err, TurnError::Extraction(_)));
    }
}
