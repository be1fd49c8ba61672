use crate::api::{SearchClient, SearchMatch};
use crate::app::App;
use crate::chat_message::ChatMessage;
use crate::errors::QuarryResult;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Maps one resolved search into the bot messages to append.
///
/// A match produces exactly three messages in fixed order: the snippet, the
/// score to two decimal places, and the file link. Any error produces a
/// single `Error: ...` message.
pub fn reply_messages(result: QuarryResult<SearchMatch>) -> Vec<ChatMessage> {
    match result {
        Ok(found) => vec![
            ChatMessage::code(found.snippet),
            ChatMessage::bot(format!("Similarity Score: {:.2}", found.score)),
            ChatMessage::link(found.file_link),
        ],
        Err(e) => vec![ChatMessage::bot(format!("Error: {}", e))],
    }
}

/// Runs one search against the backend and commits the reply.
///
/// The pending flag is set by `begin_request` and cleared by
/// `finish_request`, which runs on every path out of the match, so a resolved
/// request can never leave the UI stuck in pending.
pub async fn run_search(app: Arc<Mutex<App>>, client: Arc<SearchClient>, query: String) {
    let token = {
        let mut guard = app.lock().await;
        let token = guard.begin_request();
        guard.status_indicator.set_status("searching...");
        guard.logs.add(format!("query: \"{}\"", query.trim()));
        token
    };

    let result = client.search(&query).await;

    let mut guard = app.lock().await;
    match &result {
        Ok(found) => {
            log::info!("search hit: {} (score {:.2})", found.file_link, found.score);
            guard
                .logs
                .add(format!("match found (score {:.2})", found.score));
        }
        Err(e) => {
            log::warn!("search failed: {}", e);
            guard.logs.add(format!("search failed: {}", e));
        }
    }
    let committed = guard.finish_request(token, reply_messages(result));
    if !committed {
        log::warn!("dropping reply for superseded request {}", token);
        guard.logs.add("stale reply dropped".to_string());
    }
    guard.status_indicator.clear_status();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat_message::{MessageKind, Sender};
    use crate::errors::QuarryError;

    #[test]
    fn a_match_becomes_three_messages_in_order() {
        let messages = reply_messages(Ok(SearchMatch {
            snippet: "def f(): pass".to_string(),
            score: 0.8567,
            file_link: "http://x/y".to_string(),
        }));
        assert_eq!(messages.len(), 3);
        assert!(messages.iter().all(|m| m.sender == Sender::Bot));
        assert_eq!(messages[0].kind, MessageKind::Code);
        assert_eq!(messages[0].text, "def f(): pass");
        assert_eq!(messages[1].kind, MessageKind::Plain);
        assert_eq!(messages[1].text, "Similarity Score: 0.86");
        assert_eq!(messages[2].text, "File Link: http://x/y");
        assert_eq!(messages[2].url(), Some("http://x/y"));
    }

    #[test]
    fn a_backend_error_becomes_one_message() {
        let messages = reply_messages(Err(QuarryError::backend("not found")));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "Error: not found");
        assert_eq!(messages[0].kind, MessageKind::Plain);
    }

    #[test]
    fn any_failure_is_prefixed_with_error() {
        let messages = reply_messages(Err(QuarryError::malformed("reply missing file_link")));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].text.starts_with("Error: "));
    }

    #[test]
    fn score_is_rounded_to_two_decimals() {
        let messages = reply_messages(Ok(SearchMatch {
            snippet: String::new(),
            score: 0.5,
            file_link: "http://x/y".to_string(),
        }));
        assert_eq!(messages[1].text, "Similarity Score: 0.50");
    }

    #[tokio::test]
    async fn run_search_clears_pending_on_failure() {
        // Nothing listens on this port; the transport error must still land
        // as a single Error bubble with pending cleared.
        let app = Arc::new(Mutex::new(App::new()));
        let client = Arc::new(SearchClient::new("http://127.0.0.1:1"));
        run_search(app.clone(), client, "foo".to_string()).await;

        let guard = app.lock().await;
        assert!(!guard.pending);
        assert_eq!(guard.conversation.len(), 1);
        let reply = guard.conversation.iter().next().unwrap();
        assert!(reply.text.starts_with("Error: "));
    }
}
