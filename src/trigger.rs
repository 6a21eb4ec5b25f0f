use crate::domain::StreamEvent;

const REPLIED_TO: &str = "replied_to";

/// Decides whether a stream event should start an analysis. Fires only for
/// replies whose text contains the trigger phrase (case-insensitive), and
/// returns the id of the post being replied to. Stateless; every event is
/// judged on its own.
pub fn detect(event: &StreamEvent, trigger_phrase: &str) -> Option<String> {
    let parent = event.referenced.iter().find(|r| r.kind == REPLIED_TO)?;
    if event
        .text
        .to_lowercase()
        .contains(&trigger_phrase.to_lowercase())
    {
        Some(parent.id.clone())
    } else {
        None
    }
}
