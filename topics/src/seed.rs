//! Stock topics for a fresh knowledge base.

use crate::store::TopicStore;
use crate::topic::{ExampleQuery, Topic};

use uuid::Uuid;

// 2024-01-DD 00:00:00 UTC in ms.
const JAN_05: i64 = 1_704_412_800_000;
const JAN_10: i64 = 1_704_844_800_000;
const JAN_15: i64 = 1_705_276_800_000;
const JAN_18: i64 = 1_705_536_000_000;
const JAN_20: i64 = 1_705_708_800_000;
const JAN_22: i64 = 1_705_881_600_000;

fn topic(name: &str, content: &str, actions: &str, queries: &[&str], created: i64, updated: i64) -> Topic {
    Topic {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        content: content.to_owned(),
        actions: actions.to_owned(),
        example_queries: queries.iter().map(|q| ExampleQuery::new(*q)).collect(),
        created_at: Some(created),
        updated_at: Some(updated),
    }
}

#[must_use]
pub fn initial_topics() -> Vec<Topic> {
    vec![
        topic(
            "Greeting and Introduction",
            "When a user initiates a conversation, greet them warmly and introduce yourself as an AI assistant. \
             Ask how you can help them today.",
            "",
            &["Hello", "Hi there", "Good morning"],
            JAN_15,
            JAN_20,
        ),
        topic(
            "Product Information",
            "Provide detailed information about our products including features, pricing, and availability. \
             Always check the latest inventory before confirming stock.",
            "check_inventory, get_product_details",
            &["What products do you have?", "Tell me about your pricing"],
            JAN_10,
            JAN_18,
        ),
        topic(
            "Order Status",
            "Help users track their orders by looking up order status using their order number or email address. \
             Provide estimated delivery dates when available.",
            "lookup_order, get_tracking_info",
            &["Where is my order?", "Track my package", "When will my order arrive?"],
            JAN_05,
            JAN_22,
        ),
    ]
}

/// A store preloaded with [`initial_topics`], all expanded.
#[must_use]
pub fn seeded_store() -> TopicStore {
    TopicStore::from_topics(initial_topics())
}
