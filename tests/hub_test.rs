//! Integration tests for the realtime hub: registry membership,
//! fan-out delivery, dead-listener pruning and topic isolation across
//! concurrent publishers.

use treechan::backend::realtime::{ConnectionSender, Hub, Topic};
use treechan::shared::event::WsEvent;

use axum::extract::ws::Message;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

/// Register a fresh listener on `topic`; returns the receiving side a
/// connection's writer task would own.
fn listener(hub: &Hub, topic: Topic) -> (u64, UnboundedReceiver<Message>) {
    let (tx, rx): (ConnectionSender, _) = unbounded_channel();
    let id = hub.register(topic, tx);
    (id, rx)
}

fn event_type(msg: Message) -> String {
    match msg {
        Message::Text(text) => {
            let value: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
            value["type"].as_str().unwrap().to_string()
        }
        other => panic!("expected text frame, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fan_out_reaches_every_listener_of_the_topic() {
    let hub = Hub::new();
    let topic = Topic::Thread(7);

    let mut receivers: Vec<_> = (0..5)
        .map(|_| listener(&hub, topic.clone()).1)
        .collect();
    let (_, mut other_rx) = listener(&hub, Topic::Thread(8));

    hub.publish(&topic, &WsEvent::thread_updated(7, "b"));

    for rx in &mut receivers {
        assert_eq!(event_type(rx.recv().await.unwrap()), "thread_updated");
    }
    // The unrelated thread's listener saw nothing.
    assert!(other_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_forcibly_disconnected_listener_is_pruned_on_publish() {
    // Two listeners on thread:7; one is forcibly disconnected; publish
    // delivers to the survivor only and membership shrinks to 1.
    let hub = Hub::new();
    let topic = Topic::Thread(7);

    let (_, rx_gone) = listener(&hub, topic.clone());
    let (_, mut rx_live) = listener(&hub, topic.clone());
    assert_eq!(hub.members_of(&topic).len(), 2);

    drop(rx_gone);
    hub.publish(&topic, &WsEvent::thread_updated(7, "b"));

    assert_eq!(event_type(rx_live.recv().await.unwrap()), "thread_updated");
    assert_eq!(hub.members_of(&topic).len(), 1);
}

#[tokio::test]
async fn test_unregister_then_publish_skips_the_departed() {
    let hub = Hub::new();
    let topic = Topic::Board("b".to_string());

    let (id, mut rx_gone) = listener(&hub, topic.clone());
    let (_, mut rx_live) = listener(&hub, topic.clone());

    hub.unregister(&topic, id);
    hub.publish(&topic, &WsEvent::new_thread(1, "b"));

    assert!(rx_gone.try_recv().is_err());
    assert_eq!(event_type(rx_live.recv().await.unwrap()), "new_thread");
}

#[tokio::test]
async fn test_publish_order_is_preserved_per_listener_under_concurrency() {
    // Many concurrent publishers on distinct topics must not corrupt
    // per-topic membership or per-listener ordering on a given topic.
    let hub = Hub::new();
    let topic = Topic::Thread(1);
    let (_, mut rx) = listener(&hub, topic.clone());

    // Background noise on other topics.
    let noise: Vec<_> = (2..10)
        .map(|i| {
            let hub = hub.clone();
            tokio::spawn(async move {
                for _ in 0..50 {
                    hub.publish(&Topic::Thread(i), &WsEvent::thread_updated(i, "b"));
                }
            })
        })
        .collect();

    // Sequential publishes on the observed topic.
    for seq in 0..100i64 {
        hub.publish(&topic, &WsEvent::new_thread(seq, "b"));
    }

    for task in noise {
        task.await.unwrap();
    }

    for expected in 0..100i64 {
        let msg = rx.recv().await.unwrap();
        let Message::Text(text) = msg else {
            panic!("expected text frame")
        };
        let value: serde_json::Value = serde_json::from_str(text.as_str()).unwrap();
        assert_eq!(value["thread_id"], expected);
    }
}

#[tokio::test]
async fn test_concurrent_register_unregister_keeps_registry_consistent() {
    let hub = Hub::new();
    let topic = Topic::Home;

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let hub = hub.clone();
            let topic = topic.clone();
            tokio::spawn(async move {
                for _ in 0..100 {
                    let (tx, rx) = unbounded_channel();
                    let id = hub.register(topic.clone(), tx);
                    drop(rx);
                    hub.unregister(&topic, id);
                    // Second unregister must stay a no-op.
                    hub.unregister(&topic, id);
                }
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    assert!(hub.members_of(&topic).is_empty());
}

#[tokio::test]
async fn test_same_id_across_topics_does_not_cross_talk() {
    // Registering the "same" listener concept on two topics yields two
    // independent memberships; removing one leaves the other.
    let hub = Hub::new();
    let thread_topic = Topic::Thread(7);
    let board_topic = Topic::Board("7".to_string());

    let (thread_id, _thread_rx) = listener(&hub, thread_topic.clone());
    let (_board_id, mut board_rx) = listener(&hub, board_topic.clone());

    hub.unregister(&thread_topic, thread_id);

    hub.publish(&board_topic, &WsEvent::thread_updated(7, "7"));
    assert_eq!(event_type(board_rx.recv().await.unwrap()), "thread_updated");
    assert!(hub.members_of(&thread_topic).is_empty());
}
