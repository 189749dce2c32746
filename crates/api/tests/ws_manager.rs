//! `WsManager` without HTTP upgrades: registration, per-user delivery and
//! shutdown.

use axum::extract::ws::Message;
use simcc_api::ws::WsManager;
use uuid::Uuid;

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();
    let user = Uuid::new_v4();

    let _rx1 = manager.add("conn-1".to_string(), user).await;
    let _rx2 = manager.add("conn-2".to_string(), user).await;
    assert_eq!(manager.connection_count().await, 2);

    manager.remove("conn-1").await;
    manager.remove("nonexistent").await;
    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn get_by_user_lists_only_that_users_connections() {
    let manager = WsManager::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let _a1 = manager.add("a-1".to_string(), alice).await;
    let _a2 = manager.add("a-2".to_string(), alice).await;
    let _b1 = manager.add("b-1".to_string(), bob).await;

    let mut ids = manager.get_by_user(alice).await;
    ids.sort();
    assert_eq!(ids, vec!["a-1".to_string(), "a-2".to_string()]);
}

#[tokio::test]
async fn send_to_user_fans_out_to_every_tab() {
    let manager = WsManager::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let mut tab1 = manager.add("a-1".to_string(), alice).await;
    let mut tab2 = manager.add("a-2".to_string(), alice).await;
    let mut other = manager.add("b-1".to_string(), bob).await;

    let sent = manager
        .send_json_to_user(alice, &serde_json::json!({ "type": "notification" }))
        .await;
    assert_eq!(sent, 2);

    for rx in [&mut tab1, &mut tab2] {
        let msg = rx.recv().await.expect("tab should receive the push");
        assert!(matches!(&msg, Message::Text(t) if t.as_str() == r#"{"type":"notification"}"#));
    }
    assert!(other.try_recv().is_err());
}

#[tokio::test]
async fn send_to_user_skips_closed_channels() {
    let manager = WsManager::new();
    let alice = Uuid::new_v4();

    let closed = manager.add("a-1".to_string(), alice).await;
    let mut open = manager.add("a-2".to_string(), alice).await;
    drop(closed);

    let sent = manager.send_to_user(alice, Message::Text("still here".into())).await;
    assert_eq!(sent, 1);
    let msg = open.recv().await.expect("open tab should receive");
    assert!(matches!(&msg, Message::Text(t) if t.as_str() == "still here"));
}

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();

    let mut rx1 = manager.add("conn-1".to_string(), Uuid::new_v4()).await;
    let mut rx2 = manager.add("conn-2".to_string(), Uuid::new_v4()).await;

    manager.shutdown_all().await;

    assert_eq!(manager.connection_count().await, 0);
    assert!(matches!(rx1.recv().await, Some(Message::Close(None))));
    assert!(matches!(rx2.recv().await, Some(Message::Close(None))));
    assert!(rx1.recv().await.is_none());
}

#[tokio::test]
async fn ping_all_reaches_every_connection() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn-1".to_string(), Uuid::new_v4()).await;

    manager.ping_all().await;

    assert!(matches!(rx.recv().await, Some(Message::Ping(_))));
}

#[tokio::test]
async fn duplicate_id_replaces_previous_connection() {
    let manager = WsManager::new();
    let user = Uuid::new_v4();

    let _old = manager.add("conn-1".to_string(), user).await;
    let mut new = manager.add("conn-1".to_string(), user).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.send_to_user(user, Message::Text("replaced".into())).await;
    let msg = new.recv().await.expect("new receiver should get the message");
    assert!(matches!(&msg, Message::Text(t) if t.as_str() == "replaced"));
}
