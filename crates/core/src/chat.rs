//! Chat topic naming and private-chat helpers.

use crate::types::DbId;

/// Pub/sub topic carrying live messages for one chat.
pub fn chat_topic(chat_id: DbId) -> String {
    format!("chat:user:{chat_id}")
}

/// Order two participants so a private chat is found regardless of who
/// opened it.
pub fn private_pair(a: DbId, b: DbId) -> (DbId, DbId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Unique key of the private chat between `a` and `b`: both ids in
/// ascending order, joined by `:`.
pub fn private_chat_key(a: DbId, b: DbId) -> String {
    let (lo, hi) = private_pair(a, b);
    format!("{lo}:{hi}")
}

/// Name given to a chat created without an explicit name.
pub fn default_chat_name<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" & ")
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn topic_embeds_chat_id() {
        let id = Uuid::nil();
        assert_eq!(
            chat_topic(id),
            "chat:user:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn private_pair_is_order_independent() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        assert_eq!(private_pair(a, b), private_pair(b, a));
    }

    #[test]
    fn private_key_is_order_independent() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        assert_eq!(private_chat_key(b, a), private_chat_key(a, b));
        assert_eq!(
            private_chat_key(b, a),
            "00000000-0000-0000-0000-000000000001:00000000-0000-0000-0000-000000000002"
        );
    }

    #[test]
    fn default_name_joins_with_ampersand() {
        assert_eq!(default_chat_name(&["ana", "bruno"]), "ana & bruno");
        assert_eq!(default_chat_name::<&str>(&[]), "");
    }
}
