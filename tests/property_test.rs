//! Property-based tests for the room registry

mod common;

use codecollab::network::{EmptyRoomPolicy, RoomRegistry, TcpTransport, Transport};
use codecollab::shared::{ChatMessage, ErrorKind, Peer};
use proptest::prelude::*;

fn non_empty() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_@.:-]{1,24}"
}

fn host_strategy() -> impl Strategy<Value = Peer> {
    (non_empty(), non_empty(), non_empty(), non_empty())
        .prop_map(|(id, name, email, address)| Peer::new(id, name, email, address))
}

proptest! {
    #[test]
    fn test_valid_host_creates_room(host in host_strategy()) {
        let transport = TcpTransport::new();
        let host_id = host.id.clone();

        let room_id = transport.create_room(host).unwrap();
        prop_assert!(common::is_room_id(&room_id));

        let rooms = transport.get_all_rooms();
        let room = &rooms[&room_id];
        prop_assert_eq!(room.peers.len(), 1);
        prop_assert!(room.contains(&host_id));
        prop_assert_eq!(&room.host.id, &host_id);
    }

    #[test]
    fn test_empty_field_is_rejected(host in host_strategy(), field in 0usize..4) {
        let registry = RoomRegistry::new(EmptyRoomPolicy::Remove);
        let mut host = host;
        match field {
            0 => host.id.clear(),
            1 => host.name.clear(),
            2 => host.email.clear(),
            _ => host.address.clear(),
        }

        let err = registry.create_room(host).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Validation);
        prop_assert!(registry.is_empty());
    }

    #[test]
    fn test_join_then_leave_restores_peer_set(
        ids in proptest::collection::hash_set("[a-z]{1,8}", 1..20)
    ) {
        let transport = TcpTransport::new();
        let room_id = transport.create_room(Peer::new("host", "Host", "h@x.com", "127.0.0.1:1")).unwrap();
        let ids: Vec<String> = ids.into_iter().filter(|id| id != "host").collect();

        for id in &ids {
            transport.join_room(&room_id, Peer::with_id(id.as_str())).unwrap();
        }
        prop_assert_eq!(transport.get_all_rooms()[&room_id].peers.len(), ids.len() + 1);

        for id in &ids {
            transport.leave_room(&room_id, id).unwrap();
        }
        let rooms = transport.get_all_rooms();
        prop_assert_eq!(rooms[&room_id].peers.len(), 1);
        prop_assert!(rooms[&room_id].contains("host"));
    }

    #[test]
    fn test_chat_line_ends_with_sender_and_content(
        sender in "[a-z0-9]{1,12}",
        content in "[ -~]{0,64}"
    ) {
        let message = ChatMessage::new(Peer::with_id(sender.as_str()), content.as_str());
        let line = message.line();
        let expected_suffix = format!("] {}: {}", sender, content);
        prop_assert!(line.starts_with('['));
        prop_assert!(line.ends_with(&expected_suffix));
    }
}
