use scope_core::ScopeError;
use scope_net::{Endpoint, Receiver, Transmitter};

fn bind_ephemeral(recv_buffer: usize) -> Receiver {
    Receiver::bind(Endpoint::localhost(0), recv_buffer).expect("bind loopback")
}

#[test]
fn receives_one_datagram_per_call() {
    let rx = bind_ephemeral(Receiver::DEFAULT_RECV_BUFFER);
    let tx = Transmitter::new(rx.local_endpoint()).unwrap();

    tx.send_value(1.0).unwrap();
    tx.send_value("2.5").unwrap();

    let first = rx.receive_one().unwrap();
    let second = rx.receive_one().unwrap();
    assert_eq!(first.payload, b"1");
    assert_eq!(second.payload, b"2.5");
    assert_eq!(first.source.ip(), rx.local_endpoint().ip());
}

#[test]
fn oversized_payload_is_truncated_to_buffer() {
    let rx = bind_ephemeral(10);
    let tx = Transmitter::new(rx.local_endpoint()).unwrap();

    tx.send_raw(b"3.14159265358979").unwrap();
    let datagram = rx.receive_one().unwrap();
    assert_eq!(datagram.payload, b"3.14159265");
}

#[test]
fn second_bind_on_same_port_fails() {
    let first = bind_ephemeral(10);
    let taken = first.local_endpoint();

    let err = Receiver::bind(taken, 10).unwrap_err();
    match err {
        ScopeError::Bind { endpoint, source } => {
            assert_eq!(endpoint, taken.as_socket_addr());
            assert_eq!(source.kind(), std::io::ErrorKind::AddrInUse);
        }
        other => panic!("expected bind error, got {other:?}"),
    }
}

#[test]
fn bind_error_names_the_endpoint() {
    let first = bind_ephemeral(10);
    let err = Receiver::bind(first.local_endpoint(), 10).unwrap_err();
    assert!(err.to_string().starts_with(&format!("cannot bind {}", first.local_endpoint())));
}
