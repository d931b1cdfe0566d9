use iced::Size;
use scope_app::{pump, Console, Pipeline};
use scope_core::{MalformedPolicy, ScopeError, TrimPolicy};
use scope_net::{Endpoint, Receiver, Transmitter};

fn loopback() -> (Receiver, Transmitter) {
    let receiver = Receiver::bind(Endpoint::localhost(0), Receiver::DEFAULT_RECV_BUFFER).unwrap();
    let transmitter = Transmitter::new(receiver.local_endpoint()).unwrap();
    (receiver, transmitter)
}

fn pipeline() -> Pipeline<Vec<u8>> {
    Pipeline::new(TrimPolicy::default(), Console::new(Vec::new()))
}

fn output(pipeline: &Pipeline<Vec<u8>>) -> String {
    String::from_utf8(pipeline.console().get_ref().clone()).unwrap()
}

#[test]
fn three_samples_print_buffer_and_plot_in_order() {
    let (rx, tx) = loopback();
    let mut pipeline = pipeline();

    for payload in ["1.0", "2.0", "3.0"] {
        tx.send_raw(payload.as_bytes()).unwrap();
    }
    for _ in 0..3 {
        let sample = pump(&rx, MalformedPolicy::Fatal).unwrap();
        pipeline.accept(&sample);
    }

    assert_eq!(output(&pipeline), "1.0\n2.0\n3.0\n");

    let plotter = pipeline.plotter();
    assert_eq!(plotter.buffer().newest_first().collect::<Vec<_>>(), vec![3.0, 2.0, 1.0]);
    assert_eq!(plotter.buffer().chronological().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);

    let scene = plotter.scene(Size::new(640.0, 480.0));
    assert!(scene.points.windows(2).all(|w| w[0].x < w[1].x && w[0].y > w[1].y));
}

#[test]
fn malformed_payload_is_skipped_by_default() {
    let (rx, tx) = loopback();
    let mut pipeline = pipeline();

    tx.send_raw(b"1.5").unwrap();
    tx.send_raw(b"abc").unwrap();
    tx.send_raw(b"2.5").unwrap();

    for _ in 0..2 {
        let sample = pump(&rx, MalformedPolicy::Skip).unwrap();
        pipeline.accept(&sample);
    }

    assert_eq!(output(&pipeline), "1.5\n2.5\n");
    assert_eq!(pipeline.plotter().buffer().len(), 2);
}

#[test]
fn malformed_payload_is_fatal_when_configured() {
    let (rx, tx) = loopback();

    tx.send_raw(b"abc").unwrap();
    tx.send_raw(b"1.0").unwrap();

    let err = pump(&rx, MalformedPolicy::Fatal).unwrap_err();
    assert!(matches!(err, ScopeError::Decode { ref payload } if payload == b"abc"));

    // The loop stops at the bad datagram; the next one is still queued.
    assert_eq!(pump(&rx, MalformedPolicy::Fatal).unwrap().value, 1.0);
}

#[test]
fn occupied_port_fails_before_anything_is_processed() {
    let (held, tx) = loopback();
    tx.send_raw(b"9.0").unwrap();

    let err = Receiver::bind(held.local_endpoint(), Receiver::DEFAULT_RECV_BUFFER).unwrap_err();
    assert!(matches!(err, ScopeError::Bind { .. }));
}

#[test]
fn legacy_trim_keeps_one_thousand_over_the_wire() {
    let (rx, tx) = loopback();
    let mut pipeline = Pipeline::new(TrimPolicy::legacy(), Console::new(Vec::new()));

    for i in 1..=1001u32 {
        tx.send_value(f64::from(i)).unwrap();
        let sample = pump(&rx, MalformedPolicy::Fatal).unwrap();
        pipeline.accept(&sample);
    }

    let buffer = pipeline.plotter().buffer();
    assert_eq!(buffer.len(), 1000);
    assert_eq!(buffer.latest(), Some(1001.0));
    assert_eq!(buffer.newest_first().last(), Some(2.0));
    assert_eq!(pipeline.console().lines(), 1001);
}
