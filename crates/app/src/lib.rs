//! Chart window for `udpscope`.
//!
//! Owns the Iced application loop and wires together its background work:
//! - UDP receive loop (one dedicated thread, blocking receive)
//! - Config file watcher (live reload of chart style and trim policy)

pub mod console;
pub mod pipeline;

pub use console::Console;
pub use pipeline::{pump, Pipeline};

use futures::channel::mpsc::Sender;
use futures::SinkExt;
use iced::{
    widget::{column, container, text},
    Element, Length, Size, Subscription, Task,
};
use scope_chart::ChartStyle;
use scope_config::{default_path, load as load_config, ConfigWatcher, ScopeConfig};
use scope_core::{event::Message, MalformedPolicy, Result, Sample, ScopeError};
use scope_net::{Endpoint, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{error, info, warn};

/// Datagrams decoded but not yet drawn.  The receive thread blocks when full.
const CHANNEL_CAPACITY: usize = 64;

/// Where a fatal receive-loop error is parked until the window has closed.
type FaultSlot = Arc<Mutex<Option<Arc<ScopeError>>>>;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the chart window and plot everything `receiver` hands over.
///
/// Returns when the window is closed, or with [`ScopeError::Halted`] after
/// the receive loop hit a fatal error.
pub fn run(config: ScopeConfig, receiver: Receiver) -> Result<()> {
    let receiver = Arc::new(receiver);
    let fault = FaultSlot::default();

    let boot = {
        let fault = Arc::clone(&fault);
        move || Scope::new(config.clone(), Arc::clone(&receiver), Arc::clone(&fault))
    };

    iced::application(boot, Scope::update, Scope::view)
        .title(Scope::title)
        .subscription(Scope::subscription)
        .window_size(Size::new(900.0, 560.0))
        .run()
        .map_err(|e| ScopeError::Display(e.to_string()))?;

    take_fault(&fault)
}

fn park_fault(fault: &FaultSlot, e: Arc<ScopeError>) {
    if let Ok(mut slot) = fault.lock() {
        *slot = Some(e);
    }
}

fn take_fault(fault: &FaultSlot) -> Result<()> {
    match fault.lock().ok().and_then(|mut slot| slot.take()) {
        Some(e) => Err(ScopeError::Halted(e)),
        None => Ok(()),
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

struct Scope {
    pipeline: Pipeline,
    style:    ChartStyle,
    config:   ScopeConfig,
    endpoint: Endpoint,
    last:     Option<Sample>,
    fault:    FaultSlot,
}

impl Scope {
    fn new(config: ScopeConfig, receiver: Arc<Receiver>, fault: FaultSlot) -> (Self, Task<Message>) {
        let scope = Self {
            pipeline: Pipeline::stdout(config.buffer),
            style:    ChartStyle::from_config(&config.chart),
            endpoint: receiver.local_endpoint(),
            last:     None,
            fault,
            config,
        };

        let policy = scope.config.payload.on_malformed;
        let samples = Task::run(receive_stream(receiver, policy), std::convert::identity);

        (scope, samples)
    }

    fn title(&self) -> String {
        format!("{} ({})", self.config.chart.title, self.endpoint)
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SampleReceived(sample) => {
                self.pipeline.accept(&sample);
                self.last = Some(sample);
            }
            Message::ReceiverFailed(e) => {
                error!(error = ?e, "Receive loop stopped");
                park_fault(&self.fault, e);
                return iced::exit();
            }
            Message::ConfigReloaded => self.reload(),
        }
        Task::none()
    }

    fn reload(&mut self) {
        let cfg = match load_config(default_path()) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Config reload failed: {e}");
                return;
            }
        };

        if cfg.listen != self.config.listen {
            warn!("[listen] changed; restart udpscope to rebind");
        }
        if cfg.payload != self.config.payload {
            warn!("[payload] changed; takes effect after a restart");
        }

        self.style = ChartStyle::from_config(&cfg.chart);
        self.pipeline.plotter_mut().set_policy(cfg.buffer);
        self.pipeline.plotter_mut().redraw();
        info!("Config reloaded");

        // Keep the settings actually in force for the next comparison.
        self.config.chart = cfg.chart;
        self.config.buffer = cfg.buffer;
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let plotter = self.pipeline.plotter();
        let count = plotter.buffer().len();

        let status = match &self.last {
            Some(sample) => format!(
                "{}  ·  {count} sample(s)  ·  last {} from {} at {}",
                self.endpoint,
                console::format_sample(sample.value),
                sample.source,
                sample.received_at.format("%H:%M:%S"),
            ),
            None => format!("{}  ·  waiting for datagrams", self.endpoint),
        };

        column![
            container(text(status).size(13)).padding([6, 10]),
            container(plotter.view(&self.style))
                .width(Length::Fill)
                .height(Length::Fill),
        ]
        .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        Subscription::run(config_stream)
    }
}

// ── Streams ───────────────────────────────────────────────────────────────────

/// Runs the blocking receive loop on its own thread and forwards samples.
///
/// A plain thread rather than the async runtime's blocking pool: it sits in
/// `recv_from` forever and must not hold up runtime shutdown when the window
/// closes.
fn receive_stream(
    receiver: Arc<Receiver>,
    policy: MalformedPolicy,
) -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(CHANNEL_CAPACITY, move |sender: Sender<Message>| async move {
        let mut fallback = sender.clone();
        let spawned = std::thread::Builder::new()
            .name("udp-receive".into())
            .spawn(move || receive_loop(&receiver, policy, sender));

        if let Err(e) = spawned {
            let _ = fallback.try_send(Message::ReceiverFailed(Arc::new(ScopeError::from(e))));
        }
    })
}

fn receive_loop(receiver: &Receiver, policy: MalformedPolicy, mut sender: Sender<Message>) {
    loop {
        let message = match pump(receiver, policy) {
            Ok(sample) => Message::SampleReceived(sample),
            Err(e) => Message::ReceiverFailed(Arc::new(e)),
        };
        let fatal = matches!(message, Message::ReceiverFailed(_));

        if futures::executor::block_on(sender.send(message)).is_err() || fatal {
            break; // window closed, or nothing more to receive
        }
    }
}

/// Watches the config file for writes and sends `ConfigReloaded`.
fn config_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(1, |mut sender: Sender<Message>| async move {
        let (_watcher, mut rx) = ConfigWatcher::spawn(default_path());

        while rx.recv().await.is_some() {
            let _ = sender.try_send(Message::ConfigReloaded);
        }

        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc;
    use futures::StreamExt;
    use scope_net::Transmitter;

    fn loopback() -> (Receiver, Transmitter) {
        let receiver = Receiver::bind(Endpoint::localhost(0), Receiver::DEFAULT_RECV_BUFFER).unwrap();
        let transmitter = Transmitter::new(receiver.local_endpoint()).unwrap();
        (receiver, transmitter)
    }

    #[test]
    fn fatal_decode_is_forwarded_then_loop_stops() {
        let (receiver, tx) = loopback();
        let (sender, mut messages) = mpsc::channel(CHANNEL_CAPACITY);

        tx.send_raw(b"1.0").unwrap();
        tx.send_raw(b"abc").unwrap();

        let worker = std::thread::spawn(move || receive_loop(&receiver, MalformedPolicy::Fatal, sender));

        let first = futures::executor::block_on(messages.next());
        assert!(matches!(first, Some(Message::SampleReceived(ref s)) if s.value == 1.0), "{first:?}");

        let second = futures::executor::block_on(messages.next());
        match second {
            Some(Message::ReceiverFailed(e)) => {
                assert!(matches!(*e, ScopeError::Decode { ref payload } if payload == b"abc"));
            }
            other => panic!("expected ReceiverFailed, got {other:?}"),
        }

        worker.join().unwrap();
        // The thread dropped its sender on the way out.
        assert!(futures::executor::block_on(messages.next()).is_none());
    }

    #[test]
    fn loop_stops_once_the_window_is_gone() {
        let (receiver, tx) = loopback();
        let (sender, messages) = mpsc::channel(CHANNEL_CAPACITY);
        drop(messages);

        tx.send_raw(b"2.0").unwrap();

        let worker = std::thread::spawn(move || receive_loop(&receiver, MalformedPolicy::Skip, sender));
        worker.join().unwrap();
    }

    #[test]
    fn parked_fault_becomes_halted() {
        let fault = FaultSlot::default();
        assert!(take_fault(&fault).is_ok());

        park_fault(&fault, Arc::new(ScopeError::Decode { payload: b"abc".to_vec() }));
        match take_fault(&fault) {
            Err(ScopeError::Halted(cause)) => {
                assert!(matches!(*cause, ScopeError::Decode { .. }));
            }
            other => panic!("expected Halted, got {other:?}"),
        }

        // Taken once; a clean close afterwards is not reported again.
        assert!(take_fault(&fault).is_ok());
    }
}
