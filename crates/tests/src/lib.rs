//! # Integration Tests
//!
//! End-to-end scenarios across config_loader, rlog and observability.
//!
//! Covers:
//! - Contract snapshot checks
//! - Blueprint → logger → real descriptors and sockets
//! - Concurrency across registry transitions and printing

#[cfg(test)]
mod contract_tests {
    use contracts::{LogLevel, level_char};

    #[test]
    fn test_level_letters_are_stable() {
        let letters: String = (0..=5).map(level_char).collect();
        assert_eq!(letters, "VDIWEU");
        assert_eq!(LogLevel::Warning.as_u8(), 3);
    }

    #[test]
    fn test_status_codes_are_stable() {
        use rlog::RlogError;

        assert_eq!(RlogError::DuplicateName("a".into()).code(), -1);
        assert_eq!(RlogError::NotFound("a".into()).code(), -2);
        assert_eq!(RlogError::AlreadyEnabled("a".into()).code(), -3);
        assert_eq!(RlogError::InvalidArgument("a".into()).code(), -5);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
    use std::net::{TcpListener, UdpSocket};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ContractError, InitArg, LogLevel, LogWriter};
    use observability::MetricsSummary;
    use parking_lot::Mutex;
    use rlog::{FnWriter, Logger, RlogError, create_logger};

    fn load(toml: &str) -> contracts::LoggingBlueprint {
        ConfigLoader::load_from_str(toml, ConfigFormat::Toml).unwrap()
    }

    fn strip_timestamp(line: &str) -> String {
        let open = line.find("  [").unwrap();
        let close = line.find("]  ").unwrap();
        format!("{}{}", &line[..open], &line[close + 1..])
    }

    /// End-to-end: TOML blueprint -> Logger -> fd endpoint backed by a file
    #[cfg(unix)]
    #[test]
    fn test_e2e_fd_endpoint_from_blueprint() {
        use std::os::fd::AsRawFd;

        let mut file = tempfile::tempfile().unwrap();
        let blueprint = load(&format!(
            r#"
[logger]
seed_std = false

[[endpoints]]
name = "file"
writer = "fd"
fd = {}
"#,
            file.as_raw_fd()
        ));

        let logger = create_logger(&blueprint).unwrap();
        logger.print(LogLevel::Info, "APP", format_args!("started v{}", 2));
        logger.print(LogLevel::Error, "DB", format_args!("lost connection\n"));
        logger.print(LogLevel::Info, "", format_args!("dropped"));

        let metrics = logger.metrics();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].1.write_count, 2);
        logger.shutdown();

        file.seek(SeekFrom::Start(0)).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        let lines: Vec<String> = content
            .split_inclusive('\n')
            .map(strip_timestamp)
            .collect();
        assert_eq!(lines, vec!["APP/I  started v2\n", "DB/E  lost connection\n"]);
    }

    /// End-to-end: UDP and TCP endpoints receive the same line
    #[test]
    fn test_e2e_socket_fan_out() {
        let udp = UdpSocket::bind("127.0.0.1:0").unwrap();
        udp.set_read_timeout(Some(Duration::from_secs(2))).unwrap();
        let tcp = TcpListener::bind("127.0.0.1:0").unwrap();

        let blueprint = load(&format!(
            r#"
[logger]
seed_std = false

[[endpoints]]
name = "udp"
writer = "socket"
target = "udp://{}"

[[endpoints]]
name = "tcp"
writer = "socket"
target = "tcp://{}"
"#,
            udp.local_addr().unwrap(),
            tcp.local_addr().unwrap()
        ));

        let logger = create_logger(&blueprint).unwrap();
        let (peer, _) = tcp.accept().unwrap();
        logger.print(LogLevel::Warning, "NET", format_args!("retrying"));

        let mut buf = [0u8; 256];
        let n = udp.recv(&mut buf).unwrap();
        let datagram = String::from_utf8_lossy(&buf[..n]).into_owned();

        // Disconnect so the TCP reader sees EOF
        logger.shutdown();
        let streamed: Vec<String> = BufReader::new(peer).lines().map(|l| l.unwrap()).collect();

        assert_eq!(strip_timestamp(&datagram), "NET/W  retrying\n");
        assert_eq!(streamed.len(), 1);
        assert_eq!(format!("{}\n", streamed[0]), datagram);
    }

    /// Unreachable endpoint in a blueprint fails the whole build
    #[test]
    fn test_e2e_unreachable_endpoint() {
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let blueprint = load(&format!(
            r#"
[logger]
seed_std = false

[[endpoints]]
name = "down"
writer = "socket"
target = "tcp://{addr}"
"#
        ));

        let err = create_logger(&blueprint).unwrap_err();
        assert!(matches!(err, RlogError::WriterInitFailed { .. }));
        assert_eq!(err.code(), -4);
    }

    /// A failing endpoint is counted but never blocks the healthy ones
    #[test]
    fn test_e2e_failure_isolation_and_summary() {
        let logger = Logger::builder().seed_std(false).build();
        let delivered = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&delivered);

        logger
            .add_fn_endpoint(
                "broken",
                FnWriter::new().on_write(|_| Err(ContractError::writer_write("broken", "down"))),
            )
            .unwrap();
        logger
            .add_fn_endpoint(
                "healthy",
                FnWriter::new().on_write(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }),
            )
            .unwrap();
        logger.enable_endpoint("broken", InitArg::None, true).unwrap();
        logger.enable_endpoint("healthy", InitArg::None, true).unwrap();

        for i in 0..3 {
            logger.print(LogLevel::Info, "ISO", format_args!("message {i}"));
        }

        assert_eq!(delivered.load(Ordering::SeqCst), 3);
        let summary = MetricsSummary::from_snapshots(&logger.metrics());
        assert_eq!(summary.total_writes, 3);
        assert_eq!(summary.total_failures, 3);
        assert!((summary.failure_rate() - 50.0).abs() < 1e-10);
    }

    /// Writer that asserts write and destroy never overlap
    #[derive(Default)]
    struct OverlapGuard {
        writing: AtomicBool,
        open: AtomicBool,
        violations: AtomicUsize,
        writes: AtomicUsize,
    }

    impl LogWriter for OverlapGuard {
        fn init(&self, _arg: &InitArg) -> Result<(), ContractError> {
            self.open.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn destroy(&self) {
            if self.writing.load(Ordering::SeqCst) {
                self.violations.fetch_add(1, Ordering::SeqCst);
            }
            self.open.store(false, Ordering::SeqCst);
        }

        fn write(&self, _data: &[u8]) -> Result<(), ContractError> {
            self.writing.store(true, Ordering::SeqCst);
            if !self.open.load(Ordering::SeqCst) {
                self.violations.fetch_add(1, Ordering::SeqCst);
            }
            std::thread::yield_now();
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.writing.store(false, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Toggling and removing endpoints while other threads print
    #[test]
    fn test_e2e_destroy_never_overlaps_write() {
        let logger = Arc::new(Logger::builder().seed_std(false).build());
        let guard = Arc::new(OverlapGuard::default());
        logger
            .add_endpoint("guarded", Arc::clone(&guard) as Arc<dyn LogWriter>)
            .unwrap();
        logger
            .enable_endpoint("guarded", InitArg::None, true)
            .unwrap();

        let stop = Arc::new(AtomicBool::new(false));
        let printers: Vec<_> = (0..3)
            .map(|_| {
                let logger = Arc::clone(&logger);
                let stop = Arc::clone(&stop);
                std::thread::spawn(move || {
                    while !stop.load(Ordering::Relaxed) {
                        logger.print(LogLevel::Debug, "RACE", format_args!("tick"));
                    }
                })
            })
            .collect();

        for _ in 0..200 {
            logger
                .enable_endpoint("guarded", InitArg::None, false)
                .unwrap();
            logger
                .enable_endpoint("guarded", InitArg::None, true)
                .unwrap();
        }
        logger.remove_endpoint("guarded");

        stop.store(true, Ordering::Relaxed);
        for p in printers {
            p.join().unwrap();
        }

        assert_eq!(guard.violations.load(Ordering::SeqCst), 0);
        // Shared writer survives its registration
        assert_eq!(Arc::strong_count(&guard), 1);
    }

    /// Registration from many threads: exactly one wins each name
    #[test]
    fn test_e2e_concurrent_duplicate_registration() {
        let logger = Arc::new(Logger::builder().seed_std(false).build());
        let outcomes = Arc::new(Mutex::new(Vec::new()));

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let logger = Arc::clone(&logger);
                let outcomes = Arc::clone(&outcomes);
                std::thread::spawn(move || {
                    let result = logger.add_fn_endpoint("contended", FnWriter::new());
                    outcomes.lock().push(rlog::status_code(&result));
                })
            })
            .collect();
        for w in workers {
            w.join().unwrap();
        }

        let outcomes = outcomes.lock();
        assert_eq!(outcomes.iter().filter(|c| **c == 0).count(), 1);
        assert_eq!(outcomes.iter().filter(|c| **c == -1).count(), 7);
        assert_eq!(logger.endpoints().len(), 1);
    }
}
