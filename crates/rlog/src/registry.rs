//! Endpoint registry - name uniqueness and the enable/disable lifecycle
//!
//! Two locks:
//! - the control lock guards the name → endpoint map; `add`, `remove` and
//!   enable/disable hold it, including across `init` and `destroy`, so two
//!   transitions of one endpoint never overlap
//! - the fan-out lock guards the enabled subset; `fan_out` holds the read
//!   side across its write loop, transitions take the write side only to
//!   insert or remove one entry
//!
//! `init` and `destroy` never run under the fan-out lock.
//!
//! A writer may call back into the registry from `write` only through
//! `fan_out`, `is_enabled` and `enabled_names`; these take the fan-out lock
//! recursively. Anything touching the control lock from inside `write` can
//! deadlock against a pending transition.

use contracts::{InitArg, LogWriter, Ownership};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, instrument, trace, warn};

use crate::error::{Result, RlogError};
use crate::metrics::{EndpointMetrics, MetricsSnapshot};

/// Registered endpoint record
struct Endpoint {
    writer: Arc<dyn LogWriter>,
    ownership: Ownership,
    metrics: Arc<EndpointMetrics>,
    /// Argument of the current enable, `None` while disabled
    init_arg: Option<InitArg>,
    enabled: bool,
}

/// Fan-out entry, keyed by endpoint name in the enabled subset
#[derive(Clone)]
struct ActiveWriter {
    writer: Arc<dyn LogWriter>,
    metrics: Arc<EndpointMetrics>,
}

/// Read-only view of one endpoint
#[derive(Debug, Clone)]
pub struct EndpointInfo {
    pub name: String,
    pub enabled: bool,
    pub ownership: Ownership,
    pub init_arg: Option<InitArg>,
    pub metrics: MetricsSnapshot,
}

/// Endpoint registry
///
/// Invariant: the enabled subset holds exactly the endpoints whose
/// `enabled` flag is set.
#[derive(Default)]
pub struct Registry {
    endpoints: Mutex<HashMap<String, Endpoint>>,
    active: RwLock<BTreeMap<String, ActiveWriter>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a disabled endpoint
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty name
    /// - `DuplicateName` if the name is taken; the existing endpoint is untouched
    #[instrument(name = "registry_add", skip(self, writer))]
    pub fn add(&self, name: &str, writer: Arc<dyn LogWriter>, ownership: Ownership) -> Result<()> {
        if name.is_empty() {
            return Err(RlogError::InvalidArgument("endpoint name is empty".into()));
        }

        let mut endpoints = self.endpoints.lock();
        if endpoints.contains_key(name) {
            return Err(RlogError::DuplicateName(name.to_string()));
        }
        endpoints.insert(
            name.to_string(),
            Endpoint {
                writer,
                ownership,
                metrics: Arc::new(EndpointMetrics::new()),
                init_arg: None,
                enabled: false,
            },
        );

        debug!(endpoint = name, ?ownership, "Endpoint registered");
        Ok(())
    }

    /// Disable (running `destroy` if enabled) and erase an endpoint
    ///
    /// Unknown names are ignored.
    #[instrument(name = "registry_remove", skip(self))]
    pub fn remove(&self, name: &str) {
        let mut endpoints = self.endpoints.lock();
        let Some(mut endpoint) = endpoints.remove(name) else {
            return;
        };
        self.deactivate(name, &mut endpoint);

        match endpoint.ownership {
            Ownership::Owned => debug!(endpoint = name, "Endpoint removed, writer released"),
            Ownership::Shared => debug!(endpoint = name, "Endpoint removed"),
        }
        // Dropping the record releases the registry's reference; for an owned
        // writer that is the last one.
        drop(endpoint);
    }

    /// Enable or disable an endpoint
    ///
    /// Enabling runs `init(arg)` and, on success, publishes the writer to the
    /// fan-out set. Disabling an already disabled endpoint is a no-op.
    ///
    /// # Errors
    /// - `InvalidArgument` for an empty name
    /// - `NotFound` for an unknown name
    /// - `AlreadyEnabled` when enabling twice
    /// - `WriterInitFailed` when `init` fails; the endpoint stays disabled
    pub fn set_enabled(&self, name: &str, arg: InitArg, enable: bool) -> Result<()> {
        if enable {
            self.enable(name, arg)
        } else {
            self.disable(name)
        }
    }

    #[instrument(name = "registry_enable", skip(self))]
    pub fn enable(&self, name: &str, arg: InitArg) -> Result<()> {
        if name.is_empty() {
            return Err(RlogError::InvalidArgument("endpoint name is empty".into()));
        }

        let mut endpoints = self.endpoints.lock();
        let endpoint = endpoints
            .get_mut(name)
            .ok_or_else(|| RlogError::NotFound(name.to_string()))?;
        if endpoint.enabled {
            return Err(RlogError::AlreadyEnabled(name.to_string()));
        }

        if let Err(e) = endpoint.writer.init(&arg) {
            warn!(endpoint = name, error = %e, "Writer init failed");
            return Err(RlogError::writer_init_failed(name, e));
        }

        {
            let mut active = self.active.write();
            endpoint.enabled = true;
            endpoint.init_arg = Some(arg);
            active.insert(
                name.to_string(),
                ActiveWriter {
                    writer: Arc::clone(&endpoint.writer),
                    metrics: Arc::clone(&endpoint.metrics),
                },
            );
        }

        debug!(endpoint = name, "Endpoint enabled");
        Ok(())
    }

    #[instrument(name = "registry_disable", skip(self))]
    pub fn disable(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(RlogError::InvalidArgument("endpoint name is empty".into()));
        }

        let mut endpoints = self.endpoints.lock();
        let endpoint = endpoints
            .get_mut(name)
            .ok_or_else(|| RlogError::NotFound(name.to_string()))?;
        self.deactivate(name, endpoint);
        Ok(())
    }

    /// Pull an enabled endpoint out of the fan-out set, then `destroy` it
    ///
    /// Caller holds the control lock.
    fn deactivate(&self, name: &str, endpoint: &mut Endpoint) {
        if !endpoint.enabled {
            return;
        }
        {
            let mut active = self.active.write();
            active.remove(name);
            endpoint.enabled = false;
            endpoint.init_arg = None;
        }
        // Fan-out lock released: no write of this writer is in flight.
        endpoint.writer.destroy();
        debug!(endpoint = name, "Endpoint disabled");
    }

    /// Write `data` to every enabled endpoint
    ///
    /// Failures are counted and skipped, never surfaced. Returns how many
    /// endpoints accepted the write.
    pub fn fan_out(&self, data: &[u8]) -> usize {
        // Recursive read: a writer that logs from inside `write` must not
        // deadlock behind a queued enable/disable.
        let active = self.active.read_recursive();
        let mut delivered = 0;
        for (name, entry) in active.iter() {
            match entry.writer.write(data) {
                Ok(()) => {
                    entry.metrics.record_write(data.len());
                    delivered += 1;
                }
                Err(e) => {
                    entry.metrics.inc_failure_count();
                    trace!(endpoint = %name, error = %e, "Write failed");
                }
            }
        }
        delivered
    }

    /// Disable and erase every endpoint
    pub fn clear(&self) {
        let mut endpoints = self.endpoints.lock();
        let drained: Vec<(String, Endpoint)> = endpoints.drain().collect();
        for (name, mut endpoint) in drained {
            self.deactivate(&name, &mut endpoint);
        }
        debug!("Registry cleared");
    }

    pub fn contains(&self, name: &str) -> bool {
        self.endpoints.lock().contains_key(name)
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.active.read_recursive().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.endpoints.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names currently in the fan-out set, sorted
    pub fn enabled_names(&self) -> Vec<String> {
        self.active.read_recursive().keys().cloned().collect()
    }

    /// Snapshot of every endpoint, sorted by name
    pub fn endpoints(&self) -> Vec<EndpointInfo> {
        let endpoints = self.endpoints.lock();
        let mut infos: Vec<EndpointInfo> = endpoints
            .iter()
            .map(|(name, ep)| EndpointInfo {
                name: name.clone(),
                enabled: ep.enabled,
                ownership: ep.ownership,
                init_arg: ep.init_arg.clone(),
                metrics: ep.metrics.snapshot(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Metrics for every endpoint, sorted by name
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        self.endpoints()
            .into_iter()
            .map(|info| (info.name, info.metrics))
            .collect()
    }
}
