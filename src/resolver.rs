//! Host name resolution for flow endpoints.
//!
//! Resolution is best effort: callers substitute the raw address on any
//! error, so a resolver only has to report what went wrong.

use crate::error::ResolveError;
use dns_lookup::lookup_addr;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Duration;

pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_millis(250);
const CACHE_SIZE: usize = 1000;

/// Maps a host field to its canonical display form
pub trait HostResolver {
    fn resolve(&self, host: &str) -> Result<String, ResolveError>;
}

/// Returns every host unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct RawResolver;

impl HostResolver for RawResolver {
    fn resolve(&self, host: &str) -> Result<String, ResolveError> {
        Ok(host.to_string())
    }
}

type LookupFn = fn(&IpAddr) -> std::io::Result<String>;

struct CacheEntry {
    hostname: String,
    last_used: u64,
}

#[derive(Default)]
struct DnsCache {
    entries: HashMap<IpAddr, CacheEntry>,
    tick: u64,
}

impl DnsCache {
    fn get(&mut self, ip: &IpAddr) -> Option<String> {
        self.tick += 1;
        let tick = self.tick;
        self.entries.get_mut(ip).map(|entry| {
            entry.last_used = tick;
            entry.hostname.clone()
        })
    }

    fn insert(&mut self, ip: IpAddr, hostname: String) {
        if self.entries.len() >= CACHE_SIZE && !self.entries.contains_key(&ip) {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(ip, _)| *ip);
            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
            }
        }
        self.tick += 1;
        self.entries.insert(
            ip,
            CacheEntry {
                hostname,
                last_used: self.tick,
            },
        );
    }
}

/// Reverse DNS with a bounded wait and a least-recently-used cache.
///
/// Names that are not IP literals are already in display form and are
/// returned as-is. Failed lookups are cached as the raw address, so an
/// unreachable resolver costs one timeout per address rather than one per
/// flow.
pub struct DnsResolver {
    timeout: Duration,
    lookup: LookupFn,
    cache: Mutex<DnsCache>,
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLVE_TIMEOUT)
    }
}

impl DnsResolver {
    pub fn new(timeout: Duration) -> Self {
        Self::with_lookup(timeout, lookup_addr)
    }

    /// Use a custom reverse lookup function instead of the system resolver
    pub fn with_lookup(timeout: Duration, lookup: LookupFn) -> Self {
        DnsResolver {
            timeout,
            lookup,
            cache: Mutex::new(DnsCache::default()),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn lookup_with_timeout(&self, ip: IpAddr) -> Result<String, ResolveError> {
        let (tx, rx) = mpsc::channel();
        let lookup = self.lookup;

        // A lookup stuck past the timeout is abandoned; its send fails silently.
        thread::Builder::new()
            .name("flowlog-dns".to_string())
            .spawn(move || {
                let _ = tx.send(lookup(&ip));
            })
            .map_err(|source| ResolveError::Lookup {
                host: ip.to_string(),
                source,
            })?;

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(name)) if !name.is_empty() => Ok(name),
            Ok(Ok(_)) => Err(ResolveError::NotFound(ip.to_string())),
            Ok(Err(source)) => Err(ResolveError::Lookup {
                host: ip.to_string(),
                source,
            }),
            Err(_) => Err(ResolveError::Timeout {
                host: ip.to_string(),
                timeout: self.timeout,
            }),
        }
    }

    fn cached(&self, ip: &IpAddr) -> Option<String> {
        self.cache.lock().ok().and_then(|mut cache| cache.get(ip))
    }

    fn remember(&self, ip: IpAddr, hostname: String) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(ip, hostname);
        }
    }
}

impl HostResolver for DnsResolver {
    fn resolve(&self, host: &str) -> Result<String, ResolveError> {
        let ip: IpAddr = match host.parse() {
            Ok(ip) => ip,
            Err(_) => return Ok(host.to_string()),
        };

        if let Some(name) = self.cached(&ip) {
            return Ok(name);
        }

        match self.lookup_with_timeout(ip) {
            Ok(name) => {
                self.remember(ip, name.clone());
                Ok(name)
            }
            Err(e) => {
                self.remember(ip, host.to_string());
                Err(e)
            }
        }
    }
}

/// Fixed host table consulted before an optional fallback resolver
pub struct StaticResolver {
    table: IndexMap<String, String>,
    fallback: Option<Box<dyn HostResolver>>,
}

impl StaticResolver {
    pub fn new(table: IndexMap<String, String>) -> Self {
        StaticResolver {
            table,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn HostResolver>) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl HostResolver for StaticResolver {
    fn resolve(&self, host: &str) -> Result<String, ResolveError> {
        if let Some(name) = self.table.get(host) {
            return Ok(name.clone());
        }
        match self.fallback {
            Some(ref fallback) => fallback.resolve(host),
            None => Err(ResolveError::NotFound(host.to_string())),
        }
    }
}
