//! Settle timing and readiness probing.
//!
//! The settle gate is a fixed, non-adaptive wait after platform API
//! enablement, kept for compatibility with the deployed configuration.
//! `wait_until_ready` is the replacement: a bounded retry loop with
//! exponential backoff against an actual readiness signal, surfacing a
//! recoverable error on exhaustion.

use super::types::ProjectConfig;
use std::fmt;
use std::time::{Duration, Instant};

/// Fixed settle duration declared on the api-settle gate.
pub fn settle_duration(config: &ProjectConfig) -> Duration {
    Duration::from_secs(config.sleep_time)
}

/// Exponential backoff parameters for readiness polling.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub initial_interval: Duration,
    pub multiplier: f64,
    pub max_interval: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(1),
            multiplier: 2.0,
            max_interval: Duration::from_secs(30),
            timeout: Duration::from_secs(300),
        }
    }
}

/// Why a readiness wait ended without the probe reporting ready.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadinessError {
    /// The timeout elapsed with the probe still reporting not-ready.
    TimedOut { attempts: u32, waited: Duration },
    /// The probe itself failed.
    Probe(String),
}

impl fmt::Display for ReadinessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimedOut { attempts, waited } => write!(
                f,
                "not ready after {} attempts over {:.1}s",
                attempts,
                waited.as_secs_f64()
            ),
            Self::Probe(e) => write!(f, "readiness probe failed: {}", e),
        }
    }
}

/// Poll `probe` until it reports ready, sleeping with exponential backoff
/// between attempts. Returns the number of attempts on success.
pub fn wait_until_ready<F>(policy: &RetryPolicy, mut probe: F) -> Result<u32, ReadinessError>
where
    F: FnMut() -> Result<bool, String>,
{
    let start = Instant::now();
    let mut interval = policy.initial_interval;
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match probe() {
            Ok(true) => return Ok(attempts),
            Ok(false) => {}
            Err(e) => return Err(ReadinessError::Probe(e)),
        }

        if start.elapsed() + interval > policy.timeout {
            return Err(ReadinessError::TimedOut {
                attempts,
                waited: start.elapsed(),
            });
        }

        std::thread::sleep(interval);
        interval = next_interval(interval, policy);
    }
}

fn next_interval(current: Duration, policy: &RetryPolicy) -> Duration {
    current.mul_f64(policy.multiplier).min(policy.max_interval)
}
