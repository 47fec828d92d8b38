//! Shared utilities for integration tests.

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use service_watchdog::health::{ProbeError, ProbeOutcome, Prober};
use service_watchdog::lifecycle::Shutdown;
use service_watchdog::notify::{AlertEpisode, Notifier, NotifyError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::time::Instant;
use url::Url;

/// Start a mock backend that answers every request with `status`.
#[allow(dead_code)]
pub async fn start_mock_backend(addr: SocketAddr, status: u16) {
    start_programmable_backend(addr, move || async move { (status, "ok".to_string()) }).await;
}

/// Start a programmable mock backend with async support.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(addr: SocketAddr, f: F)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut request = [0u8; 1024];
                        let _ = socket.read(&mut request).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            204 => "204 No Content",
                            302 => "302 Found",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Probe outcome for a failing check.
#[allow(dead_code)]
pub fn failure() -> ProbeOutcome {
    ProbeOutcome::Failed(ProbeError::Status(503))
}

/// Probe outcome for a passing check.
#[allow(dead_code)]
pub fn success() -> ProbeOutcome {
    ProbeOutcome::Healthy { status: 200 }
}

#[allow(dead_code)]
pub fn target() -> Url {
    Url::parse("http://service.test/health").unwrap()
}

/// Prober that replays a fixed script of results.
///
/// Once the script runs out it triggers `shutdown` and never completes.
#[derive(Clone)]
#[allow(dead_code)]
pub struct ScriptedProber {
    script: Arc<Mutex<VecDeque<bool>>>,
    probed_at: Arc<Mutex<Vec<Instant>>>,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl ScriptedProber {
    pub fn new(script: &[bool], shutdown: Shutdown) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.iter().copied().collect())),
            probed_at: Arc::new(Mutex::new(Vec::new())),
            shutdown,
        }
    }

    /// Healthy forever.
    pub fn always_healthy(shutdown: Shutdown) -> Self {
        Self::new(&[true; 64], shutdown)
    }

    pub fn probed_at(&self) -> Vec<Instant> {
        self.probed_at.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, _target: &Url) -> ProbeOutcome {
        self.probed_at.lock().unwrap().push(Instant::now());
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(true) => success(),
            Some(false) => failure(),
            None => {
                self.shutdown.trigger();
                std::future::pending().await
            }
        }
    }
}

/// Notifier that records every attempt and fails on chosen attempts.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct RecordingNotifier {
    attempts: Arc<Mutex<Vec<AlertEpisode>>>,
    failing_attempts: Vec<usize>,
    always_fail: bool,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the given 1-based delivery attempts.
    pub fn failing_on(attempts: &[usize]) -> Self {
        Self {
            failing_attempts: attempts.to_vec(),
            ..Self::default()
        }
    }

    pub fn always_failing() -> Self {
        Self {
            always_fail: true,
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> Vec<AlertEpisode> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, episode: &AlertEpisode) -> Result<(), NotifyError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(episode.clone());
            attempts.len()
        };

        if self.always_fail || self.failing_attempts.contains(&attempt) {
            Err(NotifyError::Address("relay rejected message".into()))
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &str {
        "recording"
    }
}
