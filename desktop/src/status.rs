//! System figures sampled on a background thread for the info pages.

use std::fs;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub uptime_secs: u64,
    pub load_average: Option<f32>,
    pub battery_percent: Option<u8>,
}

impl Snapshot {
    pub fn uptime_text(&self) -> String {
        let secs = self.uptime_secs;
        format!(
            "Up {}d {:02}:{:02}:{:02}",
            secs / 86_400,
            (secs / 3_600) % 24,
            (secs / 60) % 60,
            secs % 60
        )
    }

    pub fn load_text(&self) -> String {
        match self.load_average {
            Some(load) => format!("Load {:.2}", load),
            None => String::from("Load n/a"),
        }
    }

    pub fn battery_text(&self) -> String {
        match self.battery_percent {
            Some(percent) => format!("{}%", percent),
            None => String::from("AC"),
        }
    }
}

/// First field of a `/proc` style line, parsed.
fn first_field<T: std::str::FromStr>(contents: &str) -> Option<T> {
    contents.split_whitespace().next()?.parse().ok()
}

fn sample(started: Instant) -> Snapshot {
    let uptime_secs = fs::read_to_string("/proc/uptime")
        .ok()
        .and_then(|contents| first_field::<f64>(&contents))
        .map(|secs| secs as u64)
        .unwrap_or_else(|| started.elapsed().as_secs());
    let load_average = fs::read_to_string("/proc/loadavg")
        .ok()
        .and_then(|contents| first_field(&contents));
    let battery_percent = fs::read_to_string("/sys/class/power_supply/BAT0/capacity")
        .ok()
        .and_then(|contents| first_field::<u8>(&contents))
        .map(|percent| percent.min(100));
    Snapshot {
        uptime_secs,
        load_average,
        battery_percent,
    }
}

#[derive(Clone)]
pub struct StatusMonitor {
    snapshot: Arc<Mutex<Snapshot>>,
}

impl StatusMonitor {
    /// Starts the polling thread. It runs for the life of the process.
    pub fn spawn() -> Self {
        let started = Instant::now();
        let snapshot = Arc::new(Mutex::new(sample(started)));
        let shared = snapshot.clone();
        thread::spawn(move || {
            loop {
                thread::sleep(POLL_INTERVAL);
                let next = sample(started);
                match shared.lock() {
                    Ok(mut snapshot) => *snapshot = next,
                    Err(_) => {
                        log::warn!("Status snapshot poisoned, stopping poller");
                        return;
                    }
                }
            }
        });
        Self { snapshot }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
            .lock()
            .map(|snapshot| snapshot.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_is_split_into_days_and_clock() {
        let snapshot = Snapshot {
            uptime_secs: 2 * 86_400 + 3 * 3_600 + 4 * 60 + 5,
            ..Snapshot::default()
        };
        assert_eq!(snapshot.uptime_text(), "Up 2d 03:04:05");
    }

    #[test]
    fn missing_figures_have_fallback_text() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.load_text(), "Load n/a");
        assert_eq!(snapshot.battery_text(), "AC");
        let snapshot = Snapshot {
            load_average: Some(0.5),
            battery_percent: Some(80),
            ..Snapshot::default()
        };
        assert_eq!(snapshot.load_text(), "Load 0.50");
        assert_eq!(snapshot.battery_text(), "80%");
    }

    #[test]
    fn parses_proc_lines() {
        assert_eq!(first_field::<f64>("3600.25 100.0\n"), Some(3600.25));
        assert_eq!(first_field::<f32>("0.15 0.10 0.05 1/100 42"), Some(0.15));
        assert_eq!(first_field::<u8>(""), None);
    }
}
