use std::thread;

use log::{info, warn};
use reqwest::blocking::Client;

use crate::{config::CensusConfig, error::{Error, Result}, metrics::PopulationRecord};

use super::parse_population_str;

const USER_AGENT: &str = concat!("voteweight/", env!("CARGO_PKG_VERSION"));

/// Longest slice of a failed response body that is logged.
const LOG_BODY_LIMIT: usize = 300;

/// Anything that can produce the population-by-state table.
pub trait PopulationSource {
    fn fetch_population(&self) -> Result<Vec<PopulationRecord>>;
}

/// Fixed population table, e.g. loaded earlier or built in tests.
#[derive(Clone, Debug, Default)]
pub struct StaticPopulation(pub Vec<PopulationRecord>);

impl PopulationSource for StaticPopulation {
    fn fetch_population(&self) -> Result<Vec<PopulationRecord>> { Ok(self.0.clone()) }
}

/// Blocking client for the census data API.
pub struct CensusClient {
    client: Client,
    config: CensusConfig,
}

impl CensusClient {
    pub fn new(config: CensusConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network { url: config.url.clone(), message: e.to_string() })?;
        Ok(Self { client, config })
    }

    pub fn url(&self) -> &str { &self.config.url }

    /// One GET; returns the body of a successful response.
    fn get_once(&self) -> Result<String, String> {
        let resp = self.client.get(self.url()).send()
            .map_err(|e| format!("request failed: {e}"))?;
        let status = resp.status();
        let body = resp.text()
            .map_err(|e| format!("failed to read response body: {e}"))?;
        if !status.is_success() {
            return Err(format!("HTTP {status}: {}", truncate_for_log(&body, LOG_BODY_LIMIT)));
        }
        Ok(body)
    }

    /// GET with `retries` extra attempts and doubling backoff.
    fn get_with_retry(&self) -> Result<String> {
        let attempts = self.config.retries + 1;
        let mut last_error = String::new();

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.config.retry_delay * 2u32.saturating_pow(attempt - 1);
                warn!("[census] retry {attempt}/{} in {:.1}s", self.config.retries, delay.as_secs_f64());
                thread::sleep(delay);
            }
            match self.get_once() {
                Ok(body) => return Ok(body),
                Err(e) => {
                    warn!("[census] GET {} (attempt {}/{attempts}): {e}", self.url(), attempt + 1);
                    last_error = e;
                }
            }
        }

        Err(Error::Network { url: self.url().to_string(), message: last_error })
    }
}

impl PopulationSource for CensusClient {
    fn fetch_population(&self) -> Result<Vec<PopulationRecord>> {
        info!("[census] GET {}", self.url());
        let body = self.get_with_retry()?;
        let records = parse_population_str(&body)?;
        info!("[census] {} population rows", records.len());
        Ok(records)
    }
}

/// Truncate on a char boundary, appending "..." when shortened.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len { return s.to_string() }
    let mut end = max_len;
    while !s.is_char_boundary(end) { end -= 1 }
    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_for_log("ok", 10), "ok");
        assert_eq!(truncate_for_log("abcdef", 3), "abc...");
        assert_eq!(truncate_for_log("ééé", 3), "é...");
    }

    #[test]
    fn static_source_returns_its_rows() {
        let source = StaticPopulation(vec![PopulationRecord::new("Maine", 1_362_359)]);
        assert_eq!(source.fetch_population().unwrap().len(), 1);
    }

    #[test]
    fn unreachable_host_is_a_network_error() {
        let config = CensusConfig {
            url: "http://127.0.0.1:9/data".to_string(),
            timeout: Duration::from_millis(500),
            retries: 1,
            retry_delay: Duration::from_millis(10),
        };
        let client = CensusClient::new(config).unwrap();
        assert_eq!(client.url(), "http://127.0.0.1:9/data");
        let err = client.fetch_population().unwrap_err();
        assert!(matches!(err, Error::Network { ref url, .. } if url == "http://127.0.0.1:9/data"));
    }
}
