use std::time::Duration;

use reqwest::blocking::Client;
use ruche_core::{ConnectionTarget, MetricsSink, Point, SinkError, render_point};
use tracing::{debug, info};

const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends points to an InfluxDB 1.x `/write` endpoint.
pub struct InfluxHttpSink {
    client: Client,
    target: ConnectionTarget,
    pending: Vec<String>,
}

impl InfluxHttpSink {
    pub fn open(target: ConnectionTarget) -> Result<Self, SinkError> {
        let client = Client::builder()
            .timeout(WRITE_TIMEOUT)
            .build()
            .map_err(SinkError::transport)?;
        Ok(Self::with_client(client, target))
    }

    fn with_client(client: Client, target: ConnectionTarget) -> Self {
        Self {
            client,
            target,
            pending: Vec::new(),
        }
    }

    fn write_url(&self) -> String {
        format!("{}/write", self.target.host.trim_end_matches('/'))
    }
}

impl MetricsSink for InfluxHttpSink {
    fn add_point(&mut self, point: &Point) -> Result<(), SinkError> {
        self.pending.push(render_point(point)?);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let body = self.pending.join("\n");
        let mut request = self
            .client
            .post(self.write_url())
            .query(&[("db", self.target.database.as_str()), ("precision", "s")])
            .body(body);
        if let Some(user) = &self.target.user {
            request = request.basic_auth(user, self.target.password.as_ref());
        }

        debug!(points = self.pending.len(), host = %self.target.host, "writing points");
        let response = request.send().map_err(SinkError::transport)?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                detail: detail.trim().to_string(),
            });
        }

        info!(
            points = self.pending.len(),
            database = %self.target.database,
            "points written"
        );
        self.pending.clear();
        Ok(())
    }
}
