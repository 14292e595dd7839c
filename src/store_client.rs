use crate::{
    backend::AppointmentBackend,
    error::StoreError,
    types::{Appointment, AppointmentTime},
};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const APPOINTMENTS_PATH: [&str; 2] = ["api", "appointments"];

#[derive(Debug, Serialize)]
struct CreateAppointmentRequest<'a> {
    time: AppointmentTime,
    name: &'a str,
}

/// Client of the remote appointment store.
#[derive(Debug, Clone)]
pub struct HttpAppointmentStore {
    http: Client,
    endpoint: Url,
}

impl HttpAppointmentStore {
    pub fn new(mut base_url: Url, timeout: Duration) -> Result<Self, StoreError> {
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(base_url.to_string()));
        }
        if let Ok(mut segments) = base_url.path_segments_mut() {
            segments.pop_if_empty().extend(APPOINTMENTS_PATH);
        }

        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: base_url,
        })
    }

    /// `/api/appointments/{time}` with the time escaped as a single path segment.
    fn appointment_url(&self, time: AppointmentTime) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&time.to_string());
        }
        url
    }
}

fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if !status.is_success() {
        return Err(StoreError::Status(status.as_u16()));
    }
    Ok(response)
}

#[async_trait]
impl AppointmentBackend for HttpAppointmentStore {
    async fn list_all(&self) -> Result<Vec<Appointment>, StoreError> {
        debug!(url = %self.endpoint, "Fetching appointments");
        let response = self.http.get(self.endpoint.clone()).send().await?;
        Ok(ensure_success(response)?.json().await?)
    }

    async fn create(&self, time: AppointmentTime, name: String) -> Result<Appointment, StoreError> {
        debug!(%time, "Creating appointment");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&CreateAppointmentRequest { time, name: &name })
            .send()
            .await?;
        Ok(ensure_success(response)?.json().await?)
    }

    async fn remove(&self, time: AppointmentTime) -> Result<(), StoreError> {
        let url = self.appointment_url(time);
        debug!(%url, "Removing appointment");
        let response = self.http.delete(url).send().await?;
        ensure_success(response)?;
        Ok(())
    }
}
