use crate::{
    backend::AppointmentBackend,
    error::StoreError,
    types::{Appointment, AppointmentTime},
};
use async_trait::async_trait;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::Mutex;
use tracing::{error, info};

/// In-memory appointment store. Keys are unique, listing is ordered by time.
#[derive(Debug, Clone, Default)]
pub struct LocalAppointments {
    appointments: Arc<Mutex<BTreeMap<AppointmentTime, Appointment>>>,
}

#[async_trait]
impl AppointmentBackend for LocalAppointments {
    async fn list_all(&self) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.appointments.lock().await.values().cloned().collect())
    }

    async fn create(&self, time: AppointmentTime, name: String) -> Result<Appointment, StoreError> {
        let mut appointments = self.appointments.lock().await;
        if appointments.contains_key(&time) {
            let err = StoreError::Conflict(time);
            error!(%err, "Appointment can't be created");
            return Err(err);
        }

        let appointment = Appointment {
            time,
            name: name.trim().to_string(),
        };
        appointments.insert(time, appointment.clone());
        info!(%time, "Appointment created");
        Ok(appointment)
    }

    async fn remove(&self, time: AppointmentTime) -> Result<(), StoreError> {
        if self.appointments.lock().await.remove(&time).is_none() {
            let err = StoreError::NotFound(time);
            error!(%err, "Appointment can't be removed");
            return Err(err);
        }
        info!(%time, "Appointment removed");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn time(s: &str) -> AppointmentTime {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_create_list_remove_single_appointment() {
        let local_appointments = LocalAppointments::default();

        let created = local_appointments
            .create(time("2024-01-01 5:00"), "  Ada ".into())
            .await
            .unwrap();
        assert_eq!(created.name, "Ada");

        let appointments = local_appointments.list_all().await.unwrap();
        assert_eq!(appointments, vec![created]);

        local_appointments
            .create(time("2024-01-01 5:00"), "Grace".into())
            .await
            .unwrap_err();
        assert_eq!(local_appointments.appointments.lock().await.len(), 1);

        local_appointments
            .remove(time("2024-01-01 5:00"))
            .await
            .unwrap();
        assert_eq!(local_appointments.appointments.lock().await.len(), 0);

        let err = local_appointments
            .remove(time("2024-01-01 5:00"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_time() {
        let local_appointments = LocalAppointments::default();
        for (key, name) in [
            ("2024-01-02 1:00", "Linus"),
            ("2024-01-01 10:00", "Grace"),
            ("2024-01-01 9:00", "Ada"),
        ] {
            local_appointments.create(time(key), name.into()).await.unwrap();
        }

        let names: Vec<String> = local_appointments
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|appointment| appointment.name)
            .collect();
        assert_eq!(names, ["Ada", "Grace", "Linus"]);
    }
}
