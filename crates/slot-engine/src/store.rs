//! Read-only repository boundary between the engine and persistence.
//!
//! The engine depends only on [`AvailabilityStore`]. [`InMemoryStore`] is a
//! plain-`Vec` implementation used by the CLI (loaded from a JSON snapshot)
//! and by tests.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::{
    Appointment, Break, Professional, ProfessionalServiceLink, Service, WorkingSchedule,
};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// The record lookups availability needs. Implementations must not mutate
/// anything in response to these calls.
pub trait AvailabilityStore: Send + Sync {
    fn service(&self, service_id: &str) -> StoreResult<Option<Service>>;

    /// Active professionals, in the store's preferred order.
    fn professionals(&self) -> StoreResult<Vec<Professional>>;

    fn professional_services(
        &self,
        professional_id: &str,
    ) -> StoreResult<Vec<ProfessionalServiceLink>>;

    /// Active weekly schedule rows for a professional.
    fn professional_schedules(&self, professional_id: &str) -> StoreResult<Vec<WorkingSchedule>>;

    /// Breaks whose date lies in `start_date..=end_date`.
    fn professional_breaks(
        &self,
        professional_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> StoreResult<Vec<Break>>;

    /// Appointments starting on a date in `start_date..=end_date`, optionally
    /// restricted to one professional.
    fn appointments_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        professional_id: Option<&str>,
    ) -> StoreResult<Vec<Appointment>>;
}

impl<S: AvailabilityStore + ?Sized> AvailabilityStore for &S {
    fn service(&self, service_id: &str) -> StoreResult<Option<Service>> {
        (**self).service(service_id)
    }

    fn professionals(&self) -> StoreResult<Vec<Professional>> {
        (**self).professionals()
    }

    fn professional_services(
        &self,
        professional_id: &str,
    ) -> StoreResult<Vec<ProfessionalServiceLink>> {
        (**self).professional_services(professional_id)
    }

    fn professional_schedules(&self, professional_id: &str) -> StoreResult<Vec<WorkingSchedule>> {
        (**self).professional_schedules(professional_id)
    }

    fn professional_breaks(
        &self,
        professional_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> StoreResult<Vec<Break>> {
        (**self).professional_breaks(professional_id, start_date, end_date)
    }

    fn appointments_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        professional_id: Option<&str>,
    ) -> StoreResult<Vec<Appointment>> {
        (**self).appointments_by_date_range(start_date, end_date, professional_id)
    }
}

impl<S: AvailabilityStore + ?Sized> AvailabilityStore for Arc<S> {
    fn service(&self, service_id: &str) -> StoreResult<Option<Service>> {
        (**self).service(service_id)
    }

    fn professionals(&self) -> StoreResult<Vec<Professional>> {
        (**self).professionals()
    }

    fn professional_services(
        &self,
        professional_id: &str,
    ) -> StoreResult<Vec<ProfessionalServiceLink>> {
        (**self).professional_services(professional_id)
    }

    fn professional_schedules(&self, professional_id: &str) -> StoreResult<Vec<WorkingSchedule>> {
        (**self).professional_schedules(professional_id)
    }

    fn professional_breaks(
        &self,
        professional_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> StoreResult<Vec<Break>> {
        (**self).professional_breaks(professional_id, start_date, end_date)
    }

    fn appointments_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        professional_id: Option<&str>,
    ) -> StoreResult<Vec<Appointment>> {
        (**self).appointments_by_date_range(start_date, end_date, professional_id)
    }
}

/// A snapshot of booking records held in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryStore {
    pub services: Vec<Service>,
    pub professionals: Vec<Professional>,
    pub professional_services: Vec<ProfessionalServiceLink>,
    pub schedules: Vec<WorkingSchedule>,
    pub breaks: Vec<Break>,
    pub appointments: Vec<Appointment>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON snapshot.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        serde_json::from_str(json).map_err(|e| StoreError::Decode(e.to_string()))
    }

    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    pub fn with_professional(mut self, professional: Professional) -> Self {
        self.professionals.push(professional);
        self
    }

    pub fn with_link(mut self, link: ProfessionalServiceLink) -> Self {
        self.professional_services.push(link);
        self
    }

    pub fn with_schedule(mut self, schedule: WorkingSchedule) -> Self {
        self.schedules.push(schedule);
        self
    }

    pub fn with_break(mut self, brk: Break) -> Self {
        self.breaks.push(brk);
        self
    }

    pub fn with_appointment(mut self, appointment: Appointment) -> Self {
        self.appointments.push(appointment);
        self
    }

    pub fn add_appointment(&mut self, appointment: Appointment) {
        self.appointments.push(appointment);
    }
}

impl AvailabilityStore for InMemoryStore {
    fn service(&self, service_id: &str) -> StoreResult<Option<Service>> {
        Ok(self.services.iter().find(|s| s.id == service_id).cloned())
    }

    fn professionals(&self) -> StoreResult<Vec<Professional>> {
        Ok(self
            .professionals
            .iter()
            .filter(|p| p.is_active)
            .cloned()
            .collect())
    }

    fn professional_services(
        &self,
        professional_id: &str,
    ) -> StoreResult<Vec<ProfessionalServiceLink>> {
        Ok(self
            .professional_services
            .iter()
            .filter(|l| l.professional_id == professional_id)
            .cloned()
            .collect())
    }

    fn professional_schedules(&self, professional_id: &str) -> StoreResult<Vec<WorkingSchedule>> {
        Ok(self
            .schedules
            .iter()
            .filter(|s| s.professional_id == professional_id && s.is_active)
            .cloned()
            .collect())
    }

    fn professional_breaks(
        &self,
        professional_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> StoreResult<Vec<Break>> {
        Ok(self
            .breaks
            .iter()
            .filter(|b| {
                b.professional_id == professional_id && b.date >= start_date && b.date <= end_date
            })
            .cloned()
            .collect())
    }

    fn appointments_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        professional_id: Option<&str>,
    ) -> StoreResult<Vec<Appointment>> {
        Ok(self
            .appointments
            .iter()
            .filter(|a| {
                let day = a.start_time.date();
                day >= start_date && day <= end_date
            })
            .filter(|a| match professional_id {
                Some(id) => a.professional_id.as_deref() == Some(id),
                None => true,
            })
            .cloned()
            .collect())
    }
}
