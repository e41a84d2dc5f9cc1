//! The availability computation over a store.
//!
//! For a pinned professional the engine resolves that professional's working
//! intervals for the date, collects breaks and appointments as blocking
//! intervals, and runs the slot generator once per working interval. Without a
//! pinned professional it does the same for every active professional with an
//! enabled link to the service and unions the results.
//!
//! Results are always deduplicated and sorted ascending. A missing service, a
//! day with no schedule, or a fully booked day all produce an empty list. Store
//! failures abort the whole computation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::blocking::collect_blocking_intervals;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::model::{Professional, Service, Slot, SlotAssignment};
use crate::slots::generate_slots;
use crate::store::AvailabilityStore;
use crate::working::resolve_working_intervals;

/// Computes bookable slots from the records in `S`. Holds no state between
/// calls beyond its configuration.
#[derive(Debug, Clone)]
pub struct AvailabilityEngine<S> {
    store: S,
    config: EngineConfig,
}

impl<S: AvailabilityStore> AvailabilityEngine<S> {
    /// Create an engine with the default configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: EngineConfig::default(),
        }
    }

    /// # Errors
    /// Returns `SlotError::InvalidConfig` if the configuration does not validate.
    pub fn with_config(store: S, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Bookable start times on `date` as `HH:MM` strings, sorted ascending.
    ///
    /// # Errors
    /// Returns `SlotError::Store` if any store lookup fails.
    pub fn available_slots(
        &self,
        date: NaiveDate,
        service_id: &str,
        professional_id: Option<&str>,
    ) -> Result<Vec<String>> {
        Ok(self
            .available_slot_values(date, service_id, professional_id)?
            .iter()
            .map(Slot::to_string)
            .collect())
    }

    /// Same as [`available_slots`](Self::available_slots) but returns typed slots.
    #[instrument(skip(self))]
    pub fn available_slot_values(
        &self,
        date: NaiveDate,
        service_id: &str,
        professional_id: Option<&str>,
    ) -> Result<Vec<Slot>> {
        let Some(service) = self.store.service(service_id)? else {
            debug!("unknown service, no slots");
            return Ok(Vec::new());
        };

        let slots: BTreeSet<Slot> = match professional_id {
            Some(id) => self.professional_slots(id, date, &service)?,
            None => {
                let mut union = BTreeSet::new();
                for professional in self.eligible_professionals(service_id)? {
                    union.extend(self.professional_slots(&professional.id, date, &service)?);
                }
                union
            }
        };

        info!(count = slots.len(), "computed available slots");
        Ok(slots.into_iter().collect())
    }

    /// Active professionals with an enabled link to `service_id`, in store order.
    ///
    /// # Errors
    /// Returns `SlotError::Store` if any store lookup fails.
    pub fn eligible_professionals(&self, service_id: &str) -> Result<Vec<Professional>> {
        let mut eligible = Vec::new();
        for professional in self.store.professionals()? {
            if !professional.is_active {
                continue;
            }
            let offers = self
                .store
                .professional_services(&professional.id)?
                .iter()
                .any(|link| link.service_id == service_id && link.is_enabled);
            if offers {
                eligible.push(professional);
            }
        }
        Ok(eligible)
    }

    /// Per-professional slots for an unpinned request, keyed by professional id.
    /// Professionals with nothing free on `date` are omitted.
    ///
    /// # Errors
    /// Returns `SlotError::Store` if any store lookup fails.
    #[instrument(skip(self))]
    pub fn slots_by_professional(
        &self,
        date: NaiveDate,
        service_id: &str,
    ) -> Result<BTreeMap<String, Vec<Slot>>> {
        let Some(service) = self.store.service(service_id)? else {
            return Ok(BTreeMap::new());
        };

        let mut by_professional = BTreeMap::new();
        for professional in self.eligible_professionals(service_id)? {
            let slots = self.professional_slots(&professional.id, date, &service)?;
            if !slots.is_empty() {
                by_professional.insert(professional.id, slots.into_iter().collect());
            }
        }
        Ok(by_professional)
    }

    /// Pick a professional for an "any professional" booking at `slot` (`HH:MM`).
    ///
    /// Eligible professionals are tried in store order; the first one free at
    /// that start wins. Returns `None` if nobody is free or the service is unknown.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidSlot` if `slot` is not `HH:MM`, or
    /// `SlotError::Store` if any store lookup fails.
    #[instrument(skip(self))]
    pub fn resolve_professional(
        &self,
        date: NaiveDate,
        service_id: &str,
        slot: &str,
    ) -> Result<Option<SlotAssignment>> {
        let slot: Slot = slot.parse()?;

        let Some(service) = self.store.service(service_id)? else {
            return Ok(None);
        };

        for professional in self.eligible_professionals(service_id)? {
            if self
                .professional_slots(&professional.id, date, &service)?
                .contains(&slot)
            {
                let window = slot.window(date, service.duration_minutes);
                debug!(professional_id = %professional.id, "slot assigned");
                return Ok(Some(SlotAssignment {
                    professional_id: professional.id,
                    slot,
                    start: window.start,
                    end: window.end,
                }));
            }
        }

        Ok(None)
    }

    /// Slots for each date in `start_date..=end_date` that has at least one.
    ///
    /// # Errors
    /// Returns `SlotError::Store` if any store lookup fails.
    pub fn available_days(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        service_id: &str,
        professional_id: Option<&str>,
    ) -> Result<BTreeMap<NaiveDate, Vec<Slot>>> {
        let mut days = BTreeMap::new();
        for date in start_date.iter_days().take_while(|d| *d <= end_date) {
            let slots = self.available_slot_values(date, service_id, professional_id)?;
            if !slots.is_empty() {
                days.insert(date, slots);
            }
        }
        Ok(days)
    }

    fn professional_slots(
        &self,
        professional_id: &str,
        date: NaiveDate,
        service: &Service,
    ) -> Result<BTreeSet<Slot>> {
        let schedules = self.store.professional_schedules(professional_id)?;
        let working = resolve_working_intervals(&schedules, date);
        if working.is_empty() {
            debug!(professional_id, "no working hours on this date");
            return Ok(BTreeSet::new());
        }

        let breaks = self.store.professional_breaks(professional_id, date, date)?;
        let appointments = self
            .store
            .appointments_by_date_range(date, date, Some(professional_id))?;
        let blocking =
            collect_blocking_intervals(&breaks, &appointments, date, self.config.include_cancelled)
                .to_vec();

        let slots: BTreeSet<Slot> = working
            .iter()
            .flat_map(|interval| {
                generate_slots(
                    interval,
                    service.duration_minutes,
                    self.config.step_minutes,
                    &blocking,
                )
            })
            .collect();

        debug!(
            professional_id,
            intervals = working.len(),
            blocking = blocking.len(),
            slots = slots.len(),
            "professional slots computed"
        );
        Ok(slots)
    }
}

/// One-shot computation with the default configuration.
///
/// # Errors
/// Returns `SlotError::Store` if any store lookup fails.
pub fn compute_available_slots<S: AvailabilityStore + ?Sized>(
    store: &S,
    date: NaiveDate,
    service_id: &str,
    professional_id: Option<&str>,
) -> Result<Vec<String>> {
    AvailabilityEngine::new(store).available_slots(date, service_id, professional_id)
}
