use std::collections::BTreeMap;

use chrono::NaiveDate;

pub use billing::MonthlyBill;
pub use contracts::Contract;
pub use error::UtilityError;
pub use meters::Meter;
pub use readings::ReadingSeries;
pub use service_points::{Position, ServicePoint};
pub use users::{User, UserKind};

mod billing;
mod contracts;
mod error;
mod meters;
mod readings;
mod service_points;
mod users;

type ResultUtility<T> = Result<T, UtilityError>;

/// The facade for the utility provider.
///
/// It owns the registries of service points, meters, users and contracts,
/// assigns their ids, and holds one [`ReadingSeries`] per contract from
/// which estimates, consumption and billing breakdowns are derived. All
/// operations are synchronous and complete before returning.
#[derive(Debug, Default)]
pub struct Utility {
    service_points: BTreeMap<String, ServicePoint>,
    meters: BTreeMap<String, Meter>,
    users: BTreeMap<String, User>,
    contracts: BTreeMap<String, Contract>,
    readings: BTreeMap<String, ReadingSeries>,
    service_point_counter: u32,
    meter_counter: u32,
    user_counter: u32,
    contract_counter: u32,
}

fn next_id(prefix: &str, counter: &mut u32) -> String {
    *counter += 1;
    format!("{prefix}{counter}")
}

impl Utility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a new service point and returns its id.
    pub fn define_service_point(
        &mut self,
        municipality: &str,
        address: &str,
        lat: f64,
        lon: f64,
    ) -> String {
        let id = next_id("SP", &mut self.service_point_counter);
        let sp = ServicePoint::new(id.clone(), municipality, address, Position { lat, lon });
        self.service_points.insert(id.clone(), sp);
        id
    }

    /// Return a [`ServicePoint`].
    pub fn service_point(&self, sp_id: &str) -> ResultUtility<&ServicePoint> {
        self.service_points
            .get(sp_id)
            .ok_or_else(|| UtilityError::NotFound(sp_id.to_string()))
    }

    /// Id-ascending iteration over the registered service points.
    pub fn iter_service_points(&self) -> impl Iterator<Item = &ServicePoint> {
        self.service_points.values()
    }

    /// Registers a new meter and returns its id.
    pub fn add_meter(
        &mut self,
        serial_number: &str,
        brand: &str,
        model: &str,
        unit: &str,
    ) -> String {
        let id = next_id("MT", &mut self.meter_counter);
        let meter = Meter::new(id.clone(), serial_number, brand, model, unit);
        self.meters.insert(id.clone(), meter);
        id
    }

    /// Return a [`Meter`].
    pub fn meter(&self, meter_id: &str) -> ResultUtility<&Meter> {
        self.meters
            .get(meter_id)
            .ok_or_else(|| UtilityError::NotFound(meter_id.to_string()))
    }

    /// Connects a meter to a service point.
    ///
    /// Both associations are id-based back-references; re-pointing either
    /// side clears the stale back-reference on the replaced peer.
    pub fn install_meter(&mut self, sp_id: &str, meter_id: &str) -> ResultUtility<()> {
        if !self.service_points.contains_key(sp_id) {
            return Err(UtilityError::NotFound(sp_id.to_string()));
        }
        if !self.meters.contains_key(meter_id) {
            return Err(UtilityError::NotFound(meter_id.to_string()));
        }

        let replaced_meter = self
            .service_points
            .get(sp_id)
            .and_then(|sp| sp.meter_id.clone())
            .filter(|id| id != meter_id);
        if let Some(id) = replaced_meter {
            if let Some(meter) = self.meters.get_mut(&id) {
                meter.service_point_id = None;
            }
        }
        let previous_sp = self
            .meters
            .get(meter_id)
            .and_then(|meter| meter.service_point_id.clone())
            .filter(|id| id != sp_id);
        if let Some(id) = previous_sp {
            if let Some(sp) = self.service_points.get_mut(&id) {
                sp.meter_id = None;
            }
        }

        if let Some(sp) = self.service_points.get_mut(sp_id) {
            sp.meter_id = Some(meter_id.to_string());
        }
        if let Some(meter) = self.meters.get_mut(meter_id) {
            meter.service_point_id = Some(sp_id.to_string());
        }
        tracing::info!(sp_id, meter_id, "meter installed");
        Ok(())
    }

    /// Registers a new residential user and returns its id.
    pub fn add_residential_user(
        &mut self,
        tax_code: &str,
        name: &str,
        surname: &str,
        address: &str,
        email: &str,
    ) -> String {
        let id = next_id("U", &mut self.user_counter);
        let user = User::residential(id.clone(), tax_code, name, surname, address, email);
        self.users.insert(id.clone(), user);
        id
    }

    /// Registers a new business user and returns its id.
    pub fn add_business_user(
        &mut self,
        vat_number: &str,
        business_name: &str,
        address: &str,
        email: &str,
    ) -> String {
        let id = next_id("U", &mut self.user_counter);
        let user = User::business(id.clone(), vat_number, business_name, address, email);
        self.users.insert(id.clone(), user);
        id
    }

    /// Return a [`User`].
    pub fn user(&self, user_id: &str) -> ResultUtility<&User> {
        self.users
            .get(user_id)
            .ok_or_else(|| UtilityError::NotFound(user_id.to_string()))
    }

    /// Id-ascending iteration over the registered users.
    pub fn iter_users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Signs a new contract binding a user to a service point.
    ///
    /// The service point must carry an installed meter at signing time.
    pub fn sign_contract(&mut self, user_id: &str, sp_id: &str) -> ResultUtility<String> {
        self.user(user_id)?;
        let sp = self.service_point(sp_id)?;
        if !sp.has_meter() {
            return Err(UtilityError::InvalidLinkage(format!(
                "service point {sp_id} has no meter installed"
            )));
        }

        let id = next_id("C", &mut self.contract_counter);
        self.contracts
            .insert(id.clone(), Contract::new(id.clone(), user_id, sp_id));
        tracing::info!(contract_id = %id, user_id, sp_id, "contract signed");
        Ok(id)
    }

    /// Return a [`Contract`].
    pub fn contract(&self, contract_id: &str) -> ResultUtility<&Contract> {
        self.contracts
            .get(contract_id)
            .ok_or_else(|| UtilityError::NotFound(contract_id.to_string()))
    }

    /// Resolves the id of the meter currently installed for a contract.
    pub fn contract_meter(&self, contract_id: &str) -> ResultUtility<&str> {
        let contract = self.contract(contract_id)?;
        let sp = self.service_point(&contract.service_point_id)?;
        sp.meter_id.as_deref().ok_or_else(|| {
            UtilityError::InvalidLinkage(format!(
                "service point {} has no meter installed",
                sp.id
            ))
        })
    }

    /// Records a reading for a contract's meter.
    ///
    /// The supplied meter id must match the meter currently installed at
    /// the contract's service point. Recording twice on the same date
    /// replaces the previous value.
    pub fn record_reading(
        &mut self,
        contract_id: &str,
        meter_id: &str,
        date: NaiveDate,
        value: f64,
    ) -> ResultUtility<()> {
        let installed = match self.contract_meter(contract_id) {
            Ok(id) => id.to_string(),
            Err(_) => {
                return Err(UtilityError::InvalidLinkage(format!(
                    "contract {contract_id} does not resolve to a metered service point"
                )));
            }
        };
        if installed != meter_id {
            return Err(UtilityError::InvalidLinkage(format!(
                "meter {meter_id} is not the one installed for contract {contract_id}"
            )));
        }

        self.readings
            .entry(contract_id.to_string())
            .or_default()
            .record(date, value);
        tracing::debug!(contract_id, meter_id, %date, value, "reading recorded");
        Ok(())
    }

    /// Date-ascending iteration over a contract's recorded readings.
    ///
    /// A contract with no series yet iterates as empty; this never fails.
    pub fn readings<'a>(
        &'a self,
        contract_id: &str,
    ) -> impl Iterator<Item = (NaiveDate, f64)> + 'a {
        self.readings
            .get(contract_id)
            .into_iter()
            .flat_map(|series| series.iter())
    }

    /// Return a contract's [`ReadingSeries`], if one exists.
    pub fn reading_series(&self, contract_id: &str) -> Option<&ReadingSeries> {
        self.readings.get(contract_id)
    }

    /// Value at the most recent recorded date, `None` when no reading has
    /// been recorded. This never fails.
    pub fn latest_reading(&self, contract_id: &str) -> Option<f64> {
        self.readings
            .get(contract_id)
            .and_then(|series| series.latest())
    }

    /// Estimates the reading at `date` from the two bracketing recorded
    /// readings (see [`ReadingSeries::estimate`]).
    ///
    /// A contract without a series estimates like an empty one.
    pub fn estimated_reading(&self, contract_id: &str, date: NaiveDate) -> ResultUtility<f64> {
        match self.readings.get(contract_id) {
            Some(series) => series.estimate(date),
            None => Err(UtilityError::InsufficientData(
                "at least two readings are required".to_string(),
            )),
        }
    }

    /// Consumption between two dates: the difference of the estimated
    /// readings at `date_end` and `date_start`. Estimation errors propagate
    /// unchanged from either boundary.
    pub fn consumption(
        &self,
        contract_id: &str,
        date_start: NaiveDate,
        date_end: NaiveDate,
    ) -> ResultUtility<f64> {
        let start_reading = self.estimated_reading(contract_id, date_start)?;
        let end_reading = self.estimated_reading(contract_id, date_end)?;
        Ok(end_reading - start_reading)
    }

    /// Month-by-month consumption breakdown over `[month_start, month_end]`
    /// of `year`, one [`MonthlyBill`] per month in ascending order.
    ///
    /// Each month runs from its first day to the first day of the next
    /// month (December rolls into January). The breakdown is atomic: the
    /// first boundary that cannot be estimated aborts the whole range.
    pub fn bill_breakdown(
        &self,
        contract_id: &str,
        month_start: u32,
        month_end: u32,
        year: i32,
    ) -> ResultUtility<Vec<MonthlyBill>> {
        let mut breakdown = Vec::new();
        for month in month_start..=month_end {
            let (period_start, period_end) = billing::month_span(year, month)?;
            let start_reading = self.estimated_reading(contract_id, period_start)?;
            let end_reading = self.estimated_reading(contract_id, period_end)?;
            breakdown.push(MonthlyBill::new(
                period_start,
                period_end,
                start_reading,
                end_reading,
            ));
        }
        Ok(breakdown)
    }
}
