//! # JSON Keyed Store
//!
//! File-backed store holding four top-level collections in one JSON
//! document:
//!
//! ```text
//! {
//!   "rfqs":         [ ... ],
//!   "suppliers":    [ ... ],
//!   "marketPrices": [ ... ],
//!   "buyerProfile": { ... } | null
//! }
//! ```
//!
//! On load, every value under a key containing `Date` or `At`, or equal to
//! `date`, is re-hydrated as a timestamp before typed decoding: lenient
//! date strings and epoch-millisecond numbers are normalized to canonical
//! RFC 3339. Values that do not parse as dates are left untouched.
//!
//! Writes go through a temporary file and a rename, so a crash never leaves
//! a half-written store behind. A failed write leaves the in-memory state
//! unchanged.

use crate::domain::entities::{BuyerProfile, MarketPrice, Rfq, Supplier};
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{RfqId, SupplierId, Timestamp};
use crate::infrastructure::persistence::traits::{
    BuyerProfileRepository, MarketPriceRepository, RepositoryResult, RfqChange, RfqRepository,
    SupplierRepository,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Store key of the RFQ collection.
pub const RFQS_KEY: &str = "rfqs";
/// Store key of the supplier collection.
pub const SUPPLIERS_KEY: &str = "suppliers";
/// Store key of the market price collection.
pub const MARKET_PRICES_KEY: &str = "marketPrices";
/// Store key of the buyer profile.
pub const BUYER_PROFILE_KEY: &str = "buyerProfile";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreState {
    #[serde(default)]
    rfqs: Vec<Rfq>,
    #[serde(default)]
    suppliers: Vec<Supplier>,
    #[serde(default)]
    market_prices: Vec<MarketPrice>,
    #[serde(default)]
    buyer_profile: Option<BuyerProfile>,
}

/// Returns true if values under `key` are dates.
#[must_use]
pub fn is_date_key(key: &str) -> bool {
    key == "date" || key.contains("Date") || key.contains("At")
}

fn revive_value(value: &mut Value) {
    let revived = match value {
        Value::String(raw) => Timestamp::parse_lenient(raw),
        Value::Number(n) => n.as_i64().and_then(Timestamp::from_millis),
        _ => None,
    };
    if let Some(ts) = revived {
        *value = Value::String(ts.to_iso8601());
    }
}

/// Normalizes every date-keyed value in `value`, recursively.
pub fn revive_dates(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if is_date_key(key) {
                    revive_value(child);
                }
                revive_dates(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(revive_dates),
        _ => {}
    }
}

/// JSON file-backed repository for RFQs and reference data.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    state: RwLock<StoreState>,
}

impl JsonStore {
    /// Opens the store at `path`, starting empty if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the file cannot be read, or
    /// `RepositoryError::Serialization` if it is not a valid store document.
    pub fn open(path: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let path = path.into();
        let state = match fs::read(&path) {
            Ok(bytes) => {
                let mut doc: Value = serde_json::from_slice(&bytes)?;
                revive_dates(&mut doc);
                let state: StoreState = serde_json::from_value(doc)?;
                info!(
                    path = %path.display(),
                    rfqs = state.rfqs.len(),
                    suppliers = state.suppliers.len(),
                    "loaded json store"
                );
                state
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "store file missing, starting empty");
                StoreState::default()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Returns the store file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the current state to disk.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if serialization or the write fails.
    pub fn flush(&self) -> RepositoryResult<()> {
        let state = self.state.read();
        self.persist(&state)
    }

    fn persist(&self, state: &StoreState) -> RepositoryResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "persisted json store");
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> T {
        f(&self.state.read())
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut StoreState) -> T) -> RepositoryResult<T> {
        self.try_mutate(|state| Ok::<T, std::convert::Infallible>(f(state)))?
            .map_err(|never| match never {})
    }

    /// Like `mutate`, but an `Err` from `f` discards the edit unwritten.
    fn try_mutate<T, E>(
        &self,
        f: impl FnOnce(&mut StoreState) -> Result<T, E>,
    ) -> RepositoryResult<Result<T, E>> {
        let mut guard = self.state.write();
        let mut next = guard.clone();
        let out = match f(&mut next) {
            Ok(out) => out,
            Err(err) => return Ok(Err(err)),
        };
        self.persist(&next)?;
        *guard = next;
        Ok(Ok(out))
    }
}

impl RfqRepository for JsonStore {
    fn save(&self, rfq: &Rfq) -> RepositoryResult<()> {
        self.mutate(|state| {
            match state.rfqs.iter_mut().find(|r| r.id() == rfq.id()) {
                Some(stored) => *stored = rfq.clone(),
                None => state.rfqs.push(rfq.clone()),
            }
        })
    }

    fn get(&self, id: &RfqId) -> RepositoryResult<Option<Rfq>> {
        Ok(self.read(|state| state.rfqs.iter().find(|r| r.id() == *id).cloned()))
    }

    fn update(
        &self,
        id: &RfqId,
        change: RfqChange<'_>,
    ) -> RepositoryResult<Option<DomainResult<Rfq>>> {
        let outcome = self.try_mutate(|state| {
            let Some(stored) = state.rfqs.iter_mut().find(|r| r.id() == *id) else {
                return Err(None);
            };
            change(stored).map_err(Some)?;
            Ok(stored.clone())
        })?;
        Ok(match outcome {
            Ok(rfq) => Some(Ok(rfq)),
            Err(Some(err)) => Some(Err(err)),
            Err(None) => None,
        })
    }

    fn find_by_invite_token(&self, token: &str) -> RepositoryResult<Option<Rfq>> {
        Ok(self.read(|state| {
            state
                .rfqs
                .iter()
                .find(|r| r.invite_by_token(token).is_some())
                .cloned()
        }))
    }

    fn get_all(&self) -> RepositoryResult<Vec<Rfq>> {
        let mut all = self.read(|state| state.rfqs.clone());
        all.sort_by_key(Rfq::created_at);
        Ok(all)
    }

    fn delete(&self, id: &RfqId) -> RepositoryResult<bool> {
        if RfqRepository::get(self, id)?.is_none() {
            return Ok(false);
        }
        self.mutate(|state| state.rfqs.retain(|r| r.id() != *id))?;
        Ok(true)
    }

    fn count(&self) -> RepositoryResult<u64> {
        Ok(self.read(|state| state.rfqs.len() as u64))
    }
}

impl SupplierRepository for JsonStore {
    fn save(&self, supplier: &Supplier) -> RepositoryResult<()> {
        self.mutate(|state| {
            match state.suppliers.iter_mut().find(|s| s.id == supplier.id) {
                Some(stored) => *stored = supplier.clone(),
                None => state.suppliers.push(supplier.clone()),
            }
        })
    }

    fn get(&self, id: &SupplierId) -> RepositoryResult<Option<Supplier>> {
        Ok(self.read(|state| state.suppliers.iter().find(|s| s.id == *id).cloned()))
    }

    fn get_all(&self) -> RepositoryResult<Vec<Supplier>> {
        Ok(self.read(|state| state.suppliers.clone()))
    }

    fn delete(&self, id: &SupplierId) -> RepositoryResult<bool> {
        if SupplierRepository::get(self, id)?.is_none() {
            return Ok(false);
        }
        self.mutate(|state| state.suppliers.retain(|s| s.id != *id))?;
        Ok(true)
    }
}

impl MarketPriceRepository for JsonStore {
    fn add(&self, price: &MarketPrice) -> RepositoryResult<()> {
        self.mutate(|state| state.market_prices.push(price.clone()))
    }

    fn get_all(&self) -> RepositoryResult<Vec<MarketPrice>> {
        Ok(self.read(|state| state.market_prices.clone()))
    }
}

impl BuyerProfileRepository for JsonStore {
    fn get_profile(&self) -> RepositoryResult<Option<BuyerProfile>> {
        Ok(self.read(|state| state.buyer_profile.clone()))
    }

    fn save_profile(&self, profile: &BuyerProfile) -> RepositoryResult<()> {
        self.mutate(|state| state.buyer_profile = Some(profile.clone()))
    }
}
