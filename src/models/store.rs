use crate::geo::Coordinate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store model representing a retail location that sells eggs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub hours: Option<String>,
}

impl Store {
    /// Location of the store as a coordinate pair
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Fields for creating a Store; the repository assigns the id
#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub hours: Option<String>,
}

impl NewStore {
    /// Attach a repository-assigned id, producing the stored record
    pub fn into_store(self, id: i64) -> Store {
        Store {
            id,
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            latitude: self.latitude,
            longitude: self.longitude,
            phone: self.phone,
            website: self.website,
            hours: self.hours,
        }
    }
}

/// Latest known price per egg variant, absent where never observed
#[derive(Debug, Clone, Serialize)]
pub struct LatestPrices {
    pub white: Option<Decimal>,
    pub brown: Option<Decimal>,
}

/// Store detail payload: the store plus its latest price per variant
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDetails {
    #[serde(flatten)]
    pub store: Store,
    pub prices: LatestPrices,
}
