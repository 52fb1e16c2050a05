//! `admin` segment endpoints. The backend rejects non-admin tokens with 403.

use serde::{Deserialize, Serialize};

use crate::api::export::CsvExport;
use crate::api::parking::Spot;
use crate::api::Message;
use crate::client::{ClientInstance, ClientResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_lots: u64,
    pub total_spots: u64,
    pub occupied_spots: u64,
    pub available_spots: u64,
    pub total_vehicles: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CurrentSpot {
    pub lot_name: Option<String>,
    pub spot_number: Option<String>,
    pub license_plate: String,
    pub vehicle_id: i64,
    pub spot_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ManagedUser {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub current_spots: Vec<CurrentSpot>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ManagedLot {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub price_per_hour: f64,
    #[serde(default)]
    pub max_spots: u32,
    pub total_spots: u32,
    pub occupied_spots: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewLot {
    pub name: String,
    pub address: String,
    pub pincode: String,
    pub price_per_hour: f64,
    pub max_spots: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LotCreated {
    #[serde(default)]
    pub message: String,
    pub id: i64,
    pub spots_created: u32,
}

/// Sparse lot edit; only set fields are sent. Shrinking `max_spots` fails
/// if a removed spot is occupied.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LotUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_hour: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_spots: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SpotVehicle {
    pub id: i64,
    pub license_plate: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SpotOccupant {
    pub id: i64,
    #[serde(default)]
    pub full_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// One spot with its occupant, if any.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SpotDetails {
    pub spot_id: i64,
    pub spot_number: String,
    pub status: String,
    pub is_occupied: bool,
    #[serde(default)]
    pub lot_name: Option<String>,
    #[serde(default)]
    pub vehicle: Option<SpotVehicle>,
    #[serde(default)]
    pub user: Option<SpotOccupant>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub est_parking_cost: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LotSearchHit {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub location: String,
    pub price_per_hour: f64,
    pub max_spots: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SpotSearchHit {
    pub id: i64,
    pub spot_number: String,
    /// `occupied` or `available`.
    pub status: String,
    pub lot_id: i64,
    pub lot_name: String,
}

/// Bucket size for the revenue timeseries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevenuePeriod {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl RevenuePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevenuePeriod::Daily => "daily",
            RevenuePeriod::Weekly => "weekly",
            RevenuePeriod::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RevenuePoint {
    /// `YYYY-MM-DD`, `YYYY-WW` or `YYYY-MM` depending on the period.
    pub period: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LotRevenue {
    pub lot_id: i64,
    pub lot_name: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LotOccupancy {
    pub lot_id: i64,
    pub lot_name: String,
    pub total_spots: u32,
    pub occupied_spots: u32,
    pub available_spots: u32,
}

#[derive(Deserialize)]
struct Dashboard {
    stats: DashboardStats,
}

#[derive(Deserialize)]
struct Users {
    users: Vec<ManagedUser>,
}

#[derive(Deserialize)]
struct Lots {
    lots: Vec<ManagedLot>,
}

#[derive(Deserialize)]
struct Spots {
    spots: Vec<Spot>,
}

#[derive(Deserialize)]
struct Hits<T> {
    results: Vec<T>,
}

#[derive(Deserialize)]
struct Timeseries {
    revenue_timeseries: Vec<RevenuePoint>,
}

#[derive(Deserialize)]
struct Revenue {
    revenue_per_lot: Vec<LotRevenue>,
}

#[derive(Deserialize)]
struct Occupancy {
    occupancy_per_lot: Vec<LotOccupancy>,
}

/// Endpoints under `/api/admin`.
#[derive(Debug, Clone, Copy)]
pub struct AdminApi<'a> {
    client: &'a ClientInstance,
}

impl<'a> AdminApi<'a> {
    pub fn new(client: &'a ClientInstance) -> Self {
        Self { client }
    }

    pub async fn dashboard(&self) -> ClientResult<DashboardStats> {
        Ok(self.client.get::<Dashboard>("/dashboard").await?.stats)
    }

    /// All accounts with the `user` role.
    pub async fn users(&self) -> ClientResult<Vec<ManagedUser>> {
        Ok(self.client.get::<Users>("/users").await?.users)
    }

    /// Case-insensitive match on name, email, address or pincode.
    pub async fn search_users(&self, query: &str) -> ClientResult<Vec<ManagedUser>> {
        let results: Hits<ManagedUser> = self
            .client
            .get_with_query("/users/search", &[("query", query)])
            .await?;
        Ok(results.results)
    }

    pub async fn update_user(&self, user_id: i64, update: &UserUpdate) -> ClientResult<Message> {
        self.client.put(&format!("/users/{}", user_id), update).await
    }

    pub async fn delete_user(&self, user_id: i64) -> ClientResult<Message> {
        self.client.delete(&format!("/users/{}", user_id)).await
    }

    pub async fn parking_lots(&self) -> ClientResult<Vec<ManagedLot>> {
        Ok(self.client.get::<Lots>("/parking-lots").await?.lots)
    }

    pub async fn create_parking_lot(&self, lot: &NewLot) -> ClientResult<LotCreated> {
        self.client.post("/parking-lots", lot).await
    }

    pub async fn update_parking_lot(&self, lot_id: i64, update: &LotUpdate) -> ClientResult<Message> {
        self.client.put(&format!("/parking-lots/{}", lot_id), update).await
    }

    /// Rejected by the backend unless every spot in the lot is empty.
    pub async fn delete_parking_lot(&self, lot_id: i64) -> ClientResult<Message> {
        self.client.delete(&format!("/parking-lots/{}", lot_id)).await
    }

    pub async fn lot_spots(&self, lot_id: i64) -> ClientResult<Vec<Spot>> {
        let spots: Spots = self
            .client
            .get(&format!("/parking-lots/{}/spots", lot_id))
            .await?;
        Ok(spots.spots)
    }

    pub async fn spot_details(&self, spot_id: i64) -> ClientResult<SpotDetails> {
        self.client
            .get(&format!("/parking-spots/{}/details", spot_id))
            .await
    }

    /// Case-insensitive match on name, address, pincode or location.
    pub async fn search_parking_lots(&self, query: &str) -> ClientResult<Vec<LotSearchHit>> {
        let hits: Hits<LotSearchHit> = self
            .client
            .get_with_query("/parking-lots/search", &[("query", query)])
            .await?;
        Ok(hits.results)
    }

    /// Case-insensitive match on lot name, spot number or status.
    pub async fn search_parking_spots(&self, query: &str) -> ClientResult<Vec<SpotSearchHit>> {
        let hits: Hits<SpotSearchHit> = self
            .client
            .get_with_query("/parking-spots/search", &[("query", query)])
            .await?;
        Ok(hits.results)
    }

    pub async fn revenue_summary(&self) -> ClientResult<Vec<LotRevenue>> {
        Ok(self.client.get::<Revenue>("/summary/revenue").await?.revenue_per_lot)
    }

    pub async fn occupancy_summary(&self) -> ClientResult<Vec<LotOccupancy>> {
        Ok(self
            .client
            .get::<Occupancy>("/summary/occupancy")
            .await?
            .occupancy_per_lot)
    }

    /// Revenue of completed sessions per period, optionally for one lot.
    pub async fn revenue_timeseries(
        &self,
        period: RevenuePeriod,
        lot_id: Option<i64>,
    ) -> ClientResult<Vec<RevenuePoint>> {
        let mut query = vec![("period", period.as_str().to_string())];
        if let Some(lot_id) = lot_id {
            query.push(("lot_id", lot_id.to_string()));
        }
        let series: Timeseries = self
            .client
            .get_with_query("/summary/revenue/timeseries", &query)
            .await?;
        Ok(series.revenue_timeseries)
    }

    /// CSV export of the caller's parking history.
    pub fn export(&self) -> CsvExport<'a> {
        CsvExport::new(self.client)
    }
}
