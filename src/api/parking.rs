//! `parking` segment endpoints.

use serde::{Deserialize, Serialize};

use crate::api::export::CsvExport;
use crate::api::{Message, User};
use crate::client::{ClientInstance, ClientResult};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Lot {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    pub price_per_hour: f64,
    pub total_spots: u32,
    pub available_spots: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LotSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Spot {
    pub id: i64,
    pub spot_number: String,
    pub is_occupied: bool,
    #[serde(default)]
    pub vehicle_plate: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LotSpots {
    pub lot: LotSummary,
    pub spots: Vec<Spot>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SpotInfo {
    pub lot_name: Option<String>,
    pub spot_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    pub id: i64,
    pub license_plate: String,
    pub is_parked: bool,
    #[serde(default)]
    pub spot_info: Option<SpotInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Created {
    #[serde(default)]
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParkRequest {
    pub vehicle_no: String,
    pub spot_id: i64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ParkResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub spot_id: Option<i64>,
    pub spot_number: String,
    pub lot_name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub vehicle_no: String,
    #[serde(default)]
    pub spot_id: Option<i64>,
    #[serde(default)]
    pub parking_time: String,
    #[serde(default)]
    pub released_time: String,
    #[serde(default)]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub price_per_hour: f64,
    pub status: String,
}

impl HistoryEntry {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct Lots {
    lots: Vec<Lot>,
}

#[derive(Deserialize)]
struct Vehicles {
    vehicles: Vec<Vehicle>,
}

#[derive(Deserialize)]
struct History {
    history: Vec<HistoryEntry>,
}

/// Endpoints under `/api/parking`.
#[derive(Debug, Clone, Copy)]
pub struct ParkingApi<'a> {
    client: &'a ClientInstance,
}

impl<'a> ParkingApi<'a> {
    pub fn new(client: &'a ClientInstance) -> Self {
        Self { client }
    }

    pub async fn lots(&self) -> ClientResult<Vec<Lot>> {
        Ok(self.client.get::<Lots>("/lots").await?.lots)
    }

    pub async fn lot_spots(&self, lot_id: i64) -> ClientResult<LotSpots> {
        self.client.get(&format!("/lots/{}/spots", lot_id)).await
    }

    pub async fn vehicles(&self) -> ClientResult<Vec<Vehicle>> {
        Ok(self.client.get::<Vehicles>("/vehicles").await?.vehicles)
    }

    pub async fn add_vehicle(&self, license_plate: &str) -> ClientResult<Created> {
        self.client
            .post("/vehicles", &serde_json::json!({ "license_plate": license_plate }))
            .await
    }

    pub async fn park(&self, request: &ParkRequest) -> ClientResult<ParkResponse> {
        self.client.post("/park", request).await
    }

    pub async fn unpark(&self, vehicle_id: i64) -> ClientResult<ParkResponse> {
        self.client
            .post("/unpark", &serde_json::json!({ "vehicle_id": vehicle_id }))
            .await
    }

    /// Park in the lowest-numbered free spot of a lot.
    pub async fn auto_park(&self, vehicle_id: i64, lot_id: i64) -> ClientResult<ParkResponse> {
        self.client
            .post(
                "/auto-park",
                &serde_json::json!({ "vehicle_id": vehicle_id, "lot_id": lot_id }),
            )
            .await
    }

    pub async fn history(&self) -> ClientResult<Vec<HistoryEntry>> {
        Ok(self.client.get::<History>("/history").await?.history)
    }

    pub async fn refresh_history(&self) -> ClientResult<Message> {
        self.client.post("/history/refresh", &serde_json::json!({})).await
    }

    pub async fn me(&self) -> ClientResult<User> {
        self.client.get("/me").await
    }

    pub async fn update_me(&self, update: &ProfileUpdate) -> ClientResult<Message> {
        self.client.put("/me", update).await
    }

    /// CSV export of the caller's parking history.
    pub fn export(&self) -> CsvExport<'a> {
        CsvExport::new(self.client)
    }
}
