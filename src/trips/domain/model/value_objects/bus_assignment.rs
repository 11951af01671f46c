use serde::{Deserialize, Serialize};
use validator::Validate;

/// One bus serving a trip, as stored in the trip's `buses` array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BusAssignment {
    #[validate(length(min = 1, max = 64))]
    pub bus_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 16))]
    pub plate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 120))]
    pub driver_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 120))]
    pub capacity: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 120))]
    pub passengers: Option<u32>,
}

impl BusAssignment {
    pub fn new(bus_id: impl Into<String>) -> Self {
        Self {
            bus_id: bus_id.into(),
            plate: None,
            driver_name: None,
            capacity: None,
            passengers: None,
        }
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn with_passengers(mut self, passengers: u32) -> Self {
        self.passengers = Some(passengers);
        self
    }

    pub fn is_overbooked(&self) -> bool {
        matches!((self.capacity, self.passengers), (Some(capacity), Some(passengers)) if passengers > capacity)
    }
}
