use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TripStatus {
    Pending,
    Accepted,
    Confirmed,
    Completed,
    Rejected,
    Canceled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
            Self::Canceled => "Canceled",
        }
    }

    pub fn all() -> &'static [Self] {
        const VALUES: [TripStatus; 6] = [
            TripStatus::Pending,
            TripStatus::Accepted,
            TripStatus::Confirmed,
            TripStatus::Completed,
            TripStatus::Rejected,
            TripStatus::Canceled,
        ];
        &VALUES
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected | Self::Canceled)
    }

    /// Edges of the trip lifecycle graph.
    pub fn can_transition_to(&self, next: TripStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted)
                | (Self::Pending, Self::Rejected)
                | (Self::Accepted, Self::Confirmed)
                | (Self::Accepted, Self::Canceled)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::Canceled)
        )
    }
}

impl FromStr for TripStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            "canceled" | "cancelled" => Ok(Self::Canceled),
            _ => Err(()),
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
