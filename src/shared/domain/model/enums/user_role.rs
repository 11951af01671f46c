use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum UserRole {
    Admin,
    SchoolStaff,
    BusCompany,
    Finance,
    TripManager,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SchoolStaff => "school_staff",
            Self::BusCompany => "bus_company",
            Self::Finance => "finance",
            Self::TripManager => "trip_manager",
        }
    }
}

impl FromStr for UserRole {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "admin" => Ok(Self::Admin),
            "school_staff" => Ok(Self::SchoolStaff),
            "bus_company" => Ok(Self::BusCompany),
            "finance" => Ok(Self::Finance),
            "trip_manager" => Ok(Self::TripManager),
            _ => Err(()),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

