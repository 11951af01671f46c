use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum OrganizationType {
    ParentGroup,
    School,
    BusCompany,
}

impl OrganizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParentGroup => "parent_group",
            Self::School => "school",
            Self::BusCompany => "bus_company",
        }
    }

    /// Only schools sit under another organization.
    pub fn accepts_parent(&self) -> bool {
        matches!(self, Self::School)
    }
}

impl FromStr for OrganizationType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "parent_group" => Ok(Self::ParentGroup),
            "school" => Ok(Self::School),
            "bus_company" => Ok(Self::BusCompany),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
