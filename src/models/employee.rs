//! Employee model and related types.
//!
//! This module defines the Employee struct, its Role, and the address and
//! coordinate types used for proximity ranking.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// The job role an employee holds.
///
/// Candidate searches for managers use [`Role::Admin`]; the name `Manager`
/// is accepted as an alias when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Works the truck window and serves customers.
    Server,
    /// Drives a truck to and from events.
    Driver,
    /// Manages events and staff.
    #[serde(alias = "Manager")]
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Server => write!(f, "Server"),
            Role::Driver => write!(f, "Driver"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A postal address, optionally already geocoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Street line.
    pub street: String,
    /// City name.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal code.
    pub zip_code: String,
    /// Stored coordinates, when the address has been geocoded.
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl Address {
    /// Returns the address as a single line suitable for geocoding.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::Address;
    ///
    /// let address = Address {
    ///     street: "100 Congress Ave".to_string(),
    ///     city: "Austin".to_string(),
    ///     state: "TX".to_string(),
    ///     zip_code: "78701".to_string(),
    ///     coordinates: None,
    /// };
    /// assert_eq!(address.one_line(), "100 Congress Ave, Austin, TX 78701");
    /// ```
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street, self.city, self.state, self.zip_code
        )
    }
}

/// Where an employee can be located for distance ranking.
#[derive(Debug, Clone, PartialEq)]
pub enum EmployeeLocation {
    /// The employee's address has stored coordinates.
    Located(Coordinates),
    /// The employee has an address that has not been geocoded.
    AddressOnly(String),
    /// The employee has no address on file.
    Unknown,
}

/// Represents an employee who can be scheduled onto shifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// The employee's job role.
    pub role: Role,
    /// Employee-controlled switch; when false the employee is never scheduled.
    pub is_available: bool,
    /// Weekdays the employee is generally available to work.
    #[serde(default, with = "weekday_names")]
    pub availability: Vec<Weekday>,
    /// Home address, if on file.
    #[serde(default)]
    pub address: Option<Address>,
}

impl Employee {
    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if the weekly availability includes `day`.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::{Employee, Role};
    /// use chrono::Weekday;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     first_name: "Ana".to_string(),
    ///     last_name: "Ruiz".to_string(),
    ///     role: Role::Server,
    ///     is_available: true,
    ///     availability: vec![Weekday::Fri, Weekday::Sat],
    ///     address: None,
    /// };
    /// assert!(employee.works_on(Weekday::Sat));
    /// assert!(!employee.works_on(Weekday::Mon));
    /// ```
    pub fn works_on(&self, day: Weekday) -> bool {
        self.availability.contains(&day)
    }

    /// Resolves how this employee can be located.
    pub fn location(&self) -> EmployeeLocation {
        match &self.address {
            Some(Address {
                coordinates: Some(coords),
                ..
            }) => EmployeeLocation::Located(*coords),
            Some(address) => EmployeeLocation::AddressOnly(address.one_line()),
            None => EmployeeLocation::Unknown,
        }
    }
}

/// Returns the full English name of a weekday ("Monday", "Tuesday", ...).
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Serializes weekday lists as full English names.
mod weekday_names {
    use chrono::Weekday;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::weekday_name;

    pub fn serialize<S: Serializer>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(days.iter().map(|day| weekday_name(*day)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Weekday>, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        names
            .iter()
            .map(|name| {
                name.parse::<Weekday>()
                    .map_err(|_| D::Error::custom(format!("unknown weekday '{}'", name)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(address: Option<Address>) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            role: Role::Server,
            is_available: true,
            availability: vec![Weekday::Mon, Weekday::Sat],
            address,
        }
    }

    fn create_test_address(coordinates: Option<Coordinates>) -> Address {
        Address {
            street: "100 Congress Ave".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip_code: "78701".to_string(),
            coordinates,
        }
    }

    #[test]
    fn test_deserialize_employee_with_full_weekday_names() {
        let json = r#"{
            "id": "emp_002",
            "first_name": "Sam",
            "last_name": "Lee",
            "role": "Driver",
            "is_available": true,
            "availability": ["Monday", "Friday"]
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.role, Role::Driver);
        assert_eq!(employee.availability, vec![Weekday::Mon, Weekday::Fri]);
        assert!(employee.address.is_none());
    }

    #[test]
    fn test_manager_alias_maps_to_admin() {
        let role: Role = serde_json::from_str("\"Manager\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"Admin\"");
    }

    #[test]
    fn test_unknown_weekday_is_rejected() {
        let json = r#"{
            "id": "emp_003",
            "first_name": "Sam",
            "last_name": "Lee",
            "role": "Server",
            "is_available": true,
            "availability": ["Funday"]
        }"#;

        let err = serde_json::from_str::<Employee>(json).unwrap_err();
        assert!(err.to_string().contains("unknown weekday 'Funday'"));
    }

    #[test]
    fn test_weekday_serialized_as_full_name() {
        let employee = create_test_employee(None);
        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(value["availability"], serde_json::json!(["Monday", "Saturday"]));
    }

    #[test]
    fn test_location_with_coordinates() {
        let coords = Coordinates::new(30.2672, -97.7431);
        let employee = create_test_employee(Some(create_test_address(Some(coords))));
        assert_eq!(employee.location(), EmployeeLocation::Located(coords));
    }

    #[test]
    fn test_location_address_only() {
        let employee = create_test_employee(Some(create_test_address(None)));
        assert_eq!(
            employee.location(),
            EmployeeLocation::AddressOnly("100 Congress Ave, Austin, TX 78701".to_string())
        );
    }

    #[test]
    fn test_location_unknown() {
        let employee = create_test_employee(None);
        assert_eq!(employee.location(), EmployeeLocation::Unknown);
    }

    #[test]
    fn test_full_name() {
        assert_eq!(create_test_employee(None).full_name(), "Ana Ruiz");
    }

    #[test]
    fn test_weekday_name_covers_week() {
        assert_eq!(weekday_name(Weekday::Mon), "Monday");
        assert_eq!(weekday_name(Weekday::Wed), "Wednesday");
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
    }
}
