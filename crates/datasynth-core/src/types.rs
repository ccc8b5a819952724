use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of value an attribute produces.
///
/// Only the basic kinds have a dedicated synthesis path. Every specialized
/// kind is accepted in schemas and synthesized as generic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    String,
    Integer,
    Float,
    Double,
    Boolean,
    Date,
    Datetime,
    Time,
    Enum,

    Email,
    PhoneNumber,
    Url,
    Uuid,
    FirstName,
    LastName,
    FullName,
    City,
    Country,
    Address,
    PostalCode,
    Profession,
    CompanyName,
    ProductName,
    Currency,
    Percentage,

    PositiveInteger,
    NegativeInteger,
    Decimal,
    Price,
    Age,
    Year,

    Text,
    Description,
    Title,
    Slug,
    Password,

    IpAddress,
    MacAddress,
    Json,
    Xml,
}

impl DataType {
    /// Every declared kind, in declaration order.
    pub const ALL: &'static [DataType] = &[
        DataType::String,
        DataType::Integer,
        DataType::Float,
        DataType::Double,
        DataType::Boolean,
        DataType::Date,
        DataType::Datetime,
        DataType::Time,
        DataType::Enum,
        DataType::Email,
        DataType::PhoneNumber,
        DataType::Url,
        DataType::Uuid,
        DataType::FirstName,
        DataType::LastName,
        DataType::FullName,
        DataType::City,
        DataType::Country,
        DataType::Address,
        DataType::PostalCode,
        DataType::Profession,
        DataType::CompanyName,
        DataType::ProductName,
        DataType::Currency,
        DataType::Percentage,
        DataType::PositiveInteger,
        DataType::NegativeInteger,
        DataType::Decimal,
        DataType::Price,
        DataType::Age,
        DataType::Year,
        DataType::Text,
        DataType::Description,
        DataType::Title,
        DataType::Slug,
        DataType::Password,
        DataType::IpAddress,
        DataType::MacAddress,
        DataType::Json,
        DataType::Xml,
    ];

    /// Returns true when the kind has its own synthesis path instead of the
    /// generic text fallback.
    pub fn is_synthesized(self) -> bool {
        matches!(
            self,
            DataType::String
                | DataType::Integer
                | DataType::Float
                | DataType::Double
                | DataType::Boolean
                | DataType::Date
                | DataType::Enum
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Boolean => "boolean",
            DataType::Date => "date",
            DataType::Datetime => "datetime",
            DataType::Time => "time",
            DataType::Enum => "enum",
            DataType::Email => "email",
            DataType::PhoneNumber => "phone_number",
            DataType::Url => "url",
            DataType::Uuid => "uuid",
            DataType::FirstName => "first_name",
            DataType::LastName => "last_name",
            DataType::FullName => "full_name",
            DataType::City => "city",
            DataType::Country => "country",
            DataType::Address => "address",
            DataType::PostalCode => "postal_code",
            DataType::Profession => "profession",
            DataType::CompanyName => "company_name",
            DataType::ProductName => "product_name",
            DataType::Currency => "currency",
            DataType::Percentage => "percentage",
            DataType::PositiveInteger => "positive_integer",
            DataType::NegativeInteger => "negative_integer",
            DataType::Decimal => "decimal",
            DataType::Price => "price",
            DataType::Age => "age",
            DataType::Year => "year",
            DataType::Text => "text",
            DataType::Description => "description",
            DataType::Title => "title",
            DataType::Slug => "slug",
            DataType::Password => "password",
            DataType::IpAddress => "ip_address",
            DataType::MacAddress => "mac_address",
            DataType::Json => "json",
            DataType::Xml => "xml",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
