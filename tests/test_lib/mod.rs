//! Common library module for integration tests
// See https://doc.rust-lang.org/book/ch11-03-test-organization.html#submodules-in-integration-tests
#![allow(dead_code)]

use std::{collections::BTreeMap, fmt, num::ParseIntError, str::FromStr};

use time::{macros::date, macros::datetime, Date, OffsetDateTime};

/// Identifier in the hyphenated `8-4-4-4-12` hex form, for example `4a7a9e1c-0b3d-4c8e-9f21-5d6e7f8a9b0c`
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct EntityId(pub u128);

#[derive(PartialEq, Debug)]
pub enum EntityIdError {
    Format,
    Digits(ParseIntError),
}

impl FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let groups: Vec<&str> = s.split('-').collect();
        let lengths: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        if lengths != [8, 4, 4, 4, 12] {
            return Err(EntityIdError::Format);
        }
        u128::from_str_radix(&groups.concat(), 16)
            .map(EntityId)
            .map_err(EntityIdError::Digits)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = format!("{:032x}", self.0);
        write!(
            f,
            "{}-{}-{}-{}-{}",
            &hex[..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..]
        )
    }
}

bracejson::json_text_value!(EntityId);

bracejson::json_object! {
    #[derive(Default, PartialEq, Clone, Debug)]
    pub struct Product {
        pub id: Option<EntityId>,
        pub name: Option<String>,
        pub price: Option<f64>,
        pub prices: Option<BTreeMap<EntityId, f64>>,
    }
}

bracejson::json_object! {
    #[derive(Default, PartialEq, Clone, Debug)]
    pub struct Order {
        pub id: Option<EntityId>,
        pub products: Option<Vec<Product>>,
        pub create_date: Option<OffsetDateTime> => "createDate",
    }
}

bracejson::json_object! {
    #[derive(Default, PartialEq, Clone, Debug)]
    pub struct Customer {
        pub id: Option<EntityId>,
        pub first_name: Option<String> => "firstName",
        pub last_name: Option<String> => "lastName",
        pub date_birth: Option<Date> => "dateBirth",
        pub orders: Option<Vec<Order>>,
    }
}

pub const CUSTOMER_ID: EntityId = EntityId(0x4a7a9e1c_0b3d_4c8e_9f21_5d6e7f8a9b0c);

/// Creates a customer with all fields set, including nested orders and products
pub fn sample_customer() -> Customer {
    let tea = Product {
        id: Some(EntityId(1)),
        name: Some("Green \"Sencha\" tea".to_owned()),
        price: Some(4.25),
        prices: Some(BTreeMap::from([(EntityId(10), 4.0), (EntityId(11), 4.5)])),
    };
    let cup = Product {
        id: Some(EntityId(2)),
        name: Some("Cup [large], {blue}".to_owned()),
        price: Some(12.0),
        prices: Some(BTreeMap::new()),
    };

    Customer {
        id: Some(CUSTOMER_ID),
        first_name: Some("Reuben".to_owned()),
        last_name: Some("Ortiz".to_owned()),
        date_birth: Some(date!(1990 - 07 - 14)),
        orders: Some(vec![
            Order {
                id: Some(EntityId(100)),
                products: Some(vec![tea.clone(), cup]),
                create_date: Some(datetime!(2024-03-01 12:30:45 +02:00)),
            },
            Order {
                id: Some(EntityId(101)),
                products: Some(vec![tea]),
                create_date: Some(datetime!(2024-03-02 08:00:00.25 UTC)),
            },
        ]),
    }
}
