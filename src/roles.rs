//! Quick start job roles

/// A role the candidate can practice for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobRole
{   pub name: &'static str
  , pub description: &'static str
}

const fn role(name: &'static str, description: &'static str) -> JobRole
{   JobRole { name, description }
}

pub const JOB_ROLES: &[JobRole] = &[
  role("Host / Hostess", "Greeting and seating guests.")
, role("Server / Waiter / Waitress",
    "Taking orders and providing table service.")
, role("Busser / Runner", "Clearing tables and supporting staff.")
, role("Bartender",
    "Preparing drinks and serving customers at the bar.")
, role("Barback", "Assisting the bartender with supplies.")
, role("Cashier", "Handling transactions and customer payments.")
, role("Executive Chef / Head Chef",
    "Leading and managing the kitchen team.")
, role("Sous Chef",
    "Assisting the head chef and overseeing kitchen operations.")
, role("Line Cook", "Preparing dishes on the cooking line.")
, role("Prep Cook", "Preparing ingredients and food items.")
, role("Pastry Chef / Baker",
    "Creating desserts, pastries, and baked goods.")
, role("Dishwasher", "Cleaning kitchenware and equipment.")
, role("Kitchen Porter", "Maintaining kitchen cleanliness and hygiene.")
, role("Restaurant Manager", "Overseeing all restaurant operations.")
, role("Assistant Manager", "Supporting the manager in daily duties.")
, role("Shift Supervisor",
    "Managing staff and operations during a shift.")
, role("Food & Beverage Manager",
    "Managing all food and beverage services.")
, role("Banquet Manager", "Planning and executing banquet events.")
, role("Steward", "Handling supplies and maintenance tasks.")
, role("Barista", "Preparing and serving coffee-based drinks.")
, role("Drive-Thru Operator",
    "Serving customers through the drive-thru.")
, role("Delivery Driver", "Delivering orders to customers.")
, role("Expediter (Expo)",
    "Ensuring orders are accurate and delivered on time.")
];

/// Case insensitive lookup by name
pub fn find(name: &str) -> Option<&'static JobRole>
{   let name = name.trim();
    JOB_ROLES.iter().find(|r| r.name.eq_ignore_ascii_case(name))
}
