//! Read-only queries against the `locations` table.

mod read;
mod row;

pub use read::{
    get_location_by_store_id, list_cities, list_locations, list_locations_by_city,
    list_locations_by_state, list_states,
};
