pub mod open_data;

pub use open_data::{OpenDataClient, DEFAULT_OPEN_DATA_URL};
