pub mod scenario;
pub mod util;

pub use util::{scenario_key, split_csv};
