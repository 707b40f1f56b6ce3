pub mod rust_std;
pub mod three_lane;
