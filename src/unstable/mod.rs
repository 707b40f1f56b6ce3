pub mod many_pivot;
pub mod rust_std;
