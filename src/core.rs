pub mod board;
pub mod calculation;
pub mod lifecycle;
pub mod month;
pub mod reading;
pub mod role;
