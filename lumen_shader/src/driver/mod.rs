/// Driver module - native driver seam and the headless driver

// Module declarations
pub mod driver;
pub mod mock_driver;

// Re-export everything from driver.rs
pub use driver::*;

// Re-export the headless driver
pub use mock_driver::MockShaderDriver;
