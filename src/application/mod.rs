pub mod acquisition;

pub use acquisition::{AcquisitionChain, AcquisitionOptions, AcquisitionResult};
