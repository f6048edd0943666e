mod controller;

pub use controller::StabilizationController;
