mod planner;

pub use planner::CameraPlanner;
